use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::token::Operator;

/// Completed calculations, newest first, bounded to `limit` entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct History {
    entries: VecDeque<String>,
    limit: usize,
}

impl History {
    pub fn new(limit: usize) -> Self {
        History {
            entries: VecDeque::with_capacity(limit),
            limit,
        }
    }

    /// Record a calculation at index 0, dropping the oldest past the limit.
    pub fn push(&mut self, line: String) {
        self.entries.push_front(line);
        self.entries.truncate(self.limit);
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Arithmetic state for one calculator.
///
/// `previous_operand` is set exactly when `pending_operator` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorState {
    /// Operand as typed, or the last formatted result.
    pub current_operand: String,
    pub previous_operand: Option<String>,
    pub pending_operator: Option<Operator>,
    /// The next digit starts a fresh operand.
    pub awaiting_new_entry: bool,
    pub last_result: Option<f64>,
    pub history: History,
}

impl CalculatorState {
    pub fn new(history_limit: usize) -> Self {
        CalculatorState {
            current_operand: "0".to_string(),
            previous_operand: None,
            pending_operator: None,
            awaiting_new_entry: false,
            last_result: None,
            history: History::new(history_limit),
        }
    }

    /// Reset everything except history.
    pub fn reset(&mut self) {
        self.current_operand = "0".to_string();
        self.previous_operand = None;
        self.pending_operator = None;
        self.awaiting_new_entry = false;
        self.last_result = None;
    }

    /// The pending operator together with its left operand.
    pub fn pending(&self) -> Option<(&str, Operator)> {
        match (&self.previous_operand, self.pending_operator) {
            (Some(prev), Some(op)) => Some((prev.as_str(), op)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_is_newest_first_and_bounded() {
        let mut history = History::new(3);
        for i in 0..5 {
            history.push(format!("entry {i}"));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.get(0), Some("entry 4"));
        assert_eq!(history.get(2), Some("entry 2"));
        assert_eq!(history.get(3), None);
        assert_eq!(
            history.iter().collect::<Vec<_>>(),
            vec!["entry 4", "entry 3", "entry 2"]
        );
    }

    #[test]
    fn test_reset_keeps_history() {
        let mut state = CalculatorState::new(50);
        state.current_operand = "42".into();
        state.previous_operand = Some("6".into());
        state.pending_operator = Some(Operator::Multiply);
        state.awaiting_new_entry = true;
        state.history.push("6 × 7 = 42".into());

        state.reset();

        assert_eq!(state.current_operand, "0");
        assert_eq!(state.pending(), None);
        assert!(!state.awaiting_new_entry);
        assert_eq!(state.history.len(), 1);
    }

    #[test]
    fn test_serializes_camel_case() {
        let state = CalculatorState::new(50);
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["currentOperand"], "0");
        assert_eq!(json["awaitingNewEntry"], false);
        assert!(json["pendingOperator"].is_null());
    }
}

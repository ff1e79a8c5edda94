//! Bridge — collects engine callbacks into one `Update` per input.
//!
//! The page never registers callbacks across the WASM boundary. Each press
//! returns what happened, and the JS side plays sounds and animations from
//! the event tags.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

use crate::engine::CalculatorEngine;
use crate::events::EngineEvent;

/// Everything a front end needs after one input.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Update {
    /// Whether the key or action mapped to an input token.
    pub handled: bool,
    pub display: String,
    pub equation: Option<String>,
    /// Event tags in the order the engine emitted them.
    pub events: Vec<&'static str>,
    pub result: Option<f64>,
    pub error: Option<String>,
}

#[derive(Default)]
struct Outbox {
    events: Vec<&'static str>,
    result: Option<f64>,
    error: Option<String>,
}

pub struct Bridge {
    engine: CalculatorEngine,
    outbox: Rc<RefCell<Outbox>>,
}

impl Bridge {
    pub fn new(mut engine: CalculatorEngine) -> Self {
        let outbox = Rc::new(RefCell::new(Outbox::default()));
        {
            let outbox = Rc::clone(&outbox);
            engine.subscribe_notifier(move |event: &EngineEvent| {
                let mut outbox = outbox.borrow_mut();
                outbox.events.push(event.tag());
                if let EngineEvent::Error(err) = event {
                    outbox.error = Some(err.to_string());
                }
            });
        }
        {
            let outbox = Rc::clone(&outbox);
            engine.subscribe_observer(move |value: f64| {
                outbox.borrow_mut().result = Some(value);
            });
        }
        Bridge { engine, outbox }
    }

    pub fn press_key(&mut self, key: &str) -> Update {
        let handled = self.engine.press_key(key).is_some();
        self.flush(handled)
    }

    pub fn press_action(&mut self, action: &str) -> Update {
        let handled = self.engine.press_action(action).is_some();
        self.flush(handled)
    }

    pub fn engine(&self) -> &CalculatorEngine {
        &self.engine
    }

    fn flush(&mut self, handled: bool) -> Update {
        let outbox = std::mem::take(&mut *self.outbox.borrow_mut());
        Update {
            handled,
            display: self.engine.display(),
            equation: self.engine.equation(),
            events: outbox.events,
            result: outbox.result,
            error: outbox.error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bridge() -> Bridge {
        Bridge::new(CalculatorEngine::new())
    }

    #[test]
    fn test_digit_update() {
        let mut b = bridge();
        let update = b.press_key("7");
        assert!(update.handled);
        assert_eq!(update.display, "7");
        assert_eq!(update.events, vec!["digit-entered"]);
        assert_eq!(update.result, None);
    }

    #[test]
    fn test_result_update() {
        let mut b = bridge();
        b.press_key("6");
        let update = b.press_action("multiply");
        assert_eq!(update.equation.as_deref(), Some("6 ×"));
        b.press_key("7");
        let update = b.press_key("Enter");
        assert_eq!(update.display, "42");
        assert_eq!(update.equation, None);
        assert_eq!(update.events, vec!["result-computed"]);
        assert_eq!(update.result, Some(42.0));
    }

    #[test]
    fn test_chained_operator_reports_both_events() {
        let mut b = bridge();
        for key in ["2", "+", "3"] {
            b.press_key(key);
        }
        let update = b.press_key("-");
        assert_eq!(update.events, vec!["result-computed", "operator-set"]);
        assert_eq!(update.result, Some(5.0));
        assert_eq!(update.equation.as_deref(), Some("5 −"));
    }

    #[test]
    fn test_error_update() {
        let mut b = bridge();
        for key in ["9", "/", "0"] {
            b.press_key(key);
        }
        let update = b.press_key("=");
        assert_eq!(update.display, "∞");
        assert_eq!(update.events, vec!["error"]);
        assert_eq!(update.error.as_deref(), Some("division by zero"));

        let update = b.press_key("1");
        assert_eq!(update.display, "1");
        assert_eq!(update.error, None);
    }

    #[test]
    fn test_unmapped_input_is_not_handled() {
        let mut b = bridge();
        let update = b.press_key("Shift");
        assert!(!update.handled);
        assert!(update.events.is_empty());
        assert_eq!(update.display, "0");
    }

    #[test]
    fn test_serializes_camel_case() {
        let mut b = bridge();
        let update = b.press_key("3");
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["handled"], true);
        assert_eq!(json["events"][0], "digit-entered");
        assert!(json["equation"].is_null());
    }
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Symbol used in the equation preview and history lines.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "−",
            Operator::Multiply => "×",
            Operator::Divide => "÷",
        }
    }

    /// Button action name (`data-action` in the page markup).
    pub fn action(self) -> &'static str {
        match self {
            Operator::Add => "add",
            Operator::Subtract => "subtract",
            Operator::Multiply => "multiply",
            Operator::Divide => "divide",
        }
    }

    /// Apply to two parsed operands. The caller checks for a zero divisor.
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Operator::Add => lhs + rhs,
            Operator::Subtract => lhs - rhs,
            Operator::Multiply => lhs * rhs,
            Operator::Divide => lhs / rhs,
        }
    }
}

/// One discrete input event from a keypad or keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputToken {
    Digit(u8),
    Decimal,
    Operator(Operator),
    Equals,
    Clear,
    ToggleSign,
    Percent,
    Backspace,
}

impl InputToken {
    /// Map a keyboard `key` value to a token. Unmapped keys yield `None`.
    pub fn from_key(key: &str) -> Option<InputToken> {
        let token = match key {
            "+" => InputToken::Operator(Operator::Add),
            "-" => InputToken::Operator(Operator::Subtract),
            "*" => InputToken::Operator(Operator::Multiply),
            "/" => InputToken::Operator(Operator::Divide),
            "." | "," => InputToken::Decimal,
            "=" | "Enter" => InputToken::Equals,
            "Escape" | "c" | "C" => InputToken::Clear,
            "%" => InputToken::Percent,
            "Backspace" => InputToken::Backspace,
            _ => return digit(key),
        };
        Some(token)
    }

    /// Map a button action name to a token. Single digits are accepted too.
    pub fn from_action(action: &str) -> Option<InputToken> {
        let token = match action {
            "clear" => InputToken::Clear,
            "equals" => InputToken::Equals,
            "decimal" => InputToken::Decimal,
            "plusminus" => InputToken::ToggleSign,
            "percent" => InputToken::Percent,
            "backspace" => InputToken::Backspace,
            "add" => InputToken::Operator(Operator::Add),
            "subtract" => InputToken::Operator(Operator::Subtract),
            "multiply" => InputToken::Operator(Operator::Multiply),
            "divide" => InputToken::Operator(Operator::Divide),
            _ => return digit(action),
        };
        Some(token)
    }
}

fn digit(s: &str) -> Option<InputToken> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => ch.to_digit(10).map(|d| InputToken::Digit(d as u8)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_keys() {
        for d in 0..=9u8 {
            assert_eq!(
                InputToken::from_key(&d.to_string()),
                Some(InputToken::Digit(d))
            );
        }
        assert_eq!(InputToken::from_key("12"), None);
        assert_eq!(InputToken::from_key(""), None);
    }

    #[test]
    fn test_keyboard_aliases() {
        assert_eq!(InputToken::from_key(","), Some(InputToken::Decimal));
        assert_eq!(InputToken::from_key("Enter"), Some(InputToken::Equals));
        assert_eq!(InputToken::from_key("c"), Some(InputToken::Clear));
        assert_eq!(InputToken::from_key("C"), Some(InputToken::Clear));
        assert_eq!(InputToken::from_key("x"), None);
        assert_eq!(InputToken::from_key("Shift"), None);
    }

    #[test]
    fn test_action_names() {
        assert_eq!(
            InputToken::from_action("plusminus"),
            Some(InputToken::ToggleSign)
        );
        assert_eq!(
            InputToken::from_action("divide"),
            Some(InputToken::Operator(Operator::Divide))
        );
        assert_eq!(InputToken::from_action("7"), Some(InputToken::Digit(7)));
        assert_eq!(InputToken::from_action("sqrt"), None);
    }

    #[test]
    fn test_operator_names_roundtrip_through_actions() {
        for op in [
            Operator::Add,
            Operator::Subtract,
            Operator::Multiply,
            Operator::Divide,
        ] {
            assert_eq!(
                InputToken::from_action(op.action()),
                Some(InputToken::Operator(op))
            );
        }
    }

    #[test]
    fn test_symbols() {
        assert_eq!(Operator::Subtract.symbol(), "−");
        assert_eq!(Operator::Multiply.symbol(), "×");
        assert_eq!(Operator::Divide.symbol(), "÷");
        assert_eq!(Operator::Divide.apply(9.0, 3.0), 3.0);
    }
}

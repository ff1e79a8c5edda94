//! CalculatorEngine — interprets input tokens into a running computation.
//!
//! Every operation runs to completion synchronously and then pushes the new
//! display to the subscribed renderers. Errors reset the engine to its
//! cleared state; the error marker stays on the display until the next input.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::error::{CalcError, ConfigError};
use crate::events::{EngineEvent, Notifier, Renderer, ResultObserver, Subscribers};
use crate::format::{format_display, format_result, number_to_string};
use crate::state::{CalculatorState, History};
use crate::token::{InputToken, Operator};

/// A successfully applied operator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Calculation {
    pub lhs: f64,
    pub operator: Operator,
    pub rhs: f64,
    /// The formatted result, as it now appears in the current operand.
    pub display: String,
    /// The formatted result parsed back, so observers see what the user sees.
    pub value: f64,
}

impl Calculation {
    /// The line recorded in history.
    pub fn history_line(&self) -> String {
        format!(
            "{} {} {} = {}",
            number_to_string(self.lhs),
            self.operator.symbol(),
            number_to_string(self.rhs),
            self.display
        )
    }
}

/// `Ok(None)` means the input did not complete a calculation.
pub type PressResult = Result<Option<Calculation>, CalcError>;

pub struct CalculatorEngine {
    config: EngineConfig,
    state: CalculatorState,
    error_marker: Option<&'static str>,
    subscribers: Subscribers,
}

impl Default for CalculatorEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorEngine {
    pub fn new() -> Self {
        Self::build(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EngineConfig) -> Self {
        info!(
            max_digits = config.max_digits,
            decimal_places = config.decimal_places,
            history_limit = config.history_limit,
            "calculator engine ready"
        );
        CalculatorEngine {
            state: CalculatorState::new(config.history_limit),
            config,
            error_marker: None,
            subscribers: Subscribers::default(),
        }
    }

    // ── Subscriptions ───────────────────────────────────────

    pub fn subscribe_renderer(&mut self, renderer: impl Renderer + 'static) {
        self.subscribers.add_renderer(Box::new(renderer));
    }

    pub fn subscribe_notifier(&mut self, notifier: impl Notifier + 'static) {
        self.subscribers.add_notifier(Box::new(notifier));
    }

    pub fn subscribe_observer(&mut self, observer: impl ResultObserver + 'static) {
        self.subscribers.add_observer(Box::new(observer));
    }

    // ── Accessors ───────────────────────────────────────────

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    pub fn history(&self) -> &History {
        &self.state.history
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The text a renderer should show right now.
    pub fn display(&self) -> String {
        match self.error_marker {
            Some(marker) => marker.to_string(),
            None => format_display(&self.state.current_operand, self.config.display_max_chars),
        }
    }

    /// `"{previous} {symbol}"` while an operator is pending.
    pub fn equation(&self) -> Option<String> {
        self.state
            .pending()
            .map(|(prev, op)| format!("{prev} {}", op.symbol()))
    }

    // ── Input ───────────────────────────────────────────────

    /// Dispatch one input token.
    pub fn press(&mut self, token: InputToken) -> PressResult {
        match token {
            InputToken::Digit(d) => match char::from_digit(u32::from(d), 10) {
                Some(ch) => {
                    self.input_digit(ch);
                }
                None => warn!(digit = d, "digit out of range"),
            },
            InputToken::Decimal => {
                self.input_digit('.');
            }
            InputToken::Operator(op) => return self.set_operator(op),
            InputToken::Equals => return self.evaluate(),
            InputToken::Clear => self.clear(),
            InputToken::ToggleSign => self.toggle_sign(),
            InputToken::Percent => self.percent()?,
            InputToken::Backspace => self.backspace(),
        }
        Ok(None)
    }

    /// Dispatch a keyboard key. Unmapped keys yield `None` and change nothing.
    pub fn press_key(&mut self, key: &str) -> Option<PressResult> {
        match InputToken::from_key(key) {
            Some(token) => Some(self.press(token)),
            None => {
                debug!(key, "unmapped key");
                None
            }
        }
    }

    /// Dispatch a button action name. Unknown actions yield `None`.
    pub fn press_action(&mut self, action: &str) -> Option<PressResult> {
        match InputToken::from_action(action) {
            Some(token) => Some(self.press(token)),
            None => {
                warn!(action, "unknown action");
                None
            }
        }
    }

    /// Append a digit or decimal point. Returns `false` if the input was
    /// rejected (second decimal point, operand full, not a digit).
    pub fn input_digit(&mut self, d: char) -> bool {
        let had_marker = self.begin();
        if !(d.is_ascii_digit() || d == '.') {
            warn!(input = %d, "rejected non-digit input");
            return self.rejected(had_marker);
        }

        let s = &mut self.state;
        if s.awaiting_new_entry || is_exponent_form(&s.current_operand) {
            s.current_operand = if d == '.' { "0.".to_string() } else { d.to_string() };
            s.awaiting_new_entry = false;
        } else if d == '.' && s.current_operand.contains('.') {
            return self.rejected(had_marker);
        } else if d != '.' && (s.current_operand == "0" || s.current_operand == "-0") {
            s.current_operand.pop();
            s.current_operand.push(d);
        } else if s.current_operand.chars().count() < self.config.max_digits {
            s.current_operand.push(d);
        } else {
            debug!(max_digits = self.config.max_digits, "operand full");
            return self.rejected(had_marker);
        }

        self.subscribers.notify(&EngineEvent::DigitEntered);
        self.render();
        true
    }

    /// Store `op` as the pending operator, first resolving an earlier one if
    /// a new operand was entered since. Returns that earlier calculation.
    pub fn set_operator(&mut self, op: Operator) -> PressResult {
        self.begin();
        let chained = if self.state.pending_operator.is_some() && !self.state.awaiting_new_entry {
            self.evaluate()?
        } else {
            None
        };

        let s = &mut self.state;
        s.previous_operand = Some(s.current_operand.clone());
        s.pending_operator = Some(op);
        s.awaiting_new_entry = true;
        debug!(operator = op.action(), previous = %s.current_operand, "operator set");

        self.subscribers.notify(&EngineEvent::OperatorSet);
        self.render();
        Ok(chained)
    }

    /// Apply the pending operator. Without one this is a no-op returning
    /// `Ok(None)`.
    pub fn evaluate(&mut self) -> PressResult {
        self.begin();
        let Some((prev, op)) = self.state.pending() else {
            debug!("evaluate with nothing pending");
            return Ok(None);
        };
        let prev = prev.to_string();

        let lhs = parse_operand(&prev).map_err(|e| self.fail(e))?;
        let rhs = parse_operand(&self.state.current_operand).map_err(|e| self.fail(e))?;
        if op == Operator::Divide && rhs == 0.0 {
            return Err(self.fail(CalcError::DivisionByZero));
        }
        let raw = op.apply(lhs, rhs);
        if !raw.is_finite() {
            return Err(self.fail(CalcError::NonFiniteResult));
        }

        let display = format_result(raw, self.config.decimal_places);
        let calc = Calculation {
            lhs,
            operator: op,
            rhs,
            value: display.parse().unwrap_or(raw),
            display,
        };
        debug!(line = %calc.history_line(), "result computed");

        let s = &mut self.state;
        s.history.push(calc.history_line());
        s.current_operand = calc.display.clone();
        s.previous_operand = None;
        s.pending_operator = None;
        s.awaiting_new_entry = true;
        s.last_result = Some(calc.value);

        self.subscribers.notify(&EngineEvent::ResultComputed);
        self.subscribers.observe(calc.value);
        self.render();
        Ok(Some(calc))
    }

    /// Flip the leading minus sign. A lone `"0"` stays unsigned.
    pub fn toggle_sign(&mut self) {
        self.begin();
        let operand = &mut self.state.current_operand;
        if *operand != "0" {
            if operand.starts_with('-') {
                operand.remove(0);
            } else {
                operand.insert(0, '-');
            }
        }
        self.render();
    }

    /// Divide the current operand by 100.
    pub fn percent(&mut self) -> Result<(), CalcError> {
        self.begin();
        let value = parse_operand(&self.state.current_operand).map_err(|e| self.fail(e))?;
        self.state.current_operand = format_result(value / 100.0, self.config.decimal_places);
        self.render();
        Ok(())
    }

    /// Drop the last typed character. A shown result or a scientific operand
    /// is not editable text, so it is cleared to `"0"` instead.
    pub fn backspace(&mut self) {
        self.begin();
        let s = &mut self.state;
        let showing_result = s.awaiting_new_entry && s.pending_operator.is_none();
        if showing_result || is_exponent_form(&s.current_operand) {
            s.current_operand = "0".to_string();
            s.awaiting_new_entry = false;
        } else {
            s.current_operand.pop();
            if s.current_operand.is_empty() || s.current_operand == "-" {
                s.current_operand = "0".to_string();
            }
        }
        self.render();
    }

    /// Reset operands, operator and flags. History is kept.
    pub fn clear(&mut self) {
        self.begin();
        self.state.reset();
        debug!(history = self.state.history.len(), "cleared");
        self.render();
    }

    // ── Internals ───────────────────────────────────────────

    /// Drop any error marker ahead of new input. Returns whether one was shown.
    fn begin(&mut self) -> bool {
        self.error_marker.take().is_some()
    }

    fn rejected(&mut self, had_marker: bool) -> bool {
        if had_marker {
            self.render();
        }
        false
    }

    fn fail(&mut self, err: CalcError) -> CalcError {
        warn!(error = %err, "calculation failed");
        self.state.reset();
        self.error_marker = Some(err.marker());
        self.subscribers.notify(&EngineEvent::Error(err.clone()));
        self.render();
        err
    }

    fn render(&mut self) {
        let display = self.display();
        let equation = self.equation();
        self.subscribers.render(&display, equation.as_deref());
    }
}

fn is_exponent_form(operand: &str) -> bool {
    operand.contains(['e', 'E'])
}

fn parse_operand(text: &str) -> Result<f64, CalcError> {
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CalcError::InvalidInput {
            text: text.to_string(),
        }),
    }
}

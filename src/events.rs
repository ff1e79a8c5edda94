//! Collaborator seams: the engine pushes to these and never reads back.

use crate::error::CalcError;

/// Discrete events a caller can hang sound or visual effects on.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    DigitEntered,
    OperatorSet,
    ResultComputed,
    Error(CalcError),
}

impl EngineEvent {
    pub fn tag(&self) -> &'static str {
        match self {
            EngineEvent::DigitEntered => "digit-entered",
            EngineEvent::OperatorSet => "operator-set",
            EngineEvent::ResultComputed => "result-computed",
            EngineEvent::Error(_) => "error",
        }
    }
}

/// Receives the display string and equation preview after every change.
pub trait Renderer {
    fn render(&mut self, display: &str, equation: Option<&str>);
}

pub trait Notifier {
    fn notify(&mut self, event: &EngineEvent);
}

/// Receives the numeric value of every successful evaluation.
pub trait ResultObserver {
    fn observe(&mut self, result: f64);
}

impl<F: FnMut(&str, Option<&str>)> Renderer for F {
    fn render(&mut self, display: &str, equation: Option<&str>) {
        self(display, equation)
    }
}

impl<F: FnMut(&EngineEvent)> Notifier for F {
    fn notify(&mut self, event: &EngineEvent) {
        self(event)
    }
}

impl<F: FnMut(f64)> ResultObserver for F {
    fn observe(&mut self, result: f64) {
        self(result)
    }
}

/// Subscriber lists owned by one engine.
#[derive(Default)]
pub struct Subscribers {
    renderers: Vec<Box<dyn Renderer>>,
    notifiers: Vec<Box<dyn Notifier>>,
    observers: Vec<Box<dyn ResultObserver>>,
}

impl Subscribers {
    pub fn add_renderer(&mut self, renderer: Box<dyn Renderer>) {
        self.renderers.push(renderer);
    }

    pub fn add_notifier(&mut self, notifier: Box<dyn Notifier>) {
        self.notifiers.push(notifier);
    }

    pub fn add_observer(&mut self, observer: Box<dyn ResultObserver>) {
        self.observers.push(observer);
    }

    pub fn render(&mut self, display: &str, equation: Option<&str>) {
        for r in &mut self.renderers {
            r.render(display, equation);
        }
    }

    pub fn notify(&mut self, event: &EngineEvent) {
        for n in &mut self.notifiers {
            n.notify(event);
        }
    }

    pub fn observe(&mut self, result: f64) {
        for o in &mut self.observers {
            o.observe(result);
        }
    }
}

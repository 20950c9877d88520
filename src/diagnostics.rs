use std::fmt;
use std::sync::Mutex;

use crate::warn;

// ---------------------------------------------------------------------------
// Non-fatal diagnostics
// ---------------------------------------------------------------------------

/// Why a transition section was left out of the calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionSkip {
    /// `Lt == 0`
    ZeroLength,
    /// `dF == dR`
    NoDiameterChange,
}

impl fmt::Display for TransitionSkip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionSkip::ZeroLength => write!(f, "Lt == 0 (transition length is zero)"),
            TransitionSkip::NoDiameterChange => {
                write!(f, "dF == dR (no diameter change in transition)")
            }
        }
    }
}

/// A warning that does not change the result of a calculation.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    NoTransition { reasons: Vec<TransitionSkip> },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::NoTransition { reasons } => {
                write!(f, "Transition contribution ignored:")?;
                for (i, r) in reasons.iter().enumerate() {
                    let sep = if i == 0 { " " } else { "; " };
                    write!(f, "{}{}", sep, r)?;
                }
                Ok(())
            }
        }
    }
}

/// Receiver for diagnostics emitted by the calculator.
pub trait DiagnosticSink: Sync {
    fn emit(&self, diagnostic: Diagnostic);
}

/// Default sink: prints every diagnostic as a warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&self, diagnostic: Diagnostic) {
        warn!("{}", diagnostic);
    }
}

/// Drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSink;

impl DiagnosticSink for SilentSink {
    fn emit(&self, _diagnostic: Diagnostic) {}
}

/// Keeps diagnostics in memory so callers can inspect them afterwards.
#[derive(Debug, Default)]
pub struct CollectingSink {
    seen: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain and return everything collected so far.
    pub fn take(&self) -> Vec<Diagnostic> {
        match self.seen.lock() {
            Ok(mut seen) => std::mem::take(&mut *seen),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    pub fn len(&self) -> usize {
        self.seen.lock().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticSink for CollectingSink {
    fn emit(&self, diagnostic: Diagnostic) {
        match self.seen.lock() {
            Ok(mut seen) => seen.push(diagnostic),
            Err(poisoned) => poisoned.into_inner().push(diagnostic),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collecting_sink_drains() {
        let sink = CollectingSink::new();
        sink.emit(Diagnostic::NoTransition { reasons: vec![TransitionSkip::ZeroLength] });
        assert_eq!(sink.len(), 1);
        let got = sink.take();
        assert_eq!(got.len(), 1);
        assert!(sink.is_empty());
    }

    #[test]
    fn message_lists_all_reasons() {
        let d = Diagnostic::NoTransition {
            reasons: vec![TransitionSkip::ZeroLength, TransitionSkip::NoDiameterChange],
        };
        let msg = d.to_string();
        assert!(msg.contains("Lt == 0"));
        assert!(msg.contains("dF == dR"));
    }
}

//! Observable events
//!
//! Every log line the crate writes names one of these events. Events are
//! explicit and typed; each carries its own severity.

use std::fmt;

use super::logger::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Entrypoints
    /// A deprecated entrypoint was called and redirected
    DeprecatedEntrypoint,

    // Optimizer
    /// A filter was moved into a dataset scan
    PushdownApplied,
    /// A filter above a dataset scan stays in the host engine
    PushdownDeclined,

    // Execution
    /// Plan materialization begins
    CollectBegin,
    /// Plan materialization finished
    CollectComplete,
    /// Plan materialization failed
    CollectFailed,

    // Configuration
    /// Configuration loaded
    ConfigLoaded,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::DeprecatedEntrypoint => "DEPRECATED_ENTRYPOINT",
            Event::PushdownApplied => "PUSHDOWN_APPLIED",
            Event::PushdownDeclined => "PUSHDOWN_DECLINED",
            Event::CollectBegin => "COLLECT_BEGIN",
            Event::CollectComplete => "COLLECT_COMPLETE",
            Event::CollectFailed => "COLLECT_FAILED",
            Event::ConfigLoaded => "CONFIG_LOADED",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Event::DeprecatedEntrypoint => Severity::Warn,
            Event::PushdownApplied | Event::PushdownDeclined => Severity::Trace,
            Event::CollectBegin | Event::CollectComplete => Severity::Trace,
            Event::CollectFailed => Severity::Error,
            Event::ConfigLoaded => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

//! Indicator event recording for audit and debugging.
//!
//! Each indicator operation that touches the host records an event.
//! Sinks can store them, dump them as JSON, or discard them.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// The kind of indicator operation that generated an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorEventKind {
    Resolve,
    SourceAdded,
    SourceRemoved,
    Activate,
    Teardown,
}

impl std::fmt::Display for IndicatorEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Resolve => "resolve",
            Self::SourceAdded => "source_added",
            Self::SourceRemoved => "source_removed",
            Self::Activate => "activate",
            Self::Teardown => "teardown",
        };
        f.write_str(s)
    }
}

/// Outcome of an indicator operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorEventOutcome {
    Success,
    Error(String),
}

impl std::fmt::Display for IndicatorEventOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => f.write_str("success"),
            Self::Error(msg) => write!(f, "error: {msg}"),
        }
    }
}

/// An event emitted by the indicator for each operation.
#[derive(Debug, Clone, Serialize)]
pub struct IndicatorEvent {
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    pub kind: IndicatorEventKind,
    pub outcome: IndicatorEventOutcome,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub detail: String,
}

impl IndicatorEvent {
    pub fn new(
        client: Option<String>,
        kind: IndicatorEventKind,
        outcome: IndicatorEventOutcome,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            client,
            kind,
            outcome,
            detail: detail.into(),
        }
    }
}

/// Trait for sinks that receive indicator events.
pub trait IndicatorEventSink: Send + Sync {
    fn record(&self, event: IndicatorEvent);
}

/// In-memory event sink for testing.
#[derive(Default)]
pub struct InMemoryEventSink {
    events: std::sync::Mutex<Vec<IndicatorEvent>>,
}

impl InMemoryEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<IndicatorEvent> {
        match self.events.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn count(&self) -> usize {
        match self.events.lock() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    /// Events of one kind, in recording order.
    pub fn of_kind(&self, kind: IndicatorEventKind) -> Vec<IndicatorEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.kind == kind)
            .collect()
    }
}

impl IndicatorEventSink for InMemoryEventSink {
    fn record(&self, event: IndicatorEvent) {
        match self.events.lock() {
            Ok(mut guard) => guard.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}

/// No-op event sink that discards all events.
pub struct NullEventSink;

impl IndicatorEventSink for NullEventSink {
    fn record(&self, _event: IndicatorEvent) {}
}

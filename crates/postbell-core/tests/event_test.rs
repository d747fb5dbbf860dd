#![allow(clippy::expect_used, clippy::unwrap_used)]

//! Tests for the indicator event recording system.

use postbell_core::event::{
    IndicatorEvent, IndicatorEventKind, IndicatorEventOutcome, IndicatorEventSink,
    InMemoryEventSink, NullEventSink,
};

#[test]
fn in_memory_sink_records_events() {
    let sink = InMemoryEventSink::new();
    assert_eq!(sink.count(), 0);

    sink.record(IndicatorEvent::new(
        Some("Thunderbird".into()),
        IndicatorEventKind::Resolve,
        IndicatorEventOutcome::Success,
        "handler \"thunderbird.desktop\"",
    ));

    assert_eq!(sink.count(), 1);

    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].client, Some("Thunderbird".into()));
    assert_eq!(events[0].kind, IndicatorEventKind::Resolve);
}

#[test]
fn of_kind_filters_in_order() {
    let sink = InMemoryEventSink::new();
    for kind in [
        IndicatorEventKind::Resolve,
        IndicatorEventKind::SourceAdded,
        IndicatorEventKind::SourceRemoved,
        IndicatorEventKind::SourceAdded,
    ] {
        sink.record(IndicatorEvent::new(
            None,
            kind,
            IndicatorEventOutcome::Success,
            "",
        ));
    }

    assert_eq!(sink.of_kind(IndicatorEventKind::SourceAdded).len(), 2);
    assert_eq!(sink.of_kind(IndicatorEventKind::Teardown).len(), 0);
}

#[test]
fn null_sink_discards_events() {
    let sink = NullEventSink;
    sink.record(IndicatorEvent::new(
        None,
        IndicatorEventKind::Teardown,
        IndicatorEventOutcome::Success,
        "",
    ));
    // Nothing to count; just verify no panic.
}

#[test]
fn event_kind_display() {
    assert_eq!(IndicatorEventKind::Resolve.to_string(), "resolve");
    assert_eq!(IndicatorEventKind::SourceAdded.to_string(), "source_added");
    assert_eq!(
        IndicatorEventKind::SourceRemoved.to_string(),
        "source_removed"
    );
    assert_eq!(IndicatorEventKind::Activate.to_string(), "activate");
    assert_eq!(IndicatorEventKind::Teardown.to_string(), "teardown");
}

#[test]
fn event_outcome_display() {
    assert_eq!(IndicatorEventOutcome::Success.to_string(), "success");
    assert_eq!(
        IndicatorEventOutcome::Error("boom".into()).to_string(),
        "error: boom"
    );
}

#[test]
fn event_has_timestamp() {
    let event = IndicatorEvent::new(
        None,
        IndicatorEventKind::Activate,
        IndicatorEventOutcome::Success,
        "launched",
    );
    // Timestamp should be recent (within last second).
    let elapsed = chrono::Utc::now() - event.timestamp;
    assert!(elapsed.num_seconds() < 2);
}

#[test]
fn event_serializes_with_snake_case_kind() {
    let event = IndicatorEvent::new(
        Some("Geary".into()),
        IndicatorEventKind::SourceAdded,
        IndicatorEventOutcome::Success,
        "source \"Geary\"",
    );
    let value = serde_json::to_value(&event).expect("serialize");
    assert_eq!(value["kind"], "source_added");
    assert_eq!(value["client"], "Geary");
    assert_eq!(value["outcome"], "success");
}

#[test]
fn empty_detail_and_absent_client_are_omitted() {
    let event = IndicatorEvent::new(
        None,
        IndicatorEventKind::Teardown,
        IndicatorEventOutcome::Success,
        "",
    );
    let value = serde_json::to_value(&event).expect("serialize");
    assert!(value.get("client").is_none());
    assert!(value.get("detail").is_none());
}

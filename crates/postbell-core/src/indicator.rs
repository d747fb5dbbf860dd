//! The composed mail indicator: resolver, tracker and toggle wired to
//! a host through scoped signal subscriptions.
//!
//! Construction performs the one-shot handler query and resolution;
//! afterwards the host delivers tray events through
//! [`MailIndicator::handle_source_event`] and user activations through
//! [`MailIndicator::activate`]. Teardown releases the subscriptions on
//! every exit path, including `Drop`.

use std::sync::Arc;

use crate::config::IndicatorConfig;
use crate::error::IndicatorError;
use crate::event::{IndicatorEvent, IndicatorEventKind, IndicatorEventOutcome, IndicatorEventSink};
use crate::host::{
    HostSignal, MailHost, SignalId, SourceEvent, SourceEventKind, StatusRenderer,
};
use crate::registry::ResolvedClient;
use crate::toggle::{toggle_action, ToggleAction, ToggleOutcome};
use crate::tracker::MailStateTracker;

/// Prefix for one-shot user-visible notices.
const NOTICE_PREFIX: &str = "postbell";

/// The signals the indicator subscribes to, in connect order.
const SIGNALS: [HostSignal; 3] = [
    HostSignal::SourceAdded,
    HostSignal::SourceRemoved,
    HostSignal::Activated,
];

pub struct MailIndicator {
    client: Option<ResolvedClient>,
    tracker: MailStateTracker,
    host: Arc<dyn MailHost>,
    renderer: Arc<dyn StatusRenderer>,
    events: Arc<dyn IndicatorEventSink>,
    signals: Vec<SignalId>,
}

impl MailIndicator {
    /// Query the default handler, resolve the client and subscribe to
    /// the host signals.
    ///
    /// A failed or empty handler query resolves to no client; that is
    /// advisory (a notice is shown, the tracker never matches and the
    /// toggle reports [`ToggleOutcome::Disabled`]), never a
    /// construction error. A failed signal connect is a construction
    /// error; already-established subscriptions are released before it
    /// is returned.
    pub fn connect(
        config: &IndicatorConfig,
        host: Arc<dyn MailHost>,
        renderer: Arc<dyn StatusRenderer>,
        events: Arc<dyn IndicatorEventSink>,
    ) -> Result<Self, IndicatorError> {
        // One-shot startup query; a query failure reads as "no match".
        let handler_id = host.default_mailto_handler().unwrap_or_default();
        let client = config.registry().resolve(&handler_id);
        match &client {
            Some(resolved) => events.record(IndicatorEvent::new(
                Some(resolved.display_name.clone()),
                IndicatorEventKind::Resolve,
                IndicatorEventOutcome::Success,
                format!("handler {:?}", handler_id.trim()),
            )),
            None => {
                host.notify(&format!("{NOTICE_PREFIX}: no known email client found."));
                events.record(IndicatorEvent::new(
                    None,
                    IndicatorEventKind::Resolve,
                    IndicatorEventOutcome::Error(
                        IndicatorError::UnknownHandler {
                            handler_id: handler_id.trim().to_string(),
                        }
                        .to_string(),
                    ),
                    "",
                ));
            }
        }

        let mut signals = Vec::with_capacity(SIGNALS.len());
        for signal in SIGNALS {
            match host.connect(signal) {
                Ok(id) => signals.push(id),
                Err(message) => {
                    // Partial construction: release what was established.
                    for id in signals.drain(..).rev() {
                        host.disconnect(id);
                    }
                    return Err(IndicatorError::Host {
                        operation: format!("connect {signal}"),
                        message,
                    });
                }
            }
        }

        let tracker = MailStateTracker::new(client.as_ref().map(|c| c.display_name.clone()));
        Ok(Self {
            client,
            tracker,
            host,
            renderer,
            events,
            signals,
        })
    }

    pub fn client(&self) -> Option<&ResolvedClient> {
        self.client.as_ref()
    }

    pub fn has_unread(&self) -> bool {
        self.tracker.has_unread()
    }

    fn client_name(&self) -> Option<String> {
        self.client.as_ref().map(|c| c.display_name.clone())
    }

    /// Host delivery point for tray source events. Payloads without a
    /// title are ignored silently.
    pub fn handle_source_event(&mut self, event: &SourceEvent) {
        let Some(title) = event.title.as_deref() else {
            return;
        };
        match event.kind {
            SourceEventKind::Added => self.on_source_added(title),
            SourceEventKind::Removed => self.on_source_removed(title),
        }
    }

    /// A notification source appeared. On a title match the unread
    /// flag is set and the renderer redraws; anything else is a no-op.
    pub fn on_source_added(&mut self, title: &str) {
        if let Some(status) = self.tracker.on_source_added(title) {
            self.renderer.render(status);
            self.events.record(IndicatorEvent::new(
                self.client_name(),
                IndicatorEventKind::SourceAdded,
                IndicatorEventOutcome::Success,
                format!("source {title:?}"),
            ));
        }
    }

    /// A notification source went away. Symmetric to
    /// [`Self::on_source_added`].
    pub fn on_source_removed(&mut self, title: &str) {
        if let Some(status) = self.tracker.on_source_removed(title) {
            self.renderer.render(status);
            self.events.record(IndicatorEvent::new(
                self.client_name(),
                IndicatorEventKind::SourceRemoved,
                IndicatorEventOutcome::Success,
                format!("source {title:?}"),
            ));
        }
    }

    /// The user activated the indicator: launch, minimize or present
    /// the client depending on window state and the unread flag.
    pub fn activate(&mut self) -> Result<ToggleOutcome, IndicatorError> {
        let Some(client) = self.client.clone() else {
            self.events.record(IndicatorEvent::new(
                None,
                IndicatorEventKind::Activate,
                IndicatorEventOutcome::Success,
                ToggleOutcome::Disabled.to_string(),
            ));
            return Ok(ToggleOutcome::Disabled);
        };

        let window = self.host.client_window(&client.display_name);
        let outcome = match toggle_action(window, self.tracker.has_unread()) {
            ToggleAction::Launch => self.launch(&client)?,
            ToggleAction::Minimize => {
                self.host
                    .minimize_window(&client.display_name)
                    .map_err(|message| self.host_failure(&client, "minimize_window", message))?;
                ToggleOutcome::Minimized
            }
            ToggleAction::Present => {
                self.host
                    .present_window(&client.display_name)
                    .map_err(|message| self.host_failure(&client, "present_window", message))?;
                let status = self.tracker.clear();
                self.renderer.render(status);
                ToggleOutcome::Presented
            }
        };

        self.events.record(IndicatorEvent::new(
            Some(client.display_name),
            IndicatorEventKind::Activate,
            IndicatorEventOutcome::Success,
            outcome.to_string(),
        ));
        Ok(outcome)
    }

    // Launch with a single fallback retry. Terminal on failure: one
    // user notice, one error event, no further attempts.
    fn launch(&self, client: &ResolvedClient) -> Result<ToggleOutcome, IndicatorError> {
        let primary_failure = match self.host.spawn_command(&client.launch_command) {
            Ok(()) => return Ok(ToggleOutcome::Launched),
            Err(message) => message,
        };

        if let Some(fallback) = &client.fallback_launch_command {
            if self.host.spawn_command(fallback).is_ok() {
                return Ok(ToggleOutcome::LaunchedFallback);
            }
        }

        let err = IndicatorError::Launch {
            command: client.launch_command.clone(),
            message: primary_failure,
        };
        self.host.notify(&format!(
            "{NOTICE_PREFIX}: could not launch {}.",
            client.display_name
        ));
        self.events.record(IndicatorEvent::new(
            Some(client.display_name.clone()),
            IndicatorEventKind::Activate,
            IndicatorEventOutcome::Error(err.to_string()),
            "",
        ));
        Err(err)
    }

    fn host_failure(
        &self,
        client: &ResolvedClient,
        operation: &str,
        message: String,
    ) -> IndicatorError {
        let err = IndicatorError::Host {
            operation: operation.to_string(),
            message,
        };
        self.events.record(IndicatorEvent::new(
            Some(client.display_name.clone()),
            IndicatorEventKind::Activate,
            IndicatorEventOutcome::Error(err.to_string()),
            "",
        ));
        err
    }

    /// Release the host subscriptions. Idempotent: a second call makes
    /// no further host calls and records no further events.
    pub fn teardown(&mut self) {
        if self.signals.is_empty() {
            return;
        }
        for id in self.signals.drain(..).rev() {
            self.host.disconnect(id);
        }
        self.events.record(IndicatorEvent::new(
            self.client_name(),
            IndicatorEventKind::Teardown,
            IndicatorEventOutcome::Success,
            "",
        ));
    }
}

impl Drop for MailIndicator {
    fn drop(&mut self) {
        self.teardown();
    }
}

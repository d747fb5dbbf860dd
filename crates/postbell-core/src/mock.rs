//! Mock host and renderer for unit testing.
//!
//! Builder-configurable; records every call so tests can assert on the
//! exact traffic across the host seam.

use std::sync::Mutex;

use crate::host::{HostSignal, MailHost, MailStatus, SignalId, StatusRenderer, WindowSnapshot};

/// A recorded call to the mock host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    DefaultMailtoHandler,
    Connect(HostSignal),
    Disconnect(SignalId),
    ClientWindow(String),
    MinimizeWindow(String),
    PresentWindow(String),
    SpawnCommand(String),
    Notify(String),
}

/// Mock implementation of [`MailHost`] for testing.
///
/// Defaults: the handler query returns an empty string (no client
/// resolves), there is no open client window, every spawn succeeds and
/// every signal connects.
pub struct MockHost {
    handler: Mutex<Result<String, String>>,
    window: Mutex<Option<WindowSnapshot>>,
    spawn_failures: Mutex<Vec<String>>,
    connect_failures: Mutex<Vec<HostSignal>>,
    next_signal_id: Mutex<u64>,
    connected: Mutex<Vec<SignalId>>,
    calls: Mutex<Vec<HostCall>>,
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            handler: Mutex::new(Ok(String::new())),
            window: Mutex::new(None),
            spawn_failures: Mutex::new(Vec::new()),
            connect_failures: Mutex::new(Vec::new()),
            next_signal_id: Mutex::new(1),
            connected: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Configure the default-handler query result.
    pub fn with_handler(self, handler_id: &str) -> Self {
        match self.handler.lock() {
            Ok(mut h) => *h = Ok(handler_id.to_string()),
            Err(poisoned) => *poisoned.into_inner() = Ok(handler_id.to_string()),
        }
        self
    }

    /// Configure the default-handler query to fail.
    pub fn with_handler_error(self, message: &str) -> Self {
        match self.handler.lock() {
            Ok(mut h) => *h = Err(message.to_string()),
            Err(poisoned) => *poisoned.into_inner() = Err(message.to_string()),
        }
        self
    }

    /// Configure the client window the host reports.
    pub fn with_window(self, snapshot: WindowSnapshot) -> Self {
        match self.window.lock() {
            Ok(mut w) => *w = Some(snapshot),
            Err(poisoned) => *poisoned.into_inner() = Some(snapshot),
        }
        self
    }

    /// Configure a command whose spawn fails.
    pub fn with_spawn_failure(self, command: &str) -> Self {
        match self.spawn_failures.lock() {
            Ok(mut f) => f.push(command.to_string()),
            Err(poisoned) => poisoned.into_inner().push(command.to_string()),
        }
        self
    }

    /// Configure a signal whose connect fails.
    pub fn with_connect_failure(self, signal: HostSignal) -> Self {
        match self.connect_failures.lock() {
            Ok(mut f) => f.push(signal),
            Err(poisoned) => poisoned.into_inner().push(signal),
        }
        self
    }

    /// Change the reported window after construction.
    pub fn set_window(&self, snapshot: Option<WindowSnapshot>) {
        match self.window.lock() {
            Ok(mut w) => *w = snapshot,
            Err(poisoned) => *poisoned.into_inner() = snapshot,
        }
    }

    /// All recorded calls, in order.
    pub fn calls(&self) -> Vec<HostCall> {
        match self.calls.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn call_count(&self) -> usize {
        match self.calls.lock() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    /// Messages shown to the user via `notify`.
    pub fn notices(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                HostCall::Notify(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    /// Commands the indicator asked the host to spawn.
    pub fn spawned(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                HostCall::SpawnCommand(command) => Some(command),
                _ => None,
            })
            .collect()
    }

    /// Subscriptions still live (connected and not yet disconnected).
    pub fn live_signals(&self) -> Vec<SignalId> {
        match self.connected.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Number of `disconnect` calls received.
    pub fn disconnect_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, HostCall::Disconnect(_)))
            .count()
    }

    fn record(&self, call: HostCall) {
        match self.calls.lock() {
            Ok(mut guard) => guard.push(call),
            Err(poisoned) => poisoned.into_inner().push(call),
        }
    }

    fn spawn_fails(&self, command: &str) -> bool {
        match self.spawn_failures.lock() {
            Ok(guard) => guard.iter().any(|c| c == command),
            Err(poisoned) => poisoned.into_inner().iter().any(|c| c == command),
        }
    }

    fn connect_fails(&self, signal: HostSignal) -> bool {
        match self.connect_failures.lock() {
            Ok(guard) => guard.contains(&signal),
            Err(poisoned) => poisoned.into_inner().contains(&signal),
        }
    }
}

impl MailHost for MockHost {
    fn default_mailto_handler(&self) -> Result<String, String> {
        self.record(HostCall::DefaultMailtoHandler);
        match self.handler.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn connect(&self, signal: HostSignal) -> Result<SignalId, String> {
        self.record(HostCall::Connect(signal));
        if self.connect_fails(signal) {
            return Err(format!("connect {signal} refused"));
        }
        let id = {
            let mut next = match self.next_signal_id.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            let id = SignalId(*next);
            *next += 1;
            id
        };
        match self.connected.lock() {
            Ok(mut guard) => guard.push(id),
            Err(poisoned) => poisoned.into_inner().push(id),
        }
        Ok(id)
    }

    fn disconnect(&self, id: SignalId) {
        self.record(HostCall::Disconnect(id));
        match self.connected.lock() {
            Ok(mut guard) => guard.retain(|c| *c != id),
            Err(poisoned) => poisoned.into_inner().retain(|c| *c != id),
        }
    }

    fn client_window(&self, display_name: &str) -> Option<WindowSnapshot> {
        self.record(HostCall::ClientWindow(display_name.to_string()));
        match self.window.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    fn minimize_window(&self, display_name: &str) -> Result<(), String> {
        self.record(HostCall::MinimizeWindow(display_name.to_string()));
        Ok(())
    }

    fn present_window(&self, display_name: &str) -> Result<(), String> {
        self.record(HostCall::PresentWindow(display_name.to_string()));
        Ok(())
    }

    fn spawn_command(&self, command: &str) -> Result<(), String> {
        self.record(HostCall::SpawnCommand(command.to_string()));
        if self.spawn_fails(command) {
            return Err(format!("spawn {command:?} failed"));
        }
        Ok(())
    }

    fn notify(&self, message: &str) {
        self.record(HostCall::Notify(message.to_string()));
    }
}

/// Renderer that records every status it is asked to draw.
#[derive(Default)]
pub struct RecordingRenderer {
    statuses: Mutex<Vec<MailStatus>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn statuses(&self) -> Vec<MailStatus> {
        match self.statuses.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn last(&self) -> Option<MailStatus> {
        self.statuses().last().copied()
    }
}

impl StatusRenderer for RecordingRenderer {
    fn render(&self, status: MailStatus) {
        match self.statuses.lock() {
            Ok(mut guard) => guard.push(status),
            Err(poisoned) => poisoned.into_inner().push(status),
        }
    }
}

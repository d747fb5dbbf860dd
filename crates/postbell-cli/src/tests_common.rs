//! Shared mock backend for CLI unit tests.

use chrono::{DateTime, Utc};

use crate::PostbellBackend;

pub struct MockBackend {
    handler: Result<String, String>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            handler: Ok(String::new()),
        }
    }

    pub fn with_handler(mut self, handler_id: &str) -> Self {
        self.handler = Ok(handler_id.to_string());
        self
    }

    pub fn with_handler_error(mut self, message: &str) -> Self {
        self.handler = Err(message.to_string());
        self
    }
}

impl PostbellBackend for MockBackend {
    fn default_mailto_handler(&self) -> Result<String, String> {
        self.handler.clone()
    }

    fn spawn_command(&self, _command: &str) -> Result<(), String> {
        Ok(())
    }

    fn command_available(&self, _command: &str) -> bool {
        true
    }

    fn query_tool_available(&self) -> bool {
        true
    }

    fn now_utc(&self) -> DateTime<Utc> {
        chrono::Utc::now()
    }
}

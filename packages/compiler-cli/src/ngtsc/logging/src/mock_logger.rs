// Mock Logger
//
// Records every message so tests can assert on diagnostics.

use std::cell::RefCell;

use super::logger::{LogLevel, Logger};

/// Logger that keeps messages in memory, grouped by level.
#[derive(Debug, Default)]
pub struct MockLogger {
    logs: RefCell<Vec<(LogLevel, String)>>,
}

impl MockLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages logged at exactly `level`, in order.
    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.logs
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, msg)| msg.clone())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.logs.borrow().is_empty()
    }

    fn record(&self, level: LogLevel, msg: &str) {
        self.logs.borrow_mut().push((level, msg.to_string()));
    }
}

impl Logger for MockLogger {
    fn level(&self) -> LogLevel {
        LogLevel::Debug
    }
    fn debug(&self, msg: &str) {
        self.record(LogLevel::Debug, msg);
    }
    fn info(&self, msg: &str) {
        self.record(LogLevel::Info, msg);
    }
    fn warn(&self, msg: &str) {
        self.record(LogLevel::Warn, msg);
    }
    fn error(&self, msg: &str) {
        self.record(LogLevel::Error, msg);
    }
}

use crate::log_level::LogLevel;
use chrono::{DateTime, Local};
use std::sync::Arc;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// One line of log output, stamped when it is created on the caller's thread.
#[derive(Debug, Clone)]
pub(crate) struct LogRecord {
    pub at: DateTime<Local>,
    pub level: LogLevel,
    pub component: Option<Arc<str>>,
    pub text: String,
}

impl LogRecord {
    pub fn new(level: LogLevel, component: Option<Arc<str>>, text: &str) -> Self {
        Self {
            at: Local::now(),
            level,
            component,
            text: text.to_string(),
        }
    }

    /// `[2024-01-01 12:00:00.000] INFO  Capture: text\n`
    pub fn render(&self) -> String {
        let stamp = self.at.format(TIMESTAMP_FORMAT);
        match &self.component {
            Some(component) => format!(
                "[{}] {} {}: {}\n",
                stamp,
                self.level.label(),
                component,
                self.text
            ),
            None => format!("[{}] {} {}\n", stamp, self.level.label(), self.text),
        }
    }
}

//! Cloneable, non-blocking logger handle.

use crate::error::Result;
use crate::log_level::LogLevel;
use crate::log_record::LogRecord;
use crate::log_writer;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{Sender, channel};

/// Handle to the shared writer thread.
///
/// Cloning is cheap. Derived component loggers (see [`Logger::for_component`])
/// share the same file and thread.
///
/// # Examples
///
/// ```
/// use logging::{LogLevel, Logger};
///
/// let dir = std::env::temp_dir().join("camview-doc.log");
/// let logger = Logger::new(dir, LogLevel::Info).unwrap();
/// let capture = logger.for_component("Capture");
/// capture.info("worker started");
/// ```
#[derive(Clone)]
pub struct Logger {
    sender: Sender<LogRecord>,
    threshold: LogLevel,
    component: Option<Arc<str>>,
    echo: bool,
}

impl Logger {
    /// Opens (or creates) `log_path` and starts the writer thread.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened for appending.
    pub fn new(log_path: PathBuf, threshold: LogLevel) -> Result<Self> {
        let (sender, receiver) = channel();
        log_writer::spawn(&log_path, receiver)?;
        Ok(Self {
            sender,
            threshold,
            component: None,
            echo: false,
        })
    }

    /// Also print every accepted record to stdout.
    pub fn with_console(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Returns a logger tagged with `component` that writes to the same file.
    pub fn for_component(&self, component: &str) -> Self {
        Self {
            sender: self.sender.clone(),
            threshold: self.threshold,
            component: Some(Arc::from(component)),
            echo: self.echo,
        }
    }

    pub fn threshold(&self) -> LogLevel {
        self.threshold
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.threshold
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    /// Records below the threshold are discarded on the caller's thread.
    pub fn log(&self, level: LogLevel, message: &str) {
        if !self.enabled(level) {
            return;
        }

        let record = LogRecord::new(level, self.component.clone(), message);
        if self.echo {
            print!("{}", record.render());
        }

        // The writer only goes away at process exit; nothing useful to do then.
        let _ = self.sender.send(record);
    }
}

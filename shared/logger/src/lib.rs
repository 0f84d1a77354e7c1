//! File logger shared by the capture library and the viewer.
//!
//! Every [`Logger`] clone and every component logger derived from it feeds
//! the same background writer thread, so callers never block on disk I/O.

pub mod error;
mod log_level;
mod log_record;
mod log_writer;
mod logger;

pub use error::{LoggingError, Result};
pub use log_level::LogLevel;
pub use logger::Logger;

//! Background thread that owns the log file.

use crate::error::Result;
use crate::log_record::LogRecord;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::mpsc::Receiver;
use std::thread;

pub(crate) struct LogWriter {
    out: BufWriter<File>,
}

impl LogWriter {
    /// Opens `path` for appending, creating it if needed.
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            out: BufWriter::new(file),
        })
    }

    fn write(&mut self, record: &LogRecord) {
        if let Err(e) = self.out.write_all(record.render().as_bytes()) {
            eprintln!("log write failed: {}", e);
        }
    }

    fn flush(&mut self) {
        if let Err(e) = self.out.flush() {
            eprintln!("log flush failed: {}", e);
        }
    }

    /// Drains the channel until every sender is gone.
    ///
    /// Records that arrive in a burst are written back to back and flushed
    /// once the channel is momentarily empty.
    pub fn run(mut self, records: Receiver<LogRecord>) {
        while let Ok(record) = records.recv() {
            self.write(&record);
            while let Ok(next) = records.try_recv() {
                self.write(&next);
            }
            self.flush();
        }
        self.flush();
    }
}

/// Opens the file on the caller's thread so errors surface immediately,
/// then hands the writer to a named background thread.
pub(crate) fn spawn(path: &Path, records: Receiver<LogRecord>) -> Result<()> {
    let writer = LogWriter::open(path)?;
    thread::Builder::new()
        .name("log-writer".to_string())
        .spawn(move || writer.run(records))?;
    Ok(())
}

//! The capture thread and its control handle.
//!
//! ```text
//! controller                      capture thread
//! ----------                      --------------
//! set_mode(m) ──┐
//! start()     ──┼─> TriggerGate ──> admit() ─> grab() ─> finish()
//! stop()      ──┘   (mutex+condvar)                   │
//!                                                     v
//! receiver().try_recv() <──────── FrameMailbox (drop-oldest)
//! ```

mod gate;
mod mailbox;

pub use gate::{CaptureMode, GateStatus};
pub use mailbox::{CaptureEvent, FrameReceiver};

use crate::error::{CaptureError, Result};
use crate::traits::FrameSource;
use gate::{Admission, TriggerGate};
use logging::Logger;
use mailbox::{FrameMailbox, mailbox};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Startup parameters for [`CaptureWorker::spawn`].
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub mode: CaptureMode,
    /// Events buffered for the consumer before the oldest is dropped
    pub queue_capacity: usize,
    /// Pause after a failed grab
    pub retry_delay: Duration,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            mode: CaptureMode::Continuous,
            queue_capacity: 1,
            retry_delay: Duration::from_millis(500),
        }
    }
}

struct Shared {
    gate: TriggerGate,
    grabbed: AtomicU64,
}

/// Handle to the capture thread.
///
/// Dropping the handle stops and joins the thread.
pub struct CaptureWorker {
    shared: Arc<Shared>,
    receiver: FrameReceiver,
    handle: Option<JoinHandle<()>>,
    logger: Logger,
}

impl CaptureWorker {
    /// Starts the capture thread and opens the device on it.
    ///
    /// `open` runs on the new thread so the device never crosses threads.
    /// This call waits for `open` to finish.
    ///
    /// # Errors
    ///
    /// `CaptureError::DeviceOpen` if `open` fails; the thread has already
    /// exited by the time this returns.
    pub fn spawn<S, F>(open: F, config: WorkerConfig, logger: Logger) -> Result<Self>
    where
        S: FrameSource + 'static,
        F: FnOnce() -> Result<S> + Send + 'static,
    {
        let shared = Arc::new(Shared {
            gate: TriggerGate::new(config.mode),
            grabbed: AtomicU64::new(0),
        });
        let (outbox, receiver) = mailbox(config.queue_capacity);
        let (ready_tx, ready_rx) = mpsc::channel::<Result<String>>();

        let thread_shared = Arc::clone(&shared);
        let thread_logger = logger.clone();
        let retry_delay = config.retry_delay;

        let handle = thread::Builder::new()
            .name("capture-worker".to_string())
            .spawn(move || {
                let source = match open() {
                    Ok(source) => source,
                    Err(e) => {
                        let _ = ready_tx.send(Err(e));
                        return;
                    }
                };
                let _ = ready_tx.send(Ok(source.describe()));

                CaptureLoop {
                    source,
                    shared: thread_shared,
                    outbox,
                    logger: thread_logger,
                    retry_delay,
                }
                .run();
            })
            .map_err(|e| CaptureError::Worker(format!("cannot spawn capture thread: {}", e)))?;

        let opened = ready_rx.recv();
        let device = match opened {
            Ok(Ok(device)) => device,
            Ok(Err(e)) => {
                let _ = handle.join();
                logger.error(&format!("[CAPTURE] Device open failed: {}", e));
                return Err(match e {
                    CaptureError::DeviceOpen(_) => e,
                    other => CaptureError::DeviceOpen(other.to_string()),
                });
            }
            Err(_) => {
                let _ = handle.join();
                logger.error("[CAPTURE] Capture thread died while opening the device");
                return Err(CaptureError::Worker(
                    "capture thread exited before opening the device".to_string(),
                ));
            }
        };

        logger.info(&format!(
            "[CAPTURE] Worker running on {} in {:?} mode (queue {})",
            device,
            config.mode,
            receiver.capacity()
        ));

        Ok(Self {
            shared,
            receiver,
            handle: Some(handle),
            logger,
        })
    }

    /// Arms one software trigger.
    ///
    /// Returns `false` and does nothing if a triggered grab is running, a
    /// trigger is already pending, or the worker is not in triggered mode.
    pub fn start(&self) -> bool {
        let armed = self.shared.gate.arm();
        if armed {
            self.logger.debug("[CAPTURE] Trigger armed");
        } else {
            self.logger.debug(&format!(
                "[CAPTURE] Trigger ignored (mode {:?}, status {:?})",
                self.shared.gate.mode(),
                self.shared.gate.status()
            ));
        }
        armed
    }

    /// Switches acquisition mode. Any pending trigger is discarded.
    pub fn set_mode(&self, mode: CaptureMode) {
        let previous = self.shared.gate.set_mode(mode);
        if previous != mode {
            self.logger
                .info(&format!("[CAPTURE] Mode {:?} -> {:?}", previous, mode));
        }
    }

    pub fn reset_frame_counter(&self) {
        self.shared.grabbed.store(0, Ordering::Relaxed);
    }

    /// Reads and zeroes the frame counter in one step, so a grab landing
    /// between the read and the reset is not lost.
    pub fn take_frame_counter(&self) -> u64 {
        self.shared.grabbed.swap(0, Ordering::Relaxed)
    }

    /// Frames grabbed since start or the last reset.
    pub fn frames_grabbed(&self) -> u64 {
        self.shared.grabbed.load(Ordering::Relaxed)
    }

    pub fn mode(&self) -> CaptureMode {
        self.shared.gate.mode()
    }

    pub fn status(&self) -> GateStatus {
        self.shared.gate.status()
    }

    /// `true` until [`CaptureWorker::stop`] has joined the thread.
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn receiver(&self) -> FrameReceiver {
        self.receiver.clone()
    }

    /// Stops the thread and waits for it to exit. The device is released
    /// before this returns. Calling it again is a no-op.
    pub fn stop(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };

        self.shared.gate.stop();
        if handle.join().is_err() {
            self.logger.error("[CAPTURE] Capture thread panicked");
        } else {
            self.logger.info("[CAPTURE] Worker stopped");
        }
    }
}

impl Drop for CaptureWorker {
    fn drop(&mut self) {
        self.stop();
    }
}

/// State owned by the capture thread.
struct CaptureLoop<S: FrameSource> {
    source: S,
    shared: Arc<Shared>,
    outbox: FrameMailbox,
    logger: Logger,
    retry_delay: Duration,
}

impl<S: FrameSource> CaptureLoop<S> {
    fn run(mut self) {
        loop {
            let mode = match self.shared.gate.admit() {
                Admission::Stop => break,
                Admission::Grab(mode) => mode,
            };

            // The gate lock is not held here, so start() sees Running and no-ops.
            let result = self.source.grab();
            if mode == CaptureMode::Triggered {
                self.shared.gate.finish();
            }

            match result {
                Ok(frame) => {
                    let grabbed = self.shared.grabbed.fetch_add(1, Ordering::Relaxed) + 1;
                    if self.outbox.publish(CaptureEvent::Frame { frame, grabbed }) {
                        self.logger
                            .debug("[CAPTURE] Consumer behind, dropped oldest frame");
                    }
                }
                Err(e) => {
                    self.logger.warn(&format!("[CAPTURE] Grab failed: {}", e));
                    self.outbox.publish(CaptureEvent::ReadFailed {
                        reason: e.to_string(),
                    });
                    if self.shared.gate.rest(self.retry_delay) {
                        break;
                    }
                }
            }
        }

        self.logger.debug(&format!(
            "[CAPTURE] Capture loop exiting, releasing {}",
            self.source.describe()
        ));
    }
}

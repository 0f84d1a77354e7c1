//! Bounded hand-off between the capture thread and the consumer.
//!
//! When the consumer falls behind, the oldest queued event is discarded so
//! the display always catches up to the newest frame.

use crate::frame::Frame;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// What the capture thread publishes.
#[derive(Debug)]
pub enum CaptureEvent {
    /// A new frame and the worker's frame counter after grabbing it.
    Frame { frame: Frame, grabbed: u64 },
    /// One grab failed; the worker keeps running.
    ReadFailed { reason: String },
}

type Notify = Arc<dyn Fn() + Send + Sync>;

struct Slot {
    events: VecDeque<CaptureEvent>,
    notify: Option<Notify>,
}

struct Shared {
    slot: Mutex<Slot>,
    capacity: usize,
    dropped: AtomicU64,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Producer half, owned by the capture thread.
pub(crate) struct FrameMailbox {
    shared: Arc<Shared>,
}

/// Consumer half. Cloning yields another handle to the same queue.
#[derive(Clone)]
pub struct FrameReceiver {
    shared: Arc<Shared>,
}

/// Creates a mailbox holding at most `capacity` events (minimum 1).
pub(crate) fn mailbox(capacity: usize) -> (FrameMailbox, FrameReceiver) {
    let shared = Arc::new(Shared {
        slot: Mutex::new(Slot {
            events: VecDeque::with_capacity(capacity.max(1)),
            notify: None,
        }),
        capacity: capacity.max(1),
        dropped: AtomicU64::new(0),
    });
    (
        FrameMailbox {
            shared: Arc::clone(&shared),
        },
        FrameReceiver { shared },
    )
}

impl FrameMailbox {
    /// Queues `event`, evicting the oldest one if full. Returns `true` when
    /// something was evicted. The notify callback runs after the lock is
    /// released.
    pub fn publish(&self, event: CaptureEvent) -> bool {
        let (evicted, notify) = {
            let mut slot = self.shared.lock();
            let evicted = if slot.events.len() >= self.shared.capacity {
                slot.events.pop_front();
                true
            } else {
                false
            };
            slot.events.push_back(event);
            (evicted, slot.notify.clone())
        };

        if evicted {
            self.shared.dropped.fetch_add(1, Ordering::Relaxed);
        }
        if let Some(notify) = notify {
            notify();
        }
        evicted
    }
}

impl FrameReceiver {
    /// Takes the oldest queued event without blocking.
    pub fn try_recv(&self) -> Option<CaptureEvent> {
        self.shared.lock().events.pop_front()
    }

    /// Takes everything queued, oldest first.
    pub fn drain(&self) -> Vec<CaptureEvent> {
        self.shared.lock().events.drain(..).collect()
    }

    /// Installs a callback invoked after every publish, e.g. to request a
    /// repaint. Runs on the capture thread.
    pub fn set_notify(&self, notify: impl Fn() + Send + Sync + 'static) {
        let notify: Notify = Arc::new(notify);
        self.shared.lock().notify = Some(notify);
    }

    pub fn len(&self) -> usize {
        self.shared.lock().events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.shared.capacity
    }

    /// Events evicted because the consumer was too slow.
    pub fn dropped(&self) -> u64 {
        self.shared.dropped.load(Ordering::Relaxed)
    }
}

//! Mode and software-trigger handshake between the controller and the
//! capture thread.
//!
//! # State
//!
//! One `GateState` behind one mutex, paired with one condition variable:
//! - **mode**: `Continuous` or `Triggered`, written only by the controller
//! - **status**: `Running` from the moment a trigger is consumed until the
//!   triggered grab finishes, `Idle` otherwise
//! - **pending**: a single trigger slot; extra triggers while it is full, or
//!   while a grab is running, are ignored
//! - **stopped**: set once, never cleared
//!
//! # Protocol
//!
//! The capture thread calls [`TriggerGate::admit`] before every grab and
//! [`TriggerGate::finish`] after a triggered one. The device read happens
//! between the two with the lock released, so a concurrent
//! [`TriggerGate::arm`] observes `Running` and returns `false`. Every
//! transition notifies all waiters; waiters re-check the whole state after
//! each wake.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// How the worker acquires frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureMode {
    /// Grab back to back, throttled only by the device.
    #[default]
    Continuous,
    /// Grab exactly one frame per trigger, block otherwise.
    Triggered,
}

/// Whether a triggered grab is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateStatus {
    Idle,
    Running,
}

/// What the capture thread should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Admission {
    Grab(CaptureMode),
    Stop,
}

#[derive(Debug)]
struct GateState {
    mode: CaptureMode,
    status: GateStatus,
    /// Single-slot pending trigger.
    pending: bool,
    stopped: bool,
}

/// All fields live under one mutex; every transition notifies the condvar.
pub(crate) struct TriggerGate {
    state: Mutex<GateState>,
    wake: Condvar,
}

impl TriggerGate {
    pub fn new(mode: CaptureMode) -> Self {
        Self {
            state: Mutex::new(GateState {
                mode,
                status: GateStatus::Idle,
                pending: false,
                stopped: false,
            }),
            wake: Condvar::new(),
        }
    }

    /// The state is plain data, so a panic elsewhere cannot leave it torn.
    fn lock(&self) -> MutexGuard<'_, GateState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Arms one trigger. Returns `false` without changing anything when a
    /// grab is already running, a trigger is already pending, the gate is
    /// not in triggered mode, or the worker has stopped.
    pub fn arm(&self) -> bool {
        let mut state = self.lock();
        if state.stopped
            || state.mode != CaptureMode::Triggered
            || state.status == GateStatus::Running
            || state.pending
        {
            return false;
        }
        state.pending = true;
        drop(state);
        self.wake.notify_all();
        true
    }

    /// Switches mode, drops any pending trigger and wakes the worker so a
    /// blocked triggered wait re-evaluates. Returns the previous mode.
    pub fn set_mode(&self, mode: CaptureMode) -> CaptureMode {
        let mut state = self.lock();
        let previous = state.mode;
        state.mode = mode;
        state.status = GateStatus::Idle;
        state.pending = false;
        drop(state);
        self.wake.notify_all();
        previous
    }

    pub fn stop(&self) {
        self.lock().stopped = true;
        self.wake.notify_all();
    }

    /// Called by the capture thread at the top of every iteration.
    ///
    /// Continuous mode returns immediately. Triggered mode blocks until a
    /// trigger is pending, the mode changes, or the gate stops; the predicate
    /// is re-checked after every wake. A consumed trigger leaves the gate
    /// `Running` until [`TriggerGate::finish`].
    pub fn admit(&self) -> Admission {
        let mut state = self.lock();
        loop {
            if state.stopped {
                return Admission::Stop;
            }
            match state.mode {
                CaptureMode::Continuous => return Admission::Grab(CaptureMode::Continuous),
                CaptureMode::Triggered if state.pending => {
                    state.pending = false;
                    state.status = GateStatus::Running;
                    return Admission::Grab(CaptureMode::Triggered);
                }
                CaptureMode::Triggered => {
                    state = self.wake.wait(state).unwrap_or_else(PoisonError::into_inner);
                }
            }
        }
    }

    /// Marks the triggered grab as done.
    pub fn finish(&self) {
        let mut state = self.lock();
        if state.status == GateStatus::Running {
            state.status = GateStatus::Idle;
        }
    }

    /// Sleeps for up to `delay`, returning early (with `true`) on stop.
    pub fn rest(&self, delay: Duration) -> bool {
        let state = self.lock();
        let (state, _) = self
            .wake
            .wait_timeout_while(state, delay, |s| !s.stopped)
            .unwrap_or_else(PoisonError::into_inner);
        state.stopped
    }

    pub fn mode(&self) -> CaptureMode {
        self.lock().mode
    }

    pub fn status(&self) -> GateStatus {
        self.lock().status
    }

    #[cfg(test)]
    pub fn has_pending(&self) -> bool {
        self.lock().pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Instant;

    #[test]
    fn test_continuous_admits_without_trigger() {
        let gate = TriggerGate::new(CaptureMode::Continuous);
        assert_eq!(gate.admit(), Admission::Grab(CaptureMode::Continuous));
        assert_eq!(gate.status(), GateStatus::Idle);
    }

    #[test]
    fn test_arm_is_single_slot() {
        let gate = TriggerGate::new(CaptureMode::Triggered);
        assert!(gate.arm());
        assert!(!gate.arm());
        assert!(!gate.arm());

        assert_eq!(gate.admit(), Admission::Grab(CaptureMode::Triggered));
        assert!(!gate.has_pending());
    }

    #[test]
    fn test_arm_is_noop_while_running() {
        let gate = TriggerGate::new(CaptureMode::Triggered);
        gate.arm();
        gate.admit();
        assert_eq!(gate.status(), GateStatus::Running);

        assert!(!gate.arm());
        assert!(!gate.has_pending());

        gate.finish();
        assert_eq!(gate.status(), GateStatus::Idle);
        assert!(gate.arm());
    }

    #[test]
    fn test_arm_ignored_outside_triggered_mode() {
        let gate = TriggerGate::new(CaptureMode::Continuous);
        assert!(!gate.arm());
        assert!(!gate.has_pending());
    }

    #[test]
    fn test_set_mode_clears_pending_and_running() {
        let gate = TriggerGate::new(CaptureMode::Triggered);
        gate.arm();
        gate.admit();

        assert_eq!(gate.set_mode(CaptureMode::Triggered), CaptureMode::Triggered);
        assert_eq!(gate.status(), GateStatus::Idle);

        gate.arm();
        assert_eq!(gate.set_mode(CaptureMode::Continuous), CaptureMode::Triggered);
        assert!(!gate.has_pending());
    }

    #[test]
    fn test_blocked_admit_wakes_on_mode_change() {
        let gate = Arc::new(TriggerGate::new(CaptureMode::Triggered));
        let waiter = Arc::clone(&gate);
        let handle = thread::spawn(move || waiter.admit());

        thread::sleep(Duration::from_millis(50));
        assert!(!handle.is_finished());

        gate.set_mode(CaptureMode::Continuous);
        assert_eq!(handle.join().unwrap(), Admission::Grab(CaptureMode::Continuous));
    }

    #[test]
    fn test_blocked_admit_wakes_on_stop() {
        let gate = Arc::new(TriggerGate::new(CaptureMode::Triggered));
        let waiter = Arc::clone(&gate);
        let handle = thread::spawn(move || waiter.admit());

        thread::sleep(Duration::from_millis(50));
        gate.stop();
        assert_eq!(handle.join().unwrap(), Admission::Stop);
        assert!(!gate.arm());
    }

    #[test]
    fn test_rest_returns_early_on_stop() {
        let gate = Arc::new(TriggerGate::new(CaptureMode::Continuous));
        let stopper = Arc::clone(&gate);
        let started = Instant::now();

        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(30));
            stopper.stop();
        });

        assert!(gate.rest(Duration::from_secs(10)));
        assert!(started.elapsed() < Duration::from_secs(5));
        handle.join().unwrap();
    }

    #[test]
    fn test_rest_times_out_when_running() {
        let gate = TriggerGate::new(CaptureMode::Continuous);
        assert!(!gate.rest(Duration::from_millis(10)));
    }
}

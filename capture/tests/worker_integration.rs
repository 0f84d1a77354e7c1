//! Capture worker behaviour against an in-memory camera.

use capture::{
    CaptureError, CaptureEvent, CaptureMode, CaptureWorker, Frame, FrameSource, GateStatus,
    WorkerConfig,
};
use logging::{LogLevel, Logger};
use opencv::core::{CV_8UC3, Mat, Scalar};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};
use tempfile::TempDir;

/// Counts grabs and records when it has been released.
struct FakeCamera {
    grabs: Arc<AtomicUsize>,
    released: Arc<AtomicBool>,
    grab_time: Duration,
    failures_left: usize,
}

impl FrameSource for FakeCamera {
    fn grab(&mut self) -> capture::Result<Frame> {
        thread::sleep(self.grab_time);
        let n = self.grabs.fetch_add(1, Ordering::SeqCst) + 1;
        if self.failures_left > 0 {
            self.failures_left -= 1;
            return Err(CaptureError::Camera(format!("glitch on grab {}", n)));
        }
        let mat = Mat::new_rows_cols_with_default(2, 2, CV_8UC3, Scalar::all(n as f64))?;
        Frame::new(mat)
    }

    fn describe(&self) -> String {
        "fake camera".to_string()
    }
}

impl Drop for FakeCamera {
    fn drop(&mut self) {
        self.released.store(true, Ordering::SeqCst);
    }
}

struct Harness {
    worker: CaptureWorker,
    grabs: Arc<AtomicUsize>,
    released: Arc<AtomicBool>,
    _logs: TempDir,
}

fn logger() -> (Logger, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let logger = Logger::new(dir.path().join("worker.log"), LogLevel::Debug).unwrap();
    (logger, dir)
}

fn spawn(mode: CaptureMode, grab_time: Duration, failures: usize, queue: usize) -> Harness {
    let grabs = Arc::new(AtomicUsize::new(0));
    let released = Arc::new(AtomicBool::new(false));
    let (logger, logs) = logger();

    let camera = FakeCamera {
        grabs: Arc::clone(&grabs),
        released: Arc::clone(&released),
        grab_time,
        failures_left: failures,
    };
    let config = WorkerConfig {
        mode,
        queue_capacity: queue,
        retry_delay: Duration::from_millis(5),
    };
    let worker = CaptureWorker::spawn(move || Ok(camera), config, logger).unwrap();

    Harness {
        worker,
        grabs,
        released,
        _logs: logs,
    }
}

fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    condition()
}

#[test]
fn test_continuous_mode_streams_frames() {
    let mut h = spawn(CaptureMode::Continuous, Duration::from_millis(2), 0, 1);
    let rx = h.worker.receiver();

    let mut counters = Vec::new();
    assert!(wait_until(Duration::from_secs(5), || {
        while let Some(event) = rx.try_recv() {
            if let CaptureEvent::Frame { frame, grabbed } = event {
                assert_eq!((frame.width(), frame.height()), (2, 2));
                counters.push(grabbed);
            }
        }
        counters.len() >= 3
    }));

    assert!(counters.windows(2).all(|w| w[0] < w[1]));
    h.worker.stop();
}

#[test]
fn test_triggered_mode_blocks_until_start() {
    let mut h = spawn(CaptureMode::Triggered, Duration::ZERO, 0, 1);

    thread::sleep(Duration::from_millis(100));
    assert_eq!(h.grabs.load(Ordering::SeqCst), 0);
    assert!(h.worker.receiver().is_empty());

    assert!(h.worker.start());
    assert!(wait_until(Duration::from_secs(5), || {
        h.grabs.load(Ordering::SeqCst) == 1
    }));

    thread::sleep(Duration::from_millis(100));
    assert_eq!(h.grabs.load(Ordering::SeqCst), 1);
    assert!(matches!(
        h.worker.receiver().try_recv(),
        Some(CaptureEvent::Frame { .. })
    ));
    h.worker.stop();
}

#[test]
fn test_start_while_running_is_noop() {
    let mut h = spawn(CaptureMode::Triggered, Duration::from_millis(300), 0, 4);

    assert!(h.worker.start());
    assert!(wait_until(Duration::from_secs(5), || {
        h.worker.status() == GateStatus::Running
    }));

    assert!(!h.worker.start());
    assert!(!h.worker.start());

    assert!(wait_until(Duration::from_secs(5), || {
        h.worker.status() == GateStatus::Idle
    }));
    thread::sleep(Duration::from_millis(100));

    assert_eq!(h.grabs.load(Ordering::SeqCst), 1);
    assert_eq!(h.worker.receiver().len(), 1);
    h.worker.stop();
}

#[test]
fn test_repeated_start_before_wake_arms_once() {
    let mut h = spawn(CaptureMode::Triggered, Duration::from_millis(50), 0, 4);

    let armed = [h.worker.start(), h.worker.start(), h.worker.start()];
    assert_eq!(armed.iter().filter(|a| **a).count(), 1);

    thread::sleep(Duration::from_millis(300));
    assert_eq!(h.grabs.load(Ordering::SeqCst), 1);
    h.worker.stop();
}

#[test]
fn test_switching_back_to_continuous_resumes() {
    let mut h = spawn(CaptureMode::Triggered, Duration::from_millis(1), 0, 1);
    thread::sleep(Duration::from_millis(50));

    h.worker.set_mode(CaptureMode::Triggered);
    h.worker.set_mode(CaptureMode::Continuous);

    assert!(wait_until(Duration::from_secs(5), || {
        h.grabs.load(Ordering::SeqCst) >= 3
    }));
    assert_eq!(h.worker.mode(), CaptureMode::Continuous);
    h.worker.stop();
}

#[test]
fn test_stop_from_blocked_wait_joins_and_releases() {
    let mut h = spawn(CaptureMode::Triggered, Duration::ZERO, 0, 1);
    thread::sleep(Duration::from_millis(50));
    assert!(h.worker.is_running());
    assert!(!h.released.load(Ordering::SeqCst));

    h.worker.stop();

    assert!(!h.worker.is_running());
    assert!(h.released.load(Ordering::SeqCst));
    assert!(!h.worker.start());

    h.worker.stop();
}

#[test]
fn test_stop_while_streaming_releases_device() {
    let mut h = spawn(CaptureMode::Continuous, Duration::from_millis(1), 0, 1);
    assert!(wait_until(Duration::from_secs(5), || {
        h.grabs.load(Ordering::SeqCst) > 0
    }));

    h.worker.stop();
    assert!(h.released.load(Ordering::SeqCst));

    let after_stop = h.grabs.load(Ordering::SeqCst);
    thread::sleep(Duration::from_millis(50));
    assert_eq!(h.grabs.load(Ordering::SeqCst), after_stop);
}

#[test]
fn test_drop_stops_worker() {
    let h = spawn(CaptureMode::Continuous, Duration::from_millis(1), 0, 1);
    let released = Arc::clone(&h.released);

    drop(h);
    assert!(released.load(Ordering::SeqCst));
}

#[test]
fn test_read_failures_are_reported_and_skipped() {
    let mut h = spawn(CaptureMode::Continuous, Duration::from_millis(10), 2, 64);
    let rx = h.worker.receiver();

    let mut failures = 0;
    let mut frames = 0;
    assert!(wait_until(Duration::from_secs(5), || {
        for event in rx.drain() {
            match event {
                CaptureEvent::ReadFailed { reason } => {
                    assert!(reason.contains("glitch"));
                    failures += 1;
                }
                CaptureEvent::Frame { .. } => frames += 1,
            }
        }
        frames >= 2
    }));

    assert_eq!(failures, 2);
    assert!(h.worker.is_running());
    h.worker.stop();
}

#[test]
fn test_reset_frame_counter() {
    let mut h = spawn(CaptureMode::Continuous, Duration::from_millis(1), 0, 1);
    assert!(wait_until(Duration::from_secs(5), || {
        h.worker.frames_grabbed() >= 2
    }));

    h.worker.set_mode(CaptureMode::Triggered);
    thread::sleep(Duration::from_millis(100));
    h.worker.reset_frame_counter();
    assert_eq!(h.worker.frames_grabbed(), 0);

    h.worker.start();
    assert!(wait_until(Duration::from_secs(5), || {
        h.worker.frames_grabbed() == 1
    }));
    h.worker.stop();
}

#[test]
fn test_take_frame_counter_reads_and_zeroes() {
    let mut h = spawn(CaptureMode::Continuous, Duration::from_millis(1), 0, 1);
    assert!(wait_until(Duration::from_secs(5), || {
        h.worker.frames_grabbed() >= 3
    }));

    h.worker.set_mode(CaptureMode::Triggered);
    thread::sleep(Duration::from_millis(100));
    let before = h.worker.frames_grabbed();
    assert!(before >= 3);
    assert_eq!(h.worker.take_frame_counter(), before);
    assert_eq!(h.worker.frames_grabbed(), 0);

    // Every grab is counted by exactly one take while streaming.
    h.worker.set_mode(CaptureMode::Continuous);
    let mut taken = 0;
    let deadline = Instant::now() + Duration::from_millis(200);
    while Instant::now() < deadline {
        taken += h.worker.take_frame_counter();
        thread::sleep(Duration::from_millis(3));
    }
    h.worker.set_mode(CaptureMode::Triggered);
    thread::sleep(Duration::from_millis(100));
    taken += h.worker.take_frame_counter();

    assert_eq!(taken as usize, h.grabs.load(Ordering::SeqCst) - before as usize);
    h.worker.stop();
}

#[test]
fn test_open_failure_is_reported_at_spawn() {
    let (logger, _logs) = logger();

    let result = CaptureWorker::spawn(
        || -> capture::Result<FakeCamera> { Err(CaptureError::Camera("no device".to_string())) },
        WorkerConfig::default(),
        logger,
    );

    match result {
        Err(CaptureError::DeviceOpen(msg)) => assert!(msg.contains("no device")),
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("spawn should fail"),
    }
}

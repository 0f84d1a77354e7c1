//! Application state and the eframe update loop.
//!
//! Each repaint runs the same steps:
//! 1. Drain the capture mailbox and upload the newest frame
//! 2. Publish the fps reading once per second
//! 3. Render the page and collect at most one `UiCommand`
//! 4. Apply the command
//! 5. Draw the alert or toast on top

use crate::components::{Alert, Toast};
use crate::config::AppConfig;
use crate::logic::FpsMeter;
use crate::pages::{ViewerPage, ViewerView};
use capture::{
    CameraConfig, CaptureMode, CaptureWorker, Frame, FrameReceiver, ImageFormat, OpenCvCamera,
    WorkerConfig,
};
use logging::Logger;
use std::time::{Duration, Instant};

/// Upper bound between repaints when no frame arrives, so the fps label
/// and toasts keep updating in triggered mode.
const IDLE_REPAINT: Duration = Duration::from_millis(250);

pub struct App {
    pub(super) config: AppConfig,
    pub(super) logger: Logger,

    // Capture
    pub(super) worker: Option<CaptureWorker>,
    pub(super) frames: Option<FrameReceiver>,

    // User choices
    pub(super) mode: CaptureMode,
    pub(super) save_format: ImageFormat,
    pub(super) save_dir: String,

    // Display
    pub(super) texture: Option<egui::TextureHandle>,
    /// Frame currently on screen; this is what Save writes
    pub(super) last_frame: Option<Frame>,
    /// Capture-to-upload delay of `last_frame`
    pub(super) frame_age: Option<Duration>,
    pub(super) meter: FpsMeter,
    pub(super) fps_label: String,
    pub(super) last_error: Option<String>,

    // Notifications
    pub(super) alert: Option<Alert>,
    pub(super) current_toast: Option<Toast>,
}

impl App {
    pub fn new(ctx: &egui::Context) -> Self {
        let config = AppConfig::load();

        let logger = match Logger::new(config.log_path.clone(), config.log_level) {
            Ok(logger) => logger.with_console(config.log_console),
            Err(e) => {
                eprintln!("Failed to initialize logger: {}", e);
                std::process::exit(1);
            }
        };
        let ui_logger = logger.for_component("Viewer");

        ui_logger.info("[APP] Starting camview");
        ui_logger.info(&format!(
            "[APP] Configuration: camera {} @ {} fps, queue {}, format {}",
            config.camera_index, config.camera_fps, config.queue_capacity, config.save_format
        ));

        let mut app = Self::offline(config, ui_logger);

        match app.spawn_worker(logger.for_component("Capture")) {
            Ok(worker) => {
                let receiver = worker.receiver();
                let repaint = ctx.clone();
                receiver.set_notify(move || repaint.request_repaint());
                app.frames = Some(receiver);
                app.worker = Some(worker);
            }
            Err(e) => {
                app.logger
                    .error(&format!("[APP] Camera unavailable: {}", e));
                app.last_error = Some(e.to_string());
                app.alert = Some(Alert::error(
                    "Camera unavailable",
                    format!(
                        "Could not open camera {}.\n{}",
                        app.config.camera_index, e
                    ),
                ));
            }
        }

        app
    }

    /// State with no capture worker attached.
    pub(super) fn offline(config: AppConfig, logger: Logger) -> Self {
        Self {
            save_format: config.save_format,
            save_dir: config
                .save_dir
                .as_ref()
                .map(|dir| dir.display().to_string())
                .unwrap_or_default(),
            mode: CaptureMode::Continuous,
            worker: None,
            frames: None,
            texture: None,
            last_frame: None,
            frame_age: None,
            meter: FpsMeter::new(Instant::now()),
            fps_label: "Grab fps : -  Display fps : -".to_string(),
            last_error: None,
            alert: None,
            current_toast: None,
            logger,
            config,
        }
    }

    fn spawn_worker(&self, logger: Logger) -> capture::Result<CaptureWorker> {
        let camera = CameraConfig::new(self.config.camera_index).with_fps(self.config.camera_fps)?;
        let worker_config = WorkerConfig {
            mode: self.mode,
            queue_capacity: self.config.queue_capacity,
            ..WorkerConfig::default()
        };

        let camera_logger = logger.clone();
        CaptureWorker::spawn(
            move || OpenCvCamera::open(camera, camera_logger),
            worker_config,
            logger,
        )
    }

    pub(super) fn show_warning(&mut self, title: &str, message: impl Into<String>) {
        let message = message.into();
        self.logger.warn(&format!("[UI] {}: {}", title, message));
        self.alert = Some(Alert::warning(title, message));
    }

    pub(super) fn show_success(&mut self, message: impl Into<String>) {
        self.current_toast = Some(Toast::success(message));
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.pump_frames(ctx);
        self.publish_fps(Instant::now());

        let command = self.render_view(ctx);
        if let Some(command) = command {
            self.handle_ui_command(command);
        }

        self.render_overlays(ctx);
        ctx.request_repaint_after(IDLE_REPAINT);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.logger.info("[APP] Shutting down...");
        if let Some(mut worker) = self.worker.take() {
            worker.stop();
        }
        self.logger.info("[APP] Goodbye");
    }
}

impl App {
    fn render_view(&mut self, ctx: &egui::Context) -> Option<crate::events::UiCommand> {
        let view = ViewerView {
            mode: self.mode,
            format: self.save_format,
            save_dir: &self.save_dir,
            texture: self.texture.as_ref(),
            camera_ready: self.worker.is_some(),
            can_save: self.last_frame.is_some(),
            fps_label: &self.fps_label,
            frame_age: self.frame_age,
            dropped: self.frames.as_ref().map_or(0, FrameReceiver::dropped),
            last_error: self.last_error.as_deref(),
        };
        ViewerPage::show(ctx, &view)
    }

    fn render_overlays(&mut self, ctx: &egui::Context) {
        if let Some(alert) = &self.alert {
            if let Some(command) = alert.show(ctx) {
                self.handle_ui_command(command);
            }
            return;
        }

        if let Some(toast) = &self.current_toast
            && toast.show(ctx)
        {
            self.current_toast = None;
        }
    }
}

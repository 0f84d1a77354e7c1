//! Viewer configuration loaded from a `key=value` file.

use capture::ImageFormat;
use logging::LogLevel;
use std::fs;
use std::path::{Path, PathBuf};

const SEARCH_PATHS: [&str; 3] = ["camview.conf", "viewer/camview.conf", "../camview.conf"];

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Camera device index
    pub camera_index: i32,
    /// Requested capture rate
    pub camera_fps: f64,
    pub log_path: PathBuf,
    pub log_level: LogLevel,
    /// Echo log records to stdout as well
    pub log_console: bool,
    /// Initial snapshot directory; `None` leaves the field empty
    pub save_dir: Option<PathBuf>,
    pub save_format: ImageFormat,
    /// Frames buffered between capture thread and UI
    pub queue_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            camera_index: 0,
            camera_fps: 30.0,
            log_path: PathBuf::from("camview.log"),
            log_level: LogLevel::Info,
            log_console: false,
            save_dir: dirs::picture_dir().or_else(dirs::home_dir),
            save_format: ImageFormat::Jpg,
            queue_capacity: 1,
        }
    }
}

impl AppConfig {
    /// Parses config text. Unknown keys and unparsable values are reported
    /// on stderr and leave the default in place.
    ///
    /// ```text
    /// # camview.conf
    /// camera_index=0
    /// camera_fps=30
    /// log_path=camview.log
    /// log_level=Info
    /// log_console=false
    /// save_dir=/home/me/Pictures
    /// save_format=png
    /// queue_capacity=1
    /// ```
    pub fn parse(content: &str) -> Self {
        let mut config = Self::default();

        for (number, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                eprintln!("camview.conf:{}: expected key=value", number + 1);
                continue;
            };

            if let Err(msg) = config.apply(key.trim(), value.trim()) {
                eprintln!("camview.conf:{}: {}", number + 1, msg);
            }
        }

        config
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<(), String> {
        let bad = |what: &str| format!("invalid {} '{}' for '{}'", what, value, key);

        match key {
            "camera_index" => {
                self.camera_index = value.parse().map_err(|_| bad("integer"))?;
            }
            "camera_fps" => {
                self.camera_fps = value
                    .parse::<f64>()
                    .ok()
                    .filter(|fps| fps.is_finite() && *fps > 0.0)
                    .ok_or_else(|| bad("frame rate"))?;
            }
            "log_path" => self.log_path = PathBuf::from(value),
            "log_level" => {
                self.log_level = value.parse().map_err(|_| bad("log level"))?;
            }
            "log_console" => {
                self.log_console = match value.to_ascii_lowercase().as_str() {
                    "true" | "yes" | "1" | "on" => true,
                    "false" | "no" | "0" | "off" => false,
                    _ => return Err(bad("boolean")),
                };
            }
            "save_dir" => {
                self.save_dir = (!value.is_empty()).then(|| PathBuf::from(value));
            }
            "save_format" => {
                self.save_format = value.parse().map_err(|_| bad("image format"))?;
            }
            "queue_capacity" => {
                self.queue_capacity = value
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| bad("queue size"))?;
            }
            _ => return Err(format!("unknown key '{}' ignored", key)),
        }
        Ok(())
    }

    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;
        Ok(Self::parse(&content))
    }

    /// First readable file from the search paths, else defaults.
    pub fn load() -> Self {
        for path in SEARCH_PATHS {
            if let Ok(config) = Self::load_from_file(Path::new(path)) {
                println!("Loaded configuration from: {}", path);
                return config;
            }
        }

        println!("No configuration file found, using defaults");
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.camera_index, 0);
        assert_eq!(config.camera_fps, 30.0);
        assert_eq!(config.log_path, PathBuf::from("camview.log"));
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(!config.log_console);
        assert_eq!(config.save_format, ImageFormat::Jpg);
        assert_eq!(config.queue_capacity, 1);
    }

    #[test]
    fn test_parse_all_keys() {
        let config = AppConfig::parse(
            "# comment\n\
             camera_index=2\n\
             camera_fps = 15\n\
             \n\
             log_path=/tmp/cam.log\n\
             log_level=debug\n\
             log_console=yes\n\
             save_dir=/tmp/shots\n\
             save_format=PNG\n\
             queue_capacity=3\n",
        );

        assert_eq!(config.camera_index, 2);
        assert_eq!(config.camera_fps, 15.0);
        assert_eq!(config.log_path, PathBuf::from("/tmp/cam.log"));
        assert_eq!(config.log_level, LogLevel::Debug);
        assert!(config.log_console);
        assert_eq!(config.save_dir, Some(PathBuf::from("/tmp/shots")));
        assert_eq!(config.save_format, ImageFormat::Png);
        assert_eq!(config.queue_capacity, 3);
    }

    #[test]
    fn test_bad_values_keep_defaults() {
        let config = AppConfig::parse(
            "camera_index=front\n\
             camera_fps=-4\n\
             log_level=chatty\n\
             log_console=maybe\n\
             save_format=gif\n\
             queue_capacity=0\n\
             colour=blue\n\
             no equals sign here\n",
        );

        let defaults = AppConfig::default();
        assert_eq!(config, defaults);
    }

    #[test]
    fn test_empty_save_dir_clears_default() {
        let config = AppConfig::parse("save_dir=\n");
        assert_eq!(config.save_dir, None);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("camview.conf");
        std::fs::write(&path, "camera_index=1\nsave_format=bmp\n").unwrap();

        let config = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(config.camera_index, 1);
        assert_eq!(config.save_format, ImageFormat::Bmp);

        assert!(AppConfig::load_from_file(&dir.path().join("missing.conf")).is_err());
    }
}

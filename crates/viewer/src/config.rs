//! Viewer configuration (window, camera feel). Loaded from config.ron at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Persistent viewer settings. Loaded from `config.ron` in the current directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Window width in logical pixels.
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    /// Window height in logical pixels.
    #[serde(default = "default_window_height")]
    pub window_height: u32,
    /// Enable vsync (recommended to avoid tearing).
    #[serde(default = "default_true")]
    pub vsync: bool,
    /// Mouse sensitivity in degrees per cursor pixel.
    #[serde(default = "default_sensitivity")]
    pub sensitivity: f32,
    /// Camera movement speed in world units per second.
    #[serde(default = "default_move_speed")]
    pub move_speed: f32,
    /// Narrowest field of view the scroll zoom reaches, in degrees.
    #[serde(default = "default_fov_min")]
    pub fov_min: f32,
    /// Widest field of view the scroll zoom reaches, in degrees.
    #[serde(default = "default_fov_max")]
    pub fov_max: f32,
}

fn default_window_width() -> u32 {
    1280
}
fn default_window_height() -> u32 {
    720
}
fn default_true() -> bool {
    true
}
fn default_sensitivity() -> f32 {
    0.1
}
fn default_move_speed() -> f32 {
    2.5
}
fn default_fov_min() -> f32 {
    20.0
}
fn default_fov_max() -> f32 {
    80.0
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            vsync: default_true(),
            sensitivity: default_sensitivity(),
            move_speed: default_move_speed(),
            fov_min: default_fov_min(),
            fov_max: default_fov_max(),
        }
    }
}

impl ViewerConfig {
    /// Load config from `config.ron`. If the file is missing or invalid,
    /// returns default config.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Load config from `config.ron`, writing a default template on first run
    /// so users have a file to edit.
    pub fn load_or_create() -> Self {
        let path = config_path();
        if !path.exists() {
            let config = Self::default();
            config.save_to(&path);
            return config;
        }
        Self::load_from(&path)
    }

    fn load_from(path: &Path) -> Self {
        if let Ok(data) = std::fs::read_to_string(path) {
            match ron::from_str(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }

    /// Save current config to `config.ron`. Logs on error.
    pub fn save(&self) {
        self.save_to(&config_path());
    }

    fn save_to(&self, path: &Path) {
        if let Ok(s) = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            if let Err(e) = std::fs::write(path, s) {
                log::warn!("Could not write config to {:?}: {}", path, e);
            }
        }
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("config.ron")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = ViewerConfig::default();
        assert!(config.window_width > 0);
        assert!(config.window_height > 0);
        assert!(config.vsync);
        assert!(config.sensitivity > 0.0);
        assert!(config.move_speed > 0.0);
        assert!(config.fov_min < config.fov_max);
    }

    #[test]
    fn partial_ron_fills_missing_fields_from_defaults() {
        let config: ViewerConfig = ron::from_str("(window_width: 1920, vsync: false)").unwrap();
        assert_eq!(config.window_width, 1920);
        assert!(!config.vsync);
        assert_eq!(config.window_height, default_window_height());
        assert_eq!(config.move_speed, default_move_speed());
        assert_eq!(config.fov_min, default_fov_min());
        assert_eq!(config.fov_max, default_fov_max());
    }

    #[test]
    fn fov_range_is_configurable() {
        let config: ViewerConfig = ron::from_str("(fov_min: 30.0, fov_max: 60.0)").unwrap();
        assert_eq!(config.fov_min, 30.0);
        assert_eq!(config.fov_max, 60.0);
    }

    #[test]
    fn round_trips_through_ron() {
        let config = ViewerConfig {
            window_width: 800,
            window_height: 600,
            vsync: false,
            sensitivity: 0.25,
            move_speed: 5.0,
            fov_min: 25.0,
            fov_max: 70.0,
        };
        let text = ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::default()).unwrap();
        let back: ViewerConfig = ron::from_str(&text).unwrap();
        assert_eq!(back.window_width, 800);
        assert_eq!(back.sensitivity, 0.25);
        assert_eq!(back.fov_max, 70.0);
    }

    #[test]
    fn save_and_load_round_trip_on_disk() {
        let path = std::env::temp_dir().join(format!("orrery-config-{}.ron", std::process::id()));
        let config = ViewerConfig {
            window_width: 1024,
            fov_min: 15.0,
            ..Default::default()
        };
        config.save_to(&path);
        let back = ViewerConfig::load_from(&path);
        std::fs::remove_file(&path).ok();
        assert_eq!(back.window_width, 1024);
        assert_eq!(back.fov_min, 15.0);
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join(format!("orrery-corrupt-{}.ron", std::process::id()));
        std::fs::write(&path, "(window_width: \"not a number\"").unwrap();
        let config = ViewerConfig::load_from(&path);
        std::fs::remove_file(&path).ok();
        assert_eq!(config.window_width, default_window_width());
    }
}

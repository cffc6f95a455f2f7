// GlTutor
// copyright gl_tutor developers 2024～2025

//! Application configuration.
//!
//! Every tutorial runs with sensible defaults; an optional TOML file can override the window,
//! projection, log and asset settings, and a couple of command line flags override the file.
//!
//! ```toml
//! [window]
//! width = 1280
//! height = 720
//! vsync = true
//!
//! [log]
//! level = "debug"
//! ```

use crate::error::AppError;
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// config file looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "gl_tutor.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub gl_major: u8,
    pub gl_minor: u8,
    pub vsync: bool,
    /// None means "ask the user"
    pub fullscreen: Option<bool>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            gl_major: crate::GL_VERSION_MAJOR,
            gl_minor: crate::GL_VERSION_MINOR,
            vsync: true,
            fullscreen: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 57.0,
            near: 0.5,
            far: 1500.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub file: String,
    pub console: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: format!("log{}gl_tutor.log", std::path::MAIN_SEPARATOR),
            console: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub root: String,
    pub default_font: String,
    pub default_font_size: f32,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            root: "assets".to_string(),
            default_font: "fonts/DejaVuSansMono.ttf".to_string(),
            default_font_size: 24.0,
        }
    }
}

impl AssetConfig {
    /// Resolves a path relative to the asset root
    pub fn path(&self, relative: &str) -> PathBuf {
        Path::new(&self.root).join(relative)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub projection: ProjectionConfig,
    pub log: LogConfig,
    pub assets: AssetConfig,
}

impl AppConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, AppError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }

    /// Loads the explicitly requested file, else the default file if present, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, AppError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Command line flags win over the file
    pub fn apply_args(&mut self, args: &CliArgs) {
        if args.fullscreen {
            self.window.fullscreen = Some(true);
        } else if args.windowed {
            self.window.fullscreen = Some(false);
        }
        if let Some(level) = &args.log_level {
            self.log.level = level.clone();
        }
    }
}

/// Command line accepted by every tutorial binary
#[derive(Debug, Default, Parser)]
#[command(about = "OpenGL 4 tutorial")]
pub struct CliArgs {
    /// Run fullscreen without asking
    #[arg(long, conflicts_with = "windowed")]
    pub fullscreen: bool,

    /// Run in a window without asking
    #[arg(long)]
    pub windowed: bool,

    /// Path of a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the log level (error, warn, info, debug, trace)
    #[arg(long)]
    pub log_level: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.window.gl_major, 4);
        assert_eq!(cfg.window.gl_minor, 4);
        assert!(cfg.window.vsync);
        assert_eq!(cfg.window.fullscreen, None);
        assert_eq!(cfg.projection.fov_degrees, 57.0);
        assert_eq!(cfg.projection.near, 0.5);
        assert_eq!(cfg.projection.far, 1500.0);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let cfg = AppConfig::from_toml_str(
            r#"
            [window]
            width = 800
            fullscreen = false

            [log]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.window.width, 800);
        assert_eq!(cfg.window.height, 720);
        assert_eq!(cfg.window.fullscreen, Some(false));
        assert_eq!(cfg.log.level, "debug");
        assert_eq!(cfg.projection, ProjectionConfig::default());
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let err = AppConfig::from_toml_str("[window]\nwidth = \"wide\"").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_args_override() {
        let mut cfg = AppConfig::default();
        let args = CliArgs::parse_from(["tutorial", "--windowed", "--log-level", "trace"]);
        cfg.apply_args(&args);
        assert_eq!(cfg.window.fullscreen, Some(false));
        assert_eq!(cfg.log.level, "trace");

        let args = CliArgs::parse_from(["tutorial", "--fullscreen"]);
        cfg.apply_args(&args);
        assert_eq!(cfg.window.fullscreen, Some(true));
    }

    #[test]
    fn test_asset_path() {
        let assets = AssetConfig::default();
        assert_eq!(
            assets.path("fonts/DejaVuSansMono.ttf"),
            Path::new("assets").join("fonts/DejaVuSansMono.ttf")
        );
    }

    #[test]
    fn test_default_font_ships() {
        // unit tests run from the package root
        let assets = AssetConfig::default();
        assert!(assets.path(&assets.default_font).is_file());
    }
}

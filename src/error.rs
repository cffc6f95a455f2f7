// GlTutor
// copyright gl_tutor developers 2024～2025

//! All fallible framework operations return `AppError`.
//! Only initialization can fail: creating the platform, window or GL context,
//! loading resources, reading config. The steady-state render loop never returns one.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("windowing platform error: {0}")]
    Platform(String),

    #[error("failed to create window: {0}")]
    WindowCreation(String),

    #[error("OpenGL context error: {0}")]
    Context(String),

    #[error("invalid window state: cannot {action} while {state}")]
    InvalidState { action: &'static str, state: String },

    #[error("shader '{key}': {message}")]
    Shader { key: String, message: String },

    #[error("texture '{key}': {message}")]
    Texture { key: String, message: String },

    #[error("font '{key}': {message}")]
    Font { key: String, message: String },

    #[error("{kind} with key '{key}' already exists")]
    DuplicateKey { kind: &'static str, key: String },

    #[error("{kind} with key '{key}' does not exist")]
    MissingKey { kind: &'static str, key: String },

    #[error("config error: {0}")]
    Config(String),

    #[error("log init error: {0}")]
    Log(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn shader(key: &str, message: impl Into<String>) -> Self {
        AppError::Shader {
            key: key.to_string(),
            message: message.into(),
        }
    }

    pub fn texture(key: &str, message: impl Into<String>) -> Self {
        AppError::Texture {
            key: key.to_string(),
            message: message.into(),
        }
    }

    pub fn font(key: &str, message: impl Into<String>) -> Self {
        AppError::Font {
            key: key.to_string(),
            message: message.into(),
        }
    }
}

impl From<toml::de::Error> for AppError {
    fn from(e: toml::de::Error) -> Self {
        AppError::Config(e.to_string())
    }
}

// GlTutor
// copyright gl_tutor developers 2024～2025

//! GlTutor is the small framework shared by a series of standalone OpenGL 4 tutorial programs.
//! Every tutorial opens one window, loads a fixed set of shaders, textures and meshes,
//! runs a read-render-present loop and exits.
//!
//! The framework gives each tutorial:
//!
//! * a window/scene lifecycle (`window`, `scene`, `context`) that drives per-frame timing,
//!   input edge detection and dispatch into the tutorial's `Scene` implementation,
//! * orbit and walking cameras (`camera`), pure math with no GL calls,
//! * keyed resource managers for shaders, textures, samplers and fonts plus a few mesh
//!   primitives (`render`),
//! * a builder style HUD text API resolved against the current window size (`render::hud`),
//! * logging, configuration and a process entry helper (`log`, `config`, `app`).
//!
//! # Example
//!
//! ```ignore
//! fn main() -> std::process::ExitCode {
//!     gl_tutor::app::run_tutorial("001 - Creating a Window", MyScene::new())
//! }
//! ```

/// OpenGL version requested by every tutorial unless the config says otherwise
pub const GL_VERSION_MAJOR: u8 = 4;
pub const GL_VERSION_MINOR: u8 = 4;

/// GLSL version line prepended to embedded shader sources
pub const GLSL_VERSION: &str = "#version 440 core";

/// process entry helper: fullscreen prompt, run, exit code
pub mod app;

/// orbit camera and walking camera
pub mod camera;

/// application configuration from TOML and command line
pub mod config;

/// state handed to every scene callback: gl, input, timing, projection
pub mod context;

/// the framework error type
pub mod error;

/// key and mouse codes, window signals and edge-detecting input state
pub mod event;

/// log4rs initialisation
pub mod log;

/// keyed resource caches, shaders, textures, samplers, meshes, fonts and HUD
pub mod render;

/// the Scene trait implemented by every tutorial
pub mod scene;

/// frame delta time and FPS counter
pub mod timer;

/// platform, native window and GL context, lifecycle state machine
pub mod window;

pub use error::AppError;

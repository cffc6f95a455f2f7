// GlTutor
// copyright gl_tutor developers 2024～2025

//! Platform and OpenGL window.
//!
//! `Platform` owns the winit event loop and the registry of live windows.
//! `OpenGlWindow` owns one native window, its GL context and the scene `Context`,
//! and runs the frame loop:
//!
//! ```text
//!   tick timer -> scene.render -> swap buffers -> pump OS events
//!       -> dispatch resize / scroll -> scene.update
//! ```
//!
//! Events are pumped with winit's `pump_app_events`, so the loop stays in our hands
//! instead of being handed over to `EventLoop::run_app`. Whichever window pumps,
//! events land in the registry queue of the window they were sent to.

pub mod backend;
pub mod lifecycle;
pub mod registry;

use crate::{
    config::{AppConfig, AssetConfig, ProjectionConfig},
    context::Context,
    error::AppError,
    event::WindowSignal,
    scene::Scene,
};
use backend::{CreatedWindow, GlSurfaceState, PlatformHandler};
use lifecycle::{Lifecycle, WindowState};
use log::{error, info};
use std::time::{Duration, Instant};
use winit::{
    event_loop::{ControlFlow, EventLoop},
    platform::pump_events::{EventLoopExtPumpEvents, PumpStatus},
    window::WindowId,
};

/// pumps of CREATE_PUMP_TIMEOUT allowed for the native window to show up
const CREATE_PUMP_ATTEMPTS: u32 = 100;
const CREATE_PUMP_TIMEOUT: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, PartialEq)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub gl_major: u8,
    pub gl_minor: u8,
    pub fullscreen: bool,
    pub vsync: bool,
}

impl WindowSettings {
    /// Window part of the config; `fullscreen` is already resolved by the caller
    pub fn from_config(title: &str, config: &AppConfig, fullscreen: bool) -> Self {
        Self {
            title: title.to_string(),
            width: config.window.width,
            height: config.window.height,
            gl_major: config.window.gl_major,
            gl_minor: config.window.gl_minor,
            fullscreen,
            vsync: config.window.vsync,
        }
    }
}

/// The windowing subsystem.
///
/// Owns the event loop and the one handler that builds every window and routes
/// OS events to the window they belong to. Shut down once the last registered
/// window is destroyed; winit cannot build a second event loop in one process, so
/// creating windows afterwards fails.
pub struct Platform {
    event_loop: Option<EventLoop<()>>,
    handler: PlatformHandler,
}

impl Platform {
    pub fn new() -> Result<Self, AppError> {
        let event_loop = EventLoop::new().map_err(|e| AppError::Platform(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);
        Ok(Self {
            event_loop: Some(event_loop),
            handler: PlatformHandler::new(),
        })
    }

    pub fn live_windows(&self) -> usize {
        self.handler.registry.live_count()
    }

    pub fn is_shut_down(&self) -> bool {
        self.event_loop.is_none()
    }

    fn pump(&mut self, timeout: Duration) -> Result<PumpStatus, AppError> {
        let event_loop = self
            .event_loop
            .as_mut()
            .ok_or_else(|| AppError::Platform("windowing subsystem already shut down".to_string()))?;
        Ok(event_loop.pump_app_events(Some(timeout), &mut self.handler))
    }

    /// Pumps until the handler has built (and registered) the requested window
    fn create_native(&mut self, settings: WindowSettings) -> Result<CreatedWindow, AppError> {
        let title = settings.title.clone();
        self.handler.request_window(settings);
        for _ in 0..CREATE_PUMP_ATTEMPTS {
            let status = self.pump(CREATE_PUMP_TIMEOUT)?;
            if let Some(created) = self.handler.take_created() {
                return created;
            }
            if let PumpStatus::Exit(code) = status {
                return Err(AppError::Platform(format!("event loop exited with code {}", code)));
            }
        }
        Err(AppError::WindowCreation(format!("'{}' was not created in time", title)))
    }

    fn take_signals(&mut self, id: WindowId) -> Vec<WindowSignal> {
        self.handler.registry.take_signals(id)
    }

    fn deregister(&mut self, id: WindowId) -> Result<(), AppError> {
        if self.handler.registry.deregister(id)? == 0 {
            info!("last window destroyed, shutting down windowing subsystem");
            self.event_loop = None;
        }
        Ok(())
    }
}

pub struct OpenGlWindow {
    lifecycle: Lifecycle,
    id: WindowId,
    native: Option<GlSurfaceState>,
    ctx: Context,
}

impl OpenGlWindow {
    /// Creates the native window, makes its GL context current and registers it
    /// with the platform.
    ///
    /// Fails when the OS refuses the window or the requested GL version.
    pub fn create(
        platform: &mut Platform,
        settings: WindowSettings,
        projection: ProjectionConfig,
        assets: AssetConfig,
    ) -> Result<Self, AppError> {
        let mut lifecycle = Lifecycle::new();
        let vsync = settings.vsync;
        let created = platform.create_native(settings)?;

        let size = created.state.window.inner_size();
        let id = created.state.id();
        lifecycle.advance("create", WindowState::Created)?;

        let mut ctx = Context::new(created.gl, size.width, size.height, vsync, projection, assets);
        ctx.resize(size.width, size.height);

        Ok(Self {
            lifecycle,
            id,
            native: Some(created.state),
            ctx,
        })
    }

    /// Runs the scene until the window is asked to close, then releases the scene and
    /// destroys the window. Scene initialisation errors do not escape: they are logged
    /// and turned into a close with the error flag.
    pub fn run<S: Scene>(&mut self, platform: &mut Platform, scene: &mut S) -> Result<(), AppError> {
        self.lifecycle.advance("run", WindowState::Running)?;
        if let Some(native) = &self.native {
            native.make_current()?;
        }

        if let Err(e) = scene.initialize(&mut self.ctx) {
            error!("scene initialization failed: {}", e);
            self.ctx.close_window(true);
        }

        self.ctx.timer.reset(Instant::now());
        while !self.ctx.should_close() {
            self.ctx.timer.tick();
            scene.render(&mut self.ctx);
            self.present();
            self.ctx.input.begin_frame();
            self.pump_events(platform, scene);
            scene.update(&mut self.ctx);
        }

        self.lifecycle.advance("close", WindowState::Closing)?;
        info!("closing window, {} fps at last sample", self.ctx.fps());
        scene.release(&mut self.ctx);
        self.ctx.release_fonts();
        self.finish_destroy(platform)
    }

    /// Destroys a window that was created but never run
    pub fn destroy(&mut self, platform: &mut Platform) -> Result<(), AppError> {
        self.lifecycle.advance("close", WindowState::Closing)?;
        self.ctx.release_fonts();
        self.finish_destroy(platform)
    }

    fn finish_destroy(&mut self, platform: &mut Platform) -> Result<(), AppError> {
        self.lifecycle.advance("destroy", WindowState::Destroyed)?;
        if let Some(native) = self.native.take() {
            drop(native);
            platform.deregister(self.id)?;
        }
        Ok(())
    }

    fn present(&mut self) {
        let Some(native) = &self.native else {
            return;
        };
        if let Some(vsync) = self.ctx.take_vsync_change() {
            native.set_vsync(vsync);
        }
        if let Err(e) = native.swap_buffers() {
            error!("failed to swap buffers: {}", e);
        }
    }

    fn pump_events<S: Scene>(&mut self, platform: &mut Platform, scene: &mut S) {
        match platform.pump(Duration::ZERO) {
            Ok(PumpStatus::Exit(_)) => self.ctx.close_window(false),
            Ok(PumpStatus::Continue) => {}
            Err(e) => {
                error!("{}", e);
                self.ctx.close_window(true);
                return;
            }
        }

        let signals = platform.take_signals(self.id);
        for signal in &signals {
            self.ctx.handle_signal(signal);
            match *signal {
                WindowSignal::Resized { width, height } => {
                    if self.ctx.resize(width, height) {
                        if let Some(native) = &self.native {
                            native.resize(width, height);
                        }
                        scene.on_window_resized(&mut self.ctx, width, height);
                    }
                }
                WindowSignal::Scroll { dx, dy } => scene.on_mouse_wheel_scroll(&mut self.ctx, dx, dy),
                WindowSignal::CloseRequested => self.ctx.close_window(false),
                _ => {}
            }
        }
    }

    pub fn state(&self) -> WindowState {
        self.lifecycle.state()
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.ctx
    }

    pub fn has_error(&self) -> bool {
        self.ctx.has_error()
    }
}

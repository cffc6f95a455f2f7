// GlTutor
// copyright gl_tutor developers 2024～2025

//! winit + glutin + glow backend.
//!
//! Native windows can only be created from inside the event loop, so the window and
//! its GL context are built by the handler while the loop is pumped and handed back.
//! Afterwards the handler turns window events into `WindowSignal`s and routes them
//! through the registry.

use super::registry::WindowRegistry;
use super::WindowSettings;
use crate::error::AppError;
use crate::event::signal_from_winit;
use glutin::{
    config::{ConfigTemplateBuilder, GlConfig},
    context::{
        ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext,
        PossiblyCurrentContext, PossiblyCurrentGlContext, Version,
    },
    display::{GetGlDisplay, GlDisplay},
    prelude::GlSurface,
    surface::{Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface},
};
use glutin_winit::DisplayBuilder;
use log::{debug, info, warn};
use raw_window_handle::HasWindowHandle;
use std::num::NonZeroU32;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::ActiveEventLoop,
    window::{Fullscreen, Window, WindowId},
};

/// Native window plus the GL objects tied to it.
/// Field order matters: surface and context are dropped before the window.
pub struct GlSurfaceState {
    pub surface: Surface<WindowSurface>,
    pub context: PossiblyCurrentContext,
    pub window: Window,
}

impl GlSurfaceState {
    pub fn id(&self) -> WindowId {
        self.window.id()
    }

    /// Another window may have made its own context current since this one was built
    pub fn make_current(&self) -> Result<(), AppError> {
        self.context
            .make_current(&self.surface)
            .map_err(|e| AppError::Context(e.to_string()))
    }

    pub fn swap_buffers(&self) -> Result<(), AppError> {
        self.surface
            .swap_buffers(&self.context)
            .map_err(|e| AppError::Context(e.to_string()))
    }

    pub fn resize(&self, width: u32, height: u32) {
        self.surface
            .resize(&self.context, non_zero(width), non_zero(height));
    }

    pub fn set_vsync(&self, enable: bool) {
        let interval = if enable {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(e) = self.surface.set_swap_interval(&self.context, interval) {
            warn!("failed to set swap interval: {}", e);
        }
    }
}

fn non_zero(v: u32) -> NonZeroU32 {
    NonZeroU32::new(v).unwrap_or(NonZeroU32::MIN)
}

/// Everything produced by a successful window creation
pub struct CreatedWindow {
    pub state: GlSurfaceState,
    pub gl: glow::Context,
}

/// The single winit handler of a `Platform`.
///
/// Window creation is requested from outside and carried out inside the loop,
/// the only place winit allows it. Window events are queued in the registry under
/// the id of the window they belong to.
pub struct PlatformHandler {
    resumed: bool,
    pending: Option<WindowSettings>,
    created: Option<Result<CreatedWindow, AppError>>,
    pub registry: WindowRegistry<WindowId>,
}

impl Default for PlatformHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformHandler {
    pub fn new() -> Self {
        Self {
            resumed: false,
            pending: None,
            created: None,
            registry: WindowRegistry::new(),
        }
    }

    /// The window is built on the next pump once the application has resumed
    pub fn request_window(&mut self, settings: WindowSettings) {
        self.created = None;
        self.pending = Some(settings);
    }

    /// Some once the requested window was built or failed to build
    pub fn take_created(&mut self) -> Option<Result<CreatedWindow, AppError>> {
        self.created.take()
    }

    fn create_pending(&mut self, event_loop: &ActiveEventLoop) {
        if !self.resumed {
            return;
        }
        let Some(settings) = self.pending.take() else {
            return;
        };
        let result = create_gl_window(event_loop, &settings).and_then(|created| {
            self.registry.register(created.state.id(), &settings.title)?;
            Ok(created)
        });
        self.created = Some(result);
    }
}

impl ApplicationHandler for PlatformHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        self.resumed = true;
        self.create_pending(event_loop);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.create_pending(event_loop);
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(signal) = signal_from_winit(&event) else {
            return;
        };
        if !self.registry.push_signal(window_id, signal) {
            debug!("dropped {:?} for unregistered window {:?}", signal, window_id);
        }
    }
}

fn create_gl_window(event_loop: &ActiveEventLoop, settings: &WindowSettings) -> Result<CreatedWindow, AppError> {
    let mut attributes = Window::default_attributes()
        .with_title(&settings.title)
        .with_inner_size(PhysicalSize::new(settings.width, settings.height))
        .with_resizable(true);
    if settings.fullscreen {
        attributes = attributes.with_fullscreen(Some(Fullscreen::Borderless(None)));
    }

    let template = ConfigTemplateBuilder::new().with_depth_size(24);
    let display_builder = DisplayBuilder::new().with_window_attributes(Some(attributes));
    let (window, gl_config) = display_builder
        .build(event_loop, template, |configs| {
            // glutin never calls the picker with an empty set
            configs
                .reduce(|accum, config| {
                    if config.num_samples() > accum.num_samples() {
                        config
                    } else {
                        accum
                    }
                })
                .expect("no GL config offered")
        })
        .map_err(|e| AppError::WindowCreation(e.to_string()))?;
    let window = window.ok_or_else(|| AppError::WindowCreation("no window was built".to_string()))?;

    let raw_window_handle = window
        .window_handle()
        .map_err(|e| AppError::WindowCreation(e.to_string()))?
        .as_raw();
    let gl_display = gl_config.display();
    let context_attributes = ContextAttributesBuilder::new()
        .with_profile(GlProfile::Core)
        .with_context_api(ContextApi::OpenGl(Some(Version::new(
            settings.gl_major,
            settings.gl_minor,
        ))))
        .build(Some(raw_window_handle));
    let not_current = unsafe { gl_display.create_context(&gl_config, &context_attributes) }
        .map_err(|e| {
            AppError::Context(format!(
                "OpenGL {}.{} core context: {}",
                settings.gl_major, settings.gl_minor, e
            ))
        })?;

    let size = window.inner_size();
    let surface_attributes = SurfaceAttributesBuilder::<WindowSurface>::new().build(
        raw_window_handle,
        non_zero(size.width),
        non_zero(size.height),
    );
    let surface = unsafe { gl_display.create_window_surface(&gl_config, &surface_attributes) }
        .map_err(|e| AppError::Context(e.to_string()))?;
    let context = not_current
        .make_current(&surface)
        .map_err(|e| AppError::Context(e.to_string()))?;

    let gl = unsafe { glow::Context::from_loader_function_cstr(|s| gl_display.get_proc_address(s)) };
    info!(
        "window '{}' created {}x{}, OpenGL {}.{} core",
        settings.title, size.width, size.height, settings.gl_major, settings.gl_minor
    );

    let state = GlSurfaceState {
        surface,
        context,
        window,
    };
    state.set_vsync(settings.vsync);
    Ok(CreatedWindow { state, gl })
}

// GlTutor
// copyright gl_tutor developers 2024～2025

use crate::model::{OrbitModel, Shape};
use gl_tutor::{
    context::Context,
    error::AppError,
    event::{Key, MouseButton},
    render::{
        hud::HudBase,
        mesh::StaticMesh,
        primitives,
        shader::{ShaderManager, ShaderStage},
        shader_source::{FRAGMENT_SRC_COLOR, VERTEX_SRC_COLOR},
    },
    scene::Scene,
};
use glam::{Mat4, Vec3, Vec4};
use glow::HasContext;
use log::{info, warn};

const COLOR_PROGRAM: &str = "color";
const GROUND_COLOR: Vec4 = Vec4::new(0.35, 0.35, 0.4, 1.0);
const HUD_COLOR: Vec4 = Vec4::new(1.0, 1.0, 1.0, 1.0);
const HELP_COLOR: Vec4 = Vec4::new(0.8, 0.8, 0.5, 1.0);

pub struct OrbitCameraScene {
    model: OrbitModel,
    shaders: ShaderManager,
    meshes: Vec<(Shape, StaticMesh)>,
    ground: Option<StaticMesh>,
    hud: Option<HudBase>,
}

impl OrbitCameraScene {
    pub fn new() -> Self {
        Self {
            model: OrbitModel::new(),
            shaders: ShaderManager::new(),
            meshes: vec![],
            ground: None,
            hud: None,
        }
    }

    fn print_hud(&mut self, ctx: &Context) {
        let (Some(hud), Some(font)) = (self.hud.as_mut(), ctx.default_font()) else {
            return;
        };
        let camera = &self.model.camera;
        hud.print_builder()
            .from_left()
            .from_top()
            .with_offset(10.0, 10.0)
            .with_color(HUD_COLOR)
            .print(
                ctx,
                font,
                format_args!(
                    "FPS: {}\nVSync: {}",
                    ctx.fps(),
                    if ctx.is_vsync_enabled() { "On" } else { "Off" }
                ),
            );
        hud.print_builder()
            .from_left()
            .from_bottom()
            .with_offset(10.0, 10.0)
            .with_color(HUD_COLOR)
            .print(
                ctx,
                font,
                format_args!(
                    "Radius: {:.1}\nAzimuth: {:.2}\nPolar: {:.2}",
                    camera.radius(),
                    camera.azimuth(),
                    camera.polar()
                ),
            );
        hud.print_builder()
            .from_right()
            .from_top()
            .with_offset(10.0, 10.0)
            .with_color(HELP_COLOR)
            .print(
                ctx,
                font,
                format_args!("LMB drag: rotate\nRMB drag: pan\nWheel: zoom\nR: reset camera\nF3: vsync\nESC: quit"),
            );
    }
}

impl Scene for OrbitCameraScene {
    fn initialize(&mut self, ctx: &mut Context) -> Result<(), AppError> {
        let gl = ctx.gl();
        self.shaders
            .load_shader_from_source(gl, "color_vs", ShaderStage::Vertex, VERTEX_SRC_COLOR)?;
        self.shaders
            .load_shader_from_source(gl, "color_fs", ShaderStage::Fragment, FRAGMENT_SRC_COLOR)?;
        self.shaders
            .create_program(gl, COLOR_PROGRAM, &["color_vs", "color_fs"])?;

        for shape in Shape::ALL {
            self.meshes.push((shape, StaticMesh::new(gl, &shape.vertices())?));
        }
        self.ground = Some(StaticMesh::new(gl, &primitives::plane_ground(40.0, 1.0))?);

        unsafe {
            gl.enable(glow::DEPTH_TEST);
            gl.clear_color(0.05, 0.05, 0.12, 1.0);
        }

        // the overlay is optional, the scene still runs without a font
        self.hud = match HudBase::new(ctx) {
            Ok(hud) => Some(hud),
            Err(e) => {
                warn!("HUD disabled: {}", e);
                None
            }
        };
        info!("orbit camera scene initialized, {} meshes", self.meshes.len());
        Ok(())
    }

    fn render(&mut self, ctx: &mut Context) {
        let gl = ctx.gl();
        unsafe {
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        if let Ok(program) = self.shaders.program_mut(COLOR_PROGRAM) {
            program.use_program(gl);
            program.set_mat4(gl, "u_projection", &ctx.projection_matrix());
            program.set_mat4(gl, "u_view", &self.model.camera.view_matrix());
            program.set_vec3(gl, "u_light_direction", Vec3::new(-0.4, -1.0, -0.6));

            if let Some(ground) = &self.ground {
                program.set_mat4(gl, "u_model", &Mat4::IDENTITY);
                program.set_vec4(gl, "u_color", GROUND_COLOR);
                ground.render(gl);
            }
            for object in &self.model.objects {
                let Some((_, mesh)) = self.meshes.iter().find(|(s, _)| *s == object.shape) else {
                    continue;
                };
                program.set_mat4(gl, "u_model", &self.model.model_matrix(object));
                program.set_vec4(gl, "u_color", object.color);
                mesh.render(gl);
            }
        }

        self.print_hud(ctx);
    }

    fn update(&mut self, ctx: &mut Context) {
        if ctx.key_pressed_once(Key::Escape) {
            ctx.close_window(false);
        }
        if ctx.key_pressed_once(Key::F3) {
            let vsync = !ctx.is_vsync_enabled();
            ctx.set_vsync(vsync);
        }
        if ctx.key_pressed_once(Key::R) {
            self.model.reset_camera();
        }

        let (dx, dy) = ctx.cursor_delta();
        self.model.drag(
            ctx.mouse_pressed(MouseButton::Left),
            ctx.mouse_pressed(MouseButton::Right),
            dx as f32,
            dy as f32,
        );
        self.model.advance(ctx.timer.delta_secs());
    }

    fn release(&mut self, ctx: &mut Context) {
        let gl = ctx.gl();
        self.shaders.release_all(gl);
        for (_, mesh) in self.meshes.drain(..) {
            mesh.release(gl);
        }
        if let Some(ground) = self.ground.take() {
            ground.release(gl);
        }
        if let Some(mut hud) = self.hud.take() {
            hud.release(gl);
        }
    }

    fn on_mouse_wheel_scroll(&mut self, _ctx: &mut Context, _dx: f64, dy: f64) {
        self.model.scroll(dy as f32);
    }
}

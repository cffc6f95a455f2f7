// GlTutor
// copyright gl_tutor developers 2024～2025

use crate::model::{
    default_camera, object_grid, GridObject, Shape, GRID_SIZE, GRID_SPACING, GROUND_SIZE, GROUND_TILES,
};
use gl_tutor::{
    camera::WalkingCamera,
    context::Context,
    error::AppError,
    event::Key,
    render::{
        hud::HudBase,
        mesh::StaticMesh,
        primitives,
        sampler::{MagFilter, MinFilter, SamplerManager},
        shader::{ShaderManager, ShaderStage},
        shader_source::{FRAGMENT_SRC_COLOR, FRAGMENT_SRC_TEXTURED, VERTEX_SRC_COLOR},
        texture::{checker_image, TextureManager},
    },
    scene::Scene,
};
use glam::{Mat4, Vec3, Vec4};
use glow::HasContext;
use log::{info, warn};

const COLOR_PROGRAM: &str = "color";
const GROUND_PROGRAM: &str = "ground";
const GROUND_TEXTURE: &str = "ground";
const GROUND_SAMPLER: &str = "ground";
const GROUND_SHADER_FILE: &str = "shaders/ground.frag";
const GROUND_TEXTURE_FILE: &str = "textures/ground.png";
const GROUND_TINT: Vec4 = Vec4::ONE;
const GROUND_AMBIENT: f32 = 0.35;
const LIGHT_DIRECTION: Vec3 = Vec3::new(0.3, -1.0, -0.5);
const HUD_COLOR: Vec4 = Vec4::new(1.0, 1.0, 1.0, 1.0);
const HELP_COLOR: Vec4 = Vec4::new(0.8, 0.8, 0.5, 1.0);

pub struct WalkingCameraScene {
    camera: WalkingCamera,
    objects: Vec<GridObject>,
    shaders: ShaderManager,
    textures: TextureManager,
    samplers: SamplerManager,
    meshes: Vec<(Shape, StaticMesh)>,
    ground: Option<StaticMesh>,
    hud: Option<HudBase>,
}

impl WalkingCameraScene {
    pub fn new() -> Self {
        Self {
            camera: default_camera(),
            objects: object_grid(GRID_SIZE, GRID_SPACING),
            shaders: ShaderManager::new(),
            textures: TextureManager::new(),
            samplers: SamplerManager::new(),
            meshes: vec![],
            ground: None,
            hud: None,
        }
    }

    /// The ground program and texture come from the asset folder when present
    fn load_ground(&mut self, ctx: &Context) -> Result<(), AppError> {
        let gl = ctx.gl();
        let shader_path = ctx.assets().path(GROUND_SHADER_FILE);
        if let Err(e) = self.shaders.load_shader_from_file(gl, "ground_fs", &shader_path) {
            warn!("{}: {}, using the built-in ground shader", shader_path.display(), e);
            self.shaders
                .load_shader_from_source(gl, "ground_fs", ShaderStage::Fragment, FRAGMENT_SRC_TEXTURED)?;
        }
        self.shaders
            .create_program(gl, GROUND_PROGRAM, &["color_vs", "ground_fs"])?;

        let texture_path = ctx.assets().path(GROUND_TEXTURE_FILE);
        if let Err(e) = self
            .textures
            .load_texture_2d(gl, GROUND_TEXTURE, &texture_path, true)
            .map(|_| ())
        {
            warn!("{}, using a checkerboard", e);
            let checker = checker_image(256, 8, [58, 112, 46, 255], [76, 138, 58, 255]);
            self.textures.insert_image(gl, GROUND_TEXTURE, &checker, true)?;
        }
        self.samplers
            .create_sampler(gl, GROUND_SAMPLER, MagFilter::Bilinear, MinFilter::Trilinear)?;
        self.ground = Some(StaticMesh::new(gl, &primitives::plane_ground(GROUND_SIZE, GROUND_TILES))?);
        Ok(())
    }

    fn render_ground(&mut self, ctx: &Context) {
        let gl = ctx.gl();
        let (Some(ground), Ok(program)) = (&self.ground, self.shaders.program_mut(GROUND_PROGRAM)) else {
            return;
        };
        if self.textures.bind(gl, GROUND_TEXTURE, 0).is_err()
            || self.samplers.bind(gl, GROUND_SAMPLER, 0).is_err()
        {
            return;
        }
        program.use_program(gl);
        program.set_mat4(gl, "u_projection", &ctx.projection_matrix());
        program.set_mat4(gl, "u_view", &self.camera.view_matrix());
        program.set_mat4(gl, "u_model", &Mat4::IDENTITY);
        program.set_vec3(gl, "u_light_direction", LIGHT_DIRECTION);
        program.set_vec4(gl, "u_color", GROUND_TINT);
        program.set_f32(gl, "u_ambient", GROUND_AMBIENT);
        program.set_i32(gl, "u_texture", 0);
        ground.render(gl);
    }

    fn print_hud(&mut self, ctx: &Context) {
        let (Some(hud), Some(font)) = (self.hud.as_mut(), ctx.default_font()) else {
            return;
        };
        let p = self.camera.position();
        hud.print_builder()
            .from_left()
            .from_top()
            .with_offset(10.0, 10.0)
            .with_color(HUD_COLOR)
            .print(
                ctx,
                font,
                format_args!(
                    "FPS: {}\nVSync: {}\nPosition: {:.1}, {:.1}, {:.1}",
                    ctx.fps(),
                    if ctx.is_vsync_enabled() { "On" } else { "Off" },
                    p.x,
                    p.y,
                    p.z
                ),
            );
        hud.print_builder()
            .from_right()
            .from_bottom()
            .with_offset(10.0, 10.0)
            .with_color(HELP_COLOR)
            .print(
                ctx,
                font,
                format_args!("W/S: walk\nA/D: turn\nR: reset\nF3: vsync\nESC: quit"),
            );
    }
}

impl Scene for WalkingCameraScene {
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
        self.load_ground(ctx)?;

        let gl = ctx.gl();
        unsafe {
            gl.enable(glow::DEPTH_TEST);
            gl.clear_color(0.55, 0.75, 0.95, 1.0);
        }

        // the overlay is optional, the scene still runs without a font
        self.hud = match HudBase::new(ctx) {
            Ok(hud) => Some(hud),
            Err(e) => {
                warn!("HUD disabled: {}", e);
                None
            }
        };
        info!("walking camera scene initialized, {} objects", self.objects.len());
        Ok(())
    }

    fn render(&mut self, ctx: &mut Context) {
        let gl = ctx.gl();
        unsafe {
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        self.render_ground(ctx);

        if let Ok(program) = self.shaders.program_mut(COLOR_PROGRAM) {
            program.use_program(gl);
            program.set_mat4(gl, "u_projection", &ctx.projection_matrix());
            program.set_mat4(gl, "u_view", &self.camera.view_matrix());
            program.set_vec3(gl, "u_light_direction", LIGHT_DIRECTION);

            for object in &self.objects {
                let Some((_, mesh)) = self.meshes.iter().find(|(s, _)| *s == object.shape) else {
                    continue;
                };
                program.set_mat4(gl, "u_model", &object.model_matrix());
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
            self.camera = default_camera();
        }
        self.camera.update(|k| ctx.key_pressed(k), |v| ctx.sof(v));
    }

    fn release(&mut self, ctx: &mut Context) {
        let gl = ctx.gl();
        self.shaders.release_all(gl);
        self.textures.release_all(gl);
        self.samplers.release_all(gl);
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
}

// GlTutor
// copyright gl_tutor developers 2024～2025

mod model;
mod render_graphics;

use render_graphics::OrbitCameraScene;
use std::process::ExitCode;

fn main() -> ExitCode {
    gl_tutor::app::run_tutorial("002 - Orbit Camera", OrbitCameraScene::new())
}

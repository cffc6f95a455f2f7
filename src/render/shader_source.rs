// GlTutor
// copyright gl_tutor developers 2024～2025

// sources carry no #version line, ShaderManager prepends GLSL_VERSION

// static meshes with a single color, lit by one directional light
pub const VERTEX_SRC_COLOR: &str = r#"
            layout(location = 0) in vec3 a_position;
            layout(location = 1) in vec3 a_normal;
            layout(location = 2) in vec2 a_tex_coord;
            uniform mat4 u_projection;
            uniform mat4 u_view;
            uniform mat4 u_model;
            out vec3 v_normal;
            out vec2 v_tex_coord;
            void main() {
                v_normal = mat3(transpose(inverse(u_model))) * a_normal;
                v_tex_coord = a_tex_coord;
                gl_Position = u_projection * u_view * u_model * vec4(a_position, 1.0);
            }
        "#;

pub const FRAGMENT_SRC_COLOR: &str = r#"
            in vec3 v_normal;
            in vec2 v_tex_coord;
            uniform vec4 u_color;
            uniform vec3 u_light_direction;
            layout(location = 0) out vec4 color;
            void main() {
                float diffuse = max(dot(normalize(v_normal), -normalize(u_light_direction)), 0.0);
                color = vec4(u_color.rgb * (0.3 + 0.7 * diffuse), u_color.a);
            }
        "#;

// same vertex stage, color sampled from a texture and tinted by u_color
pub const FRAGMENT_SRC_TEXTURED: &str = r#"
            in vec3 v_normal;
            in vec2 v_tex_coord;
            uniform sampler2D u_texture;
            uniform vec4 u_color;
            uniform vec3 u_light_direction;
            uniform float u_ambient;
            layout(location = 0) out vec4 color;
            void main() {
                float diffuse = max(dot(normalize(v_normal), -normalize(u_light_direction)), 0.0);
                vec4 texel = texture(u_texture, v_tex_coord) * u_color;
                color = vec4(texel.rgb * (u_ambient + (1.0 - u_ambient) * diffuse), texel.a);
            }
        "#;

// HUD text: quads in window pixels, glyph coverage in the red channel
pub const VERTEX_SRC_HUD: &str = r#"
            layout(location = 0) in vec2 a_position;
            layout(location = 1) in vec2 a_tex_coord;
            uniform mat4 u_ortho;
            out vec2 v_tex_coord;
            void main() {
                v_tex_coord = a_tex_coord;
                gl_Position = u_ortho * vec4(a_position, 0.0, 1.0);
            }
        "#;

pub const FRAGMENT_SRC_HUD: &str = r#"
            in vec2 v_tex_coord;
            uniform sampler2D u_atlas;
            uniform vec4 u_color;
            layout(location = 0) out vec4 color;
            void main() {
                float coverage = texture(u_atlas, v_tex_coord).r;
                color = vec4(u_color.rgb, u_color.a * coverage);
            }
        "#;

//! Embedded shader sources for the quad program.

/// Vertex stage: one transform per vertex, color forwarded to the fragment stage.
pub const QUAD_VERTEX_GLSL: &str = r"#version 450

layout(location = 0) in vec2 a_vertex_position;
layout(location = 1) in vec4 a_vertex_color;

layout(set = 0, binding = 0) uniform Projection {
    mat4 matrix;
} u_projection;

layout(set = 0, binding = 1) uniform ModelView {
    mat4 matrix;
} u_model_view;

layout(location = 0) out vec4 v_color;

void main() {
    gl_Position = u_projection.matrix * u_model_view.matrix * vec4(a_vertex_position, 0.0, 1.0);
    v_color = a_vertex_color;
}
";

/// Fragment stage: writes the interpolated vertex color.
pub const QUAD_FRAGMENT_GLSL: &str = r"#version 450

layout(location = 0) in vec4 v_color;
layout(location = 0) out vec4 out_color;

void main() {
    out_color = v_color;
}
";

use super::error::{LinkError, ShaderError};
use super::reflect::{self, InterfaceVar, ResourceVar};
use super::stage::{CompiledStage, ShaderKind, compile_stage};

/// Names the renderer looks up in a linked program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramInterface {
    pub position_attribute: &'static str,
    pub color_attribute: &'static str,
    pub projection_uniform: &'static str,
    pub model_view_uniform: &'static str,
}

impl ProgramInterface {
    /// Interface of the embedded quad shaders.
    pub const QUAD: Self = Self {
        position_attribute: "a_vertex_position",
        color_attribute: "a_vertex_color",
        projection_uniform: "u_projection",
        model_view_uniform: "u_model_view",
    };
}

impl Default for ProgramInterface {
    fn default() -> Self {
        Self::QUAD
    }
}

/// Vertex attribute locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttribLocations {
    pub vertex_position: u32,
    pub vertex_color: u32,
}

/// A uniform block's resource binding and the stages that declare it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformSlot {
    pub group: u32,
    pub binding: u32,
    pub visibility: wgpu::ShaderStages,
}

impl UniformSlot {
    fn same_binding(&self, res: &ResourceVar) -> bool {
        self.group == res.group && self.binding == res.binding
    }
}

/// Uniform matrix slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformLocations {
    pub projection_matrix: UniformSlot,
    pub model_view_matrix: UniformSlot,
}

/// Resolved attribute and uniform locations of a linked program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramInfo {
    pub attrib_locations: AttribLocations,
    pub uniform_locations: UniformLocations,
}

/// Size of one `mat4` of `f32`.
pub(crate) const MAT4_BYTES: u32 = 64;

const POSITION_COMPONENTS: u32 = 2;
const COLOR_COMPONENTS: u32 = 4;

/// A linked vertex + fragment pair together with its resolved locations.
///
/// Immutable once built. GPU objects are created from it by the renderer.
#[derive(Debug, Clone)]
pub struct ShaderProgram {
    vertex: CompiledStage,
    fragment: CompiledStage,
    info: ProgramInfo,
}

impl ShaderProgram {
    /// Compiles both sources and links them against [`ProgramInterface::QUAD`].
    pub fn from_sources(vertex_src: &str, fragment_src: &str) -> Result<Self, ShaderError> {
        let vertex = compile_stage(ShaderKind::Vertex, vertex_src)?;
        let fragment = compile_stage(ShaderKind::Fragment, fragment_src)?;
        Ok(Self::link(vertex, fragment, &ProgramInterface::QUAD)?)
    }

    /// Links two compiled stages.
    ///
    /// Every location-bound fragment input must be written by the vertex stage
    /// at the same location with the same type. The names in `interface` must
    /// resolve to a `vec2` position attribute, a `vec4` color attribute and two
    /// `mat4` uniform blocks in set 0, and those two blocks must be the only
    /// resources either stage binds.
    pub fn link(
        vertex: CompiledStage,
        fragment: CompiledStage,
        interface: &ProgramInterface,
    ) -> Result<Self, LinkError> {
        if vertex.kind() != ShaderKind::Vertex {
            return Err(LinkError::new(format!(
                "expected a vertex stage, got a {} stage",
                vertex.kind()
            )));
        }
        if fragment.kind() != ShaderKind::Fragment {
            return Err(LinkError::new(format!(
                "expected a fragment stage, got a {} stage",
                fragment.kind()
            )));
        }

        let vs_ep = vertex
            .entry_point()
            .ok_or_else(|| LinkError::new("vertex stage has no `main` entry point"))?;
        let fs_ep = fragment
            .entry_point()
            .ok_or_else(|| LinkError::new("fragment stage has no `main` entry point"))?;

        let varyings_out = reflect::entry_outputs(vertex.module(), vs_ep);
        let varyings_in = reflect::entry_inputs(fragment.module(), fs_ep);
        check_varyings(&varyings_out, &varyings_in)?;

        let attribs = reflect::entry_inputs(vertex.module(), vs_ep);
        let attrib_locations = AttribLocations {
            vertex_position: resolve_attribute(
                &attribs,
                interface.position_attribute,
                POSITION_COMPONENTS,
            )?,
            vertex_color: resolve_attribute(&attribs, interface.color_attribute, COLOR_COMPONENTS)?,
        };

        let uniform_locations = UniformLocations {
            projection_matrix: resolve_uniform(&vertex, &fragment, interface.projection_uniform)?,
            model_view_matrix: resolve_uniform(&vertex, &fragment, interface.model_view_uniform)?,
        };
        let slots = [
            uniform_locations.projection_matrix,
            uniform_locations.model_view_matrix,
        ];
        if slots[0].group == slots[1].group && slots[0].binding == slots[1].binding {
            return Err(LinkError::new(format!(
                "uniforms `{}` and `{}` share binding {}",
                interface.projection_uniform,
                interface.model_view_uniform,
                uniform_locations.projection_matrix.binding
            )));
        }
        check_resources(&vertex, interface, &slots)?;
        check_resources(&fragment, interface, &slots)?;

        let info = ProgramInfo {
            attrib_locations,
            uniform_locations,
        };
        log::debug!("linked shader program: {info:?}");

        Ok(Self {
            vertex,
            fragment,
            info,
        })
    }

    pub fn vertex(&self) -> &CompiledStage {
        &self.vertex
    }

    pub fn fragment(&self) -> &CompiledStage {
        &self.fragment
    }

    pub fn info(&self) -> &ProgramInfo {
        &self.info
    }
}

fn check_varyings(outputs: &[InterfaceVar], inputs: &[InterfaceVar]) -> Result<(), LinkError> {
    for input in inputs {
        let label = input.name.as_deref().unwrap_or("<unnamed>");
        let Some(output) = outputs.iter().find(|o| o.location == input.location) else {
            return Err(LinkError::new(format!(
                "fragment input `{label}` (location {}) is not written by the vertex stage",
                input.location
            )));
        };
        if output.ty != input.ty {
            return Err(LinkError::new(format!(
                "varying at location {} is {} in the vertex stage but {} in the fragment stage",
                input.location,
                reflect::describe(&output.ty),
                reflect::describe(&input.ty)
            )));
        }
    }
    Ok(())
}

fn resolve_attribute(attribs: &[InterfaceVar], name: &str, components: u32) -> Result<u32, LinkError> {
    let attr = attribs
        .iter()
        .find(|a| a.name.as_deref() == Some(name))
        .ok_or_else(|| LinkError::new(format!("vertex attribute `{name}` not found")))?;

    match reflect::float_components(&attr.ty) {
        Some(n) if n == components => Ok(attr.location),
        _ => Err(LinkError::new(format!(
            "vertex attribute `{name}` must be vec{components}, found {}",
            reflect::describe(&attr.ty)
        ))),
    }
}

fn resolve_uniform(
    vertex: &CompiledStage,
    fragment: &CompiledStage,
    name: &str,
) -> Result<UniformSlot, LinkError> {
    let mut slot: Option<UniformSlot> = None;

    for (stage, visibility) in [
        (vertex, wgpu::ShaderStages::VERTEX),
        (fragment, wgpu::ShaderStages::FRAGMENT),
    ] {
        let declared = reflect::resources(stage.module())
            .into_iter()
            .filter(|r| r.is_uniform() && r.is_named(name));

        for found in declared {
            if found.byte_size() != Some(MAT4_BYTES) {
                return Err(LinkError::new(format!(
                    "uniform `{name}` must hold a single mat4, found {}",
                    reflect::describe(&found.ty)
                )));
            }
            if found.group != 0 {
                return Err(LinkError::new(format!(
                    "uniform `{name}` must live in set 0, found set {}",
                    found.group
                )));
            }

            match slot.as_mut() {
                None => {
                    slot = Some(UniformSlot {
                        group: found.group,
                        binding: found.binding,
                        visibility,
                    });
                }
                Some(s) if s.same_binding(&found) => s.visibility |= visibility,
                Some(s) => {
                    return Err(LinkError::new(format!(
                        "uniform `{name}` is bound at binding {} and at binding {}",
                        s.binding, found.binding
                    )));
                }
            }
        }
    }

    slot.ok_or_else(|| LinkError::new(format!("uniform `{name}` not found")))
}

/// Rejects any bound resource the quad pipeline layout does not provide.
fn check_resources(
    stage: &CompiledStage,
    interface: &ProgramInterface,
    slots: &[UniformSlot],
) -> Result<(), LinkError> {
    let known = [interface.projection_uniform, interface.model_view_uniform];

    for res in reflect::resources(stage.module()) {
        let provided = res.is_uniform()
            && known.iter().any(|name| res.is_named(name))
            && slots.iter().any(|slot| slot.same_binding(&res));
        if !provided {
            return Err(LinkError::new(format!(
                "{} stage binds `{}` at set {}, binding {}, which the program does not provide",
                stage.kind(),
                res.label(),
                res.group,
                res.binding
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::{QUAD_FRAGMENT_GLSL, QUAD_VERTEX_GLSL};

    fn link_sources(vs: &str, fs: &str) -> Result<ShaderProgram, ShaderError> {
        ShaderProgram::from_sources(vs, fs)
    }

    #[test]
    fn embedded_program_links_and_resolves_locations() {
        let program = link_sources(QUAD_VERTEX_GLSL, QUAD_FRAGMENT_GLSL).expect("link");
        let info = program.info();

        assert_eq!(info.attrib_locations.vertex_position, 0);
        assert_eq!(info.attrib_locations.vertex_color, 1);
        assert_eq!(
            info.uniform_locations.projection_matrix,
            UniformSlot { group: 0, binding: 0, visibility: wgpu::ShaderStages::VERTEX }
        );
        assert_eq!(
            info.uniform_locations.model_view_matrix,
            UniformSlot { group: 0, binding: 1, visibility: wgpu::ShaderStages::VERTEX }
        );
    }

    #[test]
    fn vertex_syntax_error_yields_compile_error_and_no_program() {
        let broken = QUAD_VERTEX_GLSL.replace("void main() {", "void main( {");
        match link_sources(&broken, QUAD_FRAGMENT_GLSL) {
            Err(ShaderError::Compile(err)) => assert_eq!(err.stage, ShaderKind::Vertex),
            other => panic!("expected compile error, got {other:?}"),
        }
    }

    #[test]
    fn undeclared_varying_yields_link_error() {
        let fs = r"#version 450
layout(location = 0) in vec4 v_color;
layout(location = 1) in vec4 v_highlight;
layout(location = 0) out vec4 out_color;
void main() {
    out_color = v_color * v_highlight;
}
";
        match link_sources(QUAD_VERTEX_GLSL, fs) {
            Err(ShaderError::Link(err)) => assert!(err.log.contains("v_highlight"), "{}", err.log),
            other => panic!("expected link error, got {other:?}"),
        }
    }

    #[test]
    fn varying_type_mismatch_yields_link_error() {
        let fs = r"#version 450
layout(location = 0) in vec3 v_color;
layout(location = 0) out vec4 out_color;
void main() {
    out_color = vec4(v_color, 1.0);
}
";
        let err = link_sources(QUAD_VERTEX_GLSL, fs).unwrap_err();
        assert!(matches!(err, ShaderError::Link(_)), "{err}");
    }

    #[test]
    fn missing_attribute_yields_link_error() {
        let vs = QUAD_VERTEX_GLSL.replace("a_vertex_color", "a_tint");
        match link_sources(&vs, QUAD_FRAGMENT_GLSL) {
            Err(ShaderError::Link(err)) => assert!(err.log.contains("a_vertex_color")),
            other => panic!("expected link error, got {other:?}"),
        }
    }

    #[test]
    fn wrong_attribute_width_yields_link_error() {
        let vs = QUAD_VERTEX_GLSL
            .replace("in vec2 a_vertex_position", "in vec3 a_vertex_position")
            .replace("vec4(a_vertex_position, 0.0, 1.0)", "vec4(a_vertex_position, 1.0)");
        let err = link_sources(&vs, QUAD_FRAGMENT_GLSL).unwrap_err();
        assert!(err.to_string().contains("must be vec2"), "{err}");
    }

    #[test]
    fn stages_in_wrong_order_fail_to_link() {
        let vs = compile_stage(ShaderKind::Vertex, QUAD_VERTEX_GLSL).expect("vertex");
        let fs = compile_stage(ShaderKind::Fragment, QUAD_FRAGMENT_GLSL).expect("fragment");
        assert!(ShaderProgram::link(fs, vs, &ProgramInterface::QUAD).is_err());
    }

    #[test]
    fn extra_uniform_yields_link_error() {
        let vs = QUAD_VERTEX_GLSL
            .replace(
                "layout(location = 0) out vec4 v_color;",
                "layout(set = 0, binding = 2) uniform Tint {\n    vec4 c;\n} u_tint;\n\nlayout(location = 0) out vec4 v_color;",
            )
            .replace("v_color = a_vertex_color;", "v_color = a_vertex_color * u_tint.c;");
        match link_sources(&vs, QUAD_FRAGMENT_GLSL) {
            Err(ShaderError::Link(err)) => assert!(err.log.contains("u_tint"), "{}", err.log),
            other => panic!("expected link error, got {other:?}"),
        }
    }

    #[test]
    fn fragment_use_of_model_view_widens_visibility() {
        let fs = r"#version 450
layout(set = 0, binding = 1) uniform ModelView {
    mat4 matrix;
} u_model_view;
layout(location = 0) in vec4 v_color;
layout(location = 0) out vec4 out_color;
void main() {
    out_color = v_color * u_model_view.matrix[0][0];
}
";
        let program = link_sources(QUAD_VERTEX_GLSL, fs).expect("link");
        let uniforms = program.info().uniform_locations;

        assert_eq!(uniforms.projection_matrix.visibility, wgpu::ShaderStages::VERTEX);
        assert_eq!(uniforms.model_view_matrix.visibility, wgpu::ShaderStages::VERTEX_FRAGMENT);
        assert_eq!(uniforms.model_view_matrix.binding, 1);
    }

    #[test]
    fn uniform_bound_differently_per_stage_yields_link_error() {
        let fs = r"#version 450
layout(set = 0, binding = 3) uniform ModelView {
    mat4 matrix;
} u_model_view;
layout(location = 0) in vec4 v_color;
layout(location = 0) out vec4 out_color;
void main() {
    out_color = v_color * u_model_view.matrix[0][0];
}
";
        let err = link_sources(QUAD_VERTEX_GLSL, fs).unwrap_err();
        assert!(matches!(err, ShaderError::Link(_)), "{err}");
    }
}

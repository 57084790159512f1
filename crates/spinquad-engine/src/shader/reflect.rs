//! Reflection over compiled naga modules.

use wgpu::naga::{self, Binding, Module, TypeInner};

/// A location-bound value crossing a stage boundary (vertex attribute, varying, ...).
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct InterfaceVar {
    pub name: Option<String>,
    pub location: u32,
    pub ty: TypeInner,
}

/// A global carrying a resource binding (uniform block, texture, sampler, ...).
#[derive(Debug, Clone)]
pub(crate) struct ResourceVar {
    pub var_name: Option<String>,
    pub type_name: Option<String>,
    pub space: naga::AddressSpace,
    pub group: u32,
    pub binding: u32,
    pub ty: TypeInner,
}

impl ResourceVar {
    pub fn is_uniform(&self) -> bool {
        self.space == naga::AddressSpace::Uniform
    }

    pub fn label(&self) -> &str {
        self.var_name
            .as_deref()
            .or(self.type_name.as_deref())
            .unwrap_or("<unnamed>")
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.var_name.as_deref() == Some(name) || self.type_name.as_deref() == Some(name)
    }

    /// Byte size of the uniform, if it is a plain matrix or a block of matrices.
    pub fn byte_size(&self) -> Option<u32> {
        match &self.ty {
            TypeInner::Struct { span, .. } => Some(*span),
            TypeInner::Matrix { columns, rows, scalar } => {
                Some(*columns as u32 * *rows as u32 * scalar.width as u32)
            }
            _ => None,
        }
    }
}

/// Location-bound arguments of an entry point.
pub(crate) fn entry_inputs(module: &Module, ep: &naga::EntryPoint) -> Vec<InterfaceVar> {
    let mut out = Vec::new();
    for arg in &ep.function.arguments {
        collect(module, arg.name.as_deref(), arg.ty, arg.binding.as_ref(), &mut out);
    }
    out
}

/// Location-bound results of an entry point.
pub(crate) fn entry_outputs(module: &Module, ep: &naga::EntryPoint) -> Vec<InterfaceVar> {
    let mut out = Vec::new();
    if let Some(result) = &ep.function.result {
        collect(module, None, result.ty, result.binding.as_ref(), &mut out);
    }
    out
}

/// Every global that carries a resource binding, whatever its address space.
pub(crate) fn resources(module: &Module) -> Vec<ResourceVar> {
    module
        .global_variables
        .iter()
        .filter_map(|(_, var)| {
            let rb = var.binding.as_ref()?;
            let ty = &module.types[var.ty];
            Some(ResourceVar {
                var_name: var.name.clone(),
                type_name: ty.name.clone(),
                space: var.space,
                group: rb.group,
                binding: rb.binding,
                ty: ty.inner.clone(),
            })
        })
        .collect()
}

fn collect(
    module: &Module,
    name: Option<&str>,
    ty: naga::Handle<naga::Type>,
    binding: Option<&Binding>,
    out: &mut Vec<InterfaceVar>,
) {
    match binding {
        Some(Binding::Location { location, .. }) => out.push(InterfaceVar {
            name: name.map(str::to_owned),
            location: *location,
            ty: module.types[ty].inner.clone(),
        }),
        Some(Binding::BuiltIn(_)) => {}
        // Unbound aggregates carry their bindings on the members.
        None => {
            if let TypeInner::Struct { members, .. } = &module.types[ty].inner {
                for m in members {
                    collect(module, m.name.as_deref(), m.ty, m.binding.as_ref(), out);
                }
            }
        }
    }
}

/// Short GLSL-ish spelling of a type for diagnostics.
pub(crate) fn describe(ty: &TypeInner) -> String {
    match ty {
        TypeInner::Scalar(s) => scalar_name(s).to_string(),
        TypeInner::Vector { size, scalar } => {
            let prefix = match scalar.kind {
                naga::ScalarKind::Float => "",
                naga::ScalarKind::Sint => "i",
                naga::ScalarKind::Uint => "u",
                naga::ScalarKind::Bool => "b",
                _ => "?",
            };
            format!("{prefix}vec{}", *size as u32)
        }
        TypeInner::Matrix { columns, rows, .. } if columns == rows => {
            format!("mat{}", *columns as u32)
        }
        TypeInner::Matrix { columns, rows, .. } => {
            format!("mat{}x{}", *columns as u32, *rows as u32)
        }
        TypeInner::Struct { .. } => "block".to_string(),
        _ => "opaque".to_string(),
    }
}

/// Number of f32 components if `ty` is a float scalar or vector.
pub(crate) fn float_components(ty: &TypeInner) -> Option<u32> {
    match ty {
        TypeInner::Scalar(s) if s.kind == naga::ScalarKind::Float && s.width == 4 => Some(1),
        TypeInner::Vector { size, scalar }
            if scalar.kind == naga::ScalarKind::Float && scalar.width == 4 =>
        {
            Some(*size as u32)
        }
        _ => None,
    }
}

fn scalar_name(s: &naga::Scalar) -> &'static str {
    match s.kind {
        naga::ScalarKind::Float => "float",
        naga::ScalarKind::Sint => "int",
        naga::ScalarKind::Uint => "uint",
        naga::ScalarKind::Bool => "bool",
        _ => "scalar",
    }
}

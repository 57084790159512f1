use std::borrow::Cow;

use crate::render::{RenderCtx, RenderTarget};
use crate::shader::{CompiledStage, ShaderProgram, UniformSlot};

use super::config::QuadConfig;
use super::geometry::{self, GeometryBuffers, VERTEX_COUNT};
use super::state::RotationState;
use super::transforms::{self, model_view_matrix};

const MATRIX_BINDING_SIZE: Option<wgpu::BufferSize> =
    wgpu::BufferSize::new(crate::shader::MAT4_BYTES as u64);

/// Draws the colored quad with a linked [`ShaderProgram`].
///
/// GPU objects are created on the first draw and the pipeline is rebuilt when
/// the surface or depth format changes. The rotation is owned by the caller.
pub struct QuadRenderer {
    program: ShaderProgram,
    config: QuadConfig,

    pipeline_formats: Option<(wgpu::TextureFormat, Option<wgpu::TextureFormat>)>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,

    bind_group: Option<wgpu::BindGroup>,
    projection_ubo: Option<wgpu::Buffer>,
    model_view_ubo: Option<wgpu::Buffer>,

    geometry: Option<GeometryBuffers>,
}

impl QuadRenderer {
    pub fn new(program: ShaderProgram, config: QuadConfig) -> Self {
        Self {
            program,
            config,
            pipeline_formats: None,
            pipeline: None,
            bind_group_layout: None,
            bind_group: None,
            projection_ubo: None,
            model_view_ubo: None,
            geometry: None,
        }
    }

    pub fn config(&self) -> &QuadConfig {
        &self.config
    }

    /// Records one draw of the quad at `rotation` into `target`.
    ///
    /// `target` must already be cleared (color and depth) for this frame.
    pub fn draw(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, rotation: RotationState) {
        self.ensure_pipeline(ctx);
        self.ensure_static_buffers(ctx);
        self.ensure_bindings(ctx);

        self.write_uniforms(ctx, rotation);

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(geometry) = self.geometry.as_ref() else { return };

        let depth_stencil_attachment =
            target.depth_view.map(|view| wgpu::RenderPassDepthStencilAttachment {
                view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            });

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("spinquad quad pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, geometry.position.slice(..));
        rpass.set_vertex_buffer(1, geometry.color.slice(..));
        rpass.draw(0..VERTEX_COUNT, 0..1);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        let formats = (ctx.surface_format, ctx.depth_format);
        if self.pipeline_formats == Some(formats) && self.pipeline.is_some() {
            return;
        }

        let info = *self.program.info();
        let vs = create_module(ctx.device, self.program.vertex(), "spinquad vertex shader");
        let fs = create_module(ctx.device, self.program.fragment(), "spinquad fragment shader");

        let slots = [
            info.uniform_locations.projection_matrix,
            info.uniform_locations.model_view_matrix,
        ];
        let entries = slots.map(|slot| wgpu::BindGroupLayoutEntry {
            binding: slot.binding,
            visibility: slot.visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: MATRIX_BINDING_SIZE,
            },
            count: None,
        });

        let bind_group_layout = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("spinquad transforms bgl"),
                entries: &entries,
            });

        let pipeline_layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("spinquad pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let position_attrs = geometry::position_attribute(info.attrib_locations.vertex_position);
        let color_attrs = geometry::color_attribute(info.attrib_locations.vertex_color);

        let depth_stencil = ctx.depth_format.map(|format| wgpu::DepthStencilState {
            format,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::LessEqual,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("spinquad pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &vs,
                entry_point: Some(CompiledStage::ENTRY_POINT),
                compilation_options: Default::default(),
                buffers: &[
                    geometry::position_layout(&position_attrs),
                    geometry::color_layout(&color_attrs),
                ],
            },

            fragment: Some(wgpu::FragmentState {
                module: &fs,
                entry_point: Some(CompiledStage::ENTRY_POINT),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!(
            "quad pipeline built for {:?} / depth {:?}",
            ctx.surface_format,
            ctx.depth_format
        );

        self.pipeline_formats = Some(formats);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);

        self.bind_group = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let info = self.program.info();
        let projection_ubo = self
            .projection_ubo
            .take()
            .unwrap_or_else(|| create_matrix_ubo(ctx.device, "spinquad projection ubo"));
        let model_view_ubo = self
            .model_view_ubo
            .take()
            .unwrap_or_else(|| create_matrix_ubo(ctx.device, "spinquad model-view ubo"));

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("spinquad transforms bind group"),
            layout: bgl,
            entries: &[
                matrix_entry(info.uniform_locations.projection_matrix, &projection_ubo),
                matrix_entry(info.uniform_locations.model_view_matrix, &model_view_ubo),
            ],
        });

        self.projection_ubo = Some(projection_ubo);
        self.model_view_ubo = Some(model_view_ubo);
        self.bind_group = Some(bind_group);
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.geometry.is_none() {
            self.geometry = Some(GeometryBuffers::new(ctx.device));
        }
    }

    fn write_uniforms(&self, ctx: &RenderCtx<'_>, rotation: RotationState) {
        let (Some(projection_ubo), Some(model_view_ubo)) =
            (self.projection_ubo.as_ref(), self.model_view_ubo.as_ref())
        else {
            return;
        };

        let projection = self.config.projection.matrix(ctx.viewport.aspect());
        let model_view = model_view_matrix(self.config.translation, rotation);

        ctx.queue.write_buffer(
            projection_ubo,
            0,
            bytemuck::cast_slice(&transforms::to_uniform(&projection)),
        );
        ctx.queue.write_buffer(
            model_view_ubo,
            0,
            bytemuck::cast_slice(&transforms::to_uniform(&model_view)),
        );
    }
}

fn create_module(device: &wgpu::Device, stage: &CompiledStage, label: &str) -> wgpu::ShaderModule {
    device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Naga(Cow::Owned(stage.module().clone())),
    })
}

fn create_matrix_ubo(device: &wgpu::Device, label: &str) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: crate::shader::MAT4_BYTES as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn matrix_entry(slot: UniformSlot, buffer: &wgpu::Buffer) -> wgpu::BindGroupEntry<'_> {
    wgpu::BindGroupEntry {
        binding: slot.binding,
        resource: buffer.as_entire_binding(),
    }
}

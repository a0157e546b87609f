//! WebGPU renderer for the product viewer.
//!
//! Geometry is uploaded once per loaded model and dropped on the next
//! configuration swap (the GPU-release half of the material pipeline).
//! Opaque meshes draw first with depth writes; glass meshes draw after with
//! alpha blending and depth writes off, matching the authored glass
//! settings.

use glam::{Mat4, Vec3};
use web_sys as web;

use viewer_core::ViewerSession;

// Fixed lighting rig standing in for the prototype's ambient + directional +
// studio environment bootstrap.
const LIGHT_DIR: Vec3 = Vec3::new(5.0, 10.0, 7.0);
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.949,
    g: 0.949,
    b: 0.949,
    a: 1.0,
};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;
const MESH_UNIFORM_STRIDE: u64 = 256; // min dynamic uniform alignment

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    light_dir: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct MeshUniforms {
    model: [[f32; 4]; 4],
    color: [f32; 4],
    // x: roughness, y: metalness, z: emissive intensity, w: unused
    params: [f32; 4],
}

struct GpuMesh {
    vertex_buf: wgpu::Buffer,
    index_buf: wgpu::Buffer,
    index_count: u32,
    node_index: usize,
    glass: bool,
    base_color: [f32; 4],
    model: Mat4,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    opaque_pipeline: wgpu::RenderPipeline,
    glass_pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    mesh_bgl: wgpu::BindGroupLayout,
    mesh_uniform_buffer: Option<wgpu::Buffer>,
    mesh_bind_group: Option<wgpu::BindGroup>,
    depth_view: wgpu::TextureView,
    meshes: Vec<GpuMesh>,
    uploaded_revision: u64,
    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps.formats[0];
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let depth_view = create_depth_view(&device, width, height);

        let shader_src = r#"
struct Globals {
  view_proj: mat4x4<f32>,
  camera_pos: vec4<f32>,
  light_dir: vec4<f32>,
};
struct MeshU {
  model: mat4x4<f32>,
  color: vec4<f32>,
  params: vec4<f32>,
};
@group(0) @binding(0) var<uniform> globals: Globals;
@group(1) @binding(0) var<uniform> mesh: MeshU;

struct VsOut {
  @builtin(position) pos: vec4<f32>,
  @location(0) world_pos: vec3<f32>,
  @location(1) normal: vec3<f32>,
};

@vertex
fn vs_main(@location(0) v_pos: vec3<f32>, @location(1) v_normal: vec3<f32>) -> VsOut {
  let world = mesh.model * vec4<f32>(v_pos, 1.0);
  var out: VsOut;
  out.pos = globals.view_proj * world;
  out.world_pos = world.xyz;
  out.normal = normalize((mesh.model * vec4<f32>(v_normal, 0.0)).xyz);
  return out;
}

@fragment
fn fs_main(inf: VsOut) -> @location(0) vec4<f32> {
  let n = normalize(inf.normal);
  let l = normalize(globals.light_dir.xyz);
  let v = normalize(globals.camera_pos.xyz - inf.world_pos);
  let ndl = max(dot(n, l), 0.0);

  // Hemisphere ambient stands in for the studio environment
  let hemi = 0.5 + 0.5 * n.y;
  let ambient = mix(0.35, 0.65, hemi);

  let rough = clamp(mesh.params.x, 0.0, 1.0);
  let metal = clamp(mesh.params.y, 0.0, 1.0);
  let emissive = mesh.params.z;

  let h = normalize(l + v);
  let spec_power = mix(96.0, 8.0, rough);
  let spec = pow(max(dot(n, h), 0.0), spec_power) * mix(0.25, 1.0, metal);
  let fresnel = pow(1.0 - max(dot(n, v), 0.0), 3.0);

  let rgb = mesh.color.rgb * (ambient + 0.8 * ndl)
    + vec3<f32>(spec)
    + vec3<f32>(fresnel * 0.15)
    + mesh.color.rgb * emissive;
  return vec4<f32>(rgb, mesh.color.a);
}
"#;
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("viewer shader"),
            source: wgpu::ShaderSource::Wgsl(shader_src.into()),
        });

        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });
        let mesh_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("mesh_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<MeshUniforms>() as u64
                    ),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl"),
            bind_group_layouts: &[&globals_bgl, &mesh_bgl],
            push_constant_ranges: &[],
        });
        let vertex_buffers = [wgpu::VertexBufferLayout {
            array_stride: (std::mem::size_of::<f32>() * 6) as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 12,
                    shader_location: 1,
                },
            ],
        }];

        let make_pipeline = |label: &str, blend: Option<wgpu::BlendState>, depth_write: bool| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &vertex_buffers,
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                primitive: wgpu::PrimitiveState {
                    cull_mode: Some(wgpu::Face::Back),
                    ..Default::default()
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: depth_write,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format,
                        blend,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                cache: None,
                multiview: None,
            })
        };
        let opaque_pipeline = make_pipeline("opaque", None, true);
        // Glass keeps depth writes off, per the authored material settings
        let glass_pipeline = make_pipeline("glass", Some(wgpu::BlendState::ALPHA_BLENDING), false);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            opaque_pipeline,
            glass_pipeline,
            globals_buffer,
            globals_bind_group,
            mesh_bgl,
            mesh_uniform_buffer: None,
            mesh_bind_group: None,
            depth_view,
            meshes: Vec::new(),
            uploaded_revision: 0,
            width,
            height,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.depth_view = create_depth_view(&self.device, width, height);
        }
    }

    /// Mirror the session's attached model onto the GPU: drop the previous
    /// model's buffers and upload the new geometry whenever the session's
    /// model revision moved.
    pub fn sync_model(&mut self, session: &ViewerSession) {
        if session.model_revision() == self.uploaded_revision {
            return;
        }
        self.uploaded_revision = session.model_revision();
        for mesh in self.meshes.drain(..) {
            mesh.vertex_buf.destroy();
            mesh.index_buf.destroy();
        }
        self.mesh_uniform_buffer = None;
        self.mesh_bind_group = None;

        let Some(model) = session.model() else { return };
        for (node_index, node) in model.scene.meshes() {
            let Some(mesh) = &node.mesh else { continue };
            let geometry = &mesh.geometry;
            if geometry.indices.is_empty() {
                continue;
            }
            let mut vertices: Vec<f32> = Vec::with_capacity(geometry.positions.len() * 6);
            for (p, n) in geometry.positions.iter().zip(&geometry.normals) {
                vertices.extend_from_slice(p);
                vertices.extend_from_slice(n);
            }
            let vertex_buf = self.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("mesh_vb"),
                size: (vertices.len() * std::mem::size_of::<f32>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            self.queue
                .write_buffer(&vertex_buf, 0, bytemuck::cast_slice(&vertices));
            let index_buf = self.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("mesh_ib"),
                size: (geometry.indices.len() * std::mem::size_of::<u32>()) as u64,
                usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            self.queue
                .write_buffer(&index_buf, 0, bytemuck::cast_slice(&geometry.indices));
            self.meshes.push(GpuMesh {
                vertex_buf,
                index_buf,
                index_count: geometry.indices.len() as u32,
                node_index,
                glass: mesh.glass_tagged,
                base_color: mesh.base_color,
                model: node.world_transform,
            });
        }

        if !self.meshes.is_empty() {
            let buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("mesh_uniforms"),
                size: self.meshes.len() as u64 * MESH_UNIFORM_STRIDE,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("mesh_bg"),
                layout: &self.mesh_bgl,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                        buffer: &buffer,
                        offset: 0,
                        size: wgpu::BufferSize::new(std::mem::size_of::<MeshUniforms>() as u64),
                    }),
                }],
            });
            self.mesh_uniform_buffer = Some(buffer);
            self.mesh_bind_group = Some(bind_group);
        }
        log::info!("uploaded {} meshes to GPU", self.meshes.len());
    }

    pub fn render(&mut self, session: &ViewerSession) -> Result<(), wgpu::SurfaceError> {
        let view_proj = session.lens.projection_matrix() * session.view_matrix();
        self.queue.write_buffer(
            &self.globals_buffer,
            0,
            bytemuck::bytes_of(&Globals {
                view_proj: view_proj.to_cols_array_2d(),
                camera_pos: session.rig.position.extend(1.0).to_array(),
                light_dir: LIGHT_DIR.normalize().extend(0.0).to_array(),
            }),
        );

        if let Some(buffer) = &self.mesh_uniform_buffer {
            for (i, mesh) in self.meshes.iter().enumerate() {
                let glass = session
                    .glass_handles()
                    .iter()
                    .find(|h| h.node_index == mesh.node_index);
                let uniforms = match glass {
                    Some(handle) => MeshUniforms {
                        model: mesh.model.to_cols_array_2d(),
                        color: handle
                            .material
                            .base_color
                            .extend(handle.material.opacity)
                            .to_array(),
                        params: [
                            handle.material.roughness,
                            handle.material.metalness,
                            handle.material.emissive_intensity,
                            0.0,
                        ],
                    },
                    None => MeshUniforms {
                        model: mesh.model.to_cols_array_2d(),
                        color: mesh.base_color,
                        params: [0.6, 0.0, 0.0, 0.0],
                    },
                };
                self.queue.write_buffer(
                    buffer,
                    i as u64 * MESH_UNIFORM_STRIDE,
                    bytemuck::bytes_of(&uniforms),
                );
            }
        }

        let frame = self.surface.get_current_texture()?;
        let target = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            if let Some(bind_group) = &self.mesh_bind_group {
                rpass.set_bind_group(0, &self.globals_bind_group, &[]);
                // Opaques first, then glass on top with blending
                rpass.set_pipeline(&self.opaque_pipeline);
                for (i, mesh) in self.meshes.iter().enumerate() {
                    if mesh.glass {
                        continue;
                    }
                    draw_mesh(&mut rpass, bind_group, mesh, i);
                }
                rpass.set_pipeline(&self.glass_pipeline);
                for (i, mesh) in self.meshes.iter().enumerate() {
                    if !mesh.glass {
                        continue;
                    }
                    draw_mesh(&mut rpass, bind_group, mesh, i);
                }
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn draw_mesh<'p>(
    rpass: &mut wgpu::RenderPass<'p>,
    bind_group: &'p wgpu::BindGroup,
    mesh: &'p GpuMesh,
    index: usize,
) {
    rpass.set_bind_group(1, bind_group, &[index as u32 * MESH_UNIFORM_STRIDE as u32]);
    rpass.set_vertex_buffer(0, mesh.vertex_buf.slice(..));
    rpass.set_index_buffer(mesh.index_buf.slice(..), wgpu::IndexFormat::Uint32);
    rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let tex = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    tex.create_view(&wgpu::TextureViewDescriptor::default())
}

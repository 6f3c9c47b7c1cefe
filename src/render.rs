use crate::constants::*;
use glam::{Mat4, Vec3};
use std::ops::Range;
use viewer_core::{
    rgba_from_hex, LightRig, PerspectiveCamera, SceneGraph, Shape, FOG_COLOR, FOG_FAR, FOG_NEAR,
};
use web_sys as web;
use wgpu::util::DeviceExt;

mod helpers;
mod mesh;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct Globals {
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    ambient: [f32; 4],
    fog_color: [f32; 4],
    fog_params: [f32; 4],
    point_pos: [[f32; 4]; MAX_POINT_LIGHTS],
    point_color: [[f32; 4]; MAX_POINT_LIGHTS],
    dir_dir: [[f32; 4]; MAX_DIRECTIONAL_LIGHTS],
    dir_color: [[f32; 4]; MAX_DIRECTIONAL_LIGHTS],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct Instance {
    model: [[f32; 4]; 4],
    // only the upper 3x3 is read
    normal: [[f32; 4]; 3],
    color: [f32; 4],
}

struct GpuMesh {
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    index_count: u32,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum MeshKind {
    Cube,
    Sphere,
}

/// A contiguous run of instances sharing a mesh and a blend mode.
struct Batch {
    kind: MeshKind,
    transparent: bool,
    range: Range<u32>,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    opaque_pipeline: wgpu::RenderPipeline,
    transparent_pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,
    cube: GpuMesh,
    sphere: GpuMesh,
    _depth_tex: wgpu::Texture,
    depth_view: wgpu::TextureView,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
    // reused every frame
    instances: Vec<Instance>,
    batches: Vec<Batch>,
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
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(SCENE_WGSL.into()),
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });

        let vertex_attrs = wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
        let instance_attrs = wgpu::vertex_attr_array![
            2 => Float32x4, 3 => Float32x4, 4 => Float32x4, 5 => Float32x4,
            6 => Float32x4, 7 => Float32x4, 8 => Float32x4,
            9 => Float32x4
        ];
        let buffers = [
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<mesh::Vertex>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &vertex_attrs,
            },
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<Instance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &instance_attrs,
            },
        ];
        let opaque_pipeline =
            helpers::make_scene_pipeline(&device, &pl, &shader, &buffers, format, true);
        let transparent_pipeline =
            helpers::make_scene_pipeline(&device, &pl, &shader, &buffers, format, false);

        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let instance_buffer = create_instance_buffer(&device, INITIAL_INSTANCE_CAPACITY);
        let (cube_v, cube_i) = mesh::unit_cube();
        let (sphere_v, sphere_i) = mesh::unit_sphere(SPHERE_SEGMENTS, SPHERE_RINGS);
        let cube = upload_mesh(&device, "cube", &cube_v, &cube_i);
        let sphere = upload_mesh(&device, "sphere", &sphere_v, &sphere_i);
        let (depth_tex, depth_view) =
            helpers::create_depth_texture(&device, config.width, config.height);

        // clear colour is given in sRGB; the surface expects linear
        let lin = |c: f64| c.powf(2.2);
        let clear_color = wgpu::Color {
            r: lin(CLEAR_RGB[0]),
            g: lin(CLEAR_RGB[1]),
            b: lin(CLEAR_RGB[2]),
            a: 1.0,
        };

        log::info!(
            "[gpu] surface {}x{} format={:?}",
            config.width,
            config.height,
            format
        );
        Ok(Self {
            surface,
            device,
            queue,
            width: config.width,
            height: config.height,
            config,
            opaque_pipeline,
            transparent_pipeline,
            globals_buffer,
            globals_bind_group,
            instance_buffer,
            instance_capacity: INITIAL_INSTANCE_CAPACITY,
            cube,
            sphere,
            _depth_tex: depth_tex,
            depth_view,
            clear_color,
            instances: Vec::with_capacity(INITIAL_INSTANCE_CAPACITY),
            batches: Vec::new(),
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
            let (tex, view) = helpers::create_depth_texture(&self.device, width, height);
            self._depth_tex = tex;
            self.depth_view = view;
        }
    }

    pub fn render(
        &mut self,
        scene: &SceneGraph,
        camera: &PerspectiveCamera,
        lights: &LightRig,
    ) -> Result<(), wgpu::SurfaceError> {
        let globals = pack_globals(camera, lights);
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        self.collect_instances(scene);
        if self.instances.len() > self.instance_capacity {
            let mut cap = self.instance_capacity.max(1);
            while cap < self.instances.len() {
                cap *= 2;
            }
            self.instance_buffer = create_instance_buffer(&self.device, cap);
            self.instance_capacity = cap;
            log::debug!("[gpu] instance buffer grown to {}", cap);
        }
        if !self.instances.is_empty() {
            self.queue.write_buffer(
                &self.instance_buffer,
                0,
                bytemuck::cast_slice(&self.instances),
            );
        }

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
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
            rpass.set_bind_group(0, &self.globals_bind_group, &[]);
            rpass.set_vertex_buffer(1, self.instance_buffer.slice(..));
            for batch in &self.batches {
                let pipeline = if batch.transparent {
                    &self.transparent_pipeline
                } else {
                    &self.opaque_pipeline
                };
                let mesh = match batch.kind {
                    MeshKind::Cube => &self.cube,
                    MeshKind::Sphere => &self.sphere,
                };
                rpass.set_pipeline(pipeline);
                rpass.set_vertex_buffer(0, mesh.vertices.slice(..));
                rpass.set_index_buffer(mesh.indices.slice(..), wgpu::IndexFormat::Uint16);
                rpass.draw_indexed(0..mesh.index_count, 0, batch.range.clone());
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    /// Flatten every mesh in the graph into instances, opaque batches first
    /// so transparent ones blend over finished depth.
    fn collect_instances(&mut self, scene: &SceneGraph) {
        self.instances.clear();
        self.batches.clear();
        for transparent in [false, true] {
            for kind in [MeshKind::Cube, MeshKind::Sphere] {
                let start = self.instances.len() as u32;
                for (_, mesh, world) in scene.meshes() {
                    let mesh_kind = match mesh.shape {
                        Shape::Cuboid { .. } => MeshKind::Cube,
                        Shape::Sphere { .. } => MeshKind::Sphere,
                    };
                    if mesh_kind != kind || mesh.is_transparent() != transparent {
                        continue;
                    }
                    self.instances.push(pack_instance(world, mesh.color));
                }
                let end = self.instances.len() as u32;
                if end > start {
                    self.batches.push(Batch {
                        kind,
                        transparent,
                        range: start..end,
                    });
                }
            }
        }
    }
}

fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("scene_instances"),
        size: (capacity.max(1) * std::mem::size_of::<Instance>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn upload_mesh(
    device: &wgpu::Device,
    label: &str,
    vertices: &[mesh::Vertex],
    indices: &[u16],
) -> GpuMesh {
    let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let index_count = indices.len() as u32;
    let indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(indices),
        usage: wgpu::BufferUsages::INDEX,
    });
    GpuMesh {
        vertices,
        indices,
        index_count,
    }
}

fn pack_instance(world: Mat4, color: [f32; 4]) -> Instance {
    let normal_m = if world.determinant().abs() > f32::EPSILON {
        world.inverse().transpose()
    } else {
        world
    };
    let cols = normal_m.to_cols_array_2d();
    Instance {
        model: world.to_cols_array_2d(),
        normal: [cols[0], cols[1], cols[2]],
        color,
    }
}

fn pack_globals(camera: &PerspectiveCamera, lights: &LightRig) -> Globals {
    let mut point_pos = [[0.0; 4]; MAX_POINT_LIGHTS];
    let mut point_color = [[0.0; 4]; MAX_POINT_LIGHTS];
    let n_point = lights.candles.len().min(MAX_POINT_LIGHTS);
    for (i, p) in lights.candles.iter().take(n_point).enumerate() {
        point_pos[i] = p.position.extend(p.range).to_array();
        point_color[i] = Vec3::from(p.color).extend(p.intensity).to_array();
    }
    let mut dir_dir = [[0.0; 4]; MAX_DIRECTIONAL_LIGHTS];
    let mut dir_color = [[0.0; 4]; MAX_DIRECTIONAL_LIGHTS];
    let n_dir = lights.directional.len().min(MAX_DIRECTIONAL_LIGHTS);
    for (i, d) in lights.directional.iter().take(n_dir).enumerate() {
        dir_dir[i] = d.direction().extend(0.0).to_array();
        dir_color[i] = Vec3::from(d.color).extend(d.intensity).to_array();
    }
    Globals {
        view_proj: camera.view_projection().to_cols_array_2d(),
        camera_pos: camera.eye.extend(1.0).to_array(),
        ambient: Vec3::from(lights.ambient_color)
            .extend(lights.ambient_intensity)
            .to_array(),
        fog_color: rgba_from_hex(FOG_COLOR, 1.0),
        fog_params: [FOG_NEAR, FOG_FAR, n_point as f32, n_dir as f32],
        point_pos,
        point_color,
        dir_dir,
        dir_color,
    }
}

//! WGPU-based rendering engine
//!
//! Owns the surface, device and every GPU resource derived from the scene.
//! Dropping the engine releases the surface, so the app keeps it only while
//! a window is mounted.

use std::sync::Arc;

use log::{debug, error, info, warn};
use wgpu::Device;

use super::{
    gpu_object::{DrawObject, GpuObject, ObjectLayouts},
    pipeline_manager::{PipelineConfig, PipelineManager},
};
use crate::{
    error::{Result, SceneError},
    gfx::{
        camera::camera_utils::CameraUniform,
        geometry::Topology,
        resources::{
            global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO},
            texture_resource::TextureResource,
        },
        scene::{light::Lights, scene::Scene},
    },
};

const LIT_PIPELINE: &str = "Lit";
const LIT_DOUBLE_SIDED_PIPELINE: &str = "LitDoubleSided";
const LINES_PIPELINE: &str = "Lines";

/// Core rendering engine managing GPU resources and draw calls
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    pipeline_manager: PipelineManager,
    global_ubo: GlobalUBO,
    global_bindings: GlobalBindings,
    objects: Vec<GpuObject>,
}

impl RenderEngine {
    /// Creates a render engine for `window` and uploads every object of `scene`
    ///
    /// # Arguments
    /// * `window` - Window surface target for rendering
    /// * `width` - Initial surface width in pixels
    /// * `height` - Initial surface height in pixels
    /// * `vsync` - Present with Fifo instead of Immediate when true
    /// * `scene` - Scene whose geometry and materials are uploaded once
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        vsync: bool,
        scene: &Scene,
    ) -> Result<RenderEngine> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        info!("Using adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or(SceneError::NoSurfaceFormat)?;

        let present_mode = if !vsync
            && surface_capabilities
                .present_modes
                .contains(&wgpu::PresentMode::Immediate)
        {
            wgpu::PresentMode::Immediate
        } else {
            wgpu::PresentMode::Fifo
        };

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode,
            alpha_mode: surface_capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");

        let global_ubo = GlobalUBO::new(&device);
        let global_bindings = GlobalBindings::new(&device, &global_ubo);
        let object_layouts = ObjectLayouts::new(&device);

        let objects: Vec<GpuObject> = scene
            .iter()
            .map(|(id, object)| GpuObject::upload(&device, &object_layouts, id, object))
            .collect();
        debug!("Uploaded {} objects", objects.len());

        let device_handle: Arc<Device> = device.into();
        let queue_handle: Arc<wgpu::Queue> = queue.into();
        let mut pipeline_manager = PipelineManager::new(device_handle.clone());

        pipeline_manager.load_shader("lit", include_str!("shaders/lit.wgsl"));
        pipeline_manager.load_shader("unlit", include_str!("shaders/unlit.wgsl"));

        let layouts = vec![
            global_bindings.bind_group_layout().clone(),
            object_layouts.transform.layout.clone(),
            object_layouts.material.layout.clone(),
        ];
        let lit = PipelineConfig::default()
            .with_shader("lit")
            .with_color_format(format)
            .with_depth(TextureResource::DEPTH_FORMAT, wgpu::CompareFunction::Less)
            .with_bind_group_layouts(layouts.clone());

        pipeline_manager.register_pipeline(
            LIT_PIPELINE,
            lit.clone().with_label("LIT").with_cull_mode(Some(wgpu::Face::Back)),
        );
        pipeline_manager.register_pipeline(
            LIT_DOUBLE_SIDED_PIPELINE,
            lit.with_label("LIT DOUBLE SIDED").with_cull_mode(None),
        );
        // Edges sit exactly on the faces, LessEqual lets them win the depth tie
        pipeline_manager.register_pipeline(
            LINES_PIPELINE,
            PipelineConfig::default()
                .with_label("LINES")
                .with_shader("unlit")
                .with_color_format(format)
                .with_depth(TextureResource::DEPTH_FORMAT, wgpu::CompareFunction::LessEqual)
                .with_primitive_topology(wgpu::PrimitiveTopology::LineList)
                .with_cull_mode(None)
                .with_bind_group_layouts(layouts),
        );

        if let Err(errors) = pipeline_manager.create_all_pipelines() {
            for e in &errors {
                error!("{}", e);
            }
        }
        for name in [LIT_PIPELINE, LIT_DOUBLE_SIDED_PIPELINE, LINES_PIPELINE] {
            if pipeline_manager.pipeline(name).is_none() {
                return Err(SceneError::MissingPipeline(name.to_string()));
            }
        }
        debug!("{:?}", pipeline_manager.get_stats());

        Ok(RenderEngine {
            surface,
            device: device_handle,
            queue: queue_handle,
            config,
            depth_texture,
            pipeline_manager,
            global_ubo,
            global_bindings,
            objects,
        })
    }

    /// Renders one frame: opaque meshes first, then line overlays
    ///
    /// Surface errors are returned to the caller, which decides whether to
    /// reconfigure, skip the frame or give up.
    pub fn render_frame(&mut self, scene: &Scene) -> std::result::Result<(), wgpu::SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let [r, g, b, a] = scene.background;
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);

            let visible = |object: &&GpuObject| {
                scene.get(object.id).map(|o| o.visible).unwrap_or(false)
            };

            for object in self.objects.iter().filter(visible) {
                let pipeline_name = match (object.topology, object.double_sided) {
                    (Topology::Lines, _) => continue,
                    (Topology::Triangles, false) => LIT_PIPELINE,
                    (Topology::Triangles, true) => LIT_DOUBLE_SIDED_PIPELINE,
                };
                if let Some(pipeline) = self.pipeline_manager.pipeline(pipeline_name) {
                    render_pass.set_pipeline(pipeline);
                    render_pass.draw_object(object);
                }
            }

            if let Some(pipeline) = self.pipeline_manager.pipeline(LINES_PIPELINE) {
                render_pass.set_pipeline(pipeline);
                for object in self
                    .objects
                    .iter()
                    .filter(visible)
                    .filter(|o| o.topology == Topology::Lines)
                {
                    render_pass.draw_object(object);
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }

    /// Updates camera and light uniform buffers
    ///
    /// Should be called each frame before [`RenderEngine::render_frame`].
    pub fn update(&mut self, camera_uniform: CameraUniform, lights: &Lights) {
        update_global_ubo(&mut self.global_ubo, &self.queue, camera_uniform, lights);
    }

    /// Copies every object's current transform into its GPU uniform
    pub fn sync_transforms(&mut self, scene: &Scene) {
        for gpu_object in &mut self.objects {
            match scene.get(gpu_object.id) {
                Some(object) => gpu_object.sync_transform(&self.queue, object),
                None => warn!("GPU object {:?} has no scene counterpart", gpu_object.id),
            }
        }
    }

    /// Resizes the surface and recreates the depth buffer
    ///
    /// Zero-sized requests (minimised windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.reconfigure();
    }

    /// Reapplies the current surface configuration after a lost or outdated surface
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }

    /// Returns current surface dimensions as (width, height) in pixels
    pub fn get_surface_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }
}

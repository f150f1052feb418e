use std::sync::Arc;

use anyhow::{Context as _, anyhow};
use instant::Instant;
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::{
    camera::{
        self, CameraResources, CameraUniform, ParallaxController, PointerFeed, Projection, Viewport,
    },
    config::ShowcaseConfig,
    data_structures::{
        model::Material,
        texture::{self, msaa_sample_count},
    },
    lifecycle::LoopToken,
    pipelines::{Pipelines, basic::SceneLayouts, light::LightResources, shadow::ShadowResources},
};

/// Everything the renderer owns: GPU handles, the surface, the camera, the
/// light rig, the shadow map and the pipelines.
#[derive(Debug)]
pub struct Context {
    pub(crate) window: Arc<Window>,
    pub(crate) depth_texture: texture::Texture,
    /// Multisampled colour target, `None` when the main pass is not
    /// multisampled.
    pub(crate) msaa_target: Option<texture::Texture>,
    pub sample_count: u32,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub camera: CameraResources,
    pub projection: Projection,
    pub viewport: Viewport,
    pub light: LightResources,
    pub shadow: ShadowResources,
    pub pipelines: Pipelines,
    pub material_layout: wgpu::BindGroupLayout,
    pub clear_colour: wgpu::Color,
    pub settings: ShowcaseConfig,
    /// Wall clock origin of the scene animations.
    pub started: Instant,
}

impl Context {
    /// `pointer` replaces the window's cursor events as the source of the
    /// parallax cursor when present.
    pub async fn new(
        window: Arc<Window>,
        settings: ShowcaseConfig,
        pointer: Option<PointerFeed>,
    ) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let (width, height) = if size.width == 0 || size.height == 0 {
            (settings.initial_size[0], settings.initial_size[1])
        } else {
            (size.width, size.height)
        };

        log::info!("WGPU setup");
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            #[cfg(not(target_arch = "wasm32"))]
            backends: wgpu::Backends::PRIMARY,
            #[cfg(target_arch = "wasm32")]
            backends: wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("cannot create a surface for the window")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no graphics adapter can present to this surface")?;

        log::info!("device and queue");
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                // WebGL doesn't support all of wgpu's features, so if
                // we're building for the web we'll have to disable some.
                required_limits: if cfg!(target_arch = "wasm32") {
                    wgpu::Limits::downlevel_webgl2_defaults()
                } else {
                    wgpu::Limits::default()
                },
                ..Default::default()
            })
            .await
            .context("cannot open the graphics device")?;

        log::info!("Surface");
        let surface_caps = surface.get_capabilities(&adapter);
        // The shaders output linear colour, so prefer an sRGB surface.
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| anyhow!("the surface reports no supported formats"))?;
        // The page shows through wherever nothing is drawn.
        let alpha_mode = surface_caps
            .alpha_modes
            .iter()
            .copied()
            .find(|mode| *mode == wgpu::CompositeAlphaMode::PreMultiplied)
            .or_else(|| surface_caps.alpha_modes.first().copied())
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: surface_caps
                .present_modes
                .first()
                .copied()
                .unwrap_or(wgpu::PresentMode::Fifo),
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        let sample_count = msaa_sample_count(
            adapter.get_texture_format_features(config.format).flags,
            adapter
                .get_texture_format_features(texture::Texture::DEPTH_FORMAT)
                .flags,
        );
        log::info!("main pass uses {} sample(s) per pixel", sample_count);

        let viewport = Viewport::new(width, height);
        let camera = camera::Camera::new(settings.camera.position);
        let projection = Projection::from_config(&settings.camera, width, height);
        let controller =
            ParallaxController::new(&settings.motion, viewport, window.scale_factor());
        let controller = match pointer {
            Some(feed) => controller.with_feed(feed),
            None => controller,
        };

        let mut camera_uniform = CameraUniform::new();
        camera_uniform.update_view_proj(&camera, &projection);

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
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
                label: Some("camera_bind_group_layout"),
            });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
            label: Some("camera_bind_group"),
        });

        let camera = CameraResources {
            camera,
            controller,
            uniform: camera_uniform,
            buffer: camera_buffer,
            bind_group: camera_bind_group,
            bind_group_layout: camera_bind_group_layout,
        };

        let depth_texture = texture::Texture::create_depth_target(
            &device,
            [width, height],
            sample_count,
            "depth_texture",
        );
        let msaa_target = Self::msaa_target(&device, &config, sample_count);

        let light = LightResources::new(&device, &settings.lighting, &settings.fog);
        let shadow = ShadowResources::new(
            &device,
            &settings.shadow,
            settings.lighting.directional_position,
        )?;
        let material_layout = Material::layout(&device);

        let pipelines = Pipelines::new(
            &device,
            &config,
            &SceneLayouts {
                material: &material_layout,
                camera: &camera.bind_group_layout,
                light: &light.bind_group_layout,
                shadow: &shadow.bind_group_layout,
            },
            sample_count,
        );
        log::info!("context ready at {}x{}", width, height);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            camera,
            projection,
            viewport,
            light,
            shadow,
            pipelines,
            material_layout,
            clear_colour: wgpu::Color::TRANSPARENT,
            settings,
            started: Instant::now(),
            window,
            depth_texture,
            msaa_target,
            sample_count,
        })
    }

    fn msaa_target(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        sample_count: u32,
    ) -> Option<texture::Texture> {
        (sample_count > 1).then(|| {
            texture::Texture::create_msaa_target(device, config, sample_count, "msaa_target")
        })
    }

    /// Applies a new surface size: projection, parallax half extents, the
    /// surface itself and the render targets. Zero sizes are ignored and
    /// reported with `false`.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if !self.viewport.resize(width, height) || !apply_surface_size(&mut self.config, width, height)
        {
            return false;
        }
        self.projection.resize(width, height);
        self.camera.controller.resize(width, height);
        self.surface.configure(&self.device, &self.config);
        self.depth_texture = texture::Texture::create_depth_target(
            &self.device,
            [self.config.width, self.config.height],
            self.sample_count,
            "depth_texture",
        );
        self.msaa_target = Self::msaa_target(&self.device, &self.config, self.sample_count);
        true
    }

    /// Colour attachment of the main pass and the texture it resolves into.
    pub(crate) fn colour_attachment<'a>(
        &'a self,
        surface_view: &'a wgpu::TextureView,
    ) -> (&'a wgpu::TextureView, Option<&'a wgpu::TextureView>) {
        match &self.msaa_target {
            Some(target) => (&target.view, Some(surface_view)),
            None => (surface_view, None),
        }
    }

    /// Eases the camera one step and uploads its uniform.
    pub(crate) fn update_camera(&mut self) {
        let camera = &mut self.camera;
        camera.controller.update(&mut camera.camera);
        camera
            .uniform
            .update_view_proj(&camera.camera, &self.projection);
        self.queue
            .write_buffer(&camera.buffer, 0, bytemuck::cast_slice(&[camera.uniform]));
    }
}

/// Writes a new size into the surface configuration. Zero sizes leave it
/// untouched and return `false`.
pub fn apply_surface_size(config: &mut wgpu::SurfaceConfiguration, width: u32, height: u32) -> bool {
    if width == 0 || height == 0 {
        return false;
    }
    config.width = width;
    config.height = height;
    true
}

/// The subset of the [`Context`] flow constructors need to create their GPU
/// resources, plus the app-wide shutdown token their loops hang off.
#[derive(Debug, Clone)]
pub struct InitContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub material_layout: wgpu::BindGroupLayout,
    pub settings: ShowcaseConfig,
    pub shutdown: LoopToken,
}

impl InitContext {
    pub fn new(ctx: &Context, shutdown: LoopToken) -> Self {
        Self {
            device: ctx.device.clone(),
            queue: ctx.queue.clone(),
            material_layout: ctx.material_layout.clone(),
            settings: ctx.settings.clone(),
            shutdown,
        }
    }
}

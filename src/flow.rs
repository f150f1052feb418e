//! Flow control and application event loop.
//!
//! A "flow" is one self-contained animated part of the scene: it reacts to
//! window events, advances its simulation every frame and says what it wants
//! drawn. The engine drives every flow once per redraw and batches their
//! renders per pipeline.
//!
//! # User-facing types
//!
//! - [`GraphicsFlow<S>`] is the trait for animated scene parts
//! - [`FlowConstructor<S>`] builds a flow once the GPU is ready
//!
//! # Lifecycle Flow
//!
//! The event loop follows this pattern each frame:
//! 1. Collect window events and pass them to every flow
//! 2. Advance every flow (`on_update`)
//! 3. Ease the camera toward its parallax target
//! 4. Collect every flow's [`Render`] and sort it into batches
//! 5. Shadow pass, opaque pass, transparent pass
//! 6. Present the frame
//!
//! Closing the window cancels the shared shutdown [`LoopToken`]. Once no flow
//! reports itself as running the loop exits (see [`should_exit`]).

use std::{fmt::Debug, iter, pin::Pin, sync::Arc};

use anyhow::Context as _;
use instant::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::Window,
};

use crate::{
    camera::PointerFeed,
    config::ShowcaseConfig,
    context::{Context, InitContext},
    data_structures::model::DrawModel,
    lifecycle::LoopToken,
    render::{Batches, Render},
};

/// Trait for an animated part of the scene.
///
/// # Lifecycle
///
/// 1. `on_init()` is called once when the flow is created
/// 2. `on_window_events()` is called for each winit window event
/// 3. `on_update()` is called every frame while the flow is running
/// 4. `on_render()` is called each frame and specifies how to render `self`
pub trait GraphicsFlow<S> {
    /// Initialize the flow and configure the context.
    fn on_init(&mut self, _ctx: &mut Context, _state: &mut S) {}

    /// Advance the flow by one frame. `dt` is the time since the last frame.
    fn on_update(&mut self, ctx: &Context, state: &mut S, dt: Duration);

    /// Handle window events (cursor, resize, ...).
    fn on_window_events(&mut self, _ctx: &Context, _state: &mut S, _event: &WindowEvent) {}

    /// Return renderable objects for this flow.
    ///
    /// Called each frame. The engine batches all flows' renders per pipeline.
    fn on_render(&self) -> Render<'_>;

    /// `false` once the flow's loop has been cancelled.
    fn is_running(&self) -> bool;
}

impl<State> Debug for dyn GraphicsFlow<State> + 'static {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("GraphicsFlow")
    }
}

/// `true` once none of `flows` is running any more.
pub fn should_exit<S>(flows: &[Box<dyn GraphicsFlow<S>>]) -> bool {
    !flows.iter().any(|flow| flow.is_running())
}

/// The future a [`FlowConstructor`] resolves to.
pub type FlowFuture<S> = Pin<Box<dyn Future<Output = anyhow::Result<Box<dyn GraphicsFlow<S>>>>>>;

/// A flow constructor (factory function).
///
/// Takes an [`InitContext`] and asynchronously returns the boxed flow, so
/// GPU resources are created once the device exists.
pub type FlowConstructor<S> = Box<dyn FnOnce(InitContext) -> FlowFuture<S>>;

/// Application state bundle: GPU context, app state, and surface status.
#[derive(Debug)]
pub struct AppState<State: 'static> {
    pub(crate) ctx: Context,
    state: State,
    is_surface_configured: bool,
}

impl<State: 'static + Default> AppState<State> {
    async fn new(
        window: Arc<Window>,
        settings: ShowcaseConfig,
        pointer: Option<PointerFeed>,
    ) -> anyhow::Result<Self> {
        let ctx = Context::new(window, settings, pointer)
            .await
            .context("App initialization failed. Cannot create the main context")?;
        Ok(Self {
            ctx,
            state: State::default(),
            is_surface_configured: false,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if self.ctx.resize(width, height) {
            self.is_surface_configured = true;
        }
    }

    fn render(
        &self,
        graphics_flows: &[Box<dyn GraphicsFlow<State>>],
    ) -> Result<(), wgpu::SurfaceError> {
        // invoke main render loop
        self.ctx.window.request_redraw();

        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return Ok(());
        }

        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut batches = Batches::default();
        graphics_flows
            .iter()
            .for_each(|flow| flow.on_render().collect(&mut batches));

        let ctx = &self.ctx;
        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut shadow_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Shadow Pass"),
                color_attachments: &[],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &ctx.shadow.map.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            shadow_pass.set_pipeline(&ctx.shadow.pipeline);
            shadow_pass.set_bind_group(0, &ctx.shadow.pass_bind_group, &[]);
            for instanced in &batches.shadow_casters {
                shadow_pass.set_vertex_buffer(1, instanced.instance.slice(..));
                shadow_pass.draw_mesh_depth(&instanced.model.mesh, 0..instanced.amount as u32);
            }
        }

        {
            let (colour_view, resolve_target) = ctx.colour_attachment(&view);
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: colour_view,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(ctx.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &ctx.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            for (pipeline, batch) in [
                (&ctx.pipelines.basic, &batches.opaque),
                (&ctx.pipelines.transparent, &batches.transparent),
            ] {
                render_pass.set_pipeline(pipeline);
                for instanced in batch {
                    render_pass.set_vertex_buffer(1, instanced.instance.slice(..));
                    render_pass.draw_model_instanced(
                        instanced.model,
                        0..instanced.amount as u32,
                        &ctx.camera.bind_group,
                        &ctx.light.bind_group,
                        &ctx.shadow.bind_group,
                    );
                }
            }
        }

        ctx.queue.submit(iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

pub struct App<State: 'static> {
    #[cfg(not(target_arch = "wasm32"))]
    async_runtime: tokio::runtime::Runtime,
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    proxy: winit::event_loop::EventLoopProxy<FlowEvent<State>>,
    settings: ShowcaseConfig,
    shutdown: LoopToken,
    pointer: Option<PointerFeed>,
    state: Option<AppState<State>>,
    // This will hold the fully initialized flows once they are ready.
    graphics_flows: Vec<Box<dyn GraphicsFlow<State>>>,
    // This holds the constructors at the start.
    // We use Option to `take()` it after use.
    constructors: Option<Vec<FlowConstructor<State>>>,
    last_time: Instant,
}

impl<State: 'static + Default> App<State> {
    fn new(
        event_loop: &EventLoop<FlowEvent<State>>,
        settings: ShowcaseConfig,
        shutdown: LoopToken,
        pointer: Option<PointerFeed>,
        constructors: Vec<FlowConstructor<State>>,
    ) -> anyhow::Result<Self> {
        let proxy = event_loop.create_proxy();
        #[cfg(not(target_arch = "wasm32"))]
        let async_runtime =
            tokio::runtime::Runtime::new().context("cannot start the async runtime")?;
        Ok(Self {
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime,
            proxy,
            settings,
            shutdown,
            pointer,
            state: None,
            graphics_flows: Vec::new(),
            constructors: Some(constructors),
            last_time: Instant::now(),
        })
    }

    fn window_attributes(&self) -> anyhow::Result<winit::window::WindowAttributes> {
        #[allow(unused_mut)]
        let mut window_attributes = Window::default_attributes().with_title("engine showcase");

        #[cfg(not(target_arch = "wasm32"))]
        {
            let [width, height] = self.settings.initial_size;
            window_attributes =
                window_attributes.with_inner_size(winit::dpi::PhysicalSize::new(width, height));
        }

        #[cfg(target_arch = "wasm32")]
        {
            use winit::platform::web::WindowAttributesExtWebSys;

            let canvas = crate::chrome::web::scene_canvas(&self.settings.dom)?;
            window_attributes = window_attributes.with_canvas(Some(canvas));
            if let Some(size) = crate::chrome::web::container_size(&self.settings.dom)? {
                window_attributes = window_attributes.with_inner_size(size);
            }
        }

        Ok(window_attributes)
    }

    fn start_flows(&mut self, mut app_state: AppState<State>, flows: Vec<Box<dyn GraphicsFlow<State>>>) {
        self.graphics_flows = flows;
        let size = app_state.ctx.window.inner_size();
        app_state.resize(size.width, size.height);
        self.graphics_flows
            .iter_mut()
            .for_each(|flow| flow.on_init(&mut app_state.ctx, &mut app_state.state));
        app_state.ctx.window.request_redraw();
        log::info!("{} flows running", self.graphics_flows.len());
        self.state = Some(app_state);
    }
}

pub(crate) enum FlowEvent<State: 'static> {
    #[allow(dead_code)]
    Initialized {
        state: AppState<State>,
        flows: Vec<Box<dyn GraphicsFlow<State>>>,
    },
    #[allow(dead_code)]
    Failed(anyhow::Error),
}

impl<State> Debug for FlowEvent<State> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initialized { state: _, flows } => {
                f.debug_struct("Initialized").field("flows", flows).finish()
            }
            Self::Failed(e) => f.debug_tuple("Failed").field(e).finish(),
        }
    }
}

async fn init<State: 'static + Default>(
    window: Arc<Window>,
    settings: ShowcaseConfig,
    shutdown: LoopToken,
    pointer: Option<PointerFeed>,
    constructors: Vec<FlowConstructor<State>>,
) -> anyhow::Result<(AppState<State>, Vec<Box<dyn GraphicsFlow<State>>>)> {
    let app_state = AppState::new(window, settings, pointer).await?;
    let flow_futures: Vec<_> = constructors
        .into_iter()
        // Device and Queue are internally reference counted, cloning them is cheap
        .map(|constructor| constructor(InitContext::new(&app_state.ctx, shutdown.clone())))
        .collect();
    let flows = futures::future::join_all(flow_futures)
        .await
        .into_iter()
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok((app_state, flows))
}

impl<State: 'static + Default> ApplicationHandler<FlowEvent<State>> for App<State> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(constructors) = self.constructors.take() else {
            // Already initialised, e.g. when the app is resumed after a suspend.
            return;
        };

        let window = match self
            .window_attributes()
            .and_then(|attributes| Ok(event_loop.create_window(attributes)?))
        {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Cannot create the window: {:#}", e);
                event_loop.exit();
                return;
            }
        };

        #[cfg(target_arch = "wasm32")]
        {
            let follow = crate::chrome::web::follow_container(&self.settings.dom, window.clone());
            if let Err(e) = follow {
                log::error!("the scene will not follow its container: {:#}", e);
            }
        }

        let init_future = init(
            window,
            self.settings.clone(),
            self.shutdown.clone(),
            self.pointer.clone(),
            constructors,
        );

        #[cfg(not(target_arch = "wasm32"))]
        {
            match self.async_runtime.block_on(init_future) {
                Ok((app_state, flows)) => self.start_flows(app_state, flows),
                Err(e) => {
                    log::error!("{:#}", e);
                    event_loop.exit();
                }
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            let proxy = self.proxy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let event = match init_future.await {
                    Ok((state, flows)) => FlowEvent::Initialized { state, flows },
                    Err(e) => FlowEvent::Failed(e),
                };
                if proxy.send_event(event).is_err() {
                    log::error!("the event loop closed before the scene was ready");
                }
            });
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: FlowEvent<State>) {
        match event {
            FlowEvent::Initialized { state, flows } => {
                // This is the message from our wasm `spawn_local`
                self.start_flows(state, flows);
            }
            FlowEvent::Failed(e) => {
                log::error!("{:#}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        state.ctx.camera.controller.handle_window_events(&event);

        self.graphics_flows
            .iter_mut()
            .for_each(|f| f.on_window_events(&state.ctx, &mut state.state, &event));

        match event {
            WindowEvent::CloseRequested => {
                self.shutdown.cancel();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::RedrawRequested => {
                let dt = self.last_time.elapsed();
                self.last_time = Instant::now();

                self.graphics_flows
                    .iter_mut()
                    .filter(|f| f.is_running())
                    .for_each(|f| f.on_update(&state.ctx, &mut state.state, dt));
                state.ctx.update_camera();

                match state.render(&self.graphics_flows) {
                    Ok(_) => (),
                    // Reconfigure the surface if it's lost or outdated
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = state.ctx.window.inner_size();
                        state.resize(size.width, size.height);
                    }
                    Err(e) => {
                        log::error!("Unable to render {}", e);
                    }
                }

                if should_exit(&self.graphics_flows) {
                    log::info!("every flow has stopped, leaving the event loop");
                    self.shutdown.cancel();
                    event_loop.exit();
                }
            }
            _ => {}
        }
    }
}

/// Installs the platform logger once. Later calls are no-ops.
pub fn init_logging() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        #[cfg(not(target_arch = "wasm32"))]
        {
            if let Err(e) = env_logger::try_init() {
                println!("Warning: Could not initialize logger: {}", e);
            };
        }

        #[cfg(target_arch = "wasm32")]
        {
            console_error_panic_hook::set_once();
            // A logger installed by the host page wins.
            let _ = console_log::init_with_level(log::Level::Info);
        }
    });
}

/// Runs the flows with the default settings until the window closes.
pub fn run<State: 'static + Default>(
    constructors: Vec<FlowConstructor<State>>,
) -> anyhow::Result<()> {
    run_with(ShowcaseConfig::default(), LoopToken::new(), None, constructors)
}

/// Runs the flows until the window closes or `shutdown` is cancelled and
/// every flow has stopped. With a `pointer` feed the parallax cursor is read
/// from it instead of the window's cursor events.
pub fn run_with<State: 'static + Default>(
    settings: ShowcaseConfig,
    shutdown: LoopToken,
    pointer: Option<PointerFeed>,
    constructors: Vec<FlowConstructor<State>>,
) -> anyhow::Result<()> {
    init_logging();

    let event_loop: EventLoop<FlowEvent<State>> = EventLoop::with_user_event().build()?;
    let mut app: App<State> = App::new(&event_loop, settings, shutdown, pointer, constructors)?;

    event_loop.run_app(&mut app)?;

    Ok(())
}

use std::sync::Arc;

use log::{debug, error, info, warn};
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::{
    config::SceneConfig,
    controller::SceneController,
    error::{Result, SceneError},
    gfx::rendering::RenderEngine,
    input::PointerListeners,
};

/// The interactive cube demo: window, renderer and scene controller
pub struct DragCubeApp {
    event_loop: EventLoop<()>,
    app_state: AppState,
}

/// Resources that exist only while a window is mounted
///
/// The surface and the pointer listeners are acquired together and dropped
/// together, so there is never a half-mounted state.
struct Mounted {
    window: Arc<Window>,
    render_engine: RenderEngine,
    listeners: PointerListeners,
}

impl Mounted {
    fn acquire(
        event_loop: &ActiveEventLoop,
        config: &SceneConfig,
        controller: &SceneController,
    ) -> Result<Self> {
        let window = event_loop.create_window(
            WindowAttributes::default()
                .with_title(config.window.title.clone())
                .with_inner_size(LogicalSize::new(config.window.width, config.window.height)),
        )?;
        let window = Arc::new(window);
        let (width, height) = window.inner_size().into();

        let render_engine = pollster::block_on(RenderEngine::new(
            window.clone(),
            width,
            height,
            config.window.vsync,
            controller.scene(),
        ))?;

        info!("Mounted {}x{} window", width, height);
        Ok(Self {
            window,
            render_engine,
            listeners: PointerListeners::subscribe(),
        })
    }

    fn release(mut self) {
        self.listeners.unsubscribe();
        info!("Unmounted window");
        // Dropping the engine releases the surface before the window goes
        drop(self.render_engine);
        drop(self.window);
    }
}

struct AppState {
    config: SceneConfig,
    controller: SceneController,
    mounted: Option<Mounted>,
    fatal: Option<SceneError>,
}

impl AppState {
    fn mount(&mut self, event_loop: &ActiveEventLoop) {
        if self.mounted.is_some() {
            debug!("Already mounted, ignoring resume");
            return;
        }

        match Mounted::acquire(event_loop, &self.config, &self.controller) {
            Ok(mounted) => {
                let (width, height) = mounted.render_engine.get_surface_size();
                self.controller.resize(width, height);
                self.mounted = Some(mounted);
            }
            Err(e) => {
                error!("Failed to mount: {}", e);
                self.fatal = Some(e);
                event_loop.exit();
            }
        }
    }

    fn unmount(&mut self) {
        if let Some(mounted) = self.mounted.take() {
            self.controller.release();
            mounted.release();
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(mounted) = self.mounted.as_mut() else {
            return;
        };

        self.controller.tick();

        let render_engine = &mut mounted.render_engine;
        let scene = self.controller.scene();
        render_engine.update(self.controller.camera().uniform, &scene.lights);
        render_engine.sync_transforms(scene);

        match render_engine.render_frame(scene) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                debug!("Surface lost or outdated, reconfiguring");
                render_engine.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("Out of GPU memory, exiting");
                event_loop.exit();
            }
            Err(e) => warn!("Skipping frame: {}", e),
        }
    }
}

impl DragCubeApp {
    pub fn new(config: SceneConfig) -> Result<Self> {
        let event_loop = EventLoop::new()?;
        let controller = SceneController::new(&config);

        Ok(Self {
            event_loop,
            app_state: AppState {
                config,
                controller,
                mounted: None,
                fatal: None,
            },
        })
    }

    /// Runs the event loop until the window closes
    ///
    /// Returns the error that stopped the app if mounting failed.
    pub fn run(mut self) -> Result<()> {
        self.event_loop.set_control_flow(ControlFlow::Poll);
        self.event_loop.run_app(&mut self.app_state)?;

        match self.app_state.fatal.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        self.mount(event_loop);
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        self.unmount();
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.unmount();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(mounted) = self.mounted.as_mut() else {
            return;
        };

        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            }
            | WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.controller.resize(width, height);
                mounted.render_engine.resize(width, height);
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            other => {
                if let Some(pointer) = mounted.listeners.translate(&other) {
                    self.controller.handle_pointer(pointer);
                }
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(mounted) = &self.mounted {
            mounted.window.request_redraw();
        }
    }
}

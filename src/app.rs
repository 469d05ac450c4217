use futures::executor::{ThreadPool, ThreadPoolBuilder};
use log::{debug, error, info, trace, warn};
use std::collections::HashMap;
use std::sync::{mpsc::Receiver, Arc};
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes},
};

use crate::config::PlacerConfig;
use crate::error::{Error, Result};
use crate::gfx::{
    camera::{CameraController, CameraManager, OrbitCamera},
    scene::DrawList,
    RenderEngine,
};
use crate::overlay::{EventChannel, JoystickData, OverlayScene, JOYSTICK_TOPIC};
use crate::placement::PlacementStore;
use crate::registry::{ModelRegistry, ObjLoader, ScanOptions};
use crate::session::{PlacementOutcome, SceneHost, SimulatedSession};
use crate::ui::{draw_joystick, placement_ui, Panel, ThumbnailTextures, UiManager};

pub struct PlacerApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    config: PlacerConfig,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    thumbnails: ThumbnailTextures,
    registry: ModelRegistry,
    store: PlacementStore,
    host: SceneHost<SimulatedSession>,
    overlay: OverlayScene,
    joystick_events: Receiver<JoystickData>,
    camera_manager: CameraManager,
    cursor: (f32, f32),
    touching: bool,
    // Loads run here; dropping the pool would stop them
    _loader_pool: ThreadPool,
}

impl PlacerApp {
    /// Scans the asset directory, starts background loads and the session
    ///
    /// The window and GPU state are created later, when the event loop
    /// resumes.
    pub fn new(config: PlacerConfig) -> Result<Self> {
        let event_loop = EventLoop::new()?;

        let loader_pool = ThreadPoolBuilder::new()
            .pool_size(config.effective_loader_threads())
            .name_prefix("placer-loader-")
            .create()
            .map_err(Error::Executor)?;

        let registry = match ModelRegistry::build(
            &ScanOptions::from(&config),
            Arc::new(ObjLoader::new()),
            &loader_pool,
        ) {
            Ok(registry) => registry,
            Err(err) => {
                warn!("Starting with an empty model list: {}", err);
                ModelRegistry::empty()
            }
        };
        info!(
            "{} model(s) available, {} rejected",
            registry.len(),
            registry.rejected().len()
        );

        let mut store = PlacementStore::new();
        store.subscribe(|state| debug!("Placement phase: {}", state.phase()));

        let host = SceneHost::new(SimulatedSession::new(), &config.session);

        let mut channel = EventChannel::new(JOYSTICK_TOPIC);
        let joystick_events = channel.subscribe();
        let (width, height) = config.window_size;
        let overlay = OverlayScene::new((width as f32, height as f32), channel)
            .with_joystick_diameter(config.joystick_diameter);

        let camera = OrbitCamera::standing(width as f32 / height.max(1) as f32);
        let controller = CameraController::new(0.005, 0.1);

        Ok(Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                config,
                window: None,
                render_engine: None,
                ui_manager: None,
                thumbnails: HashMap::new(),
                registry,
                store,
                host,
                overlay,
                joystick_events,
                camera_manager: CameraManager::new(camera, controller),
                cursor: (0.0, 0.0),
                touching: false,
                _loader_pool: loader_pool,
            },
        })
    }

    /// Runs until the window closes
    pub fn run(mut self) -> Result<()> {
        let Some(event_loop) = self.event_loop.take() else {
            return Ok(());
        };
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut self.app_state)?;
        Ok(())
    }
}

impl AppState {
    fn upload_thumbnails(&mut self) {
        let (Some(render_engine), Some(ui_manager)) =
            (self.render_engine.as_ref(), self.ui_manager.as_mut())
        else {
            return;
        };

        for entry in self.registry.entries() {
            let texture = ui_manager.register_thumbnail(
                render_engine.device(),
                render_engine.queue(),
                entry.thumbnail(),
                entry.name(),
            );
            self.thumbnails.insert(entry.id(), texture);
        }
    }

    /// One tick: apply loads, aim the reticle, place, draw
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(render_engine), Some(ui_manager)) = (
            self.window.as_ref(),
            self.render_engine.as_mut(),
            self.ui_manager.as_mut(),
        ) else {
            return;
        };

        self.registry.poll_completions();

        let (width, height) = render_engine.get_surface_size();
        let ray = self.camera_manager.center_ray(width, height);
        self.host.session_mut().update_focus(&ray);

        if let PlacementOutcome::Dropped { reason, .. } =
            self.host.observe(&mut self.store, &self.registry)
        {
            debug!("Placement dropped: {:?}", reason);
        }

        for data in self.joystick_events.try_iter() {
            trace!(
                "Joystick velocity {:?}, angular {:.3}",
                data.velocity,
                data.angular
            );
        }

        self.camera_manager.camera.update_view_proj();
        render_engine.update(self.camera_manager.camera.uniform);

        let draw_list = DrawList::from_session(self.host.session());
        let panel = Panel::build(self.store.state(), &self.registry);

        let overlay = &self.overlay;
        let thumbnails = &self.thumbnails;
        let action = ui_manager.update_logic(window, |ui| {
            draw_joystick(ui, overlay);
            placement_ui(ui, &panel, thumbnails)
        });

        let result = render_engine.render_frame(&draw_list, |device, queue, encoder, view| {
            ui_manager.render_display_only(device, queue, encoder, view);
        });

        match result {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                render_engine.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("Out of GPU memory, exiting");
                event_loop.exit();
            }
            Err(err) => warn!("Skipped frame: {}", err),
        }

        if let Some(action) = action {
            if let Err(err) = self.store.dispatch(action) {
                warn!("Ignoring {:?}: {}", action, err);
            }
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let (width, height) = self.config.window_size;
        let window = match event_loop.create_window(
            WindowAttributes::default()
                .with_title("placer")
                .with_inner_size(LogicalSize::new(width, height)),
        ) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                error!("Failed to create window: {}", err);
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        let (width, height) = window.inner_size().into();
        let renderer = match pollster::block_on(RenderEngine::new(window.clone(), width, height)) {
            Ok(renderer) => renderer,
            Err(err) => {
                error!("{}", Error::from(err));
                event_loop.exit();
                return;
            }
        };

        self.camera_manager.camera.resize_projection(width, height);
        self.overlay.resize((width as f32, height as f32));

        let ui_manager = UiManager::new(
            renderer.device(),
            renderer.queue(),
            renderer.surface_format(),
            &window,
        );

        self.ui_manager = Some(ui_manager);
        self.render_engine = Some(renderer);
        self.upload_thumbnails();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.clone() else {
            return;
        };

        // UI gets first look at input
        if let Some(ui_manager) = self.ui_manager.as_mut() {
            let ui_event: winit::event::Event<()> = winit::event::Event::WindowEvent {
                window_id,
                event: event.clone(),
            };
            if ui_manager.handle_input(&window, &ui_event) {
                window.request_redraw();
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => {
                if event.physical_key == PhysicalKey::Code(KeyCode::Escape) {
                    event_loop.exit();
                    return;
                }
                self.camera_manager.process_keyboard_event(&event);
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.camera_manager.camera.resize_projection(width, height);
                self.overlay.resize((width as f32, height as f32));
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
                if let Some(ui_manager) = self.ui_manager.as_mut() {
                    ui_manager.update_display_size(width, height);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x as f32, position.y as f32);
                if self.touching {
                    self.overlay.touches_moved(self.cursor);
                }
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Right,
                ..
            } => match state {
                ElementState::Pressed => {
                    self.touching = true;
                    self.overlay.touches_began(self.cursor);
                }
                ElementState::Released => {
                    self.touching = false;
                    self.overlay.touches_ended();
                }
            },
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: winit::event::DeviceEvent,
    ) {
        // Camera stays put while the pointer is over a panel
        if let Some(ui_manager) = self.ui_manager.as_ref() {
            if ui_manager.wants_mouse() {
                self.camera_manager.controller.release_mouse();
                return;
            }
        }

        self.camera_manager.process_event(&event);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}

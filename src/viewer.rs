//! Standalone scene window backed by winit.
//!
//! Hosts a [`SceneEngine`] in a native window: the canvas is cleared to the
//! scene background (with the loader cover blended over it while the intro
//! plays), the camera uniform is uploaded every frame, and the overlay text
//! is shown in the window title.
//!
//! ```no_run
//! # use ugd_scene::Viewer;
//! Viewer::builder()
//!     .with_title("UGD")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::path::PathBuf;
use std::sync::Arc;
#[cfg(feature = "net")]
use std::sync::mpsc;

use glam::Vec2;
use web_time::SystemTime;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{CursorIcon, Window, WindowId},
};

use crate::{
    device::DeviceCapabilities,
    engine::SceneEngine,
    error::SceneError,
    gpu::{
        background::clear_color, camera_binding::CameraBinding,
        render_context::RenderContext, render_context::RenderContextError,
    },
    input::{CursorStyle, InputEvent, MouseButton},
    options::Options,
    overlay::{FileStore, Overlay},
    sensor::SensorCapability,
    util::frame_timing::FrameTiming,
};
#[cfg(feature = "net")]
use crate::overlay::{IpApiClient, LocationData, LocationSource};

/// CSS pixels per wheel "line", matching what browsers report.
const LINE_HEIGHT_PX: f32 = 100.0;

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
#[derive(Debug)]
pub struct ViewerBuilder {
    options: Option<Options>,
    title: String,
    store_dir: Option<PathBuf>,
}

impl ViewerBuilder {
    /// Create a builder with defaults (title "UGD", default options, visit
    /// record kept next to the working directory).
    fn new() -> Self {
        Self {
            options: None,
            title: "UGD".into(),
            store_dir: None,
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title prefix.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Directory the last-visit record is stored in.
    #[must_use]
    pub fn with_store_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.store_dir = Some(dir.into());
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options.unwrap_or_default(),
            title: self.title,
            store_dir: self.store_dir.unwrap_or_else(|| PathBuf::from(".ugd")),
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window showing the scene.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
#[derive(Debug)]
pub struct Viewer {
    options: Options,
    title: String,
    store_dir: PathBuf,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Viewer`] if the event loop cannot be created
    /// or exits with an error.
    pub fn run(self) -> Result<(), SceneError> {
        let event_loop =
            EventLoop::new().map_err(|e| SceneError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let overlay = Overlay::new(&self.options.overlay);
        let mut app = ViewerApp {
            window: None,
            gpu: None,
            engine: None,
            overlay,
            store: FileStore::new(self.store_dir),
            timing: FrameTiming::new(0),
            cursor: CursorStyle::Default,
            options: self.options,
            title: self.title,
            #[cfg(feature = "net")]
            location_rx: None,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| SceneError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// GPU state created once the window exists.
struct Gpu {
    context: RenderContext,
    camera: CameraBinding,
}

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    gpu: Option<Gpu>,
    engine: Option<SceneEngine>,
    overlay: Overlay,
    store: FileStore,
    timing: FrameTiming,
    cursor: CursorStyle,
    options: Options,
    title: String,
    #[cfg(feature = "net")]
    location_rx: Option<mpsc::Receiver<Result<LocationData, SceneError>>>,
}

/// Native windows have a mouse and no tilt sensor.
fn native_capabilities() -> DeviceCapabilities {
    DeviceCapabilities {
        has_orientation_sensor: false,
        touch_primary: false,
    }
}

/// Window size in CSS (logical) pixels.
fn logical_viewport(window: &Window) -> Vec2 {
    let size = window.inner_size().to_logical::<f32>(window.scale_factor());
    Vec2::new(size.width, size.height).max(Vec2::ONE)
}

fn cursor_icon(style: CursorStyle) -> CursorIcon {
    match style {
        CursorStyle::Default => CursorIcon::Default,
        CursorStyle::Grab => CursorIcon::Grab,
        CursorStyle::Grabbing => CursorIcon::Grabbing,
    }
}

impl ViewerApp {
    /// Look the visitor up on a worker thread; the answer is applied on a
    /// later frame.
    #[cfg(feature = "net")]
    fn spawn_location_lookup(&mut self) {
        let (tx, rx) = mpsc::channel();
        let client = IpApiClient::new(self.options.overlay.location_endpoint.clone());
        let _ = std::thread::spawn(move || {
            let _ = tx.send(client.fetch());
        });
        self.location_rx = Some(rx);
    }

    #[cfg(feature = "net")]
    fn poll_location_lookup(&mut self) -> bool {
        let Some(rx) = &self.location_rx else {
            return false;
        };
        let Ok(result) = rx.try_recv() else {
            return false;
        };
        self.location_rx = None;
        let _ = self
            .overlay
            .apply_location(result, &mut self.store, SystemTime::now());
        true
    }

    /// Title bar doubles as the overlay.
    fn refresh_title(&self) {
        if let Some(window) = &self.window {
            window.set_title(&format!(
                "{} | {} | {}",
                self.title,
                self.overlay.clock(),
                self.overlay.location().trim()
            ));
        }
    }

    fn sync_cursor(&mut self) {
        let Some(engine) = &self.engine else {
            return;
        };
        let style = engine.cursor_style();
        if style != self.cursor {
            self.cursor = style;
            if let Some(window) = &self.window {
                window.set_cursor(cursor_icon(style));
            }
        }
    }

    fn redraw(&mut self) {
        let dt = self.timing.end_frame();

        #[cfg(feature = "net")]
        let mut title_dirty = self.poll_location_lookup();
        #[cfg(not(feature = "net"))]
        let mut title_dirty = false;
        title_dirty |= self.overlay.update_clock(SystemTime::now(), 0);
        if title_dirty {
            self.refresh_title();
        }

        let (Some(engine), Some(gpu)) = (&mut self.engine, &mut self.gpu) else {
            return;
        };
        let _ = engine.update(dt);
        let _ = gpu
            .camera
            .write(&gpu.context.queue, engine.camera_uniform());

        let color = clear_color(engine.loader_frame().coverage());
        match gpu.context.present_clear(color) {
            Ok(()) => {}
            Err(RenderContextError::Frame(
                e @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated),
            )) => log::debug!("surface reconfigured after {e}"),
            Err(e) => log::error!("render error: {e}"),
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(1280.0, 800.0));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let inner = window.inner_size();
        let context = match pollster::block_on(RenderContext::new(
            window.clone(),
            (inner.width, inner.height),
        )) {
            Ok(context) => context,
            Err(e) => {
                log::error!("Failed to initialize GPU: {e}");
                event_loop.exit();
                return;
            }
        };

        let mut engine = SceneEngine::new(
            self.options.clone(),
            logical_viewport(&window),
            native_capabilities(),
            SensorCapability::Unsupported,
        );
        engine.mount();
        let quality = engine.quality();
        log::debug!(
            "render quality: env {}px, shadow {}px",
            quality.environment_resolution,
            quality.shadow_map_size
        );

        let camera = CameraBinding::new(&context.device, engine.camera_uniform());
        self.gpu = Some(Gpu { context, camera });

        self.overlay.mount(&self.store);
        #[cfg(feature = "net")]
        self.spawn_location_lookup();

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
        self.sync_cursor();
        self.refresh_title();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            if let Some(engine) = &mut self.engine {
                engine.unmount();
            }
            event_loop.exit();
            return;
        }

        let Some(window) = self.window.clone() else {
            return;
        };
        let scale = window.scale_factor();

        let input = match event {
            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.context.resize(size.width, size.height);
                }
                let viewport = logical_viewport(&window);
                Some(InputEvent::Resized {
                    width: viewport.x,
                    height: viewport.y,
                    capabilities: native_capabilities(),
                })
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
                window.request_redraw();
                None
            }
            WindowEvent::MouseInput { button, state, .. } => {
                Some(InputEvent::MouseButton {
                    button: MouseButton::from(button),
                    pressed: state == ElementState::Pressed,
                })
            }
            WindowEvent::CursorMoved { position, .. } => {
                let position = position.to_logical::<f32>(scale);
                Some(InputEvent::CursorMoved {
                    x: position.x,
                    y: position.y,
                })
            }
            WindowEvent::CursorLeft { .. } => Some(InputEvent::CursorLeft),
            WindowEvent::MouseWheel { delta, .. } => {
                let delta_y = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -y * LINE_HEIGHT_PX,
                    MouseScrollDelta::PixelDelta(pos) => {
                        -pos.to_logical::<f32>(scale).y
                    }
                };
                Some(InputEvent::Scroll { delta_y })
            }
            _ => None,
        };

        if let (Some(input), Some(engine)) = (input, &mut self.engine) {
            let _ = engine.handle_input(input);
            self.sync_cursor();
        }
    }
}

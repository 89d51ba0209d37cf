//! Browser host for the scene (feature `web`).
//!
//! [`WebScene`] owns a [`SceneEngine`] behind an `Rc<RefCell<..>>` shared
//! with the DOM listeners and a `requestAnimationFrame` loop. The page
//! renders the scene itself and reads the camera back each frame through
//! [`WebScene::view_proj`]; overlay text, the loader cover and the
//! orientation prompt are written into elements looked up by id.
//!
//! Everything registered here is released when the handle is dropped
//! (`scene.free()` from JavaScript).

mod listeners;
mod platform;
mod storage;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    AddEventListenerOptions, DeviceOrientationEvent, Document, Event, HtmlElement, PointerEvent,
    WheelEvent, Window,
};
use web_time::SystemTime;

use self::listeners::Listener;
pub use self::platform::WebPermission;
use self::storage::LocalStorageStore;
use crate::engine::SceneEngine;
use crate::input::{CursorStyle, InputEvent, MouseButton};
use crate::options::Options;
use crate::overlay::{MemoryStore, Overlay, VisitStore};
use crate::sensor::{OrientationSample, RequestStart};
use crate::util::frame_timing::FrameTiming;

const CLOCK_ID: &str = "ugd-clock";
const LOCATION_ID: &str = "ugd-location";
const BRAND_ID: &str = "ugd-brand";
const LOADER_ID: &str = "ugd-loader";
const PROMPT_ID: &str = "ugd-permission";

/// `WheelEvent.deltaMode` for line-based deltas.
const DOM_DELTA_LINE: u32 = 1;
const LINE_HEIGHT_PX: f32 = 100.0;

/// Install logging and the panic hook.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
    }
}

/// Wheel delta in CSS pixels, whatever unit the browser reported.
#[allow(clippy::cast_possible_truncation)]
fn wheel_delta_px(delta_y: f64, delta_mode: u32) -> f32 {
    let delta_y = delta_y as f32;
    if delta_mode == DOM_DELTA_LINE {
        delta_y * LINE_HEIGHT_PX
    } else {
        delta_y
    }
}

#[allow(clippy::cast_precision_loss)]
fn cursor_moved(e: &PointerEvent) -> InputEvent {
    InputEvent::CursorMoved {
        x: e.offset_x() as f32,
        y: e.offset_y() as f32,
    }
}

fn js_error(message: &str) -> JsValue {
    JsValue::from_str(message)
}

/// Minutes to add to UTC for the visitor's wall clock.
#[allow(clippy::cast_possible_truncation)]
fn local_offset_minutes() -> i32 {
    -(js_sys::Date::new_0().get_timezone_offset() as i32)
}

/// State shared between the handle, the listeners and the frame loop.
struct Shared {
    engine: SceneEngine,
    overlay: Overlay,
    store: Box<dyn VisitStore>,
    timing: FrameTiming,
    document: Document,
    canvas: HtmlElement,
    cursor: CursorStyle,
    loader_removed: bool,
}

impl Shared {
    fn frame(&mut self) {
        let dt = self.timing.end_frame();
        let _ = self.engine.update(dt);

        if self
            .overlay
            .update_clock(SystemTime::now(), local_offset_minutes())
        {
            self.set_text(CLOCK_ID, self.overlay.clock());
        }
        self.sync_cursor();
        self.sync_loader();
        self.sync_prompt();
    }

    fn element(&self, id: &str) -> Option<HtmlElement> {
        self.document
            .get_element_by_id(id)
            .and_then(|e| e.dyn_into::<HtmlElement>().ok())
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(element) = self.element(id) {
            element.set_text_content(Some(text));
        }
    }

    fn sync_cursor(&mut self) {
        let style = self.engine.cursor_style();
        if style == self.cursor {
            return;
        }
        self.cursor = style;
        let _ = self.canvas.style().set_property("cursor", style.css());
    }

    fn sync_loader(&mut self) {
        if self.loader_removed {
            return;
        }
        let Some(loader) = self.element(LOADER_ID) else {
            return;
        };
        let frame = self.engine.loader_frame();
        if frame.coverage() <= 0.0 {
            let _ = loader.style().set_property("display", "none");
            self.loader_removed = true;
            return;
        }
        let _ = loader
            .style()
            .set_property("transform", &format!("translateY({}px)", frame.slide_y));
    }

    fn sync_prompt(&self) {
        if let Some(prompt) = self.element(PROMPT_ID) {
            let hidden = !self.engine.permission_prompt_visible();
            let _ = prompt.class_list().toggle_with_force("hidden", hidden);
        }
    }

    fn show_location(&self) {
        self.set_text(LOCATION_ID, self.overlay.location());
    }
}

/// `requestAnimationFrame` loop; cancelled on drop.
struct FrameLoop {
    window: Window,
    callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
    request_id: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    fn start(window: Window, shared: Rc<RefCell<Shared>>) -> Self {
        let callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> =
            Rc::new(RefCell::new(None));
        let request_id = Rc::new(Cell::new(None));

        let next = Rc::clone(&callback);
        let id = Rc::clone(&request_id);
        let win = window.clone();
        *callback.borrow_mut() = Some(Closure::new(move |_timestamp: f64| {
            shared.borrow_mut().frame();
            id.set(request(&win, &next));
        }));
        request_id.set(request(&window, &callback));

        Self {
            window,
            callback,
            request_id,
        }
    }
}

fn request(
    window: &Window,
    callback: &Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
) -> Option<i32> {
    let callback = callback.borrow();
    let closure = callback.as_ref()?;
    match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
        Ok(id) => Some(id),
        Err(e) => {
            log::error!("requestAnimationFrame failed: {e:?}");
            None
        }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        if let Some(id) = self.request_id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        // Breaks the closure's reference to itself.
        drop(self.callback.borrow_mut().take());
    }
}

/// A mounted scene bound to a canvas element.
#[wasm_bindgen]
pub struct WebScene {
    shared: Rc<RefCell<Shared>>,
    _listeners: Vec<Listener>,
    _frames: FrameLoop,
}

#[wasm_bindgen]
impl WebScene {
    /// Mount the scene on the element with id `canvas_id`. `options_toml`
    /// overrides defaults; pass an empty string for none.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, options_toml: &str) -> Result<WebScene, JsValue> {
        let window = web_sys::window().ok_or_else(|| js_error("no window"))?;
        let document = window.document().ok_or_else(|| js_error("no document"))?;
        let canvas: HtmlElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| js_error("canvas element not found"))?
            .dyn_into()
            .map_err(|_| js_error("canvas is not an HTML element"))?;

        let options = if options_toml.trim().is_empty() {
            Options::default()
        } else {
            Options::from_toml(options_toml).map_err(|e| js_error(&e.to_string()))?
        };

        let (width, height) = platform::viewport(&window);
        let mut engine = SceneEngine::new(
            options.clone(),
            Vec2::new(width, height),
            platform::capabilities(&window, width, &options.device),
            platform::sensor_capability(&window),
        );
        engine.mount();

        let store: Box<dyn VisitStore> = match LocalStorageStore::open(&window) {
            Some(store) => Box::new(store),
            None => Box::new(MemoryStore::default()),
        };
        let mut overlay = Overlay::new(&options.overlay);
        overlay.mount(store.as_ref());

        let shared = Rc::new(RefCell::new(Shared {
            engine,
            overlay,
            store,
            timing: FrameTiming::new(0),
            document,
            canvas: canvas.clone(),
            cursor: CursorStyle::Default,
            loader_removed: false,
        }));
        {
            let shared = shared.borrow();
            shared.set_text(BRAND_ID, shared.overlay.brand());
            shared.show_location();
        }

        spawn_location_lookup(&shared, options.overlay.location_endpoint);
        let listeners = attach_listeners(&window, &canvas, &shared)?;
        let frames = FrameLoop::start(window, Rc::clone(&shared));
        log::info!("web scene mounted on #{canvas_id}");

        Ok(Self {
            shared,
            _listeners: listeners,
            _frames: frames,
        })
    }

    /// The page finished loading. The loader still stays up for its
    /// minimum display time.
    pub fn page_loaded(&self) {
        let _ = self.shared.borrow_mut().engine.hide_loader();
    }

    /// "Enable" on the orientation prompt. Call from the click handler so
    /// the browser sees a user gesture.
    pub fn enable_sensors(&self) {
        let start = self.shared.borrow_mut().engine.begin_permission();
        if start != RequestStart::Prompt {
            return;
        }
        let pending = platform::start_request();
        let shared = Rc::clone(&self.shared);
        spawn_local(async move {
            let outcome = match pending {
                Ok(promise) => platform::finish_request(promise).await,
                Err(e) => Err(e),
            };
            let state = shared.borrow_mut().engine.resolve_permission(outcome);
            log::debug!("orientation permission settled: {state:?}");
        });
    }

    /// "Skip" on the orientation prompt.
    pub fn skip_sensors(&self) {
        let _ = self.shared.borrow_mut().engine.dismiss_permission();
    }

    /// Whether the orientation prompt should be on screen.
    #[must_use]
    pub fn prompt_visible(&self) -> bool {
        self.shared.borrow().engine.permission_prompt_visible()
    }

    /// Column-major view-projection matrix for this frame.
    #[must_use]
    pub fn view_proj(&self) -> Vec<f32> {
        let uniform = self.shared.borrow().engine.camera_uniform();
        uniform.view_proj.iter().flatten().copied().collect()
    }

    /// Camera position as `[x, y, z]`.
    #[must_use]
    pub fn position(&self) -> Vec<f32> {
        self.shared
            .borrow()
            .engine
            .camera_uniform()
            .position
            .to_vec()
    }

    /// Displayed orthographic zoom.
    #[must_use]
    pub fn zoom(&self) -> f32 {
        self.shared.borrow().engine.zoom_state().current
    }
}

impl Drop for WebScene {
    fn drop(&mut self) {
        if let Ok(mut shared) = self.shared.try_borrow_mut() {
            shared.engine.unmount();
        }
    }
}

fn spawn_location_lookup(shared: &Rc<RefCell<Shared>>, endpoint: String) {
    let shared = Rc::clone(shared);
    spawn_local(async move {
        let result = storage::fetch_location(&endpoint).await;
        let mut guard = shared.borrow_mut();
        let Shared { overlay, store, .. } = &mut *guard;
        let _ = overlay.apply_location(result, store.as_mut(), SystemTime::now());
        guard.show_location();
    });
}

fn attach_listeners(
    window: &Window,
    canvas: &HtmlElement,
    shared: &Rc<RefCell<Shared>>,
) -> Result<Vec<Listener>, JsValue> {
    let send = |shared: &Rc<RefCell<Shared>>| {
        let shared = Rc::clone(shared);
        move |event: InputEvent| {
            let _ = shared.borrow_mut().engine.handle_input(event);
        }
    };

    let resize = {
        let send = send(shared);
        let win = window.clone();
        let device = shared.borrow().engine.options().device.clone();
        Listener::new(window, "resize", move |_: Event| {
            let (width, height) = platform::viewport(&win);
            send(InputEvent::Resized {
                width,
                height,
                capabilities: platform::capabilities(&win, width, &device),
            });
        })?
    };

    let wheel = {
        let send = send(shared);
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        Listener::with_options(canvas, "wheel", &options, move |e: WheelEvent| {
            // The wheel zooms the scene, never the page
            e.prevent_default();
            send(InputEvent::Scroll {
                delta_y: wheel_delta_px(e.delta_y(), e.delta_mode()),
            });
        })?
    };

    let pointer_move = {
        let send = send(shared);
        Listener::new(canvas, "pointermove", move |e: PointerEvent| {
            send(cursor_moved(&e));
        })?
    };

    let pointer_down = {
        let send = send(shared);
        Listener::new(canvas, "pointerdown", move |e: PointerEvent| {
            send(cursor_moved(&e));
            send(InputEvent::MouseButton {
                button: MouseButton::from_dom(e.button()),
                pressed: true,
            });
        })?
    };

    let pointer_up = {
        let send = send(shared);
        Listener::new(window, "pointerup", move |e: PointerEvent| {
            send(InputEvent::MouseButton {
                button: MouseButton::from_dom(e.button()),
                pressed: false,
            });
        })?
    };

    let pointer_leave = {
        let send = send(shared);
        Listener::new(canvas, "pointerleave", move |_: PointerEvent| {
            send(InputEvent::CursorLeft);
        })?
    };

    let orientation = {
        let send = send(shared);
        Listener::new(
            window,
            "deviceorientation",
            move |e: DeviceOrientationEvent| {
                if let Some(sample) =
                    OrientationSample::from_event(e.alpha(), e.beta(), e.gamma())
                {
                    send(InputEvent::Orientation(sample));
                }
            },
        )?
    };

    Ok(vec![
        resize,
        wheel,
        pointer_move,
        pointer_down,
        pointer_up,
        pointer_leave,
        orientation,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_deltas_become_pixels() {
        assert_eq!(wheel_delta_px(3.0, DOM_DELTA_LINE), 300.0);
        assert_eq!(wheel_delta_px(-53.0, 0), -53.0);
    }
}

//! Feature detection and the browser's orientation-permission prompt.

use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Window;

use crate::device::{DeviceCapabilities, DeviceTier};
use crate::error::SceneError;
use crate::options::DeviceOptions;
use crate::sensor::{OrientationPermission, PermissionResponse, SensorCapability};

const ORIENTATION_EVENT: &str = "DeviceOrientationEvent";
const REQUEST_PERMISSION: &str = "requestPermission";

fn permission_error(e: JsValue) -> SceneError {
    SceneError::Permission(format!("{e:?}"))
}

/// What the page needs before `deviceorientation` events flow.
pub(crate) fn sensor_capability(window: &Window) -> SensorCapability {
    let ctor = match Reflect::get(window, &JsValue::from_str(ORIENTATION_EVENT)) {
        Ok(ctor) if !ctor.is_undefined() => ctor,
        _ => return SensorCapability::Unsupported,
    };
    match Reflect::get(&ctor, &JsValue::from_str(REQUEST_PERMISSION)) {
        Ok(request) if request.is_function() => {
            SensorCapability::PermissionRequired
        }
        _ => SensorCapability::NoPermissionNeeded,
    }
}

/// Viewport width in CSS pixels.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn viewport(window: &Window) -> (f32, f32) {
    let width = window
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(1.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or(1.0);
    (width.max(1.0) as f32, height.max(1.0) as f32)
}

/// Pages treat anything narrower than the wide tier as touch-first.
pub(crate) fn capabilities(
    window: &Window,
    width: f32,
    options: &DeviceOptions,
) -> DeviceCapabilities {
    DeviceCapabilities {
        has_orientation_sensor: sensor_capability(window)
            != SensorCapability::Unsupported,
        touch_primary: DeviceTier::from_width(width, options) != DeviceTier::Wide,
    }
}

/// Call `DeviceOrientationEvent.requestPermission()` right away.
///
/// Must run inside the user gesture; only the returned promise may be
/// awaited later.
pub(crate) fn start_request() -> Result<Promise, SceneError> {
    let window = web_sys::window()
        .ok_or_else(|| SceneError::Permission("no window".to_owned()))?;
    let ctor = Reflect::get(&window, &JsValue::from_str(ORIENTATION_EVENT))
        .map_err(permission_error)?;
    let request: Function = Reflect::get(&ctor, &JsValue::from_str(REQUEST_PERMISSION))
        .map_err(permission_error)?
        .dyn_into()
        .map_err(permission_error)?;
    request
        .call0(&ctor)
        .map_err(permission_error)?
        .dyn_into()
        .map_err(permission_error)
}

/// Wait for a prompt started by [`start_request`].
pub(crate) async fn finish_request(
    promise: Promise,
) -> Result<PermissionResponse, SceneError> {
    let answer = JsFuture::from(promise).await.map_err(permission_error)?;
    Ok(PermissionResponse::from_answer(
        &answer.as_string().unwrap_or_default(),
    ))
}

/// Orientation consent through the browser API.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebPermission;

impl OrientationPermission for WebPermission {
    fn capability(&self) -> SensorCapability {
        web_sys::window()
            .map_or(SensorCapability::Unsupported, |w| sensor_capability(&w))
    }

    async fn request(&self) -> Result<PermissionResponse, SceneError> {
        finish_request(start_request()?).await
    }
}

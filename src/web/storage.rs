//! `localStorage` visit store and `fetch` location lookup.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Response, Storage};

use crate::error::SceneError;
use crate::overlay::{LocationData, VisitStore};

fn storage_error(e: JsValue) -> SceneError {
    SceneError::Storage(format!("{e:?}"))
}

fn location_error(e: JsValue) -> SceneError {
    SceneError::Location(format!("{e:?}"))
}

/// The page's `localStorage`.
pub(crate) struct LocalStorageStore {
    storage: Storage,
}

impl LocalStorageStore {
    /// `None` when storage is disabled (private mode, sandboxed frames).
    pub(crate) fn open(window: &web_sys::Window) -> Option<Self> {
        match window.local_storage() {
            Ok(Some(storage)) => Some(Self { storage }),
            Ok(None) => None,
            Err(e) => {
                log::warn!("localStorage unavailable: {e:?}");
                None
            }
        }
    }
}

impl VisitStore for LocalStorageStore {
    fn read(&self, key: &str) -> Result<Option<String>, SceneError> {
        self.storage.get_item(key).map_err(storage_error)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), SceneError> {
        self.storage.set_item(key, value).map_err(storage_error)
    }
}

/// One `fetch` of the location endpoint.
pub(crate) async fn fetch_location(
    endpoint: &str,
) -> Result<LocationData, SceneError> {
    let window = web_sys::window()
        .ok_or_else(|| SceneError::Location("no window".to_owned()))?;
    let response: Response = JsFuture::from(window.fetch_with_str(endpoint))
        .await
        .map_err(location_error)?
        .dyn_into()
        .map_err(location_error)?;
    if !response.ok() {
        return Err(SceneError::Location(format!(
            "HTTP {}",
            response.status()
        )));
    }
    let body = JsFuture::from(response.text().map_err(location_error)?)
        .await
        .map_err(location_error)?;
    LocationData::from_json(&body.as_string().unwrap_or_default())
}

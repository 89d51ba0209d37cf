//! DOM event listeners that detach themselves when dropped.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{AddEventListenerOptions, Event, EventTarget};

/// One `addEventListener` registration. Dropping it removes the listener
/// and frees the closure.
pub(crate) struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    /// Attach `handler` for `kind` events on `target`. Events that are not
    /// an `E` are skipped.
    pub(crate) fn new<E, F>(
        target: &EventTarget,
        kind: &'static str,
        handler: F,
    ) -> Result<Self, JsValue>
    where
        E: JsCast + 'static,
        F: FnMut(E) + 'static,
    {
        Self::with_options(target, kind, &AddEventListenerOptions::new(), handler)
    }

    /// Like [`new`](Self::new) with explicit listener options, e.g. a
    /// non-passive listener that may call `preventDefault`.
    pub(crate) fn with_options<E, F>(
        target: &EventTarget,
        kind: &'static str,
        options: &AddEventListenerOptions,
        mut handler: F,
    ) -> Result<Self, JsValue>
    where
        E: JsCast + 'static,
        F: FnMut(E) + 'static,
    {
        let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if let Ok(event) = event.dyn_into::<E>() {
                handler(event);
            }
        });
        target.add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            callback.as_ref().unchecked_ref(),
            options,
        )?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback(
            self.kind,
            self.callback.as_ref().unchecked_ref(),
        );
    }
}

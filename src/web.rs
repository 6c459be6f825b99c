//! Browser host: [`Document`] over `web-sys` and the exported wasm entry points.
//!
//! The page loads the wasm module, creates one `ToggleImages` handle and
//! calls `bind()` on it. Binding waits for `DOMContentLoaded` when the
//! document is still loading, then attaches one click listener per matched
//! element. Listeners are leaked and live as long as the page.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Element};

use crate::binder::Binder;
use crate::config::BinderConfig;
use crate::consts::{CLICK_EVENT, READY_EVENT};
use crate::doc::{Document, ReadyState};
use crate::error::Error;

/// A browser document.
#[derive(Debug, Clone)]
pub struct WebDocument {
    document: web_sys::Document,
}

impl WebDocument {
    #[must_use]
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }

    /// The document of the current window, if there is one.
    #[must_use]
    pub fn current() -> Option<Self> {
        web_sys::window().and_then(|w| w.document()).map(Self::new)
    }
}

impl Document for WebDocument {
    type Handle = Element;

    fn ready_state(&self) -> ReadyState {
        match self.document.ready_state().as_str() {
            "loading" => ReadyState::Loading,
            "interactive" => ReadyState::Interactive,
            _ => ReadyState::Complete,
        }
    }

    // getElementsByClassName is live; copy it so later DOM changes don't leak in.
    fn elements_with_class(&self, class: &str) -> Result<Vec<Element>, Error> {
        let collection = self.document.get_elements_by_class_name(class);
        Ok((0..collection.length()).filter_map(|i| collection.item(i)).collect())
    }

    fn has_class(&self, handle: &Element, class: &str) -> bool {
        handle.class_list().contains(class)
    }

    fn toggle_class(&mut self, handle: &Element, class: &str) -> Result<bool, Error> {
        handle.class_list().toggle(class).map_err(host_error)
    }

    fn on_ready(&self, callback: Box<dyn FnOnce()>) -> Result<(), Error> {
        let on_ready = Closure::once_into_js(move || callback());
        let options = AddEventListenerOptions::new();
        options.set_once(true);
        self.document
            .add_event_listener_with_callback_and_add_event_listener_options(
                READY_EVENT,
                on_ready.unchecked_ref::<js_sys::Function>(),
                &options,
            )
            .map_err(host_error)
    }

    fn listen_click(&self, handle: &Element, callback: Box<dyn FnMut()>) -> Result<(), Error> {
        let on_click = Closure::wrap(callback);
        handle
            .add_event_listener_with_callback(CLICK_EVENT, on_click.as_ref().unchecked_ref())
            .map_err(host_error)?;
        on_click.forget();
        Ok(())
    }
}

fn host_error(value: JsValue) -> Error {
    let message = match value.dyn_ref::<js_sys::Error>() {
        Some(err) => String::from(err.message()),
        None => value.as_string().unwrap_or_else(|| format!("{value:?}")),
    };
    Error::Host(message)
}

impl From<Error> for JsValue {
    fn from(err: Error) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

// --- wasm exports ---

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"toggle-image: logger already initialized".into());
    }
}

/// Page-owned binder handle. Calling `bind()` more than once on the same
/// handle keeps the first snapshot and registers no extra listeners.
#[wasm_bindgen]
pub struct ToggleImages {
    binder: Rc<Binder<WebDocument>>,
}

#[wasm_bindgen]
impl ToggleImages {
    /// Handle using the default `toggle-image` / `expanded` classes.
    ///
    /// # Errors
    ///
    /// Never fails for the defaults; the `Result` mirrors `withConfig`.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<ToggleImages, JsValue> {
        Ok(Self { binder: Rc::new(Binder::new(BinderConfig::default())?) })
    }

    /// Handle using a JSON configuration such as `{"expanded_class": "zoomed"}`.
    ///
    /// # Errors
    ///
    /// Throws on malformed or invalid configuration.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config: &str) -> Result<ToggleImages, JsValue> {
        let config = BinderConfig::from_json(config)?;
        Ok(Self { binder: Rc::new(Binder::new(config)?) })
    }

    /// Bind now if the document is parsed, otherwise once `DOMContentLoaded` fires.
    ///
    /// # Errors
    ///
    /// Throws if a listener cannot be registered.
    pub fn bind(&self) -> Result<(), JsValue> {
        self.binder.bind_when_ready(WebDocument::current().as_ref()).map_err(JsValue::from)
    }

    /// Number of elements captured at bind time; 0 before binding.
    #[wasm_bindgen(getter, js_name = boundCount)]
    pub fn bound_count(&self) -> usize {
        self.binder.bound().len()
    }
}

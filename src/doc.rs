//! Document seam: the page the binder queries, listens to and mutates.
//!
//! The binder never owns elements. It asks a [`Document`] for the elements
//! carrying the marker class once, registers a click callback on each, and
//! later asks the same document to flip a class on one of them.
//! [`crate::web::WebDocument`] implements this over `web-sys`;
//! [`MemoryDocument`] is an in-memory page whose ready event and clicks are
//! fired by hand, used to exercise the binder without a browser.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::class_list::ClassList;
use crate::error::Error;

/// Parsing progress of a document, mirroring `document.readyState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadyState {
    /// Still parsing; elements further down the page may not exist yet.
    #[default]
    Loading,
    /// Parsed; subresources may still be loading.
    Interactive,
    /// Parsed and all subresources loaded.
    Complete,
}

/// When binding should run relative to document parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// The document is parsed; bind immediately.
    Now,
    /// Wait for the document's ready event.
    OnReady,
}

impl ReadyState {
    /// Whether the structural content is available for querying.
    #[must_use]
    pub fn is_parsed(self) -> bool {
        matches!(self, Self::Interactive | Self::Complete)
    }

    /// Decide whether binding can run now or must wait for the document.
    #[must_use]
    pub fn schedule(self) -> Schedule {
        if self.is_parsed() { Schedule::Now } else { Schedule::OnReady }
    }
}

/// A page the binder can query, listen to and mutate.
///
/// Implementations are cheap handles: clones refer to the same page.
pub trait Document: Clone + 'static {
    /// Reference to one element of the page.
    type Handle: Clone + PartialEq + std::fmt::Debug + 'static;

    fn ready_state(&self) -> ReadyState;

    /// Elements currently carrying `class`, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Host`] if the underlying page API fails.
    fn elements_with_class(&self, class: &str) -> Result<Vec<Self::Handle>, Error>;

    fn has_class(&self, handle: &Self::Handle, class: &str) -> bool;

    /// Flip `class` on one element. Returns whether it is present afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Host`] if the underlying page API fails and
    /// [`Error::InvalidClassName`] for an unusable class.
    fn toggle_class(&mut self, handle: &Self::Handle, class: &str) -> Result<bool, Error>;

    /// Run `callback` once, when the document finishes parsing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Host`] if the listener cannot be registered.
    fn on_ready(&self, callback: Box<dyn FnOnce()>) -> Result<(), Error>;

    /// Run `callback` on every click on `handle`, for as long as the page lives.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Host`] if the listener cannot be registered.
    fn listen_click(&self, handle: &Self::Handle, callback: Box<dyn FnMut()>) -> Result<(), Error>;
}

/// Unique identifier for an in-memory element.
pub type ElementId = Uuid;

/// An element of a [`MemoryDocument`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    /// Serialized as the `class` attribute string.
    #[serde(rename = "class")]
    pub class_list: ClassList,
}

impl Element {
    /// New element with a fresh id.
    #[must_use]
    pub fn new(class_attr: &str) -> Self {
        Self { id: Uuid::new_v4(), class_list: ClassList::parse(class_attr) }
    }

    /// The `class` attribute as a browser would render it.
    #[must_use]
    pub fn class_attr(&self) -> String {
        self.class_list.to_string()
    }
}

#[derive(Default)]
struct Page {
    ready_state: ReadyState,
    elements: Vec<Element>,
}

#[derive(Default)]
struct Listeners {
    ready: Vec<Box<dyn FnOnce()>>,
    clicks: Vec<(ElementId, Box<dyn FnMut()>)>,
}

/// In-memory page: a flat list of elements in document order plus the
/// listeners registered on it. Clones share the same page.
#[derive(Clone)]
pub struct MemoryDocument {
    page: Rc<RefCell<Page>>,
    listeners: Rc<RefCell<Listeners>>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// Empty document that is already parsed.
    #[must_use]
    pub fn new() -> Self {
        let doc = Self::loading();
        doc.page.borrow_mut().ready_state = ReadyState::Complete;
        doc
    }

    /// Empty document still in the `loading` state.
    #[must_use]
    pub fn loading() -> Self {
        Self { page: Rc::default(), listeners: Rc::default() }
    }

    /// Append a new element and return its id.
    pub fn append(&mut self, class_attr: &str) -> ElementId {
        let element = Element::new(class_attr);
        let id = element.id;
        self.page.borrow_mut().elements.push(element);
        id
    }

    /// Replace all elements with a snapshot, keeping registered listeners.
    pub fn load_snapshot(&mut self, elements: Vec<Element>) {
        self.page.borrow_mut().elements = elements;
    }

    /// The `class` attribute of an element, if it exists.
    #[must_use]
    pub fn class_attr(&self, id: &ElementId) -> Option<String> {
        self.page.borrow().elements.iter().find(|e| e.id == *id).map(Element::class_attr)
    }

    /// `class` attributes of every element, in document order.
    #[must_use]
    pub fn class_attrs(&self) -> Vec<String> {
        self.page.borrow().elements.iter().map(Element::class_attr).collect()
    }

    /// Finish parsing: move to `interactive` and run the pending ready callbacks.
    ///
    /// Returns how many callbacks ran. Each runs at most once.
    pub fn fire_ready(&mut self) -> usize {
        self.page.borrow_mut().ready_state = ReadyState::Interactive;
        let pending = std::mem::take(&mut self.listeners.borrow_mut().ready);
        let count = pending.len();
        for callback in pending {
            callback();
        }
        count
    }

    /// Dispatch a click on `id`. Returns how many listeners ran.
    pub fn click(&mut self, id: &ElementId) -> usize {
        let mut clicks = std::mem::take(&mut self.listeners.borrow_mut().clicks);
        let mut count = 0;
        for (target, callback) in &mut clicks {
            if *target == *id {
                callback();
                count += 1;
            }
        }
        let mut listeners = self.listeners.borrow_mut();
        clicks.append(&mut listeners.clicks);
        listeners.clicks = clicks;
        count
    }

    /// Number of click listeners registered on `id`.
    #[must_use]
    pub fn click_listeners(&self, id: &ElementId) -> usize {
        self.listeners.borrow().clicks.iter().filter(|(target, _)| target == id).count()
    }

    /// Number of ready callbacks waiting for [`MemoryDocument::fire_ready`].
    #[must_use]
    pub fn pending_ready(&self) -> usize {
        self.listeners.borrow().ready.len()
    }
}

impl Document for MemoryDocument {
    type Handle = ElementId;

    fn ready_state(&self) -> ReadyState {
        self.page.borrow().ready_state
    }

    fn elements_with_class(&self, class: &str) -> Result<Vec<ElementId>, Error> {
        Ok(self
            .page
            .borrow()
            .elements
            .iter()
            .filter(|e| e.class_list.contains(class))
            .map(|e| e.id)
            .collect())
    }

    fn has_class(&self, handle: &ElementId, class: &str) -> bool {
        self.page
            .borrow()
            .elements
            .iter()
            .any(|e| e.id == *handle && e.class_list.contains(class))
    }

    // Unknown ids are ignored.
    fn toggle_class(&mut self, handle: &ElementId, class: &str) -> Result<bool, Error> {
        let mut page = self.page.borrow_mut();
        match page.elements.iter_mut().find(|e| e.id == *handle) {
            Some(element) => element.class_list.toggle(class),
            None => Ok(false),
        }
    }

    fn on_ready(&self, callback: Box<dyn FnOnce()>) -> Result<(), Error> {
        self.listeners.borrow_mut().ready.push(callback);
        Ok(())
    }

    fn listen_click(&self, handle: &ElementId, callback: Box<dyn FnMut()>) -> Result<(), Error> {
        self.listeners.borrow_mut().clicks.push((*handle, callback));
        Ok(())
    }
}

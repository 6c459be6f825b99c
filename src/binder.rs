use std::cell::OnceCell;
use std::rc::Rc;

use crate::config::BinderConfig;
use crate::doc::{Document, Schedule};
use crate::error::Error;

#[cfg(test)]
#[path = "binder_test.rs"]
mod binder_test;

/// Presentation state of one bound element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleState {
    /// Expanded class absent.
    Collapsed,
    /// Expanded class present.
    Expanded,
}

impl ToggleState {
    #[must_use]
    pub fn from_present(present: bool) -> Self {
        if present { Self::Expanded } else { Self::Collapsed }
    }
}

/// Outcome of a click routed through the binder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// The element was not part of the bind-time snapshot.
    Ignored,
    /// The expanded class was flipped; carries the new state.
    Toggled(ToggleState),
}

/// Binds click-to-toggle behavior to the elements of a [`Document`].
///
/// Elements are selected once, at bind time. Elements that gain the marker
/// class later are not picked up. The snapshot is set at most once, so
/// repeated binding never selects or listens twice.
pub struct Binder<D: Document> {
    config: BinderConfig,
    bound: OnceCell<Vec<D::Handle>>,
}

impl<D: Document> Binder<D> {
    /// Create an unbound binder for the given class names.
    ///
    /// # Errors
    ///
    /// Returns the [`BinderConfig::validate`] errors.
    pub fn new(config: BinderConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self { config, bound: OnceCell::new() })
    }

    #[must_use]
    pub fn config(&self) -> &BinderConfig {
        &self.config
    }

    /// Bind once `doc` is parsed: immediately if it already is, otherwise from
    /// its ready callback. `None` (no document at all) binds nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Host`] if a query or listener registration fails on
    /// the immediate path, or the ready listener cannot be registered.
    pub fn bind_when_ready(self: &Rc<Self>, doc: Option<&D>) -> Result<(), Error> {
        let Some(doc) = doc else {
            log::debug!("no document available, skipping toggle bind");
            return Ok(());
        };

        match doc.ready_state().schedule() {
            Schedule::Now => self.attach(doc).map(|_| ()),
            Schedule::OnReady => {
                let binder = Rc::clone(self);
                let ready_doc = doc.clone();
                doc.on_ready(Box::new(move || {
                    if let Err(e) = binder.attach(&ready_doc) {
                        log::error!("toggle bind failed: {e}");
                    }
                }))
            }
        }
    }

    /// Snapshot the marker elements and register one click callback on each.
    ///
    /// Returns the snapshot size. If the binder is already bound nothing is
    /// queried or registered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Host`] if the query or a listener registration fails.
    pub fn attach(self: &Rc<Self>, doc: &D) -> Result<usize, Error> {
        if let Some(bound) = self.bound.get() {
            log::debug!("toggle binder already bound, keeping snapshot");
            return Ok(bound.len());
        }

        let bound = self.bind(doc)?;
        for handle in bound {
            let binder = Rc::clone(self);
            let target = handle.clone();
            let mut click_doc = doc.clone();
            doc.listen_click(
                handle,
                Box::new(move || match binder.on_click(&mut click_doc, &target) {
                    Ok(Action::Toggled(state)) => log::trace!("toggled {target:?} to {state:?}"),
                    Ok(Action::Ignored) => {}
                    Err(e) => log::error!("toggle failed: {e}"),
                }),
            )?;
        }

        log::info!("bound {} .{} elements", bound.len(), self.config.marker_class);
        Ok(bound.len())
    }

    /// Select the elements carrying the marker class and remember them,
    /// without registering listeners.
    ///
    /// Returns the snapshot. An empty snapshot is not an error. Calling this
    /// again returns the existing snapshot without querying the document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Host`] if the document query fails.
    pub fn bind(&self, doc: &D) -> Result<&[D::Handle], Error> {
        if let Some(bound) = self.bound.get() {
            return Ok(bound);
        }
        let found = doc.elements_with_class(&self.config.marker_class)?;
        log::debug!("toggle binder matched {} .{} elements", found.len(), self.config.marker_class);
        Ok(self.bound.get_or_init(|| found))
    }

    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.bound.get().is_some()
    }

    /// Handles captured at bind time; empty before binding.
    #[must_use]
    pub fn bound(&self) -> &[D::Handle] {
        self.bound.get().map(Vec::as_slice).unwrap_or_default()
    }

    #[must_use]
    pub fn is_bound_element(&self, handle: &D::Handle) -> bool {
        self.bound().contains(handle)
    }

    /// Handle a click on `handle`: flip the expanded class if the element is bound.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Host`] if the document rejects the mutation.
    pub fn on_click(&self, doc: &mut D, handle: &D::Handle) -> Result<Action, Error> {
        if !self.is_bound_element(handle) {
            return Ok(Action::Ignored);
        }
        let present = doc.toggle_class(handle, &self.config.expanded_class)?;
        Ok(Action::Toggled(ToggleState::from_present(present)))
    }

    /// Current state of a bound element, `None` if it was not bound.
    #[must_use]
    pub fn state_of(&self, doc: &D, handle: &D::Handle) -> Option<ToggleState> {
        self.is_bound_element(handle)
            .then(|| ToggleState::from_present(doc.has_class(handle, &self.config.expanded_class)))
    }
}

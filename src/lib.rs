//! Click-to-expand behavior for imageboard thread images.
//!
//! This crate is compiled to WebAssembly and loaded by the board pages. Once
//! the document is parsed it finds every element carrying the marker class
//! (`toggle-image`) and attaches a click listener that toggles the expanded
//! class (`expanded`) on that element. The page stylesheet decides what
//! "expanded" looks like.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`binder`] | Ready-deferred binding, bind-time snapshot, click handling |
//! | [`doc`] | The [`doc::Document`] seam, ready-state scheduling, an in-memory document |
//! | [`class_list`] | Class token set with `DOMTokenList` semantics |
//! | [`config`] | Marker / expanded class names |
//! | [`web`] | `web-sys` document and the exported wasm entry points |
//! | [`consts`] | Default class names and DOM event names |
//! | [`error`] | Crate error type |

pub mod binder;
pub mod class_list;
pub mod config;
pub mod consts;
pub mod doc;
pub mod error;
pub mod web;

pub use binder::{Action, Binder, ToggleState};
pub use config::BinderConfig;
pub use doc::{Document, ReadyState, Schedule};
pub use error::Error;
pub use web::ToggleImages;

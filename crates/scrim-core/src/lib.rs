//! Substrate for the **scrim** overlay toolkit.
//!
//! `scrim-core` provides the pieces the widget layer is built on: a headless
//! element tree, typed selectors, a typed event bus, and the configuration
//! error taxonomy.
//!
//! # Key types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Dom`] | Arena-backed element tree with a focus registry |
//! | [`Element`] | Buildable element descriptor consumed by [`Dom::append`] |
//! | [`Selector`] | Typed tag/id/class/attribute selector |
//! | [`EventBus`] | Observer registry for overlay lifecycle events |
//! | [`OverlayEvent`] | One lifecycle notification (scope + phase) |
//! | [`ConfigError`] | Fatal overlay-attachment errors |
//!
//! Everything here is single-threaded and synchronous: overlay state
//! transitions run to completion inside the host event handler that
//! triggered them, so the only coordination needed is plain `&mut` access.

pub mod dom;
pub mod error;
pub mod event;
pub mod selector;

pub use dom::{Dom, Element, NodeId};
pub use error::ConfigError;
pub use event::{EventBus, EventFilter, EventScope, ListenerId, OverlayEvent, OverlayPhase};
pub use selector::{Selector, SelectorParseError};

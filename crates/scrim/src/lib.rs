//! **scrim** -- a headless drawer/modal overlay toolkit.
//!
//! This is the umbrella crate that re-exports everything you need to add
//! focus-trapping overlays to an application from a single dependency:
//!
//! ```toml
//! [dependencies]
//! scrim = "0.1"
//! ```
//!
//! # Re-exports
//!
//! * All public items from [`scrim_core`] are available at the crate root
//!   ([`Dom`], [`Element`], [`Selector`], [`EventBus`], [`OverlayEvent`],
//!   [`ConfigError`], etc.).
//! * The [`widgets`] module re-exports everything from [`scrim_widgets`]
//!   (the [`Overlays`](widgets::overlay::Overlays) session, the
//!   [`FocusTrap`](widgets::focus::FocusTrap), and the drawer/modal presets).
//! * [`ratatui`] and [`crossterm`] are re-exported so downstream crates do
//!   not need to depend on them directly.
//!
//! # Quick start
//!
//! ```ignore
//! use scrim::{Dom, Element, Selector};
//! use scrim::widgets::drawer::{drawer, Position};
//! use scrim::widgets::overlay::Overlays;
//!
//! let mut dom = Dom::new();
//! let open_btn = dom.append(dom.body(), Element::new("button").attr("data-open-cart", ""));
//! dom.append(dom.body(), Element::new("div").class("drawer-background"));
//! let cart = dom.append(dom.body(), Element::new("aside").id("CartDrawer"));
//! dom.append(cart, Element::new("button").attr("data-close-cart", ""));
//!
//! let mut overlays = Overlays::new();
//! let cart = overlays.attach(
//!     &mut dom,
//!     cart,
//!     drawer(Position::Right, Selector::attr("data-close-cart"))
//!         .open_triggers(Selector::attr("data-open-cart")),
//! )?;
//!
//! overlays.handle_click(&mut dom, open_btn);
//! assert!(overlays.is_open(cart));
//! # Ok::<(), scrim::ConfigError>(())
//! ```

pub use scrim_core::*;
pub mod widgets {
    pub use scrim_widgets::*;
}

// Re-export dependencies for use in demos and downstream crates
pub use crossterm;
pub use ratatui;

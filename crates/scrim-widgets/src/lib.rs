//! Widgets for the **scrim** overlay toolkit.
//!
//! The widget layer is one generic machine plus two configurations: the
//! [`overlay`] module implements the focusable-overlay lifecycle (state,
//! focus trapping, accessibility sync, events, mutual exclusion), and the
//! [`drawer`] and [`modal`] modules are presets over it. The [`focus`]
//! module holds the focus-trap primitive the overlay machine is built on,
//! usable on its own for non-overlay containers.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`focus`] | [`FocusTrap`](focus::FocusTrap) — confine Tab traversal to a container |
//! | [`overlay`] | [`Overlays`](overlay::Overlays) session and the generic [`OverlayConfig`](overlay::OverlayConfig) |
//! | [`drawer`] | Edge-anchored drawer preset and its render helpers |
//! | [`modal`] | Centered dialog preset and its render helpers |

pub mod drawer;
pub mod focus;
pub mod modal;
pub mod overlay;

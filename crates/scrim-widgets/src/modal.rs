//! Modal preset: a centered dialog overlay.

use ratatui::layout::Rect;
use ratatui::widgets::Block;
use ratatui::Frame;
use scrim_core::selector::Selector;

use crate::overlay::{render_surface, OverlayConfig};

/// Build the modal configuration.
///
/// Modals share the widget name `modal`, use `.modal-background` as their
/// dismissal background, and while open the body carries `js-modal-open`
/// (via the name-derived body class).
pub fn modal(close_triggers: Selector) -> OverlayConfig {
    OverlayConfig::new("modal", Selector::class("modal-background"), close_triggers)
}

/// Rectangle centered in `area`, sized at the given percentages of each
/// dimension.
pub fn dialog_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = area.width * percent_x.min(100) / 100;
    let height = area.height * percent_y.min(100) / 100;
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Render an open modal's surface centered in `area`, returning the inner
/// content rect.
pub fn render_modal(
    frame: &mut Frame,
    percent_x: u16,
    percent_y: u16,
    area: Rect,
    block: &Block,
) -> Rect {
    let surface = dialog_rect(percent_x, percent_y, area);
    render_surface(frame, surface, block)
}

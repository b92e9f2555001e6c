//! Drawer preset: an overlay sliding in from a screen edge.

use std::fmt;

use ratatui::layout::Rect;
use ratatui::widgets::Block;
use ratatui::Frame;
use scrim_core::selector::Selector;

use crate::overlay::{render_surface, OverlayConfig};

/// Screen edge a drawer is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Top,
    Right,
    Bottom,
    Left,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Position::Top => "top",
            Position::Right => "right",
            Position::Bottom => "bottom",
            Position::Left => "left",
        };
        f.write_str(s)
    }
}

/// Build the drawer configuration.
///
/// Drawers share the widget name `drawer` (so name-tier events cover all
/// of them), use `.drawer-background` as their dismissal background, and
/// add a position-specific `js-drawer-{position}-open` body class so the
/// host styles page chrome per edge.
///
/// # Example
///
/// ```rust,ignore
/// use scrim_core::Selector;
/// use scrim_widgets::drawer::{drawer, Position};
///
/// let config = drawer(Position::Right, Selector::attr("data-close-cart"))
///     .open_triggers(Selector::attr("data-open-cart"));
/// ```
pub fn drawer(position: Position, close_triggers: Selector) -> OverlayConfig {
    OverlayConfig::new(
        "drawer",
        Selector::class("drawer-background"),
        close_triggers,
    )
    .body_open_class(format!("js-drawer-{position}-open"))
}

/// Rectangle hugging one edge of `area`, sized at `percent` of the
/// perpendicular dimension.
pub fn anchored_rect(position: Position, percent: u16, area: Rect) -> Rect {
    let percent = percent.min(100);
    match position {
        Position::Top => {
            let height = area.height * percent / 100;
            Rect::new(area.x, area.y, area.width, height)
        }
        Position::Bottom => {
            let height = area.height * percent / 100;
            Rect::new(area.x, area.y + area.height - height, area.width, height)
        }
        Position::Left => {
            let width = area.width * percent / 100;
            Rect::new(area.x, area.y, width, area.height)
        }
        Position::Right => {
            let width = area.width * percent / 100;
            Rect::new(area.x + area.width - width, area.y, width, area.height)
        }
    }
}

/// Render an open drawer's surface on one edge of `area`, returning the
/// inner content rect.
pub fn render_drawer(
    frame: &mut Frame,
    position: Position,
    percent: u16,
    area: Rect,
    block: &Block,
) -> Rect {
    let surface = anchored_rect(position, percent, area);
    render_surface(frame, surface, block)
}

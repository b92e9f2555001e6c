//! The generic focusable-overlay widget.
//!
//! A drawer and a modal are the same machine: a two-state widget (closed,
//! open) driven by designated trigger elements, which on open traps
//! keyboard focus inside itself, synchronizes accessibility attributes on
//! itself and its triggers, and announces the transition on a typed event
//! bus. Drawers and modals differ only in configuration — see
//! [`drawer`](crate::drawer) and [`modal`](crate::modal) for the presets.
//!
//! Overlays live inside an [`Overlays`] session, which owns the focus-trap
//! singleton, the event bus, and the cross-instance invariant that at most
//! one overlay is open at any time.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::layout::Rect;
use ratatui::widgets::{Block, Clear};
use ratatui::Frame;
use scrim_core::dom::{Dom, NodeId};
use scrim_core::error::ConfigError;
use scrim_core::event::{EventBus, OverlayPhase};
use scrim_core::selector::Selector;
use tracing::{debug, warn};

use crate::focus::FocusTrap;

/// Marker attribute stamped on every attached overlay element. Combined
/// with [`OPEN_CLASS`], it makes open overlays discoverable by document
/// scan — the mechanism behind the mutual-exclusion rule.
pub const WIDGET_MARKER: &str = "data-focusable-widget";

/// Class added to an overlay element while it is open.
pub const OPEN_CLASS: &str = "open";

/// Class added to `body` while any overlay is open.
pub const BODY_OPEN_CLASS: &str = "js-focusable-widget-open";

/// Transition marker class, present between a state change and the host's
/// transition-end notification.
pub const TRANSITION_CLASS: &str = "is-transitioning";

/// Attribute an element declares its transition duration (seconds) on.
pub const TRANSITION_DURATION_ATTR: &str = "transition-duration";

/// Static configuration for one overlay instance.
///
/// Name, background, and close triggers are required and therefore
/// constructor arguments; everything else is builder-optional. The config
/// is retained verbatim so [`Overlays::reinit`] can re-run attachment after
/// a host templating engine replaces the overlay's light DOM.
///
/// # Example
///
/// ```rust,ignore
/// use scrim_core::Selector;
/// use scrim_widgets::overlay::OverlayConfig;
///
/// let config = OverlayConfig::new(
///     "drawer",
///     Selector::class("drawer-background"),
///     Selector::attr("data-close-cart"),
/// )
/// .open_triggers(Selector::attr("data-open-cart"))
/// .body_open_class("js-drawer-right-open");
/// ```
#[derive(Debug, Clone)]
pub struct OverlayConfig {
    name: String,
    background: Selector,
    open_triggers: Option<Selector>,
    close_triggers: Selector,
    open_classes: Vec<String>,
    body_open_classes: Vec<String>,
    attributes: Vec<(String, String)>,
}

impl OverlayConfig {
    /// Create a configuration with the three required pieces.
    pub fn new(name: impl Into<String>, background: Selector, close_triggers: Selector) -> Self {
        Self {
            name: name.into(),
            background,
            open_triggers: None,
            close_triggers,
            open_classes: Vec::new(),
            body_open_classes: Vec::new(),
            attributes: Vec::new(),
        }
    }

    /// Selector for the overlay's open triggers.
    ///
    /// Optional: an overlay without open triggers can still be opened by
    /// program call, so leaving this unset (or matching nothing) only
    /// produces a warning at attachment.
    pub fn open_triggers(mut self, selector: Selector) -> Self {
        self.open_triggers = Some(selector);
        self
    }

    /// Extra class added to the overlay element while open.
    pub fn open_class(mut self, class: impl Into<String>) -> Self {
        self.open_classes.push(class.into());
        self
    }

    /// Extra class added to `body` while the overlay is open.
    pub fn body_open_class(mut self, class: impl Into<String>) -> Self {
        self.body_open_classes.push(class.into());
        self
    }

    /// Extra attribute applied to the overlay element at attachment.
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// The configured widget name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Trigger elements and background resolved from a config against a
/// document. Re-resolved by [`Overlays::reinit`].
#[derive(Debug, Clone)]
struct Resolved {
    id: String,
    background: NodeId,
    open_triggers: Vec<NodeId>,
    close_triggers: Vec<NodeId>,
}

fn resolve(dom: &Dom, element: NodeId, config: &OverlayConfig) -> Result<Resolved, ConfigError> {
    if config.name.trim().is_empty() {
        return Err(ConfigError::MissingName);
    }
    let id = dom
        .element_id(element)
        .ok_or_else(|| ConfigError::MissingId {
            name: config.name.clone(),
        })?
        .to_string();
    let background = dom.query(&config.background).into_iter().next().ok_or_else(|| {
        ConfigError::MissingBackground {
            name: config.name.clone(),
            selector: config.background.to_string(),
        }
    })?;

    let close_triggers = dom.query(&config.close_triggers);
    if close_triggers.is_empty() {
        return Err(ConfigError::NoCloseTriggers {
            name: config.name.clone(),
            selector: config.close_triggers.to_string(),
        });
    }

    let open_triggers = match &config.open_triggers {
        Some(selector) => {
            let found = dom.query(selector);
            if found.is_empty() {
                warn!(
                    name = %config.name,
                    selector = %selector,
                    "no open triggers found; overlay is only openable by program call"
                );
            }
            found
        }
        None => {
            warn!(
                name = %config.name,
                "no open-trigger selector configured; overlay is only openable by program call"
            );
            Vec::new()
        }
    };

    Ok(Resolved {
        id,
        background,
        open_triggers,
        close_triggers,
    })
}

/// One attached overlay: its element, resolved collaborators, and state.
#[derive(Debug)]
pub struct Overlay {
    element: NodeId,
    config: OverlayConfig,
    resolved: Resolved,
    is_open: bool,
    /// Element focused before the overlay opened; focus returns here on close.
    restore_focus: Option<NodeId>,
}

impl Overlay {
    /// Whether the overlay is currently open.
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// The overlay element.
    pub fn element(&self) -> NodeId {
        self.element
    }

    /// The overlay element's id.
    pub fn id(&self) -> &str {
        &self.resolved.id
    }

    /// The configured widget name (`drawer`, `modal`, ...).
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// The resolved background element.
    pub fn background(&self) -> NodeId {
        self.resolved.background
    }

    /// Classes added to the overlay element while open.
    fn widget_open_classes(&self) -> Vec<String> {
        let mut classes = vec![OPEN_CLASS.to_string()];
        classes.extend(self.config.open_classes.iter().cloned());
        classes
    }

    /// Classes added to `body` while open.
    fn body_open_classes(&self) -> Vec<String> {
        let mut classes = vec![
            BODY_OPEN_CLASS.to_string(),
            format!("js-{}-open", self.config.name),
        ];
        classes.extend(self.config.body_open_classes.iter().cloned());
        classes
    }

    fn all_triggers(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.resolved
            .open_triggers
            .iter()
            .chain(self.resolved.close_triggers.iter())
            .copied()
    }

    /// Stamp the marker and the closed-state accessibility attributes on
    /// the overlay and its triggers.
    fn apply_init_attributes(&self, dom: &mut Dom) {
        dom.set_attr(self.element, WIDGET_MARKER, "true");
        dom.set_attr(self.element, "aria-hidden", "true");
        dom.set_attr(self.element, "tabindex", "-1");
        for (name, value) in &self.config.attributes {
            dom.set_attr(self.element, name.clone(), value.clone());
        }
        for trigger in self.all_triggers() {
            dom.set_attr(trigger, "tabindex", "0");
            dom.set_attr(trigger, "aria-expanded", "false");
            dom.set_attr(trigger, "aria-controls", self.resolved.id.clone());
        }
    }
}

/// Handle to an overlay inside an [`Overlays`] session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayKey(usize);

/// The overlay session: every attached overlay, the focus-trap singleton,
/// and the event bus.
///
/// State transitions are totally ordered because everything runs on the
/// host's single event-loop thread; the session enforces the two
/// cross-instance invariants — one open overlay, one active trap — by
/// unconditionally tearing down the previous holder rather than by
/// locking.
#[derive(Default)]
pub struct Overlays {
    items: Vec<Overlay>,
    trap: FocusTrap,
    bus: EventBus,
}

impl Overlays {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an overlay to `element` with the given configuration.
    ///
    /// Validation is eager and happens before any attribute is written:
    /// a missing id, empty name, unmatched background selector, or
    /// close-trigger selector matching zero elements aborts attachment
    /// with a [`ConfigError`], leaving the document untouched. Zero open
    /// triggers is a logged warning only.
    ///
    /// On success the overlay element receives the widget marker plus the
    /// closed-state accessibility attributes, and every trigger receives
    /// `tabindex="0"`, `aria-expanded="false"`, and `aria-controls`.
    pub fn attach(
        &mut self,
        dom: &mut Dom,
        element: NodeId,
        config: OverlayConfig,
    ) -> Result<OverlayKey, ConfigError> {
        let resolved = resolve(dom, element, &config)?;
        let overlay = Overlay {
            element,
            config,
            resolved,
            is_open: false,
            restore_focus: None,
        };
        overlay.apply_init_attributes(dom);

        let key = OverlayKey(self.items.len());
        self.items.push(overlay);
        Ok(key)
    }

    /// Re-run attachment for an existing overlay from its original config.
    ///
    /// Required after a host templating engine replaces the overlay's
    /// light DOM: cached trigger references go stale and must be
    /// re-resolved. An overlay that is still open is closed first, through
    /// the ordinary close path (classes removed, trap released, close
    /// events emitted), then the closed-state attributes are re-applied
    /// against the new subtree. Fails like [`attach`](Self::attach),
    /// before any mutation, if the new subtree no longer satisfies the
    /// configuration.
    pub fn reinit(&mut self, dom: &mut Dom, key: OverlayKey) -> Result<(), ConfigError> {
        let overlay = &self.items[key.0];
        let resolved = resolve(dom, overlay.element, &overlay.config)?;

        if self.items[key.0].is_open {
            self.apply_close(dom, key);
        }
        let overlay = &mut self.items[key.0];
        overlay.resolved = resolved;
        overlay.restore_focus = None;
        self.items[key.0].apply_init_attributes(dom);
        Ok(())
    }

    /// Borrow an attached overlay.
    pub fn get(&self, key: OverlayKey) -> &Overlay {
        &self.items[key.0]
    }

    /// Whether the overlay is open.
    pub fn is_open(&self, key: OverlayKey) -> bool {
        self.items[key.0].is_open
    }

    /// The currently open overlay, if any.
    pub fn open_overlay(&self) -> Option<OverlayKey> {
        self.items
            .iter()
            .position(|o| o.is_open)
            .map(OverlayKey)
    }

    /// Handles of every attached overlay.
    pub fn keys(&self) -> impl Iterator<Item = OverlayKey> {
        (0..self.items.len()).map(OverlayKey)
    }

    /// The event bus, for subscribing to lifecycle events.
    pub fn bus(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    /// The focus-trap singleton, for inspection.
    pub fn trap(&self) -> &FocusTrap {
        &self.trap
    }

    /// Tell the trap focus moved. Hosts that change [`Dom::focus`]
    /// directly while an overlay is open call this afterwards; the
    /// session's own operations do so internally.
    pub fn observe_focus(&mut self, dom: &Dom) {
        self.trap.observe_focus(dom);
    }

    /// Open an overlay. No-op (no state change, no events) if already open.
    ///
    /// Opening closes every other open overlay first: at most one overlay
    /// is open system-wide at any time.
    pub fn open(&mut self, dom: &mut Dom, key: OverlayKey) {
        if self.items[key.0].is_open {
            return;
        }
        self.toggle(dom, key);
    }

    /// Close an overlay. No-op (no state change, no events) if already closed.
    pub fn close(&mut self, dom: &mut Dom, key: OverlayKey) {
        if !self.items[key.0].is_open {
            return;
        }
        self.toggle(dom, key);
    }

    /// Flip the overlay's state. This is the single side-effect path;
    /// [`open`](Self::open) and [`close`](Self::close) are thin guards
    /// around it. Opening (from either entry point) first closes every
    /// other open overlay.
    pub fn toggle(&mut self, dom: &mut Dom, key: OverlayKey) {
        if !self.items[key.0].is_open {
            self.close_open_overlays(dom, key);
        }
        self.prepare_transition(dom, key);
        if self.items[key.0].is_open {
            self.apply_close(dom, key);
        } else {
            self.apply_open(dom, key);
        }
    }

    /// Remove the transition marker. Hosts call this when the CSS
    /// transition for the overlay element finishes.
    pub fn notify_transition_end(&mut self, dom: &mut Dom, key: OverlayKey) {
        dom.remove_class(self.items[key.0].element, TRANSITION_CLASS);
    }

    /// Route a key event: the focus trap sees it first, then Escape
    /// closes the open overlay. Returns whether the event was consumed.
    pub fn handle_key(&mut self, dom: &mut Dom, key: KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }
        if self.trap.handle_key(dom, key) {
            return true;
        }
        if key.code == KeyCode::Esc {
            if let Some(open) = self.open_overlay() {
                self.close(dom, open);
                return true;
            }
        }
        false
    }

    /// Route a click on `target`: background of the open overlay closes
    /// it; open/close triggers open or close their overlay. Returns
    /// whether the click was consumed.
    pub fn handle_click(&mut self, dom: &mut Dom, target: NodeId) -> bool {
        // Background dismissal is bound only while its overlay is open.
        if let Some(open) = self.open_overlay() {
            if self.items[open.0].resolved.background == target {
                self.close(dom, open);
                return true;
            }
        }
        for key in self.keys().collect::<Vec<_>>() {
            if self.items[key.0].resolved.open_triggers.contains(&target) {
                self.open(dom, key);
                return true;
            }
        }
        for key in self.keys().collect::<Vec<_>>() {
            if self.items[key.0].resolved.close_triggers.contains(&target) {
                self.close(dom, key);
                return true;
            }
        }
        false
    }

    /// Whether a touch-move on `target` should be suppressed. True only
    /// for the open overlay's background (scroll lock).
    pub fn suppress_touch_move(&self, target: NodeId) -> bool {
        self.open_overlay()
            .is_some_and(|open| self.items[open.0].resolved.background == target)
    }

    /// Close every open overlay except `except`, via the same code path a
    /// direct `close()` takes. An element flagged open in the document
    /// (widget marker plus open class) whose state says closed has
    /// drifted; the stray class is dropped so the scan stays truthful.
    fn close_open_overlays(&mut self, dom: &mut Dom, except: OverlayKey) {
        for key in self.keys().collect::<Vec<_>>() {
            if key == except {
                continue;
            }
            if self.items[key.0].is_open {
                self.close(dom, key);
                continue;
            }
            let element = self.items[key.0].element;
            if dom.attr(element, WIDGET_MARKER).is_some() && dom.has_class(element, OPEN_CLASS) {
                dom.remove_class(element, OPEN_CLASS);
            }
        }
    }

    /// Add the transition marker when the element declares a non-zero
    /// transition duration. The marker stays until the host reports
    /// transition end.
    fn prepare_transition(&mut self, dom: &mut Dom, key: OverlayKey) {
        let element = self.items[key.0].element;
        let duration = dom
            .attr(element, TRANSITION_DURATION_ATTR)
            .and_then(|v| v.trim_end_matches('s').parse::<f32>().ok())
            .unwrap_or(0.0);
        if duration != 0.0 {
            dom.add_class(element, TRANSITION_CLASS);
        }
    }

    fn apply_open(&mut self, dom: &mut Dom, key: OverlayKey) {
        let (element, name, id, widget_classes, body_classes, triggers, focus_target) = {
            let o = &self.items[key.0];
            (
                o.element,
                o.config.name.clone(),
                o.resolved.id.clone(),
                o.widget_open_classes(),
                o.body_open_classes(),
                o.all_triggers().collect::<Vec<_>>(),
                o.resolved.close_triggers.first().copied(),
            )
        };

        for class in widget_classes {
            dom.add_class(element, class);
        }
        let body = dom.body();
        for class in body_classes {
            dom.add_class(body, class);
        }

        dom.set_attr(element, "aria-hidden", "false");
        dom.set_attr(element, "tabindex", "0");
        for trigger in triggers {
            dom.set_attr(trigger, "aria-expanded", "true");
        }

        self.items[key.0].restore_focus = dom.active();
        self.trap.trap(dom, element, focus_target);

        self.items[key.0].is_open = true;
        debug!(name = %name, id = %id, "overlay opened");
        self.bus.emit_fanout(OverlayPhase::Open, &name, &id, element);
    }

    fn apply_close(&mut self, dom: &mut Dom, key: OverlayKey) {
        let (element, name, id, widget_classes, body_classes, triggers) = {
            let o = &self.items[key.0];
            (
                o.element,
                o.config.name.clone(),
                o.resolved.id.clone(),
                o.widget_open_classes(),
                o.body_open_classes(),
                o.all_triggers().collect::<Vec<_>>(),
            )
        };

        for class in widget_classes {
            dom.remove_class(element, &class);
        }
        let body = dom.body();
        for class in body_classes {
            dom.remove_class(body, &class);
        }

        dom.set_attr(element, "aria-hidden", "true");
        dom.set_attr(element, "tabindex", "-1");
        for trigger in triggers {
            dom.set_attr(trigger, "aria-expanded", "false");
        }

        let restore = self.items[key.0].restore_focus.take();
        if self.trap.container() == Some(element) {
            self.trap.release(dom, restore);
        }

        self.items[key.0].is_open = false;
        debug!(name = %name, id = %id, "overlay closed");
        self.bus.emit_fanout(OverlayPhase::Close, &name, &id, element);
    }
}

/// Clear the surface region and draw its chrome, returning the inner area
/// for content. The usual pattern for rendering an open overlay on top of
/// existing content.
pub fn render_surface(frame: &mut Frame, surface: Rect, block: &Block) -> Rect {
    frame.render_widget(Clear, surface);
    let inner = block.inner(surface);
    frame.render_widget(block.clone(), surface);
    inner
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, KeyModifiers};
    use scrim_core::dom::Element;
    use scrim_core::event::{EventFilter, EventScope, OverlayEvent};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    /// Builds the canonical cart-drawer fixture:
    /// a button marked `data-open-cart`, a `.drawer-background`, and an
    /// `#CartDrawer` aside containing one `data-close-cart` button.
    fn cart_drawer(dom: &mut Dom, overlays: &mut Overlays) -> (OverlayKey, NodeId, NodeId, NodeId) {
        let open_btn = dom.append(
            dom.body(),
            Element::new("button").attr("data-open-cart", ""),
        );
        let background = dom.append(dom.body(), Element::new("div").class("drawer-background"));
        let element = dom.append(dom.body(), Element::new("aside").id("CartDrawer"));
        let close_btn = dom.append(
            element,
            Element::new("button").attr("data-close-cart", ""),
        );

        let config = OverlayConfig::new(
            "drawer",
            Selector::class("drawer-background"),
            Selector::attr("data-close-cart"),
        )
        .open_triggers(Selector::attr("data-open-cart"));

        let key = overlays
            .attach(dom, element, config)
            .expect("fixture attaches");
        (key, open_btn, close_btn, background)
    }

    fn record_all(overlays: &mut Overlays) -> Rc<RefCell<Vec<OverlayEvent>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        overlays
            .bus()
            .subscribe(EventFilter::All, move |e| sink.borrow_mut().push(e.clone()));
        seen
    }

    #[test]
    fn attach_stamps_closed_state_attributes() {
        let mut dom = Dom::new();
        let mut overlays = Overlays::new();
        let (key, open_btn, close_btn, _) = cart_drawer(&mut dom, &mut overlays);
        let element = overlays.get(key).element();

        assert_eq!(dom.attr(element, WIDGET_MARKER), Some("true"));
        assert_eq!(dom.attr(element, "aria-hidden"), Some("true"));
        assert_eq!(dom.attr(element, "tabindex"), Some("-1"));
        for trigger in [open_btn, close_btn] {
            assert_eq!(dom.attr(trigger, "tabindex"), Some("0"));
            assert_eq!(dom.attr(trigger, "aria-expanded"), Some("false"));
            assert_eq!(dom.attr(trigger, "aria-controls"), Some("CartDrawer"));
        }
    }

    #[test]
    fn attach_without_close_triggers_fails_before_mutation() {
        let mut dom = Dom::new();
        let mut overlays = Overlays::new();
        dom.append(dom.body(), Element::new("div").class("drawer-background"));
        let element = dom.append(dom.body(), Element::new("aside").id("Orphan"));

        let err = overlays
            .attach(
                &mut dom,
                element,
                OverlayConfig::new(
                    "drawer",
                    Selector::class("drawer-background"),
                    Selector::attr("data-close-nothing"),
                ),
            )
            .unwrap_err();

        assert!(matches!(err, ConfigError::NoCloseTriggers { .. }));
        // No attribute was written.
        assert_eq!(dom.attr(element, WIDGET_MARKER), None);
        assert_eq!(dom.attr(element, "aria-hidden"), None);
        assert_eq!(dom.attr(element, "tabindex"), None);
    }

    #[test]
    fn attach_requires_id_name_and_background() {
        let mut dom = Dom::new();
        let mut overlays = Overlays::new();
        dom.append(dom.body(), Element::new("div").class("bg"));
        let close = Selector::tag("button");
        dom.append(dom.body(), Element::new("button"));

        let anonymous = dom.append(dom.body(), Element::new("aside"));
        let err = overlays
            .attach(
                &mut dom,
                anonymous,
                OverlayConfig::new("modal", Selector::class("bg"), close.clone()),
            )
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingId { .. }));

        let element = dom.append(dom.body(), Element::new("aside").id("A"));
        let err = overlays
            .attach(
                &mut dom,
                element,
                OverlayConfig::new("", Selector::class("bg"), close.clone()),
            )
            .unwrap_err();
        assert_eq!(err, ConfigError::MissingName);

        let err = overlays
            .attach(
                &mut dom,
                element,
                OverlayConfig::new("modal", Selector::class("nonexistent"), close),
            )
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingBackground { .. }));
    }

    #[test]
    fn open_synchronizes_accessibility_state() {
        let mut dom = Dom::new();
        let mut overlays = Overlays::new();
        let (key, open_btn, close_btn, _) = cart_drawer(&mut dom, &mut overlays);
        let element = overlays.get(key).element();

        overlays.open(&mut dom, key);
        assert!(overlays.is_open(key));
        assert_eq!(dom.attr(element, "aria-hidden"), Some("false"));
        assert_eq!(dom.attr(element, "tabindex"), Some("0"));
        assert_eq!(dom.attr(open_btn, "aria-expanded"), Some("true"));
        assert_eq!(dom.attr(close_btn, "aria-expanded"), Some("true"));
        assert!(dom.has_class(element, OPEN_CLASS));
        assert!(dom.has_class(dom.body(), BODY_OPEN_CLASS));
        assert!(dom.has_class(dom.body(), "js-drawer-open"));

        overlays.close(&mut dom, key);
        assert!(!overlays.is_open(key));
        assert_eq!(dom.attr(element, "aria-hidden"), Some("true"));
        assert_eq!(dom.attr(element, "tabindex"), Some("-1"));
        assert_eq!(dom.attr(open_btn, "aria-expanded"), Some("false"));
        assert_eq!(dom.attr(close_btn, "aria-expanded"), Some("false"));
        assert!(!dom.has_class(element, OPEN_CLASS));
        assert!(!dom.has_class(dom.body(), BODY_OPEN_CLASS));
    }

    #[test]
    fn open_traps_focus_on_first_close_trigger_and_close_restores() {
        let mut dom = Dom::new();
        let mut overlays = Overlays::new();
        let (key, open_btn, close_btn, _) = cart_drawer(&mut dom, &mut overlays);

        dom.focus(open_btn);
        overlays.open(&mut dom, key);
        assert_eq!(dom.active(), Some(close_btn));
        assert!(overlays.trap().is_active());

        overlays.close(&mut dom, key);
        assert_eq!(dom.active(), Some(open_btn));
        assert!(!overlays.trap().is_active());
    }

    #[test]
    fn open_is_idempotent_and_emits_nothing_the_second_time() {
        let mut dom = Dom::new();
        let mut overlays = Overlays::new();
        let (key, ..) = cart_drawer(&mut dom, &mut overlays);
        let seen = record_all(&mut overlays);

        overlays.open(&mut dom, key);
        let after_first = seen.borrow().len();
        overlays.open(&mut dom, key);
        assert_eq!(seen.borrow().len(), after_first);
        assert!(overlays.is_open(key));

        overlays.close(&mut dom, key);
        let after_close = seen.borrow().len();
        overlays.close(&mut dom, key);
        assert_eq!(seen.borrow().len(), after_close);
        assert!(!overlays.is_open(key));
    }

    #[test]
    fn at_most_one_overlay_open_across_instances() {
        let mut dom = Dom::new();
        let mut overlays = Overlays::new();
        let (drawer_key, ..) = cart_drawer(&mut dom, &mut overlays);

        dom.append(dom.body(), Element::new("div").class("modal-background"));
        let modal_el = dom.append(dom.body(), Element::new("div").id("SizeGuide"));
        dom.append(modal_el, Element::new("button").attr("data-close-modal", ""));
        let modal_key = overlays
            .attach(
                &mut dom,
                modal_el,
                OverlayConfig::new(
                    "modal",
                    Selector::class("modal-background"),
                    Selector::attr("data-close-modal"),
                ),
            )
            .expect("modal attaches");

        overlays.open(&mut dom, drawer_key);
        overlays.open(&mut dom, modal_key);
        assert!(!overlays.is_open(drawer_key));
        assert!(overlays.is_open(modal_key));

        overlays.open(&mut dom, drawer_key);
        assert!(overlays.is_open(drawer_key));
        assert!(!overlays.is_open(modal_key));

        let open_count = overlays.keys().filter(|&k| overlays.is_open(k)).count();
        assert_eq!(open_count, 1);
    }

    #[test]
    fn toggle_on_closed_overlay_closes_the_open_one() {
        let mut dom = Dom::new();
        let mut overlays = Overlays::new();
        let (drawer_key, ..) = cart_drawer(&mut dom, &mut overlays);

        dom.append(dom.body(), Element::new("div").class("modal-background"));
        let modal_el = dom.append(dom.body(), Element::new("div").id("SizeGuide"));
        dom.append(modal_el, Element::new("button").attr("data-close-modal", ""));
        let modal_key = overlays
            .attach(
                &mut dom,
                modal_el,
                OverlayConfig::new(
                    "modal",
                    Selector::class("modal-background"),
                    Selector::attr("data-close-modal"),
                ),
            )
            .expect("modal attaches");

        overlays.open(&mut dom, drawer_key);
        overlays.toggle(&mut dom, modal_key);

        assert!(!overlays.is_open(drawer_key));
        assert!(overlays.is_open(modal_key));
        let open_count = overlays.keys().filter(|&k| overlays.is_open(k)).count();
        assert_eq!(open_count, 1);
    }

    #[test]
    fn cart_drawer_end_to_end_event_contract() {
        let mut dom = Dom::new();
        let mut overlays = Overlays::new();
        let (key, ..) = cart_drawer(&mut dom, &mut overlays);
        let element = overlays.get(key).element();
        let seen = record_all(&mut overlays);

        overlays.open(&mut dom, key);
        {
            let seen = seen.borrow();
            let opens: Vec<_> = seen.iter().filter(|e| e.phase == OverlayPhase::Open).collect();
            assert_eq!(opens.len(), 4);
            for scope in [
                EventScope::Widget,
                EventScope::Name("drawer".into()),
                EventScope::Id("CartDrawer".into()),
                EventScope::Element(element),
            ] {
                assert_eq!(opens.iter().filter(|e| e.scope == scope).count(), 1);
            }
        }
        assert!(overlays.is_open(key));

        overlays.open(&mut dom, key);
        assert_eq!(seen.borrow().len(), 4);

        overlays.close(&mut dom, key);
        {
            let seen = seen.borrow();
            let closes: Vec<_> = seen.iter().filter(|e| e.phase == OverlayPhase::Close).collect();
            assert_eq!(closes.len(), 4);
            for scope in [
                EventScope::Widget,
                EventScope::Name("drawer".into()),
                EventScope::Id("CartDrawer".into()),
                EventScope::Element(element),
            ] {
                assert_eq!(closes.iter().filter(|e| e.scope == scope).count(), 1);
            }
        }
        assert!(!overlays.is_open(key));
    }

    #[test]
    fn click_routing_drives_the_lifecycle() {
        let mut dom = Dom::new();
        let mut overlays = Overlays::new();
        let (key, open_btn, close_btn, background) = cart_drawer(&mut dom, &mut overlays);

        assert!(overlays.handle_click(&mut dom, open_btn));
        assert!(overlays.is_open(key));

        assert!(overlays.handle_click(&mut dom, close_btn));
        assert!(!overlays.is_open(key));

        // Background clicks only count while open.
        assert!(!overlays.handle_click(&mut dom, background));
        overlays.open(&mut dom, key);
        assert!(overlays.handle_click(&mut dom, background));
        assert!(!overlays.is_open(key));

        let unrelated = dom.append(dom.body(), Element::new("div"));
        assert!(!overlays.handle_click(&mut dom, unrelated));
    }

    #[test]
    fn escape_closes_only_while_open() {
        let mut dom = Dom::new();
        let mut overlays = Overlays::new();
        let (drawer, ..) = cart_drawer(&mut dom, &mut overlays);

        assert!(!overlays.handle_key(&mut dom, key(KeyCode::Esc)));
        overlays.open(&mut dom, drawer);
        assert!(overlays.handle_key(&mut dom, key(KeyCode::Esc)));
        assert!(!overlays.is_open(drawer));
    }

    #[test]
    fn touch_move_suppressed_on_open_background_only() {
        let mut dom = Dom::new();
        let mut overlays = Overlays::new();
        let (key, _, _, background) = cart_drawer(&mut dom, &mut overlays);

        assert!(!overlays.suppress_touch_move(background));
        overlays.open(&mut dom, key);
        assert!(overlays.suppress_touch_move(background));
        let other = overlays.get(key).element();
        assert!(!overlays.suppress_touch_move(other));
    }

    #[test]
    fn transition_marker_follows_declared_duration() {
        let mut dom = Dom::new();
        let mut overlays = Overlays::new();
        dom.append(dom.body(), Element::new("div").class("drawer-background"));
        let element = dom.append(
            dom.body(),
            Element::new("aside")
                .id("Animated")
                .attr(TRANSITION_DURATION_ATTR, "0.3s"),
        );
        dom.append(element, Element::new("button").attr("data-close", ""));
        let key = overlays
            .attach(
                &mut dom,
                element,
                OverlayConfig::new(
                    "drawer",
                    Selector::class("drawer-background"),
                    Selector::attr("data-close"),
                ),
            )
            .expect("attaches");

        overlays.open(&mut dom, key);
        assert!(dom.has_class(element, TRANSITION_CLASS));
        overlays.notify_transition_end(&mut dom, key);
        assert!(!dom.has_class(element, TRANSITION_CLASS));

        // Without a declared duration no marker appears.
        let mut dom2 = Dom::new();
        let mut overlays2 = Overlays::new();
        let (key2, ..) = cart_drawer(&mut dom2, &mut overlays2);
        let element2 = overlays2.get(key2).element();
        overlays2.open(&mut dom2, key2);
        assert!(!dom2.has_class(element2, TRANSITION_CLASS));
    }

    #[test]
    fn reinit_rebinds_triggers_after_subtree_replacement() {
        let mut dom = Dom::new();
        let mut overlays = Overlays::new();
        let (key, _, old_close, _) = cart_drawer(&mut dom, &mut overlays);
        let element = overlays.get(key).element();

        // Host templating engine replaces the drawer's light DOM.
        dom.detach_children(element);
        let new_close = dom.append(
            element,
            Element::new("button").attr("data-close-cart", ""),
        );
        overlays.reinit(&mut dom, key).expect("reinit succeeds");

        assert!(!overlays.is_open(key));
        assert_eq!(dom.attr(new_close, "aria-controls"), Some("CartDrawer"));

        overlays.open(&mut dom, key);
        assert_eq!(dom.active(), Some(new_close));
        assert_ne!(dom.active(), Some(old_close));
    }

    #[test]
    fn reinit_while_open_closes_and_clears_open_classes() {
        let mut dom = Dom::new();
        let mut overlays = Overlays::new();
        let (key, ..) = cart_drawer(&mut dom, &mut overlays);
        let element = overlays.get(key).element();
        let seen = record_all(&mut overlays);

        overlays.open(&mut dom, key);

        // Re-render happens while the drawer is open.
        dom.detach_children(element);
        let new_close = dom.append(
            element,
            Element::new("button").attr("data-close-cart", ""),
        );
        overlays.reinit(&mut dom, key).expect("reinit succeeds");

        assert!(!overlays.is_open(key));
        assert!(!dom.has_class(element, OPEN_CLASS));
        assert!(!dom.has_class(dom.body(), BODY_OPEN_CLASS));
        assert!(!dom.has_class(dom.body(), "js-drawer-open"));
        assert_eq!(dom.attr(element, "aria-hidden"), Some("true"));
        assert!(!overlays.trap().is_active());
        assert_eq!(dom.attr(new_close, "aria-controls"), Some("CartDrawer"));

        let closes = seen
            .borrow()
            .iter()
            .filter(|e| e.phase == OverlayPhase::Close)
            .count();
        assert_eq!(closes, 4);
    }

    #[test]
    fn reinit_fails_when_replacement_lost_the_close_trigger() {
        let mut dom = Dom::new();
        let mut overlays = Overlays::new();
        let (key, ..) = cart_drawer(&mut dom, &mut overlays);
        let element = overlays.get(key).element();

        dom.detach_children(element);
        let err = overlays.reinit(&mut dom, key).unwrap_err();
        assert!(matches!(err, ConfigError::NoCloseTriggers { .. }));
    }

    #[test]
    fn overlay_without_open_triggers_is_programmatically_operable() {
        let mut dom = Dom::new();
        let mut overlays = Overlays::new();
        dom.append(dom.body(), Element::new("div").class("modal-background"));
        let element = dom.append(dom.body(), Element::new("div").id("Quiet"));
        dom.append(element, Element::new("button").attr("data-close", ""));

        let key = overlays
            .attach(
                &mut dom,
                element,
                OverlayConfig::new(
                    "modal",
                    Selector::class("modal-background"),
                    Selector::attr("data-close"),
                ),
            )
            .expect("zero open triggers is a warning, not an error");

        overlays.open(&mut dom, key);
        assert!(overlays.is_open(key));
    }

    #[test]
    fn extra_classes_and_attributes_are_applied() {
        let mut dom = Dom::new();
        let mut overlays = Overlays::new();
        dom.append(dom.body(), Element::new("div").class("drawer-background"));
        let element = dom.append(dom.body(), Element::new("aside").id("Extra"));
        dom.append(element, Element::new("button").attr("data-close", ""));

        let key = overlays
            .attach(
                &mut dom,
                element,
                OverlayConfig::new(
                    "drawer",
                    Selector::class("drawer-background"),
                    Selector::attr("data-close"),
                )
                .open_class("drawer--visible")
                .body_open_class("no-scroll")
                .attribute("data-section", "cart"),
            )
            .expect("attaches");

        assert_eq!(dom.attr(element, "data-section"), Some("cart"));
        overlays.open(&mut dom, key);
        assert!(dom.has_class(element, "drawer--visible"));
        assert!(dom.has_class(dom.body(), "no-scroll"));
        overlays.close(&mut dom, key);
        assert!(!dom.has_class(element, "drawer--visible"));
        assert!(!dom.has_class(dom.body(), "no-scroll"));
    }
}

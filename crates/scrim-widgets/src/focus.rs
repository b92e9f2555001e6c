//! Keyboard focus trapping for overlay containers.
//!
//! While a drawer or modal is open, Tab and Shift+Tab must cycle inside it
//! instead of escaping into the page behind. [`FocusTrap`] is the session
//! object that enforces this: it records the first and last focusable
//! descendants of a container at trap start and wraps focus at those
//! boundaries until released.
//!
//! Only one trap can be active at a time — starting a new one silently
//! tears down the previous session, so the active trap is a singleton by
//! construction rather than by locking.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use scrim_core::dom::{Dom, NodeId};

/// All focusable descendants of `container`, in document order.
///
/// Document order mirrors native tab order for elements without custom
/// tab indexes; an explicit non-negative `tabindex` makes any element
/// focusable but does not reorder the sequence.
pub fn focusable_elements(dom: &Dom, container: NodeId) -> Vec<NodeId> {
    dom.descendants(container)
        .into_iter()
        .filter(|&node| is_focusable(dom, node))
        .collect()
}

/// Whether a single element can receive keyboard focus.
///
/// The rules mirror the conventional focusable set: `summary`, anchors
/// with an `href`, enabled buttons, elements with a non-negative
/// `tabindex`, draggable elements, `area`, enabled non-hidden inputs,
/// enabled selects and textareas, `object`, and `iframe`.
pub fn is_focusable(dom: &Dom, node: NodeId) -> bool {
    if let Some(tabindex) = dom.attr(node, "tabindex") {
        if !tabindex.starts_with('-') {
            return true;
        }
    }
    if dom.attr(node, "draggable").is_some() {
        return true;
    }

    let enabled = dom.attr(node, "disabled").is_none();
    match dom.tag(node) {
        "summary" | "area" | "object" | "iframe" => true,
        "a" => dom.attr(node, "href").is_some(),
        "button" | "select" | "textarea" => enabled,
        "input" => enabled && dom.attr(node, "type") != Some("hidden"),
        _ => false,
    }
}

#[derive(Debug, Clone, Copy)]
struct Session {
    container: NodeId,
    first: Option<NodeId>,
    last: Option<NodeId>,
    /// Tab interception is armed only while focus sits at a boundary
    /// (container, first, or last). This mirrors attaching the keydown
    /// listener from a focusin handler and detaching it on focusout.
    armed: bool,
}

/// The active focus-containment session, if any.
///
/// # Example
///
/// ```rust,ignore
/// use scrim_widgets::focus::FocusTrap;
///
/// let mut trap = FocusTrap::new();
/// trap.trap(&mut dom, drawer, Some(close_button));
/// // ... feed key events through trap.handle_key(&mut dom, key) ...
/// trap.release(&mut dom, Some(previously_focused));
/// ```
#[derive(Debug, Default)]
pub struct FocusTrap {
    session: Option<Session>,
}

impl FocusTrap {
    /// Create an inactive trap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a session is currently active.
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// The trapped container, if a session is active.
    pub fn container(&self) -> Option<NodeId> {
        self.session.map(|s| s.container)
    }

    /// Start trapping focus inside `container`.
    ///
    /// Any previous session is torn down first. Focus moves to
    /// `element_to_focus`, or to the container itself when `None`. A
    /// container with no focusable descendants degenerates to a no-op
    /// boundary check: focus still moves, but Tab cycling is not
    /// constrained.
    pub fn trap(&mut self, dom: &mut Dom, container: NodeId, element_to_focus: Option<NodeId>) {
        self.session = None;

        let focusables = focusable_elements(dom, container);
        self.session = Some(Session {
            container,
            first: focusables.first().copied(),
            last: focusables.last().copied(),
            armed: false,
        });

        dom.focus(element_to_focus.unwrap_or(container));
        self.observe_focus(dom);
    }

    /// Stop trapping. Safe to call when no session is active.
    ///
    /// When `element_to_focus` is given, focus moves there — typically the
    /// element that was focused before the overlay opened.
    pub fn release(&mut self, dom: &mut Dom, element_to_focus: Option<NodeId>) {
        self.session = None;
        if let Some(element) = element_to_focus {
            dom.focus(element);
        }
    }

    /// Re-examine the focused element after any focus movement.
    ///
    /// Arms Tab interception when focus sits at a boundary and disarms it
    /// otherwise. Hosts that move focus themselves while a trap is active
    /// should call this afterwards; [`trap`](Self::trap) and
    /// [`handle_key`](Self::handle_key) do so internally.
    pub fn observe_focus(&mut self, dom: &Dom) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.armed = match dom.active() {
            Some(active) => {
                active == session.container
                    || Some(active) == session.first
                    || Some(active) == session.last
            }
            None => false,
        };
    }

    /// Intercept a key event, wrapping focus at the trap boundaries.
    ///
    /// Returns `true` when the key was consumed (the host should treat the
    /// event as handled). Only Tab and Shift+Tab are ever consumed, and
    /// only while focus sits at a boundary: Tab on the last focusable
    /// wraps to the first; Shift+Tab on the container or first focusable
    /// wraps to the last. Everything else passes through untouched.
    pub fn handle_key(&mut self, dom: &mut Dom, key: KeyEvent) -> bool {
        let Some(session) = self.session else {
            return false;
        };
        if !session.armed {
            return false;
        }

        let backward = key.code == KeyCode::BackTab
            || (key.code == KeyCode::Tab && key.modifiers.contains(KeyModifiers::SHIFT));
        let forward = key.code == KeyCode::Tab && !backward;
        if !forward && !backward {
            return false;
        }

        let (Some(first), Some(last)) = (session.first, session.last) else {
            // Degenerate trap: nothing to cycle between.
            return false;
        };
        let Some(active) = dom.active() else {
            return false;
        };

        let consumed = if forward && active == last {
            dom.focus(first);
            true
        } else if backward && (active == session.container || active == first) {
            dom.focus(last);
            true
        } else {
            false
        };

        if consumed {
            self.observe_focus(dom);
        }
        consumed
    }
}

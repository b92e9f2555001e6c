//! Typed overlay events and the bus that fans them out.
//!
//! Overlay lifecycle notifications use a tagged event type dispatched
//! through an explicit bus instead of string-named document events. The
//! four-tier fan-out is preserved: every transition is announced once at
//! the widget-global tier, once scoped to the widget's configured name,
//! once scoped to its element id, and once local to the element itself.
//! Hosts subscribe to whichever tier they care about — a cart component
//! listening for its drawer subscribes to the id tier, a scroll-lock
//! helper to the global tier.

use crate::dom::NodeId;

/// Which half of the overlay lifecycle an event announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayPhase {
    Open,
    Close,
}

/// The tier an event is addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventScope {
    /// Global tier: any overlay anywhere (the `focusable-widget:*` tier).
    Widget,
    /// Name tier: every overlay sharing a configured name (`drawer:*`).
    Name(String),
    /// Id tier: the overlay with this element id (`CartDrawer:*`).
    Id(String),
    /// Element-local tier: dispatched on the overlay element itself.
    Element(NodeId),
}

/// A single overlay lifecycle notification. Carries no payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayEvent {
    pub scope: EventScope,
    pub phase: OverlayPhase,
}

/// What a listener wants delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventFilter {
    /// Every event, all tiers.
    All,
    /// Only events addressed to one scope.
    Scope(EventScope),
}

impl EventFilter {
    fn accepts(&self, event: &OverlayEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Scope(scope) => *scope == event.scope,
        }
    }
}

/// Identity handle for unsubscribing a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback = Box<dyn FnMut(&OverlayEvent)>;

/// Single-threaded observer registry for [`OverlayEvent`]s.
///
/// Emission is synchronous: `emit` invokes every accepting listener before
/// returning, in subscription order. Listeners are `FnMut` closures; there
/// is no cross-thread delivery because the whole overlay layer runs on the
/// host's event loop thread.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(ListenerId, EventFilter, Callback)>,
    next_id: u64,
}

impl EventBus {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for events accepted by `filter`.
    pub fn subscribe(
        &mut self,
        filter: EventFilter,
        callback: impl FnMut(&OverlayEvent) + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, filter, Box::new(callback)));
        id
    }

    /// Remove a listener. No-op if already removed.
    pub fn unsubscribe(&mut self, id: ListenerId) {
        self.listeners.retain(|(lid, _, _)| *lid != id);
    }

    /// Deliver one event to every accepting listener.
    pub fn emit(&mut self, event: OverlayEvent) {
        for (_, filter, callback) in &mut self.listeners {
            if filter.accepts(&event) {
                callback(&event);
            }
        }
    }

    /// Announce one overlay transition at all four tiers.
    ///
    /// Emission order is widget, name, id, element-local; only the fact
    /// that all four fire is contractual.
    pub fn emit_fanout(&mut self, phase: OverlayPhase, name: &str, id: &str, element: NodeId) {
        for scope in [
            EventScope::Widget,
            EventScope::Name(name.to_string()),
            EventScope::Id(id.to_string()),
            EventScope::Element(element),
        ] {
            self.emit(OverlayEvent { scope, phase });
        }
    }
}

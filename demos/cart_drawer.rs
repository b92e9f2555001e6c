//! Cart drawer walkthrough: a right-edge drawer driven by clicks and keys.
//!
//! Run with: `cargo run --example cart_drawer`

use scrim::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use scrim::widgets::drawer::{drawer, Position};
use scrim::widgets::overlay::Overlays;
use scrim::{ConfigError, Dom, Element, EventFilter, EventScope, Selector};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

fn main() -> Result<(), ConfigError> {
    let mut dom = Dom::new();

    // Page skeleton: a header cart button, the shared drawer background,
    // and the drawer itself with a close button and two links.
    let open_btn = dom.append(
        dom.body(),
        Element::new("button").attr("data-open-cart", ""),
    );
    dom.append(dom.body(), Element::new("div").class("drawer-background"));
    let cart = dom.append(dom.body(), Element::new("aside").id("CartDrawer"));
    let close_btn = dom.append(cart, Element::new("button").attr("data-close-cart", ""));
    dom.append(cart, Element::new("a").attr("href", "/cart"));
    let checkout = dom.append(cart, Element::new("a").attr("href", "/checkout"));

    let mut overlays = Overlays::new();
    let cart_key = overlays.attach(
        &mut dom,
        cart,
        drawer(Position::Right, Selector::attr("data-close-cart"))
            .open_triggers(Selector::attr("data-open-cart")),
    )?;

    // A cart component would subscribe to its drawer's id tier to refresh
    // line items whenever the drawer opens.
    overlays.bus().subscribe(
        EventFilter::Scope(EventScope::Id("CartDrawer".into())),
        |event| println!("  [CartDrawer listener] {:?}", event.phase),
    );

    println!("click the cart button:");
    dom.focus(open_btn);
    overlays.handle_click(&mut dom, open_btn);
    println!("  open = {}", overlays.is_open(cart_key));
    println!("  focus on close button = {}", dom.active() == Some(close_btn));

    println!("Tab on the last link wraps inside the drawer:");
    dom.focus(checkout);
    overlays.observe_focus(&dom);
    overlays.handle_key(&mut dom, key(KeyCode::Tab));
    println!("  focus wrapped back to close button = {}", dom.active() == Some(close_btn));

    println!("Escape dismisses:");
    overlays.handle_key(&mut dom, key(KeyCode::Esc));
    println!("  open = {}", overlays.is_open(cart_key));
    println!("  focus restored to cart button = {}", dom.active() == Some(open_btn));

    Ok(())
}

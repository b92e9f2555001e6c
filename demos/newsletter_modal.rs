//! Newsletter modal walkthrough: a centered dialog plus mutual exclusion
//! with a navigation drawer.
//!
//! Run with: `cargo run --example newsletter_modal`

use scrim::widgets::drawer::{drawer, Position};
use scrim::widgets::modal::modal;
use scrim::widgets::overlay::Overlays;
use scrim::{ConfigError, Dom, Element, EventFilter, EventScope, Selector};

fn main() -> Result<(), ConfigError> {
    let mut dom = Dom::new();

    // Navigation drawer on the left.
    let menu_btn = dom.append(
        dom.body(),
        Element::new("button").attr("data-open-menu", ""),
    );
    dom.append(dom.body(), Element::new("div").class("drawer-background"));
    let menu = dom.append(dom.body(), Element::new("nav").id("MenuDrawer"));
    dom.append(menu, Element::new("button").attr("data-close-menu", ""));

    // Newsletter signup modal.
    dom.append(dom.body(), Element::new("div").class("modal-background"));
    let signup = dom.append(dom.body(), Element::new("div").id("NewsletterModal"));
    dom.append(signup, Element::new("button").attr("data-close-newsletter", ""));
    dom.append(signup, Element::new("input").attr("type", "email"));

    let mut overlays = Overlays::new();
    let menu_key = overlays.attach(
        &mut dom,
        menu,
        drawer(Position::Left, Selector::attr("data-close-menu"))
            .open_triggers(Selector::attr("data-open-menu")),
    )?;
    let signup_key = overlays.attach(
        &mut dom,
        signup,
        modal(Selector::attr("data-close-newsletter")),
    )?;

    // A scroll-lock helper would watch the global tier.
    overlays.bus().subscribe(
        EventFilter::Scope(EventScope::Widget),
        |event| println!("  [global listener] {:?}", event.phase),
    );

    println!("open the menu drawer:");
    overlays.handle_click(&mut dom, menu_btn);
    println!("  menu open = {}", overlays.is_open(menu_key));

    println!("open the signup modal (closes the drawer first):");
    overlays.open(&mut dom, signup_key);
    println!("  menu open = {}", overlays.is_open(menu_key));
    println!("  signup open = {}", overlays.is_open(signup_key));
    println!(
        "  body classes while open = {:?}",
        dom.classes(dom.body())
    );

    println!("close the modal:");
    overlays.close(&mut dom, signup_key);
    println!("  signup open = {}", overlays.is_open(signup_key));

    Ok(())
}

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement};

use crate::error::Result;
use crate::utils::dom::{query_all, set_style, smooth_options, window, Listener};

/// Height of the fixed navbar the scroll target must clear.
pub const HEADER_OFFSET: f64 = 80.0;
/// How far ahead of a section's top its nav link lights up.
pub const HIGHLIGHT_LOOKAHEAD: f64 = 200.0;
pub const SHADOW_THRESHOLD: f64 = 100.0;

const SHADOW_SCROLLED: &str = "0 4px 30px rgba(0, 0, 0, 0.1)";
const SHADOW_RESTING: &str = "0 2px 20px rgba(0, 0, 0, 0.08)";

pub fn anchor_scroll_top(section_offset_top: f64) -> f64 {
    section_offset_top - HEADER_OFFSET
}

/// Id of the last section whose top has been scrolled past, if any.
pub fn current_section<'a>(scroll_y: f64, sections: &[(&'a str, f64)]) -> Option<&'a str> {
    sections
        .iter()
        .filter(|(_, top)| scroll_y >= top - HIGHLIGHT_LOOKAHEAD)
        .last()
        .map(|(id, _)| *id)
}

/// `href` of the nav link to highlight. Passing a section without an id
/// clears the highlight.
pub fn highlighted_href(scroll_y: f64, sections: &[(&str, f64)]) -> Option<String> {
    current_section(scroll_y, sections)
        .filter(|id| !id.is_empty())
        .map(|id| format!("#{}", id))
}

pub fn navbar_shadow(scroll_y: f64) -> &'static str {
    if scroll_y > SHADOW_THRESHOLD {
        SHADOW_SCROLLED
    } else {
        SHADOW_RESTING
    }
}

/// `.nav-link` clicks scroll smoothly to their `href` target.
pub fn install_smooth_scroll(document: &Document) -> Result<Vec<Listener>> {
    let mut listeners = Vec::new();
    for link in query_all(document, ".nav-link")? {
        let document = document.clone();
        let this = link.clone();
        listeners.push(Listener::new(&link, "click", move |event: Event| {
            event.prevent_default();
            let Some(href) = this.get_attribute("href") else {
                return;
            };
            // Invalid selectors (e.g. external links) simply have no target.
            let Some(target) = document
                .query_selector(&href)
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            else {
                return;
            };
            let top = anchor_scroll_top(target.offset_top() as f64);
            if let Ok(window) = window() {
                window.scroll_to_with_scroll_to_options(&smooth_options(top));
            }
        })?);
    }
    Ok(listeners)
}

/// Keeps the `.nav-link` of the section being read marked `active`, and
/// deepens the navbar shadow once the page has scrolled.
pub fn install_nav_highlight(document: &Document) -> Result<Listener> {
    let sections: Vec<HtmlElement> = query_all(document, ".section")?
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .collect();
    let links = query_all(document, ".nav-link")?;
    let navbar = document.get_element_by_id("navbar");
    let win = window()?;

    let handler = {
        let win = win.clone();
        move |_: Event| {
            let scroll_y = win.scroll_y().unwrap_or(0.0);
            highlight(scroll_y, &sections, &links);
            if let Some(navbar) = &navbar {
                set_style(navbar, "box-shadow", navbar_shadow(scroll_y));
            }
        }
    };
    Listener::new(&win, "scroll", handler)
}

fn highlight(scroll_y: f64, sections: &[HtmlElement], links: &[Element]) {
    let ids: Vec<String> = sections.iter().map(|s| s.id()).collect();
    let tops: Vec<(&str, f64)> = sections
        .iter()
        .zip(&ids)
        .map(|(section, id)| (id.as_str(), section.offset_top() as f64))
        .collect();
    let current = highlighted_href(scroll_y, &tops);

    for link in links {
        let is_current = current.is_some() && link.get_attribute("href") == current;
        let _ = link.class_list().toggle_with_force("active", is_current);
    }
}

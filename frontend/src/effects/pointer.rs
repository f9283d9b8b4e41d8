use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, MouseEvent};

use crate::error::Result;
use crate::utils::dom::{query_all, replace_style_element, set_style, Listener};

pub const TILT_SELECTOR: &str = ".card-3d";
pub const TILT_DIVISOR: f64 = 20.0;
pub const TILT_RESET: &str = "perspective(1000px) rotateX(0) rotateY(0) translateY(0) scale(1)";

pub const RIPPLE_CLASS: &str = "ripple";
pub const RIPPLE_STYLE_ID: &str = "ripple-style";

const RIPPLE_CSS: &str = r#"
    .btn {
        position: relative;
        overflow: hidden;
    }

    .ripple {
        position: absolute;
        border-radius: 50%;
        background-color: rgba(255, 255, 255, 0.6);
        transform: scale(0);
        animation: ripple-animation 0.6s ease-out;
        pointer-events: none;
    }

    @keyframes ripple-animation {
        to {
            transform: scale(4);
            opacity: 0;
        }
    }
"#;

/// Tilt transform for a pointer at (`x`, `y`) inside a card of the given
/// size, coordinates relative to the card's top-left corner.
pub fn tilt_transform(x: f64, y: f64, width: f64, height: f64) -> String {
    let rotate_x = (y - height / 2.0) / TILT_DIVISOR;
    let rotate_y = (width / 2.0 - x) / TILT_DIVISOR;
    format!(
        "perspective(1000px) rotateX({}deg) rotateY({}deg) translateY(-10px) scale(1.02)",
        rotate_x, rotate_y
    )
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RippleGeometry {
    pub diameter: f64,
    pub left: f64,
    pub top: f64,
}

impl RippleGeometry {
    /// Circle covering the button, centred on the click.
    pub fn at(click_x: f64, click_y: f64, offset_left: f64, offset_top: f64, width: f64, height: f64) -> Self {
        let diameter = width.max(height);
        let radius = diameter / 2.0;
        Self {
            diameter,
            left: click_x - offset_left - radius,
            top: click_y - offset_top - radius,
        }
    }
}

pub fn install_tilt(document: &Document) -> Result<Vec<Listener>> {
    let mut listeners = Vec::new();
    for card in query_all(document, TILT_SELECTOR)? {
        let this = card.clone();
        listeners.push(Listener::new(&card, "mousemove", move |event: Event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let rect = this.get_bounding_client_rect();
            let x = event.client_x() as f64 - rect.left();
            let y = event.client_y() as f64 - rect.top();
            set_style(&this, "transform", &tilt_transform(x, y, rect.width(), rect.height()));
        })?);

        let this = card.clone();
        listeners.push(Listener::new(&card, "mouseleave", move |_| {
            set_style(&this, "transform", TILT_RESET);
        })?);
    }
    Ok(listeners)
}

fn spawn_ripple(document: &Document, button: &HtmlElement, event: &MouseEvent) -> Result<()> {
    let geometry = RippleGeometry::at(
        event.client_x() as f64,
        event.client_y() as f64,
        button.offset_left() as f64,
        button.offset_top() as f64,
        button.client_width() as f64,
        button.client_height() as f64,
    );

    let circle = document.create_element("span")?;
    let size = format!("{}px", geometry.diameter);
    set_style(&circle, "width", &size);
    set_style(&circle, "height", &size);
    set_style(&circle, "left", &format!("{}px", geometry.left));
    set_style(&circle, "top", &format!("{}px", geometry.top));
    circle.class_list().add_1(RIPPLE_CLASS)?;

    if let Some(previous) = button.get_elements_by_class_name(RIPPLE_CLASS).item(0) {
        previous.remove();
    }
    button.append_child(&circle)?;
    Ok(())
}

/// Ripple stylesheet plus the `.btn` click listeners. Dropping it removes
/// the stylesheet again.
pub struct Ripple {
    style: Element,
    listeners: Vec<Listener>,
}

impl Ripple {
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Drop for Ripple {
    fn drop(&mut self) {
        self.style.remove();
    }
}

/// `.btn` clicks spawn a ripple at the pointer. The ripple stylesheet is
/// injected alongside.
pub fn install_ripple(document: &Document) -> Result<Ripple> {
    let style = replace_style_element(document, RIPPLE_STYLE_ID, RIPPLE_CSS)?;

    let mut listeners = Vec::new();
    for button in query_all(document, ".btn")? {
        let Ok(button) = button.dyn_into::<HtmlElement>() else {
            continue;
        };
        let document = document.clone();
        let this = button.clone();
        listeners.push(Listener::new(&button, "click", move |event: Event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            if let Err(e) = spawn_ripple(&document, &this, event) {
                log::debug!("Ripple skipped: {}", e);
            }
        })?);
    }
    Ok(Ripple { style, listeners })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centred_pointer_does_not_tilt() {
        assert_eq!(
            tilt_transform(100.0, 50.0, 200.0, 100.0),
            "perspective(1000px) rotateX(0deg) rotateY(0deg) translateY(-10px) scale(1.02)"
        );
    }

    #[test]
    fn tilt_follows_pointer_offset() {
        // Bottom-left corner: tips forward and turns left.
        let transform = tilt_transform(0.0, 100.0, 200.0, 100.0);
        assert!(transform.contains("rotateX(2.5deg)"));
        assert!(transform.contains("rotateY(5deg)"));
    }

    #[test]
    fn ripple_is_centred_on_the_click() {
        let geometry = RippleGeometry::at(150.0, 40.0, 100.0, 20.0, 120.0, 40.0);
        assert_eq!(geometry.diameter, 120.0);
        assert_eq!(geometry.left, -10.0);
        assert_eq!(geometry.top, -40.0);
    }
}

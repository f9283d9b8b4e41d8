use web_sys::{Document, Element};

use crate::error::{Error, Result};
use crate::utils::dom::{as_html, set_style, window, Listener};

const BAR_CSS: &str = "position: fixed; top: 0; left: 0; width: 0; height: 4px; \
    background: linear-gradient(90deg, #0070AD, #12ABDB); z-index: 9999; \
    transition: width 0.3s ease;";

/// Percentage of the document scrolled, 0 when it cannot scroll.
pub fn scrolled_percent(scroll_y: f64, scroll_height: f64, client_height: f64) -> f64 {
    let scrollable = scroll_height - client_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (scroll_y / scrollable * 100.0).clamp(0.0, 100.0)
}

/// Reading progress bar pinned to the top of the viewport.
pub struct ProgressBar {
    bar: Element,
    _scroll: Listener,
}

impl Drop for ProgressBar {
    fn drop(&mut self) {
        self.bar.remove();
    }
}

pub fn install_progress_bar(document: &Document) -> Result<ProgressBar> {
    let body = document
        .body()
        .ok_or_else(|| Error::MissingElement("body".to_string()))?;
    let bar = document.create_element("div")?;
    if let Some(html) = as_html(&bar) {
        html.style().set_css_text(BAR_CSS);
    }
    body.append_child(&bar)?;

    let win = window()?;
    let scroll = {
        let scroller = win.clone();
        let bar = bar.clone();
        let document = document.clone();
        Listener::new(&win, "scroll", move |_| {
            let Some(root) = document.document_element() else {
                return;
            };
            let percent = scrolled_percent(
                scroller.scroll_y().unwrap_or(0.0),
                root.scroll_height() as f64,
                root.client_height() as f64,
            );
            set_style(&bar, "width", &format!("{}%", percent));
        })?
    };

    Ok(ProgressBar { bar, _scroll: scroll })
}

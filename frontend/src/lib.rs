//! Interactivity for the portfolio page: bilingual text, scroll and hover
//! effects, and a full-screen presentation mode over three sections.

use std::cell::RefCell;
use std::sync::Once;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::Document;

pub mod config;
pub mod effects;
pub mod error;
pub mod i18n;
pub mod page;
pub mod presentation;
pub mod utils;

use config::PageConfig;
use i18n::Language;
use page::Page;

thread_local! {
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
}

static LOGGER: Once = Once::new();

/// Installs the console logger. Everything is let through until the page
/// config has been read, so config warnings are not lost.
fn init_logging() {
    LOGGER.call_once(|| wasm_logger::init(wasm_logger::Config::new(log::Level::Trace)));
}

fn is_loading(document: &Document) -> bool {
    document.ready_state() == "loading"
}

fn boot() {
    let document = match utils::dom::document() {
        Ok(document) => document,
        Err(e) => {
            web_sys::console::error_1(&JsValue::from_str(&e.to_string()));
            return;
        }
    };
    init_logging();
    let config = PageConfig::from_document(&document);
    log::set_max_level(config.log_level.to_level_filter());

    let page = Page::mount(&document, &config);
    let previous = PAGE.with(|slot| slot.borrow_mut().replace(page));
    drop(previous);
}

/// Mounts the page once the DOM is parsed.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let document = utils::dom::document().map_err(|e| JsValue::from_str(&e.to_string()))?;
    if is_loading(&document) {
        let on_ready = Closure::once_into_js(boot);
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
    } else {
        boot();
    }
    Ok(())
}

/// Switches every locale-tagged element to `code` ("fr" or "en").
/// Exposed for inline markup handlers.
#[wasm_bindgen(js_name = switchLanguage)]
pub fn switch_language(code: &str) {
    let lang = match code.parse::<Language>() {
        Ok(lang) => lang,
        Err(e) => {
            log::warn!("{}", e);
            return;
        }
    };

    let result = PAGE.with(|slot| match slot.borrow().as_ref() {
        Some(page) => page.switch_language(lang),
        None => utils::dom::document().and_then(|document| i18n::apply_language(&document, lang)),
    });
    if let Err(e) = result {
        log::error!("Failed to switch language: {}", e);
    }
}

/// Detaches everything the page installed.
#[wasm_bindgen]
pub fn teardown() {
    let page = PAGE.with(|slot| slot.borrow_mut().take());
    drop(page);
}

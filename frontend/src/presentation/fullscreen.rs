//! Best-effort full-screen requests across vendor-prefixed APIs.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::js_sys::{Function, Promise, Reflect};
use web_sys::Document;

pub const ENTER_METHODS: [&str; 3] = [
    "requestFullscreen",
    "webkitRequestFullscreen",
    "msRequestFullscreen",
];

pub const EXIT_METHODS: [&str; 3] = ["exitFullscreen", "webkitExitFullscreen", "msExitFullscreen"];

/// Calls the first of `methods` that `target` implements. Returns the
/// method name used, or `None` when the platform offers none of them.
fn call_first(target: &JsValue, methods: &[&'static str]) -> Option<&'static str> {
    for &name in methods {
        let Ok(value) = Reflect::get(target, &JsValue::from_str(name)) else {
            continue;
        };
        let Some(function) = value.dyn_ref::<Function>() else {
            continue;
        };
        match function.call0(target) {
            Ok(result) => {
                // Modern browsers return a promise that rejects outside a user gesture.
                if let Ok(promise) = result.dyn_into::<Promise>() {
                    spawn_local(async move {
                        if let Err(e) = JsFuture::from(promise).await {
                            log::debug!("{} rejected: {:?}", name, e);
                        }
                    });
                }
            }
            Err(e) => log::debug!("{} failed: {:?}", name, e),
        }
        return Some(name);
    }
    None
}

pub fn request(document: &Document) {
    let Some(root) = document.document_element() else {
        return;
    };
    match call_first(root.as_ref(), &ENTER_METHODS) {
        Some(method) => log::debug!("Full-screen requested via {}", method),
        None => log::debug!("Full-screen unavailable"),
    }
}

pub fn exit(document: &Document) {
    // Leaving full-screen when not in it rejects; skip the call instead.
    if !is_fullscreen(document) {
        return;
    }
    if call_first(document.as_ref(), &EXIT_METHODS).is_none() {
        log::debug!("Full-screen exit unavailable");
    }
}

fn is_fullscreen(document: &Document) -> bool {
    ["fullscreenElement", "webkitFullscreenElement", "msFullscreenElement"]
        .iter()
        .filter_map(|prop| Reflect::get(document.as_ref(), &JsValue::from_str(prop)).ok())
        .any(|value| !value.is_null() && !value.is_undefined())
}

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::{Array, Function, Reflect};
use web_sys::{Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::error::Result;
use crate::utils::dom::{query_all, set_style, window};

pub const REVEAL_SELECTOR: &str = ".card-3d, .timeline-item, .reason-card, .roadmap-step";
pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -100px 0px";

/// An intersection observer and its callback; disconnects on drop.
pub struct ObserverHandle {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl ObserverHandle {
    fn new<F>(options: Option<&IntersectionObserverInit>, mut on_visible: F) -> Result<Self>
    where
        F: FnMut(&Element) + 'static,
    {
        let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    let target = entry.target();
                    on_visible(&target);
                    observer.unobserve(&target);
                }
            }
        }) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let function: &Function = callback.as_ref().unchecked_ref();
        let observer = match options {
            Some(options) => IntersectionObserver::new_with_options(function, options)?,
            None => IntersectionObserver::new(function)?,
        };
        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    pub fn observe(&self, element: &Element) {
        self.observer.observe(element);
    }
}

impl Drop for ObserverHandle {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

fn observer_supported() -> bool {
    window()
        .map(|win| Reflect::has(&win, &JsValue::from_str("IntersectionObserver")).unwrap_or(false))
        .unwrap_or(false)
}

/// Cards and timeline entries fade and slide in the first time they
/// scroll into view.
pub fn install_reveal(document: &Document) -> Result<Option<ObserverHandle>> {
    if !observer_supported() {
        log::debug!("IntersectionObserver unavailable, content shown as-is");
        return Ok(None);
    }

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
    options.set_root_margin(REVEAL_ROOT_MARGIN);

    let handle = ObserverHandle::new(Some(&options), |element| {
        set_style(element, "opacity", "1");
        set_style(element, "transform", "translateY(0)");
    })?;

    for element in query_all(document, REVEAL_SELECTOR)? {
        set_style(&element, "opacity", "0");
        set_style(&element, "transform", "translateY(30px)");
        set_style(&element, "transition", "opacity 0.6s ease, transform 0.6s ease");
        handle.observe(&element);
    }
    Ok(Some(handle))
}

/// Images carrying `data-src` load their source on first intersection.
pub fn install_lazy_images(document: &Document) -> Result<Option<ObserverHandle>> {
    if !observer_supported() {
        return Ok(None);
    }

    let handle = ObserverHandle::new(None, |image| {
        let Some(src) = image.get_attribute("data-src") else {
            return;
        };
        if let Err(e) = image.set_attribute("src", &src) {
            log::debug!("Failed to set lazy image source: {:?}", e);
            return;
        }
        let _ = image.class_list().add_1("loaded");
    })?;

    let images = query_all(document, "img[data-src]")?;
    log::debug!("Lazy loading {} images", images.len());
    for image in &images {
        handle.observe(image);
    }
    Ok(Some(handle))
}

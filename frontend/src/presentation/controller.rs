use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlButtonElement, HtmlElement, KeyboardEvent, TouchEvent};

use super::fullscreen;
use super::input::{respond_to_key, KeyAction, ScrollMetrics, SwipeTracker};
use super::state::{Command, Outcome, Presentation};
use super::{
    ACTIVE_CLASS, BODY_CLASS, INDICATOR_SCROLL, PREVIOUS_CLASS, PROGRESS_STYLE_ID, SLIDES,
    TRANSITION_CLASS, TRANSITION_MS,
};
use crate::error::Result;
use crate::utils::dom::{html_element_by_id, replace_style_element, set_style, smooth_options, Listener};

struct Inner {
    document: Document,
    slides: Vec<&'static str>,
    deck: Presentation,
    swipe: SwipeTracker,
    /// Clears the transition class of the slide shown last. Replacing it
    /// drops (and so cancels) the previous slide's timer.
    fade_timer: Option<Timeout>,
    /// Scroll-indicator wiring for the active slide only.
    indicator: Vec<Listener>,
}

impl Inner {
    fn section(&self, index: usize) -> Option<Element> {
        self.slides
            .get(index)
            .and_then(|id| self.document.get_element_by_id(id))
    }

    fn active_section(&self) -> Option<Element> {
        self.deck.current().and_then(|index| self.section(index))
    }

    fn body(&self) -> Option<HtmlElement> {
        self.document.body()
    }

    fn clear_markers(&self) {
        for index in 0..self.slides.len() {
            if let Some(section) = self.section(index) {
                let _ = section
                    .class_list()
                    .remove_3(ACTIVE_CLASS, PREVIOUS_CLASS, TRANSITION_CLASS);
                section.set_scroll_top(0);
            }
        }
    }

    fn show_slide(&mut self, index: usize) {
        self.fade_timer = None;
        self.indicator.clear();
        self.clear_markers();

        if let Some(section) = self.section(index) {
            let _ = section.class_list().add_2(ACTIVE_CLASS, TRANSITION_CLASS);
            section.set_scroll_top(0);

            let fading = section.clone();
            self.fade_timer = Some(Timeout::new(TRANSITION_MS, move || {
                let _ = fading.class_list().remove_1(TRANSITION_CLASS);
            }));

            match monitor_scroll(&self.document, &section) {
                Ok(listeners) => self.indicator = listeners,
                Err(e) => log::warn!("Scroll indicator unavailable: {}", e),
            }
        } else {
            log::debug!("Slide section #{} not found", self.slides[index]);
        }

        self.update_indicator(index);
        self.update_controls();
        if let Err(e) = self.update_progress() {
            log::warn!("Failed to update presentation progress: {}", e);
        }
    }

    fn update_indicator(&self, index: usize) {
        if let Ok(Some(current)) = self.document.query_selector(".current-slide") {
            current.set_text_content(Some(&(index + 1).to_string()));
        }
        if let Ok(Some(total)) = self.document.query_selector(".total-slides") {
            total.set_text_content(Some(&self.slides.len().to_string()));
        }
    }

    fn update_controls(&self) {
        let set_disabled = |id: &str, disabled: bool| {
            if let Some(button) = self
                .document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
            {
                button.set_disabled(disabled);
            }
        };
        set_disabled("prevSlide", !self.deck.can_go_back());
        set_disabled("nextSlide", !self.deck.can_go_forward());
    }

    fn update_progress(&self) -> Result<()> {
        let progress = self.deck.progress_percent();
        if let Some(body) = self.body() {
            body.style()
                .set_property("--presentation-progress", &format!("{}%", progress))?;
        }
        let css = format!(
            "body.{}::before {{ width: {}%; }}",
            BODY_CLASS, progress
        );
        replace_style_element(&self.document, PROGRESS_STYLE_ID, &css)?;
        Ok(())
    }

    fn leave(&mut self) {
        self.fade_timer = None;
        self.indicator.clear();
        if let Some(body) = self.body() {
            let _ = body.class_list().remove_1(BODY_CLASS);
        }
        fullscreen::exit(&self.document);
        self.clear_markers();
    }
}

/// Shows or hides the scroll indicator for `section` and wires its click
/// to scroll the section further down.
fn monitor_scroll(document: &Document, section: &Element) -> Result<Vec<Listener>> {
    let Some(indicator) = html_element_by_id(document, "scrollIndicator") else {
        return Ok(Vec::new());
    };

    let check = {
        let indicator = indicator.clone();
        let section = section.clone();
        move || {
            let at_bottom = ScrollMetrics::of(&section).is_at_bottom();
            set_style(&indicator, "opacity", if at_bottom { "0" } else { "1" });
            set_style(&indicator, "pointer-events", if at_bottom { "none" } else { "auto" });
        }
    };
    check();

    let on_scroll = Listener::new(section, "scroll", move |_| check())?;
    let on_click = {
        let section = section.clone();
        Listener::new(&indicator, "click", move |_| {
            let step = ScrollMetrics::of(&section).page(INDICATOR_SCROLL);
            section.scroll_by_with_scroll_to_options(&smooth_options(step));
        })?
    };
    Ok(vec![on_scroll, on_click])
}

/// Presentation mode wired to the page: buttons, keyboard and touch all
/// feed the same [`Presentation`] state machine.
pub struct PresentationController {
    inner: Rc<RefCell<Inner>>,
    listeners: Vec<Listener>,
}

impl PresentationController {
    pub fn new(document: &Document) -> Self {
        Self::with_slides(document, SLIDES.to_vec())
    }

    pub fn with_slides(document: &Document, slides: Vec<&'static str>) -> Self {
        let deck = Presentation::new(slides.len());
        Self {
            inner: Rc::new(RefCell::new(Inner {
                document: document.clone(),
                slides,
                deck,
                swipe: SwipeTracker::default(),
                fade_timer: None,
                indicator: Vec::new(),
            })),
            listeners: Vec::new(),
        }
    }

    /// Attaches the button, keyboard and touch listeners.
    pub fn install(document: &Document) -> Result<Self> {
        let mut controller = Self::new(document);

        let buttons = [
            ("presentationBtn", Command::Enter),
            ("exitPresentation", Command::Exit),
            ("prevSlide", Command::Previous),
            ("nextSlide", Command::Next),
        ];
        for (id, command) in buttons {
            let Some(button) = document.get_element_by_id(id) else {
                log::debug!("Presentation control #{} not present", id);
                continue;
            };
            let inner = controller.inner.clone();
            controller.listeners.push(Listener::new(&button, "click", move |_| {
                dispatch(&inner, command);
            })?);
        }

        let inner = controller.inner.clone();
        controller.listeners.push(Listener::new(document, "keydown", move |event: Event| {
            if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                handle_key(&inner, event);
            }
        })?);

        let inner = controller.inner.clone();
        controller.listeners.push(Listener::new(document, "touchstart", move |event: Event| {
            let Some(x) = touch_screen_x(&event) else {
                return;
            };
            let mut inner = inner.borrow_mut();
            if inner.deck.is_active() {
                inner.swipe.begin(x);
            }
        })?);

        let inner = controller.inner.clone();
        controller.listeners.push(Listener::new(document, "touchend", move |event: Event| {
            let Some(x) = touch_screen_x(&event) else {
                return;
            };
            let command = {
                let mut inner = inner.borrow_mut();
                if !inner.deck.is_active() {
                    return;
                }
                inner.swipe.finish(x)
            };
            if let Some(command) = command {
                dispatch(&inner, command);
            }
        })?);

        Ok(controller)
    }

    pub fn dispatch(&self, command: Command) -> Outcome {
        dispatch(&self.inner, command)
    }

    pub fn handle_key(&self, event: &KeyboardEvent) {
        handle_key(&self.inner, event);
    }

    /// Feeds a completed horizontal swipe, in screen coordinates.
    pub fn swipe(&self, start_x: f64, end_x: f64) -> Outcome {
        let command = {
            let mut inner = self.inner.borrow_mut();
            if !inner.deck.is_active() {
                return Outcome::Ignored;
            }
            inner.swipe.begin(start_x);
            inner.swipe.finish(end_x)
        };
        command.map_or(Outcome::Ignored, |command| self.dispatch(command))
    }

    pub fn current_slide(&self) -> Option<usize> {
        self.inner.borrow().deck.current()
    }

    pub fn is_active(&self) -> bool {
        self.inner.borrow().deck.is_active()
    }
}

impl Drop for PresentationController {
    fn drop(&mut self) {
        let mut inner = self.inner.borrow_mut();
        if inner.deck.is_active() {
            inner.deck.dispatch(Command::Exit);
            inner.leave();
        }
        inner.fade_timer = None;
        inner.indicator.clear();

        if let Some(style) = inner.document.get_element_by_id(PROGRESS_STYLE_ID) {
            style.remove();
        }
        if let Some(body) = inner.body() {
            let _ = body.style().remove_property("--presentation-progress");
        }
    }
}

fn touch_screen_x(event: &Event) -> Option<f64> {
    event
        .dyn_ref::<TouchEvent>()
        .and_then(|touch| touch.changed_touches().get(0))
        .map(|touch| touch.screen_x() as f64)
}

fn dispatch(inner: &Rc<RefCell<Inner>>, command: Command) -> Outcome {
    let mut inner = inner.borrow_mut();
    let outcome = inner.deck.dispatch(command);
    match outcome {
        Outcome::Entered(index) => {
            log::info!("Entering presentation mode");
            if let Some(body) = inner.body() {
                let _ = body.class_list().add_1(BODY_CLASS);
            }
            inner.show_slide(index);
            fullscreen::request(&inner.document);
        }
        Outcome::Moved { to, .. } => inner.show_slide(to),
        Outcome::Exited => {
            log::info!("Leaving presentation mode");
            inner.leave();
        }
        Outcome::Ignored => log::trace!("Ignored {:?} in {:?}", command, inner.deck.mode()),
    }
    outcome
}

fn handle_key(inner: &Rc<RefCell<Inner>>, event: &KeyboardEvent) {
    let (response, section) = {
        let inner = inner.borrow();
        if !inner.deck.is_active() {
            return;
        }
        let section = inner.active_section();
        let metrics = section.as_ref().map(ScrollMetrics::of);
        (
            respond_to_key(&event.key(), metrics, inner.deck.slide_count()),
            section,
        )
    };

    if response.prevent_default {
        event.prevent_default();
    }

    match response.action {
        KeyAction::Command(command) => {
            dispatch(inner, command);
        }
        KeyAction::ScrollBy(delta) => {
            if let Some(section) = section {
                section.scroll_by_with_scroll_to_options(&smooth_options(delta));
            }
        }
        KeyAction::ScrollTo(top) => {
            if let Some(section) = section {
                section.scroll_to_with_scroll_to_options(&smooth_options(top));
            }
        }
        KeyAction::Nothing => {}
    }
}

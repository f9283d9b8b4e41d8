//! Browser tests: `wasm-pack test --headless --firefox frontend`.
#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{
    Document, Element, Event, HtmlButtonElement, HtmlElement, HtmlInputElement, KeyboardEvent,
    KeyboardEventInit,
};

use portfolio_frontend::config::EffectsConfig;
use portfolio_frontend::effects::Effects;
use portfolio_frontend::i18n::{apply_language, install_language_buttons, Language, LanguageSwitch};
use portfolio_frontend::presentation::{
    Command, Outcome, PresentationController, ACTIVE_CLASS, PROGRESS_STYLE_ID, SLIDES,
    TRANSITION_CLASS,
};

wasm_bindgen_test_configure!(run_in_browser);

/// Markup mounted for the duration of one test.
struct Fixture {
    document: Document,
    root: Element,
}

impl Fixture {
    fn new(html: &str) -> Self {
        let document = web_sys::window().unwrap().document().unwrap();
        let root = document.create_element("div").unwrap();
        root.set_inner_html(html);
        document.body().unwrap().append_child(&root).unwrap();
        Self { document, root }
    }

    fn by_id(&self, id: &str) -> Element {
        self.document.get_element_by_id(id).unwrap()
    }

    fn has_class(&self, id: &str, class: &str) -> bool {
        self.by_id(id).class_list().contains(class)
    }

    fn active_slides(&self) -> usize {
        SLIDES
            .iter()
            .filter(|id| self.has_class(id, ACTIVE_CLASS))
            .count()
    }

    fn click(&self, id: &str) {
        self.by_id(id).dyn_into::<HtmlElement>().unwrap().click();
    }

    fn style(&self, id: &str, property: &str) -> String {
        self.by_id(id)
            .dyn_into::<HtmlElement>()
            .unwrap()
            .style()
            .get_property_value(property)
            .unwrap()
    }

    fn button_disabled(&self, id: &str) -> bool {
        self.by_id(id).dyn_into::<HtmlButtonElement>().unwrap().disabled()
    }

    fn text(&self, selector: &str) -> String {
        self.document
            .query_selector(selector)
            .unwrap()
            .unwrap()
            .text_content()
            .unwrap_or_default()
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        self.root.remove();
    }
}

const DECK: &str = r#"
    <section id="about" class="section">About</section>
    <section id="capgemini" class="section">Capgemini</section>
    <section id="pfe" class="section">PFE</section>
    <button id="prevSlide">prev</button>
    <button id="nextSlide">next</button>
    <span class="current-slide"></span>/<span class="total-slides"></span>
"#;

/// `#about` scrolls, `#capgemini` fits in its box.
const TALL_DECK: &str = r#"
    <section id="about" class="section" style="height: 200px; overflow-y: auto;">
        <div style="height: 2000px;">About</div>
    </section>
    <section id="capgemini" class="section" style="height: 200px; overflow-y: auto;">Capgemini</section>
    <section id="pfe" class="section">PFE</section>
    <div id="scrollIndicator">More</div>
"#;

fn scroll_event() -> Event {
    Event::new("scroll").unwrap()
}

fn key(name: &str) -> KeyboardEvent {
    let init = KeyboardEventInit::new();
    init.set_key(name);
    init.set_cancelable(true);
    KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap()
}

#[wasm_bindgen_test]
fn switching_language_rewrites_tagged_elements() {
    let page = Fixture::new(
        r#"
        <h1 id="title" data-fr="Bonjour" data-en="Hello">Bonjour</h1>
        <p id="partial" data-fr="Seulement" data-en="">Seulement</p>
        <input id="email" data-fr="Votre e-mail" data-en="Your email" placeholder="Votre e-mail">
        <p id="plain">Untouched</p>
        "#,
    );

    apply_language(&page.document, Language::En).unwrap();

    assert_eq!(page.by_id("title").text_content().unwrap(), "Hello");
    assert_eq!(page.by_id("partial").text_content().unwrap(), "Seulement");
    assert_eq!(page.by_id("plain").text_content().unwrap(), "Untouched");
    let input = page.by_id("email").dyn_into::<HtmlInputElement>().unwrap();
    assert_eq!(input.placeholder(), "Your email");
    assert_eq!(input.value(), "");

    apply_language(&page.document, Language::Fr).unwrap();
    assert_eq!(page.by_id("title").text_content().unwrap(), "Bonjour");
}

#[wasm_bindgen_test]
fn experience_bullets_follow_the_language() {
    let page = Fixture::new(
        r#"
        <div class="experience-card">
            <ul class="experience-list">
                <li id="bullet" data-en="Built pipelines">Construit des pipelines</li>
            </ul>
        </div>
        "#,
    );

    apply_language(&page.document, Language::En).unwrap();
    assert_eq!(page.by_id("bullet").text_content().unwrap(), "Built pipelines");

    // No French text on the bullet: left as it is.
    apply_language(&page.document, Language::Fr).unwrap();
    assert_eq!(page.by_id("bullet").text_content().unwrap(), "Built pipelines");
}

#[wasm_bindgen_test]
fn arrow_keys_walk_the_deck_until_escape() {
    let page = Fixture::new(DECK);
    let controller = PresentationController::new(&page.document);

    // Keys are ignored until presentation mode starts.
    controller.handle_key(&key("ArrowRight"));
    assert_eq!(controller.current_slide(), None);

    assert_eq!(controller.dispatch(Command::Enter), Outcome::Entered(0));
    assert!(page.button_disabled("prevSlide"));
    assert!(!page.button_disabled("nextSlide"));
    assert_eq!(page.text(".current-slide"), "1");
    assert_eq!(page.text(".total-slides"), "3");

    controller.handle_key(&key("ArrowRight"));
    controller.handle_key(&key("ArrowRight"));
    assert_eq!(controller.current_slide(), Some(2));
    assert!(page.has_class("pfe", ACTIVE_CLASS));
    assert!(page.button_disabled("nextSlide"));
    assert!(!page.button_disabled("prevSlide"));
    assert_eq!(page.text(".current-slide"), "3");

    controller.handle_key(&key("ArrowRight"));
    assert_eq!(controller.current_slide(), Some(2));

    let escape = key("Escape");
    controller.handle_key(&escape);
    assert!(escape.default_prevented());
    assert!(!controller.is_active());
}

#[wasm_bindgen_test]
fn language_buttons_keep_a_single_active_button() {
    let page = Fixture::new(
        r#"
        <button id="btn-fr" class="lang-btn active" data-lang="fr">FR</button>
        <button id="btn-en" class="lang-btn" data-lang="en">EN</button>
        <p id="greeting" data-fr="Bonjour" data-en="Hello">Bonjour</p>
        "#,
    );
    let state = Rc::new(RefCell::new(LanguageSwitch::default()));
    let _buttons = install_language_buttons(&page.document, state.clone()).unwrap();

    page.click("btn-en");
    assert!(page.has_class("btn-en", "active"));
    assert!(!page.has_class("btn-fr", "active"));
    assert_eq!(state.borrow().current(), Language::En);
    assert_eq!(page.by_id("greeting").text_content().unwrap(), "Hello");

    page.click("btn-fr");
    assert!(page.has_class("btn-fr", "active"));
    assert!(!page.has_class("btn-en", "active"));
    assert_eq!(page.by_id("greeting").text_content().unwrap(), "Bonjour");
}

#[wasm_bindgen_test]
fn installed_controller_answers_buttons_and_document_keys() {
    let page = Fixture::new(&format!(
        r#"{}<button id="presentationBtn">present</button>"#,
        DECK
    ));
    let controller = PresentationController::install(&page.document).unwrap();

    page.document.dispatch_event(&key("ArrowRight")).unwrap();
    assert_eq!(controller.current_slide(), None);

    page.click("presentationBtn");
    assert_eq!(controller.current_slide(), Some(0));

    page.document.dispatch_event(&key("ArrowRight")).unwrap();
    assert_eq!(controller.current_slide(), Some(1));
    page.click("nextSlide");
    assert_eq!(controller.current_slide(), Some(2));
    page.click("prevSlide");
    assert_eq!(controller.current_slide(), Some(1));

    page.document.dispatch_event(&key("Escape")).unwrap();
    assert!(!controller.is_active());
    assert_eq!(page.active_slides(), 0);
}

#[wasm_bindgen_test]
fn dropping_an_active_controller_leaves_presentation_mode() {
    let page = Fixture::new(DECK);
    let controller = PresentationController::install(&page.document).unwrap();
    controller.dispatch(Command::Enter);
    controller.dispatch(Command::Next);
    assert!(page.document.get_element_by_id(PROGRESS_STYLE_ID).is_some());

    drop(controller);

    let body = page.document.body().unwrap();
    assert!(!body.class_list().contains("presentation-mode"));
    assert_eq!(page.active_slides(), 0);
    assert!(!page.has_class("capgemini", TRANSITION_CLASS));
    assert!(page.document.get_element_by_id(PROGRESS_STYLE_ID).is_none());
    assert_eq!(
        body.style().get_property_value("--presentation-progress").unwrap(),
        ""
    );
}

#[wasm_bindgen_test]
fn scroll_indicator_tracks_the_active_slide_only() {
    let page = Fixture::new(TALL_DECK);
    let controller = PresentationController::new(&page.document);

    controller.dispatch(Command::Enter);
    assert_eq!(page.style("scrollIndicator", "opacity"), "1");
    assert_eq!(page.style("scrollIndicator", "pointer-events"), "auto");

    let about = page.by_id("about");
    about.set_scroll_top(about.scroll_height() - about.client_height());
    about.dispatch_event(&scroll_event()).unwrap();
    assert_eq!(page.style("scrollIndicator", "opacity"), "0");
    assert_eq!(page.style("scrollIndicator", "pointer-events"), "none");

    // Nothing left to scroll on the next slide.
    controller.dispatch(Command::Next);
    assert_eq!(page.style("scrollIndicator", "opacity"), "0");

    // The previous slide's listener is gone, so its scrolling is ignored.
    assert_eq!(about.scroll_top(), 0);
    about.dispatch_event(&scroll_event()).unwrap();
    assert_eq!(page.style("scrollIndicator", "opacity"), "0");

    controller.dispatch(Command::Previous);
    assert_eq!(page.style("scrollIndicator", "opacity"), "1");
    controller.dispatch(Command::Exit);
}

#[wasm_bindgen_test]
async fn scroll_indicator_click_scrolls_most_of_a_screen() {
    let page = Fixture::new(TALL_DECK);
    let controller = PresentationController::new(&page.document);
    controller.dispatch(Command::Enter);

    page.click("scrollIndicator");
    TimeoutFuture::new(1500).await;

    // 80% of the 200px viewport.
    let top = page.by_id("about").scroll_top();
    assert!((150..=170).contains(&top), "scrolled to {}", top);
    controller.dispatch(Command::Exit);
}

#[wasm_bindgen_test]
fn exactly_one_slide_is_active() {
    let page = Fixture::new(DECK);
    let controller = PresentationController::new(&page.document);
    assert_eq!(page.active_slides(), 0);

    controller.dispatch(Command::Enter);
    for command in [Command::Next, Command::GoTo(2), Command::Previous, Command::GoTo(9)] {
        controller.dispatch(command);
        assert_eq!(page.active_slides(), 1);
    }
    assert!(page.has_class("capgemini", ACTIVE_CLASS));

    controller.dispatch(Command::Exit);
    assert_eq!(page.active_slides(), 0);
}

#[wasm_bindgen_test]
fn exiting_restores_section_classes() {
    let page = Fixture::new(DECK);
    let before: Vec<String> = SLIDES.iter().map(|id| page.by_id(id).class_name()).collect();

    let controller = PresentationController::new(&page.document);
    controller.dispatch(Command::Enter);
    controller.dispatch(Command::Next);
    controller.dispatch(Command::Exit);

    let after: Vec<String> = SLIDES.iter().map(|id| page.by_id(id).class_name()).collect();
    assert_eq!(before, after);
    let body = page.document.body().unwrap();
    assert!(!body.class_list().contains("presentation-mode"));
}

#[wasm_bindgen_test]
fn swipes_past_the_threshold_navigate_once() {
    let page = Fixture::new(DECK);
    let controller = PresentationController::new(&page.document);

    assert_eq!(controller.swipe(300.0, 240.0), Outcome::Ignored);

    controller.dispatch(Command::Enter);
    assert_eq!(controller.swipe(300.0, 240.0), Outcome::Moved { from: 0, to: 1 });
    assert_eq!(controller.swipe(300.0, 270.0), Outcome::Ignored);
    assert_eq!(controller.current_slide(), Some(1));
    assert_eq!(controller.swipe(200.0, 300.0), Outcome::Moved { from: 1, to: 0 });
}

#[wasm_bindgen_test]
fn progress_style_is_replaced_not_accumulated() {
    let page = Fixture::new(DECK);
    let controller = PresentationController::new(&page.document);
    controller.dispatch(Command::Enter);
    controller.dispatch(Command::Next);
    controller.dispatch(Command::Next);

    let styles = page
        .document
        .query_selector_all(&format!("#{}", PROGRESS_STYLE_ID))
        .unwrap();
    assert_eq!(styles.length(), 1);
    let css = page.by_id(PROGRESS_STYLE_ID).text_content().unwrap();
    assert!(css.contains("width: 100%"));

    let body = page.document.body().unwrap();
    assert_eq!(
        body.style().get_property_value("--presentation-progress").unwrap(),
        "100%"
    );
    controller.dispatch(Command::Exit);
}

#[wasm_bindgen_test]
async fn newer_transition_cancels_stale_fade_timer() {
    let page = Fixture::new(DECK);
    let controller = PresentationController::new(&page.document);

    controller.dispatch(Command::Enter);
    assert!(page.has_class("about", TRANSITION_CLASS));

    TimeoutFuture::new(500).await;
    controller.dispatch(Command::Next);
    controller.dispatch(Command::Previous);

    // The first timer would have fired at 800ms; the slide must keep its
    // transition until its own timer runs.
    TimeoutFuture::new(400).await;
    assert!(page.has_class("about", TRANSITION_CLASS));

    TimeoutFuture::new(600).await;
    assert!(!page.has_class("about", TRANSITION_CLASS));
    assert!(page.has_class("about", ACTIVE_CLASS));
    controller.dispatch(Command::Exit);
}

#[wasm_bindgen_test]
fn effects_skip_absent_markup() {
    let page = Fixture::new(r#"<button id="ripple-btn" class="btn">Go</button>"#);
    let config = EffectsConfig {
        avatar: false,
        blobs: false,
        ..EffectsConfig::default()
    };
    let effects = Effects::install(&page.document, &config);
    assert!(effects.has_progress_bar());
    assert!(!effects.has_avatar_loop());
    assert!(!effects.has_blob_drift());
    assert!(page.document.get_element_by_id("ripple-style").is_some());

    page.click("ripple-btn");
    page.click("ripple-btn");
    let ripples = page.by_id("ripple-btn").get_elements_by_class_name("ripple");
    assert_eq!(ripples.length(), 1);

    drop(effects);
    assert!(page.document.get_element_by_id("ripple-style").is_none());
}

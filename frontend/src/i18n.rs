use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement, HtmlTextAreaElement};

use crate::error::Result;
use crate::utils::dom::{query_all, query_all_in, Listener};

/// Languages the page markup carries text for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Fr,
    En,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Fr, Language::En];

    pub fn code(self) -> &'static str {
        match self {
            Language::Fr => "fr",
            Language::En => "en",
        }
    }

    /// Markup attribute holding this language's text, e.g. `data-fr`.
    pub fn attribute(self) -> &'static str {
        match self {
            Language::Fr => "data-fr",
            Language::En => "data-en",
        }
    }

    /// Selector matching elements that carry text for every language.
    pub fn tagged_selector() -> String {
        Self::ALL
            .iter()
            .map(|lang| format!("[{}]", lang.attribute()))
            .collect()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLanguage(pub String);

impl fmt::Display for UnknownLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown language code '{}'", self.0)
    }
}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(code: &str) -> std::result::Result<Self, Self::Err> {
        match code.trim().to_ascii_lowercase().as_str() {
            "fr" => Ok(Language::Fr),
            "en" => Ok(Language::En),
            _ => Err(UnknownLanguage(code.to_string())),
        }
    }
}

/// Where an element shows its localized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSlot {
    Content,
    Placeholder,
}

impl TextSlot {
    pub fn for_tag(tag_name: &str) -> Self {
        if tag_name.eq_ignore_ascii_case("input") || tag_name.eq_ignore_ascii_case("textarea") {
            TextSlot::Placeholder
        } else {
            TextSlot::Content
        }
    }
}

/// Text to display for an attribute value; absent or empty values mean
/// "leave the element as it is".
pub fn localized_text(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

/// The page's active language. Only `select` changes it.
#[derive(Debug, Default)]
pub struct LanguageSwitch {
    current: Language,
}

impl LanguageSwitch {
    pub fn new(initial: Language) -> Self {
        Self { current: initial }
    }

    pub fn current(&self) -> Language {
        self.current
    }

    /// Records `lang` as active. Returns whether it changed.
    pub fn select(&mut self, lang: Language) -> bool {
        let changed = self.current != lang;
        self.current = lang;
        changed
    }
}

fn apply_to_element(element: &Element, lang: Language) -> bool {
    let Some(text) = localized_text(element.get_attribute(lang.attribute())) else {
        return false;
    };
    match TextSlot::for_tag(&element.tag_name()) {
        TextSlot::Placeholder => {
            if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
                input.set_placeholder(&text);
            } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
                area.set_placeholder(&text);
            }
        }
        TextSlot::Content => element.set_text_content(Some(&text)),
    }
    true
}

/// Rewrites every locale-tagged element of `document` to `lang`.
/// Returns the number of elements updated.
pub fn apply_language(document: &Document, lang: Language) -> Result<usize> {
    let mut updated = 0;
    for element in query_all(document, &Language::tagged_selector())? {
        if apply_to_element(&element, lang) {
            updated += 1;
        }
    }

    // Experience bullets may be tagged with the current language only.
    for card in query_all(document, ".experience-card")? {
        let Ok(Some(list)) = card.query_selector(".experience-list") else {
            continue;
        };
        for item in query_all_in(&list, "li")? {
            if let Some(text) = localized_text(item.get_attribute(lang.attribute())) {
                item.set_text_content(Some(&text));
                updated += 1;
            }
        }
    }

    log::debug!("Applied language {} to {} elements", lang, updated);
    Ok(updated)
}

/// Selects `lang` in `state` and rewrites the document.
pub fn switch_language(
    document: &Document,
    state: &RefCell<LanguageSwitch>,
    lang: Language,
) -> Result<usize> {
    if state.borrow_mut().select(lang) {
        log::info!("Language switched to {}", lang);
    }
    apply_language(document, lang)
}

/// Wires the `.lang-btn` controls. Each carries its code in `data-lang`.
pub fn install_language_buttons(
    document: &Document,
    state: Rc<RefCell<LanguageSwitch>>,
) -> Result<Vec<Listener>> {
    let buttons = query_all(document, ".lang-btn")?;
    let mut listeners = Vec::with_capacity(buttons.len());

    for button in &buttons {
        let document = document.clone();
        let state = state.clone();
        let all_buttons = buttons.clone();
        let this = button.clone();
        let listener = Listener::new(button, "click", move |_| {
            let Some(code) = this.get_attribute("data-lang") else {
                return;
            };
            let lang = match code.parse::<Language>() {
                Ok(lang) => lang,
                Err(e) => {
                    log::warn!("{}", e);
                    return;
                }
            };
            if let Err(e) = switch_language(&document, &state, lang) {
                log::error!("Failed to switch language: {}", e);
            }
            for other in &all_buttons {
                let _ = other.class_list().remove_1("active");
            }
            let _ = this.class_list().add_1("active");
        })?;
        listeners.push(listener);
    }

    Ok(listeners)
}

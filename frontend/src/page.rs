use std::cell::RefCell;
use std::rc::Rc;

use web_sys::Document;

use crate::config::{PageConfig, SignatureLine};
use crate::effects::Effects;
use crate::error::Result;
use crate::i18n::{self, Language, LanguageSwitch};
use crate::presentation::PresentationController;
use crate::utils::dom::Listener;

/// Everything mounted on the document. Dropping it detaches every listener,
/// observer, timer and frame loop the page installed.
pub struct Page {
    document: Document,
    language: Rc<RefCell<LanguageSwitch>>,
    presentation: Option<PresentationController>,
    effects: Effects,
    _language_buttons: Vec<Listener>,
}

impl Page {
    pub fn mount(document: &Document, config: &PageConfig) -> Self {
        let language = Rc::new(RefCell::new(LanguageSwitch::new(config.default_language)));

        let language_buttons = i18n::install_language_buttons(document, language.clone())
            .unwrap_or_else(|e| {
                log::warn!("Language buttons unavailable: {}", e);
                Vec::new()
            });

        let effects = Effects::install(document, &config.effects);

        let presentation = match PresentationController::install(document) {
            Ok(controller) => Some(controller),
            Err(e) => {
                log::warn!("Presentation mode unavailable: {}", e);
                None
            }
        };

        print_signature(&config.signature);
        log::info!(
            "Page mounted ({} language buttons, {} effect listeners)",
            language_buttons.len(),
            effects.listener_count()
        );

        Self {
            document: document.clone(),
            language,
            presentation,
            effects,
            _language_buttons: language_buttons,
        }
    }

    pub fn language(&self) -> Language {
        self.language.borrow().current()
    }

    pub fn switch_language(&self, lang: Language) -> Result<usize> {
        i18n::switch_language(&self.document, &self.language, lang)
    }

    pub fn presentation(&self) -> Option<&PresentationController> {
        self.presentation.as_ref()
    }

    pub fn effects(&self) -> &Effects {
        &self.effects
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        log::info!("Page unmounted");
    }
}

fn print_signature(lines: &[SignatureLine]) {
    for line in lines {
        gloo_console::log!(format!("%c{}", line.text), line.style.clone());
    }
}

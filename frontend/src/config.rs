use serde::{Deserialize, Deserializer};
use web_sys::Document;

use crate::error::Result;
use crate::i18n::Language;

/// Id of the optional `<script type="application/json">` block holding
/// page settings.
pub const CONFIG_ELEMENT_ID: &str = "page-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub default_language: Language,
    #[serde(deserialize_with = "lenient_level")]
    pub log_level: log::Level,
    pub effects: EffectsConfig,
    pub signature: Vec<SignatureLine>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            default_language: Language::default(),
            log_level: log::Level::Info,
            effects: EffectsConfig::default(),
            signature: default_signature(),
        }
    }
}

/// Unknown level names fall back to `info` with a warning rather than
/// discarding the whole config.
fn lenient_level<'de, D>(deserializer: D) -> std::result::Result<log::Level, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    Ok(name.parse().unwrap_or_else(|_| {
        log::warn!("Unknown log level {:?}, using info", name);
        log::Level::Info
    }))
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    pub smooth_scroll: bool,
    pub nav_highlight: bool,
    pub reveal: bool,
    pub tilt: bool,
    pub blobs: bool,
    pub parallax: bool,
    pub ripple: bool,
    pub progress_bar: bool,
    pub lazy_images: bool,
    pub avatar: bool,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            smooth_scroll: true,
            nav_highlight: true,
            reveal: true,
            tilt: true,
            blobs: true,
            parallax: true,
            ripple: true,
            progress_bar: true,
            lazy_images: true,
            avatar: true,
        }
    }
}

/// One styled line printed to the browser console on load.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SignatureLine {
    pub text: String,
    #[serde(default)]
    pub style: String,
}

fn default_signature() -> Vec<SignatureLine> {
    let line = |text: &str, style: &str| SignatureLine {
        text: text.to_string(),
        style: style.to_string(),
    };
    vec![
        line(
            " Designed for Capgemini Engineering PFE ",
            "background: linear-gradient(135deg, #0070AD, #12ABDB); color: white; padding: 10px 20px; font-size: 16px; font-weight: bold;",
        ),
        line(
            " Ala HSOUNA - Software & AI Engineer ",
            "color: #0070AD; font-size: 14px; font-weight: bold;",
        ),
        line(
            " Contact: ala.hassouna.tn@gmail.com ",
            "color: #5A6C7D; font-size: 12px;",
        ),
    ]
}

impl PageConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads the config block from the page, falling back to defaults when
    /// it is absent or malformed.
    pub fn from_document(document: &Document) -> Self {
        let Some(text) = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
        else {
            return Self::default();
        };
        if text.trim().is_empty() {
            return Self::default();
        }
        Self::from_json(&text).unwrap_or_else(|e| {
            log::warn!("{}, using defaults", e);
            Self::default()
        })
    }
}

//! Presentation mode: one page section at a time, full-screen, driven by
//! buttons, keyboard and swipes.

pub mod controller;
pub mod fullscreen;
pub mod input;
pub mod state;

pub use controller::PresentationController;
pub use state::{Command, Mode, Outcome, Presentation};

/// Section ids shown as slides, in order.
pub const SLIDES: [&str; 3] = ["about", "capgemini", "pfe"];

pub const BODY_CLASS: &str = "presentation-mode";
pub const ACTIVE_CLASS: &str = "active-slide";
pub const PREVIOUS_CLASS: &str = "prev-slide";
pub const TRANSITION_CLASS: &str = "slide-transition-fade";
pub const PROGRESS_STYLE_ID: &str = "progress-style";

/// How long a freshly shown slide keeps its transition class.
pub const TRANSITION_MS: u32 = 800;

/// Fraction of the visible height the scroll indicator advances by.
pub const INDICATOR_SCROLL: f64 = 0.8;

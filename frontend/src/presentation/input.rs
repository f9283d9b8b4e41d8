//! Maps raw keyboard and touch input onto presentation commands.

use super::state::Command;

pub const BOTTOM_TOLERANCE: f64 = 50.0;
pub const TOP_TOLERANCE: f64 = 10.0;
pub const SWIPE_THRESHOLD: f64 = 50.0;

const SPACE_SCROLL: f64 = 0.8;
const PAGE_SCROLL: f64 = 0.9;

/// Scroll geometry of the active slide section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl ScrollMetrics {
    pub fn of(element: &web_sys::Element) -> Self {
        Self {
            scroll_top: element.scroll_top() as f64,
            scroll_height: element.scroll_height() as f64,
            client_height: element.client_height() as f64,
        }
    }

    pub fn is_at_bottom(&self) -> bool {
        self.scroll_height - self.scroll_top <= self.client_height + BOTTOM_TOLERANCE
    }

    pub fn is_at_top(&self) -> bool {
        self.scroll_top <= TOP_TOLERANCE
    }

    pub fn page(&self, fraction: f64) -> f64 {
        self.client_height * fraction
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyAction {
    Command(Command),
    /// Scroll the active section by a relative offset.
    ScrollBy(f64),
    /// Scroll the active section to an absolute offset.
    ScrollTo(f64),
    Nothing,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyResponse {
    pub action: KeyAction,
    pub prevent_default: bool,
}

impl KeyResponse {
    fn handled(action: KeyAction) -> Self {
        Self {
            action,
            prevent_default: true,
        }
    }

    fn passthrough() -> Self {
        Self {
            action: KeyAction::Nothing,
            prevent_default: false,
        }
    }
}

/// Decides what a key press does while presentation mode is active.
///
/// `section` is the active slide's scroll state, if that section exists.
pub fn respond_to_key(key: &str, section: Option<ScrollMetrics>, slide_count: usize) -> KeyResponse {
    let at_bottom = section.is_some_and(|m| m.is_at_bottom());
    let at_top = section.is_some_and(|m| m.is_at_top());

    let scroll_or = |command: Command, at_edge: bool, fraction: f64| {
        if at_edge {
            KeyAction::Command(command)
        } else {
            section.map_or(KeyAction::Nothing, |m| KeyAction::ScrollBy(m.page(fraction)))
        }
    };

    match key {
        "ArrowRight" => KeyResponse::handled(KeyAction::Command(Command::Next)),
        "ArrowLeft" => KeyResponse::handled(KeyAction::Command(Command::Previous)),
        " " | "Spacebar" => KeyResponse::handled(scroll_or(Command::Next, at_bottom, SPACE_SCROLL)),
        "PageDown" => KeyResponse::handled(scroll_or(Command::Next, at_bottom, PAGE_SCROLL)),
        "PageUp" => KeyResponse::handled(scroll_or(Command::Previous, at_top, -PAGE_SCROLL)),
        "ArrowDown" if at_bottom => KeyResponse::handled(KeyAction::Command(Command::Next)),
        "ArrowUp" if at_top => KeyResponse::handled(KeyAction::Command(Command::Previous)),
        "Escape" | "Esc" => KeyResponse::handled(KeyAction::Command(Command::Exit)),
        "Home" => KeyResponse::handled(match section {
            Some(m) if m.scroll_top > 0.0 => KeyAction::ScrollTo(0.0),
            _ => KeyAction::Command(Command::GoTo(0)),
        }),
        "End" => KeyResponse::handled(match section {
            Some(m) if !m.is_at_bottom() => KeyAction::ScrollTo(m.scroll_height),
            _ => KeyAction::Command(Command::GoTo(slide_count.saturating_sub(1))),
        }),
        _ => KeyResponse::passthrough(),
    }
}

/// Horizontal swipe detection between `touchstart` and `touchend`.
#[derive(Debug, Default, Clone)]
pub struct SwipeTracker {
    start_x: Option<f64>,
}

impl SwipeTracker {
    pub fn begin(&mut self, x: f64) {
        self.start_x = Some(x);
    }

    pub fn finish(&mut self, x: f64) -> Option<Command> {
        let start = self.start_x.take()?;
        classify_swipe(start, x)
    }
}

pub fn classify_swipe(start_x: f64, end_x: f64) -> Option<Command> {
    let displacement = start_x - end_x;
    if displacement.abs() <= SWIPE_THRESHOLD {
        return None;
    }
    if displacement > 0.0 {
        Some(Command::Next)
    } else {
        Some(Command::Previous)
    }
}

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Interval;
use rand::Rng;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, MouseEvent};

use crate::error::{Error, Result};
use crate::utils::dom::{query_all, set_style, window, Listener};

pub const BLOB_SELECTOR: &str = ".blob, .capgemini-blob, .pfe-blob";
pub const HERO_BLOB_SELECTOR: &str = ".hero-background .blob";
pub const AVATAR_SELECTOR: &str = ".avatar-circle";

/// Drift period and travel range of the blob at `index`.
pub fn blob_timing(index: usize) -> (u32, f64) {
    let period_ms = 20_000 + index as u32 * 5_000;
    let range = 50.0 + index as f64 * 20.0;
    (period_ms, range)
}

/// Random point within `±range / 2` on both axes.
pub fn drift_offset<R: Rng + ?Sized>(rng: &mut R, range: f64) -> (f64, f64) {
    let x = rng.gen::<f64>() * range - range / 2.0;
    let y = rng.gen::<f64>() * range - range / 2.0;
    (x, y)
}

pub fn parallax_offset(scroll_y: f64, index: usize) -> f64 {
    scroll_y * (0.3 + index as f64 * 0.1)
}

/// Background blobs wander to a new random spot once per period. Dropping
/// the value stops every timer.
pub struct BlobDrift {
    _timers: Vec<Interval>,
}

pub fn install_blob_drift(document: &Document) -> Result<BlobDrift> {
    let blobs = query_all(document, BLOB_SELECTOR)?;
    let timers = blobs
        .into_iter()
        .enumerate()
        .map(|(index, blob)| {
            let (period_ms, range) = blob_timing(index);
            Interval::new(period_ms, move || {
                let (x, y) = drift_offset(&mut rand::thread_rng(), range);
                set_style(&blob, "transition", &format!("transform {}ms ease-in-out", period_ms));
                set_style(&blob, "transform", &format!("translate({}px, {}px)", x, y));
            })
        })
        .collect::<Vec<_>>();
    log::debug!("Drifting {} blobs", timers.len());
    Ok(BlobDrift { _timers: timers })
}

/// Hero blobs trail the scroll position at increasing speeds.
pub fn install_parallax(document: &Document) -> Result<Listener> {
    let blobs = query_all(document, HERO_BLOB_SELECTOR)?;
    let win = window()?;
    let scroller = win.clone();
    Listener::new(&win, "scroll", move |_| {
        let scroll_y = scroller.scroll_y().unwrap_or(0.0);
        for (index, blob) in blobs.iter().enumerate() {
            let offset = parallax_offset(scroll_y, index);
            set_style(blob, "transform", &format!("translateY({}px)", offset));
        }
    })
}

/// Eases the avatar towards the pointer, one step per frame.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AvatarFollow {
    pub target: (f64, f64),
    pub position: (f64, f64),
}

impl AvatarFollow {
    pub const REACH: f64 = 20.0;
    pub const EASING: f64 = 0.05;

    /// Records the pointer as a fraction of the viewport.
    pub fn point_at(&mut self, x: f64, y: f64, viewport_width: f64, viewport_height: f64) {
        if viewport_width > 0.0 && viewport_height > 0.0 {
            self.target = (x / viewport_width - 0.5, y / viewport_height - 0.5);
        }
    }

    pub fn step(&mut self) -> (f64, f64) {
        let (tx, ty) = self.target;
        let (x, y) = &mut self.position;
        *x += (tx * Self::REACH - *x) * Self::EASING;
        *y += (ty * Self::REACH - *y) * Self::EASING;
        self.position
    }
}

struct Frames {
    id: Option<i32>,
    tick: Option<Closure<dyn FnMut()>>,
}

fn schedule(frames: &Rc<RefCell<Frames>>) {
    let mut frames = frames.borrow_mut();
    let Some(tick) = frames.tick.as_ref() else {
        return;
    };
    let requested = window().and_then(|win| {
        win.request_animation_frame(tick.as_ref().unchecked_ref())
            .map_err(Error::from)
    });
    match requested {
        Ok(id) => frames.id = Some(id),
        Err(e) => log::warn!("Avatar animation stopped: {}", e),
    }
}

/// The avatar's animation-frame loop plus its pointer listener. Dropping it
/// cancels the pending frame and breaks the loop.
pub struct AvatarLoop {
    frames: Rc<RefCell<Frames>>,
    _pointer: Listener,
}

impl Drop for AvatarLoop {
    fn drop(&mut self) {
        let mut frames = self.frames.borrow_mut();
        if let Some(id) = frames.id.take() {
            if let Ok(win) = window() {
                let _ = win.cancel_animation_frame(id);
            }
        }
        frames.tick = None;
    }
}

pub fn install_avatar(document: &Document) -> Result<Option<AvatarLoop>> {
    let Some(avatar) = document.query_selector(AVATAR_SELECTOR)? else {
        return Ok(None);
    };
    let win = window()?;
    let follow = Rc::new(RefCell::new(AvatarFollow::default()));

    let pointer = {
        let follow = follow.clone();
        let win = win.clone();
        Listener::new(document, "mousemove", move |event: Event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let width = win.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            let height = win.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            follow
                .borrow_mut()
                .point_at(event.client_x() as f64, event.client_y() as f64, width, height);
        })?
    };

    let frames = Rc::new(RefCell::new(Frames { id: None, tick: None }));
    let tick = {
        let frames = frames.clone();
        Closure::wrap(Box::new(move || {
            let (x, y) = follow.borrow_mut().step();
            move_avatar(&avatar, x, y);
            schedule(&frames);
        }) as Box<dyn FnMut()>)
    };
    frames.borrow_mut().tick = Some(tick);
    schedule(&frames);

    Ok(Some(AvatarLoop {
        frames,
        _pointer: pointer,
    }))
}

fn move_avatar(avatar: &Element, x: f64, y: f64) {
    set_style(avatar, "transform", &format!("translate({}px, {}px)", x, y));
}

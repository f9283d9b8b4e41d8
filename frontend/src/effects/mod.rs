//! Decorative behaviours of the page. Each one is independent of the
//! others and of presentation mode.

pub mod motion;
pub mod navigation;
pub mod pointer;
pub mod progress;
pub mod reveal;

use web_sys::Document;

use crate::config::EffectsConfig;
use crate::error::Result;
use crate::utils::dom::Listener;
use motion::{AvatarLoop, BlobDrift};
use pointer::Ripple;
use progress::ProgressBar;
use reveal::ObserverHandle;

/// Handles of every installed effect. Dropping it detaches them all.
#[derive(Default)]
pub struct Effects {
    listeners: Vec<Listener>,
    observers: Vec<ObserverHandle>,
    blobs: Option<BlobDrift>,
    avatar: Option<AvatarLoop>,
    ripple: Option<Ripple>,
    progress: Option<ProgressBar>,
}

fn installed<T>(name: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(handle) => {
            log::debug!("Installed {}", name);
            Some(handle)
        }
        Err(e) => {
            log::warn!("Skipping {}: {}", name, e);
            None
        }
    }
}

impl Effects {
    pub fn install(document: &Document, config: &EffectsConfig) -> Self {
        let mut effects = Effects::default();

        if config.smooth_scroll {
            if let Some(listeners) =
                installed("smooth scroll", navigation::install_smooth_scroll(document))
            {
                effects.listeners.extend(listeners);
            }
        }
        if config.nav_highlight {
            if let Some(listener) =
                installed("nav highlight", navigation::install_nav_highlight(document))
            {
                effects.listeners.push(listener);
            }
        }
        if config.reveal {
            if let Some(Some(observer)) = installed("reveal", reveal::install_reveal(document)) {
                effects.observers.push(observer);
            }
        }
        if config.tilt {
            if let Some(listeners) = installed("card tilt", pointer::install_tilt(document)) {
                effects.listeners.extend(listeners);
            }
        }
        if config.avatar {
            effects.avatar = installed("avatar follow", motion::install_avatar(document)).flatten();
        }
        if config.blobs {
            effects.blobs = installed("blob drift", motion::install_blob_drift(document));
        }
        if config.parallax {
            if let Some(listener) = installed("parallax", motion::install_parallax(document)) {
                effects.listeners.push(listener);
            }
        }
        if config.ripple {
            effects.ripple = installed("ripple", pointer::install_ripple(document));
        }
        if config.progress_bar {
            effects.progress = installed("progress bar", progress::install_progress_bar(document));
        }
        if config.lazy_images {
            if let Some(Some(observer)) =
                installed("lazy images", reveal::install_lazy_images(document))
            {
                effects.observers.push(observer);
            }
        }

        effects
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len() + self.ripple.as_ref().map_or(0, Ripple::listener_count)
    }

    pub fn has_progress_bar(&self) -> bool {
        self.progress.is_some()
    }

    pub fn has_avatar_loop(&self) -> bool {
        self.avatar.is_some()
    }

    pub fn has_blob_drift(&self) -> bool {
        self.blobs.is_some()
    }
}

//! Theme preference controller.

use std::sync::{Arc, Mutex, PoisonError};

use installment_core::theme::{ColorSchemeProbe, Theme, ThemeStore};
use tracing::{debug, warn};

/// Holds the active theme and persists every change.
pub struct ThemeController {
    store: Arc<dyn ThemeStore>,
    current: Mutex<Theme>,
}

impl ThemeController {
    /// Starts from the stored preference, else the environment's scheme.
    pub fn new(store: Arc<dyn ThemeStore>, probe: &dyn ColorSchemeProbe) -> Self {
        let initial = store.load().unwrap_or_else(|| {
            let preferred = probe.preferred();
            debug!("[Theme] No stored preference, using {}", preferred);
            preferred
        });
        Self {
            store,
            current: Mutex::new(initial),
        }
    }

    pub fn current(&self) -> Theme {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn toggle(&self) -> Theme {
        self.set(self.current().toggled())
    }

    pub fn set(&self, theme: Theme) -> Theme {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = theme;
        if let Err(e) = self.store.save(theme) {
            warn!("[Theme] Failed to persist theme: {}", e);
        }
        theme
    }
}

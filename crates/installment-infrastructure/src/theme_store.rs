//! Theme preference persistence.

use std::sync::Arc;

use installment_core::error::Result;
use installment_core::storage::{KeyValueStorage, THEME_STORAGE_KEY};
use installment_core::theme::{Theme, ThemeStore};
use tracing::debug;

/// Keeps `"light"` or `"dark"` under `installment_admin_theme`.
pub struct StorageThemeStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl StorageThemeStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }
}

impl ThemeStore for StorageThemeStore {
    fn load(&self) -> Option<Theme> {
        let raw = self.storage.get_item(THEME_STORAGE_KEY).ok().flatten()?;
        match raw.trim().parse::<Theme>() {
            Ok(theme) => Some(theme),
            Err(_) => {
                debug!("[ThemeStore] Ignoring stored theme {:?}", raw);
                None
            }
        }
    }

    fn save(&self, theme: Theme) -> Result<()> {
        self.storage.set_item(THEME_STORAGE_KEY, &theme.to_string())
    }
}

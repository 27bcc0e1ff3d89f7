use types::{Theme, theme::THEME_KEY};

use crate::storage::KeyValueStore;

#[derive(Debug, Clone)]
pub struct Preferences<S> {
    store: S,
}

impl<S: KeyValueStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The saved theme; unknown values fall back to light.
    pub fn theme(&self) -> Theme {
        self.store
            .get(THEME_KEY)
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    pub fn set_theme(&self, theme: Theme) {
        self.store.set(THEME_KEY, theme.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn theme_persists() {
        let store = MemoryStore::default();
        let prefs = Preferences::new(store.clone());
        assert_eq!(prefs.theme(), Theme::Light);

        prefs.set_theme(Theme::Dark);
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("dark"));
        assert_eq!(Preferences::new(store).theme(), Theme::Dark);
    }

    #[test]
    fn unknown_theme_falls_back_to_light() {
        let store = MemoryStore::default();
        store.set(THEME_KEY, "solarized");
        assert_eq!(Preferences::new(store).theme(), Theme::Light);
    }
}

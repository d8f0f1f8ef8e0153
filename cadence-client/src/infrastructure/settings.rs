use crate::infrastructure::KeyValueStore;
use std::fmt;

const LANGUAGE_KEY: &str = "cadence.language";
const THEME_KEY: &str = "cadence.theme";
const UPDATES_OPT_IN_KEY: &str = "cadence.updates_opt_in";

/// UI language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    He,
    En,
}

impl Language {
    fn as_str(&self) -> &'static str {
        match self {
            Language::He => "he",
            Language::En => "en",
        }
    }

    /// Anything other than an exact known tag falls back to the default.
    fn parse(raw: &str) -> Self {
        match raw {
            "en" => Language::En,
            _ => Language::He,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// UI theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    fn parse(raw: &str) -> Self {
        match raw {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Device-local user preferences.
///
/// Reads never fail: an absent or unrecognized stored value yields the
/// default. Writes propagate storage errors so callers can decide
/// whether to retry.
#[derive(Debug, Clone)]
pub struct LocalSettings<S> {
    store: S,
}

impl<S: KeyValueStore> LocalSettings<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn language(&self) -> Language {
        match self.store.get(LANGUAGE_KEY).await {
            Ok(Some(raw)) => Language::parse(&raw),
            _ => Language::default(),
        }
    }

    pub async fn set_language(&self, language: Language) -> Result<(), super::StorageError> {
        self.store.set(LANGUAGE_KEY, language.as_str()).await
    }

    pub async fn theme(&self) -> Theme {
        match self.store.get(THEME_KEY).await {
            Ok(Some(raw)) => Theme::parse(&raw),
            _ => Theme::default(),
        }
    }

    pub async fn set_theme(&self, theme: Theme) -> Result<(), super::StorageError> {
        self.store.set(THEME_KEY, theme.as_str()).await
    }

    pub async fn updates_opt_in(&self) -> bool {
        matches!(self.store.get(UPDATES_OPT_IN_KEY).await, Ok(Some(raw)) if raw == "1")
    }

    pub async fn set_updates_opt_in(&self, enabled: bool) -> Result<(), super::StorageError> {
        self.store
            .set(UPDATES_OPT_IN_KEY, if enabled { "1" } else { "0" })
            .await
    }
}

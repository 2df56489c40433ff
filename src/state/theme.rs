//! Persisted light/dark theme preference.
//!
//! ARCHITECTURE
//! ============
//! `ThemeStore` is constructed once at application start, rehydrated from a
//! `KeyValueStore`, and injected into the view layer through context. Every
//! `set_theme` writes through to storage and then notifies subscribers.
//!
//! The persisted entry keeps a versioned envelope:
//! `{"state":{"theme":"dark"},"version":0}`.
//!
//! TRADE-OFFS
//! ==========
//! Storage failures never surface to callers. The in-memory value stays
//! authoritative for the session, which is the only sensible behavior when
//! storage is disabled or over quota.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::util::storage::{KeyValueStore, load_json, save_json};

/// Version written into the persisted envelope.
pub const PERSIST_VERSION: u32 = 0;

/// Error returned when untyped input is not a theme.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ThemeError {
    #[error("invalid theme '{0}' (expected 'light' or 'dark')")]
    Invalid(String),
}

/// Visual mode preference.
///
/// Written as lowercase. Read leniently (case-insensitive, trimmed) through
/// the same parser whether the input comes from a caller or from storage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// The other theme.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ThemeError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(ThemeError::Invalid(raw.to_owned())),
        }
    }
}

impl TryFrom<String> for Theme {
    type Error = ThemeError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

/// Serialized store state inside the persisted envelope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StylesState {
    pub theme: Theme,
}

/// Versioned wrapper written under the persistence key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedStyles {
    pub state: StylesState,
    pub version: u32,
}

/// Handle returned by [`ThemeStore::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn Fn(Theme)>;

/// Application-scoped theme state backed by durable storage.
pub struct ThemeStore<S: KeyValueStore> {
    storage: S,
    key: String,
    theme: Theme,
    next_subscription: u64,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
}

impl<S: KeyValueStore> ThemeStore<S> {
    /// Construct the store and rehydrate from `storage` under `key`.
    ///
    /// Missing, unreadable, or invalid entries leave the default theme.
    pub fn open(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let theme = rehydrate(&storage, &key).unwrap_or_default();
        log::debug!("theme store opened under {key}: {theme}");
        Self { storage, key, theme, next_subscription: 0, subscribers: Vec::new() }
    }

    /// Current theme.
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Key the store persists under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Update the theme, persist it, and notify subscribers.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.persist();
        for (_, subscriber) in &self.subscribers {
            subscriber(theme);
        }
    }

    /// Parse untyped input and apply it. Invalid input changes nothing.
    pub fn set_theme_str(&mut self, raw: &str) -> Result<(), ThemeError> {
        let theme = raw.parse::<Theme>()?;
        self.set_theme(theme);
        Ok(())
    }

    /// Switch to the other theme and return it.
    pub fn toggle(&mut self) -> Theme {
        let next = self.theme.toggled();
        self.set_theme(next);
        next
    }

    /// Register `subscriber` to be called after every `set_theme`.
    pub fn subscribe(&mut self, subscriber: impl Fn(Theme) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Remove a subscriber. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    fn persist(&self) {
        let entry = PersistedStyles { state: StylesState { theme: self.theme }, version: PERSIST_VERSION };
        if let Err(e) = save_json(&self.storage, &self.key, &entry) {
            log::warn!("theme not persisted, keeping in-memory value: {e}");
        }
    }
}

fn rehydrate(storage: &impl KeyValueStore, key: &str) -> Option<Theme> {
    let entry: PersistedStyles = load_json(storage, key)?;
    if entry.version != PERSIST_VERSION {
        log::warn!("ignoring theme entry with unknown version {}", entry.version);
        return None;
    }
    Some(entry.state.theme)
}

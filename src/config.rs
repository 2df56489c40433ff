//! Navigation bar configuration: branding, links, and persistence settings.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_BRAND: &str = "Flowbite";
pub const DEFAULT_LOGO_URL: &str = "https://flowbite.com/docs/images/logo.svg";
pub const DEFAULT_STORAGE_KEY: &str = "styles-storage";
pub const DEFAULT_DARK_CLASS: &str = "dark";

/// Error returned by [`NavConfig::from_json`] and [`NavConfig::validate`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    #[error("config parse failed: {0}")]
    Parse(#[from] serde_json::Error),
    /// A required field is empty.
    #[error("config field '{field}' must not be empty")]
    Empty { field: &'static str },
}

/// One anchor in the navigation bar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub label: String,
    #[serde(default = "default_href")]
    pub href: String,
}

impl NavLink {
    #[must_use]
    pub fn new(label: &str) -> Self {
        Self { label: label.to_owned(), href: default_href() }
    }
}

fn default_href() -> String {
    "#".to_owned()
}

/// Static navigation bar setup.
///
/// Links are split around the services entry: `leading` render before it,
/// `trailing` after it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub brand: String,
    pub logo_url: String,
    pub leading: Vec<NavLink>,
    pub services_label: String,
    pub services: Vec<NavLink>,
    pub trailing: Vec<NavLink>,
    pub storage_key: String,
    pub dark_class: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            brand: DEFAULT_BRAND.to_owned(),
            logo_url: DEFAULT_LOGO_URL.to_owned(),
            leading: vec![NavLink::new("Home"), NavLink::new("Features")],
            services_label: "Services".to_owned(),
            services: vec![NavLink::new("Consulting"), NavLink::new("Development"), NavLink::new("Design")],
            trailing: vec![NavLink::new("Contact")],
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            dark_class: DEFAULT_DARK_CLASS.to_owned(),
        }
    }
}

impl NavConfig {
    /// Parse a config document. Missing fields take their defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Replace fields that fail [`NavConfig::validate`] with their defaults.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        if self.storage_key.trim().is_empty() {
            log::error!("empty storage_key in navbar config, using {DEFAULT_STORAGE_KEY}");
            self.storage_key = DEFAULT_STORAGE_KEY.to_owned();
        }
        if self.dark_class.trim().is_empty() {
            log::error!("empty dark_class in navbar config, using {DEFAULT_DARK_CLASS}");
            self.dark_class = DEFAULT_DARK_CLASS.to_owned();
        }
        self
    }

    /// Reject settings the store and root-class code cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::Empty { field: "storage_key" });
        }
        if self.dark_class.trim().is_empty() {
            return Err(ConfigError::Empty { field: "dark_class" });
        }
        Ok(())
    }
}

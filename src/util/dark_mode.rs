//! Root theme class application.
//!
//! Adds or removes the dark class on the `<html>` element so stylesheet
//! `dark:` variants take effect. Requires a browser environment; non-browser
//! builds no-op.

use crate::state::theme::Theme;

#[cfg(test)]
#[path = "dark_mode_test.rs"]
mod dark_mode_test;

/// Whether the root element should carry the dark class for `theme`.
#[must_use]
pub fn wants_dark_class(theme: Theme) -> bool {
    theme == Theme::Dark
}

/// Apply or remove `class` on the `<html>` element for `theme`.
pub fn apply(theme: Theme, class: &str) {
    let enabled = wants_dark_class(theme);
    #[cfg(feature = "csr")]
    {
        if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
            if let Some(el) = doc.document_element() {
                if el.class_list().toggle_with_force(class, enabled).is_err() {
                    log::warn!("could not toggle root class '{class}'");
                }
            }
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (enabled, class);
    }
}

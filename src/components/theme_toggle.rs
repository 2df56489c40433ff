//! Light/dark toggle button.

use leptos::prelude::*;

use crate::app::ThemeContext;
use crate::state::theme::Theme;

#[cfg(test)]
#[path = "theme_toggle_test.rs"]
mod theme_toggle_test;

/// Glyph shown for `theme`: the mode a click switches to.
pub(crate) fn glyph(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "☾",
        Theme::Dark => "☀",
    }
}

/// Button that flips the application theme.
#[component]
pub fn ThemeToggle() -> impl IntoView {
    let theme = expect_context::<ThemeContext>();

    view! {
        <button
            class="btn nav__theme-toggle"
            aria-label="Toggle Dark Mode"
            title="Toggle dark mode"
            on:click=move |_| {
                theme.toggle();
            }
        >
            {move || glyph(theme.get())}
        </button>
    }
}

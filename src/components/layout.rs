//! Page-width container wrapping the navigation bar and content.

use leptos::prelude::*;

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

/// Block class on the wrapper; width and centering live in the stylesheet.
pub(crate) const LAYOUT_CLASS: &str = "layout";

/// Centered, width-capped wrapper.
#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! { <div class=LAYOUT_CLASS>{children()}</div> }
}

//! Root application component and theme context.

use leptos::prelude::*;
use leptos_meta::{Stylesheet, Title, provide_meta_context};

use crate::components::{layout::Layout, nav::Nav};
use crate::config::NavConfig;
use crate::state::theme::{Theme, ThemeStore};
use crate::util::dark_mode;
use crate::util::storage::BrowserStorage;

/// Theme handle provided to every component.
///
/// Reads go through a signal so views track them; writes go through the
/// store so they are persisted before subscribers (the signal) see them.
#[derive(Clone, Copy)]
pub struct ThemeContext {
    theme: ReadSignal<Theme>,
    store: StoredValue<ThemeStore<BrowserStorage>, LocalStorage>,
}

impl ThemeContext {
    /// Wrap `store`, mirroring its value into a signal.
    pub fn new(mut store: ThemeStore<BrowserStorage>) -> Self {
        let (theme, set_theme) = signal(store.theme());
        store.subscribe(move |next| set_theme.set(next));
        Self { theme, store: StoredValue::new_local(store) }
    }

    /// Current theme, tracked.
    pub fn get(&self) -> Theme {
        self.theme.get()
    }

    /// Flip the theme through the store.
    pub fn toggle(&self) {
        self.store.update_value(|store| {
            store.toggle();
        });
    }
}

/// Root application component.
///
/// Opens the theme store, provides it as context, and keeps the root dark
/// class in sync with it.
#[component]
pub fn App(#[prop(optional)] config: Option<NavConfig>) -> impl IntoView {
    provide_meta_context();

    let config = config.unwrap_or_default().sanitized();

    let theme = ThemeContext::new(ThemeStore::open(BrowserStorage, config.storage_key.clone()));
    provide_context(theme);

    let brand = config.brand.clone();
    let dark_class = config.dark_class.clone();
    Effect::new(move || dark_mode::apply(theme.get(), &dark_class));

    view! {
        <Stylesheet id="leptos" href="/pkg/navbar.css"/>
        <Title text=brand/>

        <Layout>
            <Nav config=config/>
        </Layout>
    }
}

//! # navbar
//!
//! Leptos + WASM navigation bar with a light/dark theme toggle, a responsive
//! mobile menu overlay, and a persisted theme preference.
//!
//! The interaction core lives in `state` (theme store, menu state) and is
//! plain Rust so it can be tested natively. `components` binds that core to
//! markup, and `util` isolates browser glue (storage, root class, document
//! listeners) behind the `csr` feature.

pub mod app;
pub mod components;
pub mod config;
pub mod state;
pub mod util;

/// Browser entry point: installs the panic hook, starts console logging,
/// and mounts the root component to `<body>`.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn mount() {
    use leptos::prelude::*;

    use crate::app::App;

    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(|| view! { <App/> });
}

//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the navigation chrome and read the shared theme from
//! Leptos context. Menu state is local to each `Nav` mount.

pub mod layout;
pub mod nav;
pub mod theme_toggle;

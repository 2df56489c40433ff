//! Navbar state modules.
//!
//! DESIGN
//! ======
//! State is split by lifetime: `theme` is application-scoped and persisted,
//! `menu` is per navigation-bar instance and transient. Both are plain Rust
//! so they can be exercised without a browser.

pub mod menu;
pub mod theme;

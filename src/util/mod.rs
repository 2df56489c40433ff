//! Utility helpers shared across navbar modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns from component and
//! state logic so the core stays testable without a DOM.

pub mod dark_mode;
pub mod outside_click;
pub mod storage;

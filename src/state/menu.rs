//! Transient open/closed state for the mobile panel and services submenu.
//!
//! DESIGN
//! ======
//! `MenuState` is a pure value: every transition is a synchronous method and
//! outside-click evaluation takes a precomputed `PointerHit`, so the rules
//! are testable without a DOM. `Nav` owns one instance per mount inside an
//! `RwSignal` and drops it on unmount.
//!
//! Invariant: closing the mobile menu also closes the services submenu.

#[cfg(test)]
#[path = "menu_test.rs"]
mod menu_test;

/// Which services control was activated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServicesContext {
    /// Dropdown button in the desktop link row.
    Desktop,
    /// Inline expander inside the mobile panel.
    Mobile,
}

/// What the caller must do with the click that triggered a toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickPolicy {
    /// Let the event continue normally.
    Default,
    /// Call `prevent_default` and `stop_propagation`.
    Suppress,
}

/// Where a document pointer-down landed relative to the menu elements.
///
/// A field is `None` when the element is not mounted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointerHit {
    pub in_desktop_services: Option<bool>,
    pub in_mobile_panel: Option<bool>,
    pub in_menu_button: Option<bool>,
}

impl PointerHit {
    /// Pointer-down outside every tracked element, all mounted.
    #[must_use]
    pub fn outside() -> Self {
        Self { in_desktop_services: Some(false), in_mobile_panel: Some(false), in_menu_button: Some(false) }
    }
}

/// Open/closed flags for one navigation bar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MenuState {
    pub menu_open: bool,
    pub services_open: bool,
}

impl MenuState {
    /// Flip the mobile panel. The submenu always starts collapsed when the
    /// panel opens and is collapsed along with it when the panel closes.
    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
        self.services_open = false;
        log::debug!("menu toggled: {self:?}");
    }

    /// Flip the services submenu.
    #[must_use = "mobile toggles must suppress the click"]
    pub fn toggle_services(&mut self, context: ServicesContext) -> ClickPolicy {
        self.services_open = !self.services_open;
        log::debug!("services toggled ({context:?}): {self:?}");
        match context {
            ServicesContext::Desktop => ClickPolicy::Default,
            ServicesContext::Mobile => ClickPolicy::Suppress,
        }
    }

    /// Close the panel and the submenu.
    pub fn close_all(&mut self) {
        self.menu_open = false;
        self.services_open = false;
    }

    /// A services item was chosen.
    pub fn select_service(&mut self, context: ServicesContext) {
        match context {
            ServicesContext::Desktop => self.services_open = false,
            ServicesContext::Mobile => self.close_all(),
        }
    }

    /// Whether a document pointer-down listener is needed at all.
    #[must_use]
    pub fn wants_outside_listener(&self) -> bool {
        self.menu_open || self.services_open
    }

    /// Apply outside-click rules for a pointer-down. Returns whether the
    /// state changed.
    ///
    /// Both rules are evaluated against the snapshot taken on entry.
    pub fn handle_pointer_down(&mut self, hit: PointerHit) -> bool {
        let snapshot = *self;

        if snapshot.services_open && !snapshot.menu_open && hit.in_desktop_services == Some(false) {
            self.services_open = false;
        }

        if snapshot.menu_open {
            if let (Some(in_panel), Some(in_button)) = (hit.in_mobile_panel, hit.in_menu_button) {
                if !in_panel && !in_button {
                    self.close_all();
                }
            }
        }

        let changed = *self != snapshot;
        if changed {
            log::debug!("outside click closed menus: {self:?}");
        }
        changed
    }
}

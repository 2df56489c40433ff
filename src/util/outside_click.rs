//! Scoped document-level listener registration.
//!
//! DESIGN
//! ======
//! A `ScopedListener` holds one live registration on a `ListenerHost` and
//! releases it when dropped. `ListenerSlot` keeps at most one of them alive
//! and swaps it whenever the caller's dependency snapshot changes, so a
//! handler never observes flags older than the last rebind.
//!
//! SYSTEM CONTEXT
//! ==============
//! `Nav` rebinds its outside-click handler on every `MenuState` change and
//! drops the slot on unmount. `DocumentHost` is the browser implementation;
//! tests drive the same guard against an in-memory host.

#[cfg(test)]
#[path = "outside_click_test.rs"]
mod outside_click_test;

use crate::state::menu::{MenuState, PointerHit};

/// Event the outside-click handler listens for.
pub const POINTER_DOWN_EVENT: &str = "mousedown";

/// Something handlers can be attached to and detached from.
pub trait ListenerHost {
    /// Value passed to handlers on dispatch.
    type Target;
    /// Token needed to remove a registration.
    type Registration;

    /// Register `handler` for `event`. Returns `None` if the host is gone.
    fn attach(
        &self,
        event: &'static str,
        handler: Box<dyn FnMut(&Self::Target)>,
    ) -> Option<Self::Registration>;

    /// Remove a registration previously returned by `attach`.
    fn detach(&self, event: &'static str, registration: Self::Registration);
}

/// RAII guard over one listener registration.
pub struct ScopedListener<H: ListenerHost> {
    host: H,
    event: &'static str,
    registration: Option<H::Registration>,
}

impl<H: ListenerHost> ScopedListener<H> {
    /// Attach `handler` to `host` for `event` until the guard is dropped.
    pub fn acquire(host: H, event: &'static str, handler: impl FnMut(&H::Target) + 'static) -> Self {
        let registration = host.attach(event, Box::new(handler));
        if registration.is_none() {
            log::warn!("could not attach {event} listener");
        }
        Self { host, event, registration }
    }

    /// Whether the host accepted the registration.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.registration.is_some()
    }
}

impl<H: ListenerHost> Drop for ScopedListener<H> {
    fn drop(&mut self) {
        if let Some(registration) = self.registration.take() {
            self.host.detach(self.event, registration);
        }
    }
}

/// Holds at most one live [`ScopedListener`].
pub struct ListenerSlot<H: ListenerHost> {
    current: Option<ScopedListener<H>>,
}

impl<H: ListenerHost> Default for ListenerSlot<H> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<H: ListenerHost> ListenerSlot<H> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Release the current listener, then install whatever `next` yields.
    ///
    /// The old registration is removed before the new one is attached.
    pub fn rebind(&mut self, next: impl FnOnce() -> Option<ScopedListener<H>>) {
        self.current = None;
        self.current = next();
    }

    /// Release the current listener, if any.
    pub fn release(&mut self) {
        self.current = None;
    }

    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.current.as_ref().is_some_and(ScopedListener::is_active)
    }
}

/// Rebind `slot` to a pointer-down handler for `snapshot`.
///
/// No listener is held while every menu is closed. The handler applies the
/// outside-click rules to `snapshot` (never to older state) and hands the
/// result to `set` only when something closed.
pub fn rebind_outside_click<H: ListenerHost>(
    slot: &mut ListenerSlot<H>,
    host: H,
    snapshot: MenuState,
    hit: impl Fn(&H::Target) -> PointerHit + 'static,
    set: impl Fn(MenuState) + 'static,
) {
    slot.rebind(|| {
        snapshot.wants_outside_listener().then(|| {
            ScopedListener::acquire(host, POINTER_DOWN_EVENT, move |target: &H::Target| {
                let mut next = snapshot;
                if next.handle_pointer_down(hit(target)) {
                    set(next);
                }
            })
        })
    });
}

/// Browser `document` as a listener host.
#[cfg(feature = "csr")]
#[derive(Clone, Copy, Debug, Default)]
pub struct DocumentHost;

#[cfg(feature = "csr")]
impl ListenerHost for DocumentHost {
    type Target = web_sys::Event;
    type Registration = wasm_bindgen::closure::Closure<dyn FnMut(web_sys::Event)>;

    fn attach(
        &self,
        event: &'static str,
        mut handler: Box<dyn FnMut(&web_sys::Event)>,
    ) -> Option<Self::Registration> {
        use wasm_bindgen::JsCast;
        use wasm_bindgen::closure::Closure;

        let document = web_sys::window().and_then(|w| w.document())?;
        let cb = Closure::wrap(Box::new(move |ev: web_sys::Event| handler(&ev)) as Box<dyn FnMut(web_sys::Event)>);
        document
            .add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())
            .ok()?;
        Some(cb)
    }

    fn detach(&self, event: &'static str, registration: Self::Registration) {
        use wasm_bindgen::JsCast;

        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            let _ = document.remove_event_listener_with_callback(event, registration.as_ref().unchecked_ref());
        }
    }
}

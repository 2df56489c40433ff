use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::*;
use crate::state::menu::ServicesContext;

type Handler = Box<dyn FnMut(&u32)>;

#[derive(Default)]
struct HostInner {
    next_id: usize,
    live: Vec<(usize, &'static str, Handler)>,
    attached: usize,
    detached: usize,
    ops: Vec<&'static str>,
    refuse: bool,
}

#[derive(Clone, Default)]
struct FakeHost(Rc<RefCell<HostInner>>);

impl FakeHost {
    fn refusing() -> Self {
        let host = Self::default();
        host.0.borrow_mut().refuse = true;
        host
    }

    fn live(&self) -> usize {
        self.0.borrow().live.len()
    }

    fn attached(&self) -> usize {
        self.0.borrow().attached
    }

    fn detached(&self) -> usize {
        self.0.borrow().detached
    }

    fn ops(&self) -> Vec<&'static str> {
        self.0.borrow().ops.clone()
    }

    fn dispatch(&self, event: &str, target: u32) {
        let mut inner = self.0.borrow_mut();
        for (_, registered, handler) in &mut inner.live {
            if *registered == event {
                handler(&target);
            }
        }
    }
}

impl ListenerHost for FakeHost {
    type Target = u32;
    type Registration = usize;

    fn attach(&self, event: &'static str, handler: Handler) -> Option<usize> {
        let mut inner = self.0.borrow_mut();
        if inner.refuse {
            return None;
        }
        let id = inner.next_id;
        inner.next_id += 1;
        inner.attached += 1;
        inner.ops.push("attach");
        inner.live.push((id, event, handler));
        Some(id)
    }

    fn detach(&self, _event: &'static str, registration: usize) {
        let mut inner = self.0.borrow_mut();
        inner.detached += 1;
        inner.ops.push("detach");
        inner.live.retain(|(id, _, _)| *id != registration);
    }
}

// =============================================================
// ScopedListener
// =============================================================

#[test]
fn acquire_attaches_exactly_once() {
    let host = FakeHost::default();
    let guard = ScopedListener::acquire(host.clone(), POINTER_DOWN_EVENT, |_| {});
    assert!(guard.is_active());
    assert_eq!(host.attached(), 1);
    assert_eq!(host.live(), 1);
}

#[test]
fn drop_detaches_registration() {
    let host = FakeHost::default();
    let guard = ScopedListener::acquire(host.clone(), POINTER_DOWN_EVENT, |_| {});
    drop(guard);
    assert_eq!(host.live(), 0);
    assert_eq!(host.detached(), 1);
}

#[test]
fn refused_attach_is_inactive_and_drop_does_not_detach() {
    let host = FakeHost::refusing();
    let guard = ScopedListener::acquire(host.clone(), POINTER_DOWN_EVENT, |_| {});
    assert!(!guard.is_active());
    drop(guard);
    assert_eq!(host.detached(), 0);
}

#[test]
fn handler_receives_dispatched_target() {
    let host = FakeHost::default();
    let seen = Rc::new(Cell::new(0_u32));
    let seen_cb = Rc::clone(&seen);
    let _guard = ScopedListener::acquire(host.clone(), POINTER_DOWN_EVENT, move |t: &u32| seen_cb.set(*t));
    host.dispatch(POINTER_DOWN_EVENT, 42);
    assert_eq!(seen.get(), 42);
}

#[test]
fn handler_ignores_other_events() {
    let host = FakeHost::default();
    let hits = Rc::new(Cell::new(0_u32));
    let hits_cb = Rc::clone(&hits);
    let _guard = ScopedListener::acquire(host.clone(), POINTER_DOWN_EVENT, move |_| hits_cb.set(hits_cb.get() + 1));
    host.dispatch("click", 1);
    assert_eq!(hits.get(), 0);
}

// =============================================================
// ListenerSlot
// =============================================================

#[test]
fn slot_starts_unbound() {
    let slot = ListenerSlot::<FakeHost>::new();
    assert!(!slot.is_bound());
}

#[test]
fn rebind_keeps_single_live_registration() {
    let host = FakeHost::default();
    let mut slot = ListenerSlot::new();
    for _ in 0..3 {
        let h = host.clone();
        slot.rebind(|| Some(ScopedListener::acquire(h, POINTER_DOWN_EVENT, |_| {})));
        assert_eq!(host.live(), 1);
    }
    assert_eq!(host.attached(), 3);
    assert_eq!(host.detached(), 2);
}

#[test]
fn rebind_replaces_stale_snapshot() {
    let host = FakeHost::default();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut slot = ListenerSlot::new();

    for snapshot in ["first", "second"] {
        let h = host.clone();
        let seen_cb = Rc::clone(&seen);
        slot.rebind(move || {
            Some(ScopedListener::acquire(h, POINTER_DOWN_EVENT, move |_| seen_cb.borrow_mut().push(snapshot)))
        });
    }

    host.dispatch(POINTER_DOWN_EVENT, 0);
    assert_eq!(*seen.borrow(), vec!["second"]);
}

#[test]
fn rebind_to_none_releases_listener() {
    let host = FakeHost::default();
    let mut slot = ListenerSlot::new();
    let h = host.clone();
    slot.rebind(|| Some(ScopedListener::acquire(h, POINTER_DOWN_EVENT, |_| {})));
    slot.rebind(|| None);
    assert!(!slot.is_bound());
    assert_eq!(host.live(), 0);
}

#[test]
fn release_and_drop_detach() {
    let host = FakeHost::default();
    let mut slot = ListenerSlot::new();
    let h = host.clone();
    slot.rebind(|| Some(ScopedListener::acquire(h, POINTER_DOWN_EVENT, |_| {})));
    slot.release();
    assert_eq!(host.live(), 0);

    let h = host.clone();
    slot.rebind(|| Some(ScopedListener::acquire(h, POINTER_DOWN_EVENT, |_| {})));
    drop(slot);
    assert_eq!(host.live(), 0);
    assert_eq!(host.detached(), 2);
}

// =============================================================
// rebind_outside_click
// =============================================================

/// Stand-in for the nav bar: a shared menu cell and a listener slot rebound
/// after every change, the way the component's effect does.
struct MenuHarness {
    host: FakeHost,
    menu: Rc<Cell<MenuState>>,
    slot: ListenerSlot<FakeHost>,
}

/// Target codes dispatched by the tests.
const TARGET_OUTSIDE: u32 = 0;
const TARGET_PANEL: u32 = 1;

fn hit_for(target: u32) -> PointerHit {
    match target {
        TARGET_PANEL => PointerHit { in_mobile_panel: Some(true), ..PointerHit::outside() },
        _ => PointerHit::outside(),
    }
}

impl MenuHarness {
    fn new() -> Self {
        let mut harness =
            Self { host: FakeHost::default(), menu: Rc::new(Cell::new(MenuState::default())), slot: ListenerSlot::new() };
        harness.rebind();
        harness
    }

    fn rebind(&mut self) {
        let menu = Rc::clone(&self.menu);
        rebind_outside_click(&mut self.slot, self.host.clone(), self.menu.get(), |t: &u32| hit_for(*t), move |next| {
            menu.set(next);
        });
    }

    fn update(&mut self, f: impl FnOnce(&mut MenuState)) {
        let mut state = self.menu.get();
        f(&mut state);
        self.menu.set(state);
        self.rebind();
    }

    fn pointer_down(&mut self, target: u32) {
        let before = self.menu.get();
        self.host.dispatch(POINTER_DOWN_EVENT, target);
        if self.menu.get() != before {
            self.rebind();
        }
    }
}

#[test]
fn closed_menus_hold_no_listener() {
    let harness = MenuHarness::new();
    assert_eq!(harness.host.live(), 0);
    assert_eq!(harness.host.attached(), 0);
    assert!(!harness.slot.is_bound());
}

#[test]
fn opening_menu_attaches_exactly_one_listener() {
    let mut harness = MenuHarness::new();
    harness.update(MenuState::toggle_menu);
    assert_eq!(harness.host.live(), 1);
    assert_eq!(harness.host.attached(), 1);
}

#[test]
fn outside_pointer_down_closes_everything_and_releases_listener() {
    let mut harness = MenuHarness::new();
    harness.update(MenuState::toggle_menu);
    harness.update(|m| {
        let _ = m.toggle_services(ServicesContext::Mobile);
    });
    assert_eq!(harness.menu.get(), MenuState { menu_open: true, services_open: true });

    harness.pointer_down(TARGET_OUTSIDE);

    assert_eq!(harness.menu.get(), MenuState::default());
    assert_eq!(harness.host.live(), 0);
}

#[test]
fn pointer_down_inside_panel_keeps_state() {
    let mut harness = MenuHarness::new();
    harness.update(MenuState::toggle_menu);
    harness.pointer_down(TARGET_PANEL);
    assert_eq!(harness.menu.get(), MenuState { menu_open: true, services_open: false });
    assert_eq!(harness.host.live(), 1);
}

#[test]
fn desktop_dropdown_closes_on_outside_pointer_down() {
    let mut harness = MenuHarness::new();
    harness.update(|m| {
        let _ = m.toggle_services(ServicesContext::Desktop);
    });
    harness.pointer_down(TARGET_OUTSIDE);
    assert_eq!(harness.menu.get(), MenuState::default());
}

#[test]
fn rebind_detaches_old_handler_before_attaching_new() {
    let mut harness = MenuHarness::new();
    harness.update(MenuState::toggle_menu);
    harness.update(|m| {
        let _ = m.toggle_services(ServicesContext::Mobile);
    });
    assert_eq!(harness.host.ops(), vec!["attach", "detach", "attach"]);
    assert_eq!(harness.host.live(), 1);
}

#[test]
fn handler_acts_on_latest_snapshot() {
    let mut harness = MenuHarness::new();
    // Desktop dropdown open: an outside hit would close only the submenu.
    harness.update(|m| {
        let _ = m.toggle_services(ServicesContext::Desktop);
    });
    // Mobile menu opens; the rebound handler must apply the mobile rule.
    harness.update(MenuState::toggle_menu);
    harness.pointer_down(TARGET_PANEL);
    assert_eq!(harness.menu.get(), MenuState { menu_open: true, services_open: false });
}

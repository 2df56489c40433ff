//! Top navigation bar with desktop links, services dropdown, and mobile
//! slide-in panel.
//!
//! ARCHITECTURE
//! ============
//! Each mount owns a `MenuState` signal. Click handlers call its transition
//! methods directly; a document-level `mousedown` listener, rebound whenever
//! the state changes, closes menus on outside interaction.
//!
//! TRADE-OFFS
//! ==========
//! The desktop dropdown and the mobile inline list share one
//! `services_open` flag. CSS hides whichever variant does not apply to the
//! viewport, so only one is ever visible.

use leptos::prelude::*;

use crate::components::theme_toggle::ThemeToggle;
use crate::config::{NavConfig, NavLink};
use crate::state::menu::{ClickPolicy, MenuState, ServicesContext};

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

pub(crate) fn panel_class(open: bool) -> &'static str {
    if open { "nav__panel nav__panel--open" } else { "nav__panel" }
}

pub(crate) fn chevron(open: bool) -> &'static str {
    if open { "▴" } else { "▾" }
}

pub(crate) fn menu_glyph(open: bool) -> &'static str {
    if open { "✕" } else { "☰" }
}

/// Element refs the outside-click rules test containment against.
#[derive(Clone, Copy)]
#[cfg_attr(not(feature = "csr"), allow(dead_code))]
struct MenuRefs {
    desktop_services: NodeRef<leptos::html::Div>,
    mobile_panel: NodeRef<leptos::html::Div>,
    menu_button: NodeRef<leptos::html::Button>,
}

#[cfg(feature = "csr")]
impl MenuRefs {
    fn hit(&self, ev: &web_sys::Event) -> crate::state::menu::PointerHit {
        use wasm_bindgen::JsCast;

        let target = ev.target().and_then(|t| t.dyn_into::<web_sys::Node>().ok());
        let target = target.as_ref();
        crate::state::menu::PointerHit {
            in_desktop_services: self.desktop_services.get_untracked().map(|el| el.contains(target)),
            in_mobile_panel: self.mobile_panel.get_untracked().map(|el| el.contains(target)),
            in_menu_button: self.menu_button.get_untracked().map(|el| el.contains(target)),
        }
    }
}

/// Keep one document listener bound to the latest `MenuState` snapshot.
#[cfg(feature = "csr")]
fn bind_outside_click(menu: RwSignal<MenuState>, refs: MenuRefs) {
    use crate::util::outside_click::{DocumentHost, ListenerSlot, rebind_outside_click};

    let slot = StoredValue::new_local(ListenerSlot::<DocumentHost>::new());

    Effect::new(move || {
        let snapshot = menu.get();
        slot.update_value(|slot| {
            rebind_outside_click(slot, DocumentHost, snapshot, move |ev| refs.hit(ev), move |next| menu.set(next));
        });
    });

    on_cleanup(move || {
        slot.try_update_value(ListenerSlot::release);
    });
}

#[cfg(not(feature = "csr"))]
fn bind_outside_click(menu: RwSignal<MenuState>, refs: MenuRefs) {
    let _ = (menu, refs);
}

fn desktop_links(links: Vec<NavLink>) -> impl IntoView {
    links
        .into_iter()
        .map(|link| view! { <a href=link.href class="nav__link">{link.label}</a> })
        .collect_view()
}

fn mobile_links(links: Vec<NavLink>, menu: RwSignal<MenuState>) -> impl IntoView {
    links
        .into_iter()
        .map(|link| {
            view! {
                <a href=link.href class="nav__panel-link" on:click=move |_| menu.update(MenuState::close_all)>
                    {link.label}
                </a>
            }
        })
        .collect_view()
}

/// Navigation bar.
#[component]
pub fn Nav(#[prop(optional)] config: Option<NavConfig>) -> impl IntoView {
    let config = config.unwrap_or_default();
    let menu = RwSignal::new(MenuState::default());
    let refs = MenuRefs {
        desktop_services: NodeRef::new(),
        mobile_panel: NodeRef::new(),
        menu_button: NodeRef::new(),
    };

    bind_outside_click(menu, refs);

    let menu_open = move || menu.get().menu_open;
    let services_open = move || menu.get().services_open;

    let desktop_services = config.services.clone();
    let mobile_services = config.services.clone();
    let services_label = config.services_label.clone();

    view! {
        <nav class="nav">
            <div class="nav__bar">
                <a href="#" class="nav__brand">
                    <img src=config.logo_url.clone() class="nav__logo" alt="Logo"/>
                    <span class="nav__brand-name">{config.brand.clone()}</span>
                </a>

                <div class="nav__desktop">
                    {desktop_links(config.leading.clone())}

                    <div class="nav__services" node_ref=refs.desktop_services>
                        <button
                            class="nav__services-toggle"
                            on:click=move |_| {
                                menu.update(|m| {
                                    let _ = m.toggle_services(ServicesContext::Desktop);
                                });
                            }
                        >
                            {services_label.clone()}
                            <span class="nav__chevron">{move || chevron(services_open())}</span>
                        </button>
                        <Show when=services_open>
                            <div class="nav__dropdown">
                                {desktop_services
                                    .clone()
                                    .into_iter()
                                    .map(|item| {
                                        view! {
                                            <a
                                                href=item.href
                                                class="nav__dropdown-item"
                                                on:click=move |_| {
                                                    menu.update(|m| m.select_service(ServicesContext::Desktop));
                                                }
                                            >
                                                {item.label}
                                            </a>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                        </Show>
                    </div>

                    {desktop_links(config.trailing.clone())}

                    <ThemeToggle/>
                </div>

                <div class="nav__mobile-controls">
                    <ThemeToggle/>
                    <button
                        class="btn nav__menu-toggle"
                        aria-label="Toggle Menu"
                        node_ref=refs.menu_button
                        on:click=move |_| menu.update(MenuState::toggle_menu)
                    >
                        {move || menu_glyph(menu_open())}
                    </button>
                </div>
            </div>

            <Show when=menu_open>
                <div class="nav__overlay"></div>
            </Show>

            <div class=move || panel_class(menu_open()) node_ref=refs.mobile_panel>
                <div class="nav__panel-header">
                    <span class="nav__panel-title">"Menu"</span>
                    <button class="btn nav__panel-close" title="Close menu" on:click=move |_| menu.update(MenuState::close_all)>
                        "✕"
                    </button>
                </div>

                <div class="nav__panel-links">
                    {mobile_links(config.leading.clone(), menu)}

                    <div class="nav__panel-services">
                        <button
                            class="nav__panel-services-toggle"
                            on:click=move |ev: leptos::ev::MouseEvent| {
                                let mut policy = ClickPolicy::Default;
                                menu.update(|m| policy = m.toggle_services(ServicesContext::Mobile));
                                if policy == ClickPolicy::Suppress {
                                    ev.prevent_default();
                                    ev.stop_propagation();
                                }
                            }
                        >
                            <span>{config.services_label.clone()}</span>
                            <span class="nav__chevron">{move || chevron(services_open())}</span>
                        </button>
                        <Show when=services_open>
                            <div class="nav__panel-sublinks">
                                {mobile_services
                                    .clone()
                                    .into_iter()
                                    .map(|item| {
                                        view! {
                                            <a
                                                href=item.href
                                                class="nav__panel-sublink"
                                                on:click=move |_| {
                                                    menu.update(|m| m.select_service(ServicesContext::Mobile));
                                                }
                                            >
                                                {item.label}
                                            </a>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                        </Show>
                    </div>

                    {mobile_links(config.trailing.clone(), menu)}
                </div>
            </div>
        </nav>
    }
}

//! Боковое меню со сворачиваемыми группами

use crate::layout::global_context::AppGlobalContext;
use crate::routes::routes::{find_screen, Screen};
use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    items: Vec<&'static Screen>,
}

fn menu_group(id: &'static str, label: &'static str, icon: &'static str, keys: &[&str]) -> MenuGroup {
    MenuGroup {
        id,
        label,
        icon,
        items: keys.iter().filter_map(|k| find_screen(k)).collect(),
    }
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        menu_group(
            "master_data",
            "Master Data",
            "products",
            &["products", "categories", "attributes", "suppliers"],
        ),
        menu_group("transactions", "Transactions", "orders", &["orders"]),
        menu_group("reports", "Reports", "reports", &["sales-product-report"]),
    ]
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();

    let expanded_groups = RwSignal::new(
        get_menu_groups()
            .iter()
            .map(|g| g.id.to_string())
            .collect::<Vec<_>>(),
    );

    view! {
        <div class="app-sidebar__content">
            <div class="app-sidebar__tenant">
                {icon("suppliers")}
                <span>{move || ctx.tenant.get()}</span>
            </div>
            {get_menu_groups().into_iter().map(|group| {
                let group_id = group.id;
                view! {
                    <div>
                        <div
                            class="app-sidebar__item"
                            style:padding-left="12px"
                            on:click=move |_| {
                                expanded_groups.update(|items| {
                                    if let Some(pos) = items.iter().position(|x| x == group_id) {
                                        items.remove(pos);
                                    } else {
                                        items.push(group_id.to_string());
                                    }
                                });
                            }
                        >
                            <div class="app-sidebar__item-content">
                                {icon(group.icon)}
                                <span>{group.label}</span>
                            </div>
                            <div
                                class="app-sidebar__chevron"
                                class:app-sidebar__chevron--expanded=move || {
                                    expanded_groups.with(|g| g.iter().any(|x| x == group_id))
                                }
                            >
                                {icon("chevron-right")}
                            </div>
                        </div>

                        <Show when=move || expanded_groups.with(|g| g.iter().any(|x| x == group_id))>
                            <div class="app-sidebar__children">
                                {group.items.iter().map(|screen| {
                                    let key = screen.key;
                                    view! {
                                        <div
                                            class="app-sidebar__item"
                                            class:app-sidebar__item--active=move || ctx.screen.with(|s| s == key)
                                            style:padding-left="10px"
                                            on:click=move |_| ctx.open_screen(key)
                                        >
                                            <div class="app-sidebar__item-content">
                                                {icon(screen.icon)}
                                                <span>{screen.label}</span>
                                            </div>
                                        </div>
                                    }
                                }).collect_view()}
                            </div>
                        </Show>
                    </div>
                }
            }).collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::routes::SCREENS;

    #[test]
    fn test_every_screen_is_in_the_menu() {
        let groups = get_menu_groups();
        for screen in SCREENS {
            assert!(
                groups.iter().any(|g| g.items.iter().any(|s| s.key == screen.key)),
                "{} missing from menu",
                screen.key
            );
        }
    }
}

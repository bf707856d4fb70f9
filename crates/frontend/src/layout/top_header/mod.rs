//! TopHeader - верхняя панель навигации.

use crate::layout::global_context::AppGlobalContext;
use crate::routes::routes::find_screen;
use crate::shared::icons::icon;
use crate::shared::list_utils::capitalize_label;
use leptos::prelude::*;

/// TopHeader: переключатель меню, имя магазина и текущая страница.
#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();

    let is_sidebar_visible = move || ctx.left_open.get();
    let page_label = move || {
        ctx.screen
            .with(|key| find_screen(key).map(|s| s.label.to_string()))
            .unwrap_or_default()
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if is_sidebar_visible() { "Hide navigation" } else { "Show navigation" }
                >
                    {icon("menu")}
                </button>
                <span class="top-header__title">"Back Office"</span>
            </div>
            <div class="top-header__actions">
                <span class="top-header__tenant">{move || capitalize_label(&ctx.tenant.get())}</span>
                <span class="top-header__page">{page_label}</span>
            </div>
        </div>
    }
}

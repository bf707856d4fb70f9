use crate::layout::global_context::AppGlobalContext;
use crate::routes::routes::AppRoutes;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // AppGlobalContext доступен всему приложению через context
    provide_context(AppGlobalContext::new());

    view! {
        <AppRoutes />
    }
}

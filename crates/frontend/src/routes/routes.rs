use crate::domain::a001_product::ui::list::ProductList;
use crate::domain::a002_category::ui::list::CategoryList;
use crate::domain::a003_attribute::ui::list::AttributeList;
use crate::domain::a004_supplier::ui::list::SupplierList;
use crate::domain::a005_order::ui::list::OrderList;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::left::sidebar::Sidebar;
use crate::layout::Shell;
use crate::projections::p900_sales_product_report::ui::list::SalesProductReport;
use leptos::prelude::*;

pub const DEFAULT_SCREEN: &str = "products";

/// Экран: (ключ в адресе, название, иконка)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Screen {
    pub key: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

pub const SCREENS: &[Screen] = &[
    Screen { key: "products", label: "Products", icon: "products" },
    Screen { key: "categories", label: "Categories", icon: "categories" },
    Screen { key: "attributes", label: "Attributes", icon: "attributes" },
    Screen { key: "suppliers", label: "Suppliers", icon: "suppliers" },
    Screen { key: "orders", label: "Orders", icon: "orders" },
    Screen { key: "sales-product-report", label: "Sales Product Report", icon: "reports" },
];

pub fn find_screen(key: &str) -> Option<&'static Screen> {
    SCREENS.iter().find(|s| s.key == key)
}

fn render_screen(key: &str, tenant: String) -> AnyView {
    match key {
        "products" => view! { <ProductList tenant=tenant /> }.into_any(),
        "categories" => view! { <CategoryList tenant=tenant /> }.into_any(),
        "attributes" => view! { <AttributeList tenant=tenant /> }.into_any(),
        "suppliers" => view! { <SupplierList tenant=tenant /> }.into_any(),
        "orders" => view! { <OrderList tenant=tenant /> }.into_any(),
        "sales-product-report" => view! { <SalesProductReport tenant=tenant /> }.into_any(),
        other => {
            log::warn!("unknown screen '{}'", other);
            view! {
                <div class="warning-box">
                    <span class="warning-box__text">{format!("Unknown page: {}", other)}</span>
                </div>
            }
            .into_any()
        }
    }
}

/// Экран пересоздаётся целиком при смене магазина или экрана,
/// поэтому состояние вида всегда читается из своего пространства ключей.
#[component]
fn Content() -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();
    let current = Memo::new(move |_| (ctx.tenant.get(), ctx.screen.get()));

    move || {
        let (tenant, screen) = current.get();
        render_screen(&screen, tenant)
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();

    // Интеграция с роутером, выполняется один раз при создании компонента
    ctx.init_router_integration();

    view! {
        <Shell
            left=|| view! { <Sidebar /> }.into_any()
            center=|| view! { <Content /> }.into_any()
        />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_keys_are_unique() {
        for (i, a) in SCREENS.iter().enumerate() {
            assert!(SCREENS[i + 1..].iter().all(|b| b.key != a.key), "{}", a.key);
        }
        assert!(find_screen(DEFAULT_SCREEN).is_some());
        assert!(find_screen("missing").is_none());
    }
}

//! Глобальный контекст приложения: текущий магазин (tenant), открытый экран
//! и видимость боковой панели.
//!
//! Адрес страницы `/{tenant}/{screen}` - единственный источник навигации:
//! при старте контекст читается из `window.location`, при смене экрана
//! адрес обновляется через History API.

use leptos::prelude::*;
use web_sys::window;

use crate::routes::routes::DEFAULT_SCREEN;

/// Магазин по умолчанию, если в адресе его нет.
pub const DEFAULT_TENANT: &str = "default";

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub tenant: RwSignal<String>,
    pub screen: RwSignal<String>,
    pub left_open: RwSignal<bool>,
}

/// `/{tenant}/{screen}/...` -> `(tenant, screen)`; недостающие сегменты дают `None`.
pub fn parse_path(path: &str) -> (Option<String>, Option<String>) {
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    let tenant = segments.next().map(str::to_string);
    let screen = segments.next().map(str::to_string);
    (tenant, screen)
}

pub fn screen_path(tenant: &str, screen: &str) -> String {
    format!("/{}/{}", tenant, screen)
}

fn current_path() -> String {
    window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_default()
}

impl AppGlobalContext {
    pub fn new() -> Self {
        let (tenant, screen) = parse_path(&current_path());
        Self {
            tenant: RwSignal::new(tenant.unwrap_or_else(|| DEFAULT_TENANT.to_string())),
            screen: RwSignal::new(screen.unwrap_or_else(|| DEFAULT_SCREEN.to_string())),
            left_open: RwSignal::new(true),
        }
    }

    /// Синхронизация адреса со state: запись при смене экрана,
    /// чтение при навигации браузера назад/вперёд.
    pub fn init_router_integration(&self) {
        let this = *self;
        Effect::new(move |_| {
            let path = screen_path(&this.tenant.get(), &this.screen.get());
            if current_path() == path {
                return;
            }
            if let Some(history) = window().and_then(|w| w.history().ok()) {
                if history
                    .push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&path))
                    .is_err()
                {
                    log::warn!("history: failed to push {}", path);
                }
            }
        });

        let handle = window_event_listener(leptos::ev::popstate, move |_| {
            let (tenant, screen) = parse_path(&current_path());
            if let Some(tenant) = tenant {
                this.tenant.set(tenant);
            }
            this.screen
                .set(screen.unwrap_or_else(|| DEFAULT_SCREEN.to_string()));
        });
        on_cleanup(move || handle.remove());
    }

    pub fn open_screen(&self, key: &str) {
        log::debug!("open_screen: {}", key);
        self.screen.set(key.to_string());
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

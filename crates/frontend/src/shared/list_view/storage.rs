//! Хранилище ключ-значение для состояния экранов списка.
//!
//! В браузере это `localStorage`; тесты и окружения без него
//! используют [`MemoryStore`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// `window.localStorage`. Объект хранилища берётся заново при каждом вызове,
/// сам тип JS-ссылок не держит.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(key, value).is_err() {
                log::warn!("localStorage: failed to write {key}");
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// Хранилище в памяти. Клоны делят одну карту, так тест может "перезагрузить"
/// экран поверх записанного предыдущим экземпляром.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.inner
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.inner.borrow_mut().remove(key);
    }
}

/// Общий префикс ключей экрана: `{tenant}_{entity}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    prefix: String,
}

impl Namespace {
    pub fn new(tenant: &str, entity: &str) -> Self {
        let prefix = if tenant.is_empty() {
            entity.to_string()
        } else {
            format!("{tenant}_{entity}")
        };
        Self { prefix }
    }

    pub fn key(&self, field: &str) -> String {
        format!("{}_{}", self.prefix, field)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_keys() {
        let ns = Namespace::new("store1", "products");
        assert_eq!(ns.key("page"), "store1_products_page");
        assert_eq!(Namespace::new("", "products").key("cols"), "products_cols");
    }

    #[test]
    fn test_memory_store_clones_share_data() {
        let a = MemoryStore::new();
        let b = a.clone();
        a.set("k", "v");
        assert_eq!(b.get("k").as_deref(), Some("v"));
        b.remove("k");
        assert!(a.is_empty());
    }
}

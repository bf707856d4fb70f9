use serde::{Deserialize, Serialize};

/// Страница коллекции, как её отдаёт paginator бэкенда.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub total: u64,
    #[serde(default = "default_last_page")]
    pub last_page: u32,
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
}

fn default_last_page() -> u32 {
    1
}

impl<T> Paginated<T> {
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            total: 0,
            last_page: 1,
            current_page: None,
            per_page: None,
        }
    }
}

use serde::{Deserialize, Serialize};

/// Результат удаления одного идентификатора.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteItemResult {
    pub id: String,
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl DeleteItemResult {
    pub fn ok(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            success: true,
            message: None,
        }
    }

    pub fn failed(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            success: false,
            message: Some(message.into()),
        }
    }
}

//! Общий экран списка: сохраняемое состояние, постраничная загрузка,
//! таблица, массовое удаление и выгрузка.
//!
//! Экран сущности задаёт [`columns::EntityConfig`] и тип строки
//! с [`record::ListEntity`], остальное находится здесь.

pub mod binder;
pub mod bulk;
pub mod columns;
pub mod http;
pub mod record;
pub mod storage;
pub mod totals;
pub mod ui;
pub mod view_state;

pub use columns::{ColumnKind, ColumnSpec, EntityConfig};
pub use record::{ListEntity, RawValue};
pub use ui::EntityList;

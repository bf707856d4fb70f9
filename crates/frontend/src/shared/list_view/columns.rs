//! Описание колонок и конфигурация экранов.

/// Как исходное значение колонки превращается в ячейку.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Номер строки на текущей странице, считается при маппинге.
    RowNumber,
    Text,
    /// Вложенная связь, уже развёрнутая сущностью (например `category.name`).
    /// Пустая связь выводится как "-".
    Relation,
    DateTime,
    /// Выводится как `{v}%`, отсутствующее значение как 0.
    Percent,
    Number,
    Image {
        folder: &'static str,
        placeholder: &'static str,
    },
    Tags,
    /// Позиции заказа в раскрытой строке.
    LineItems,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub accessor: &'static str,
    pub title: &'static str,
    pub kind: ColumnKind,
    pub sortable: bool,
    pub summable: bool,
    /// Ячейка-ссылка на карточку записи.
    pub link: bool,
}

impl ColumnSpec {
    pub const fn new(accessor: &'static str, title: &'static str, kind: ColumnKind) -> Self {
        let sortable = !matches!(
            kind,
            ColumnKind::RowNumber | ColumnKind::Image { .. } | ColumnKind::Tags | ColumnKind::LineItems
        );
        Self {
            accessor,
            title,
            kind,
            sortable,
            summable: false,
            link: false,
        }
    }

    pub const fn row_number() -> Self {
        Self::new("no", "No", ColumnKind::RowNumber)
    }

    pub const fn text(accessor: &'static str, title: &'static str) -> Self {
        Self::new(accessor, title, ColumnKind::Text)
    }

    pub const fn relation(accessor: &'static str, title: &'static str) -> Self {
        Self::new(accessor, title, ColumnKind::Relation)
    }

    pub const fn date_time(accessor: &'static str, title: &'static str) -> Self {
        Self::new(accessor, title, ColumnKind::DateTime)
    }

    pub const fn percent(accessor: &'static str, title: &'static str) -> Self {
        Self::new(accessor, title, ColumnKind::Percent)
    }

    pub const fn number(accessor: &'static str, title: &'static str) -> Self {
        Self::new(accessor, title, ColumnKind::Number)
    }

    pub const fn image(
        accessor: &'static str,
        title: &'static str,
        folder: &'static str,
        placeholder: &'static str,
    ) -> Self {
        Self::new(accessor, title, ColumnKind::Image { folder, placeholder })
    }

    pub const fn tags(accessor: &'static str, title: &'static str) -> Self {
        Self::new(accessor, title, ColumnKind::Tags)
    }

    pub const fn line_items(accessor: &'static str, title: &'static str) -> Self {
        Self::new(accessor, title, ColumnKind::LineItems)
    }

    pub const fn summable(mut self) -> Self {
        self.summable = true;
        self
    }

    pub const fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    pub const fn linked(mut self) -> Self {
        self.link = true;
        self
    }

    /// Доступна в фильтре по колонке.
    pub fn is_filterable(&self) -> bool {
        !matches!(
            self.kind,
            ColumnKind::RowNumber | ColumnKind::Image { .. } | ColumnKind::LineItems
        ) && self.accessor != "created_at"
    }

    /// Доступна в меню видимости. В отчётах скрывается любая колонка.
    pub fn is_toggleable(&self, report: bool) -> bool {
        report
            || !(matches!(self.kind, ColumnKind::RowNumber | ColumnKind::Image { .. })
                || self.accessor == "created_at")
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.kind, ColumnKind::Number | ColumnKind::Percent)
    }
}

/// Всё, что нужно экрану списка, кроме типа строки.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityConfig {
    /// Пространство ключей хранилища и метка файла, например `products`.
    pub key: &'static str,
    pub title: &'static str,
    /// Сегмент пути коллекции после `/api/{tenant}/`.
    pub collection: &'static str,
    pub columns: &'static [ColumnSpec],
    pub default_page_size: u32,
    /// Заглушка для отсутствующих значений.
    pub missing_value: &'static str,
    pub selectable: bool,
    /// Отчёт: фильтры по дате и цене, выгрузка, раскрытие строк.
    pub report: bool,
    /// Ссылки ведут на `/{tenant}/{detail_path}/{id}`.
    pub detail_path: Option<&'static str>,
}

impl EntityConfig {
    pub fn column(&self, accessor: &str) -> Option<&'static ColumnSpec> {
        self.columns.iter().find(|c| c.accessor == accessor)
    }

    pub fn filterable_columns(&self) -> impl Iterator<Item = &'static ColumnSpec> {
        self.columns.iter().filter(|c| c.is_filterable())
    }

    pub fn toggleable_columns(&self) -> impl Iterator<Item = &'static ColumnSpec> {
        let report = self.report;
        self.columns.iter().filter(move |c| c.is_toggleable(report))
    }

    pub fn summable_columns(&self) -> impl Iterator<Item = &'static ColumnSpec> {
        self.columns.iter().filter(|c| c.summable)
    }

    pub fn has_line_items(&self) -> bool {
        self.columns
            .iter()
            .any(|c| matches!(c.kind, ColumnKind::LineItems))
    }
}

//! Форматирование дат и времени
//!
//! Все списки показывают время в локали магазина (id-ID)
//! и поясе Asia/Jakarta (UTC+7) независимо от настроек браузера.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, Utc};

const JAKARTA_OFFSET_SECS: i32 = 7 * 3600;

fn jakarta() -> FixedOffset {
    // 7 часов всегда в допустимом диапазоне
    FixedOffset::east_opt(JAKARTA_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Разбор форматов времени, которые отдаёт API.
/// Значения без смещения считаются UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc().fixed_offset());
        }
    }
    None
}

/// Время API в формате `dd/MM/yyyy, HH.mm.ss` по Asia/Jakarta
/// Пример: "2024-03-15T14:02:26.000000Z" -> "15/03/2024, 21.02.26"
///
/// Дата без времени выводится как `dd/MM/yyyy`, нераспознанное значение
/// возвращается без изменений.
pub fn format_datetime(datetime_str: &str) -> String {
    match parse_timestamp(datetime_str) {
        Some(dt) => dt
            .with_timezone(&jakarta())
            .format("%d/%m/%Y, %H.%M.%S")
            .to_string(),
        None => format_date(datetime_str),
    }
}

/// ISO-дата в формате `dd/MM/yyyy`
/// Пример: "2024-03-15" -> "15/03/2024"
pub fn format_date(date_str: &str) -> String {
    let date_part = date_str.split(['T', ' ']).next().unwrap_or(date_str);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(d) => d.format("%d/%m/%Y").to_string(),
        Err(_) => date_str.to_string(),
    }
}

/// Метка времени в имени файла выгрузки: `yyyyMMdd_HHmmss` по Asia/Jakarta.
pub fn file_stamp(now: DateTime<Utc>) -> String {
    now.with_timezone(&jakarta())
        .format("%Y%m%d_%H%M%S")
        .to_string()
}

/// Время формирования для шапки выгрузки.
pub fn generated_at(now: DateTime<Utc>) -> String {
    now.with_timezone(&jakarta())
        .format("%d/%m/%Y, %H.%M.%S")
        .to_string()
}

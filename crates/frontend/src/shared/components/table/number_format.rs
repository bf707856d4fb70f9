//! Форматирование чисел для ячеек и итогов (id-ID: `.` для разрядов, `,` для дробной части)

/// Разделители разрядов и фиксированное число знаков после запятой
///
/// # Примеры
///
/// ```ignore
/// let formatted = format_number_with_decimals(1234.567, 2);
/// assert_eq!(formatted, "1.234,57");
/// ```
pub fn format_number_with_decimals(value: f64, decimals: u8) -> String {
    let formatted = format!("{:.*}", decimals.min(6) as usize, value);

    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (formatted.as_str(), None),
    };
    let (sign, digits) = match integer_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    match decimal_part {
        Some(d) => format!("{}{},{}", sign, grouped, d),
        None => format!("{}{}", sign, grouped),
    }
}

/// Целые без дробной части, остальные с двумя знаками
///
/// ```ignore
/// assert_eq!(format_number(150000.0), "150.000");
/// assert_eq!(format_number(12.5), "12,50");
/// ```
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format_number_with_decimals(value, 0)
    } else {
        format_number_with_decimals(value, 2)
    }
}

/// Проценты: `{v}%` с исходным значением, без разрядов
pub fn format_percent(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}%", value as i64)
    } else {
        format!("{}%", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_with_decimals() {
        assert_eq!(format_number_with_decimals(1234.567, 0), "1.235");
        assert_eq!(format_number_with_decimals(1234.567, 1), "1.234,6");
        assert_eq!(format_number_with_decimals(1234.567, 2), "1.234,57");
        assert_eq!(format_number_with_decimals(1234567.891, 3), "1.234.567,891");
        assert_eq!(format_number_with_decimals(-1234.56, 2), "-1.234,56");
        assert_eq!(format_number_with_decimals(0.0, 2), "0,00");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(150000.0), "150.000");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(12.5), "12,50");
        assert_eq!(format_number(-100000.0), "-100.000");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(10.0), "10%");
        assert_eq!(format_percent(0.0), "0%");
        assert_eq!(format_percent(2.5), "2.5%");
    }
}

//! Утилиты для обращения фронтенда к бэкенду

/// Базовый URL для запросов к API
///
/// Строится из текущего адреса окна,
/// бэкенд слушает порт 3000.
///
/// # Возвращает
/// - URL вида "http://localhost:3000" или "https://shop.example:3000"
/// - пустую строку, если window недоступен
///
/// # Пример
/// ```ignore
/// let url = format!("{}/api/{}/products", api_base(), tenant);
/// ```
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    origin(&protocol, &hostname)
}

fn origin(protocol: &str, hostname: &str) -> String {
    format!("{}//{}:3000", protocol, hostname)
}

/// Адрес сервера со слешем в конце; загруженные изображения лежат в
/// `{server_base}storage/{folder}/{file}`.
pub fn server_base() -> String {
    with_trailing_slash(&api_base())
}

fn with_trailing_slash(base: &str) -> String {
    if base.is_empty() || base.ends_with('/') {
        base.to_string()
    } else {
        format!("{}/", base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_uses_backend_port() {
        assert_eq!(origin("https:", "shop.test"), "https://shop.test:3000");
    }

    #[test]
    fn test_trailing_slash() {
        assert_eq!(with_trailing_slash("http://a:3000"), "http://a:3000/");
        assert_eq!(with_trailing_slash("http://a:3000/"), "http://a:3000/");
        assert_eq!(with_trailing_slash(""), "");
    }
}

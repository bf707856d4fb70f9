use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub payment: PaymentConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    /// Собранный frontend (trunk dist), раздаётся как fallback.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

fn default_port() -> u16 {
    3000
}

fn default_static_dir() -> String {
    "dist".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

/// Настройки платёжного шлюза (Snap API)
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PaymentConfig {
    pub server_key: String,
    /// false = песочница
    #[serde(default)]
    pub is_production: bool,
    /// Обрезать поля клиента и товаров до лимитов шлюза
    #[serde(default = "default_true")]
    pub is_sanitized: bool,
    /// 3-D Secure для карт
    #[serde(default = "default_true")]
    pub is_3ds: bool,
}

fn default_true() -> bool {
    true
}

/// Конфигурация по умолчанию, встроенная в бинарник
const DEFAULT_CONFIG: &str = r#"
[server]
port = 3000
static_dir = "dist"

[payment]
server_key = ""
is_production = false
is_sanitized = true
is_3ds = true
"#;

/// Загрузка конфигурации из config.toml
///
/// Порядок поиска:
/// 1. Рядом с исполняемым файлом (для production)
/// 2. Иначе встроенная конфигурация по умолчанию
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                return parse_config(&contents);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    if config.payment.server_key.trim().is_empty() {
        tracing::warn!("payment.server_key is empty, checkout requests will be rejected by the gateway");
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.static_dir, "dist");
        assert!(!config.payment.is_production);
        assert!(config.payment.is_sanitized);
        assert!(config.payment.is_3ds);
    }

    #[test]
    fn test_payment_flags_default_when_omitted() {
        let config = parse_config(
            r#"
            [payment]
            server_key = "SB-Mid-server-abc"
            "#,
        )
        .unwrap();
        assert_eq!(config.payment.server_key, "SB-Mid-server-abc");
        assert!(!config.payment.is_production);
        assert!(config.payment.is_sanitized);
        assert!(config.payment.is_3ds);
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_missing_payment_section_is_an_error() {
        assert!(parse_config("[server]\nport = 8080\n").is_err());
    }
}

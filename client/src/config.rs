use std::path::PathBuf;

use common::constants::{CATALOG_PATH_ENV, DEFAULT_CUSTOMER_NAME, LOG_LEVEL_ENV};
use common::logger::LogLevel;

/// Configuración de la sesión, tomada de los argumentos y del entorno.
#[derive(Debug, Clone, PartialEq)]
pub struct StorefrontConfig {
    /// Nombre con el que se saluda al comensal.
    pub customer_name: String,
    /// Catálogo alternativo; `None` usa el embebido.
    pub catalog_path: Option<PathBuf>,
    pub log_level: LogLevel,
}

impl StorefrontConfig {
    pub fn from_env(args: Vec<String>) -> Self {
        Self::from_parts(
            args,
            std::env::var(CATALOG_PATH_ENV).ok(),
            std::env::var(LOG_LEVEL_ENV).ok(),
        )
    }

    /// `args` follows `std::env::args`, program name first.
    pub fn from_parts(args: Vec<String>, catalog: Option<String>, log_level: Option<String>) -> Self {
        let customer_name = args
            .get(1)
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_CUSTOMER_NAME.to_string());

        StorefrontConfig {
            customer_name,
            catalog_path: catalog.filter(|path| !path.trim().is_empty()).map(PathBuf::from),
            log_level: log_level
                .and_then(|level| level.parse().ok())
                .unwrap_or(LogLevel::Info),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::from_parts(args(&["client"]), None, None);
        assert_eq!(config.customer_name, "guest");
        assert!(config.catalog_path.is_none());
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_values_from_args_and_env() {
        let config = StorefrontConfig::from_parts(
            args(&["client", "Ana"]),
            Some("/tmp/catalog.json".to_string()),
            Some("debug".to_string()),
        );
        assert_eq!(config.customer_name, "Ana");
        assert_eq!(config.catalog_path, Some(PathBuf::from("/tmp/catalog.json")));
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_bad_log_level_falls_back_to_info() {
        let config = StorefrontConfig::from_parts(args(&["client", " "]), Some(String::new()), Some("loud".to_string()));
        assert_eq!(config.customer_name, "guest");
        assert!(config.catalog_path.is_none());
        assert_eq!(config.log_level, LogLevel::Info);
    }
}

//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Treasury policy knobs.
    #[serde(default)]
    pub treasury: TreasuryConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Deployment-level treasury policy.
///
/// The 10% national levy over the congregational base and the 100% remittance
/// of designated buckets are business rules, not configuration; what a
/// deployment may adjust is *which* buckets are fully remitted and an optional
/// cap on the calculated pastoral salary.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TreasuryConfig {
    /// Fully-remitted bucket overrides (snake_case bucket names). Empty means
    /// the built-in set.
    #[serde(default)]
    pub remitidos: Vec<String>,
    /// Optional cap on the calculated pastoral salary, in whole guaraníes.
    #[serde(default)]
    pub salario_pastoral_tope: Option<i64>,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Layering: `config/default` ← `config/{RUN_MODE}` ← `TESORERIA__*`
    /// environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("TESORERIA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_treasury_defaults() {
        let cfg = TreasuryConfig::default();
        assert!(cfg.remitidos.is_empty());
        assert_eq!(cfg.salario_pastoral_tope, None);
    }

    #[test]
    fn test_deserialize_minimal() {
        let cfg: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(
                "database = { url = \"postgres://localhost/tesoreria\" }",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(cfg.database.url, "postgres://localhost/tesoreria");
        assert_eq!(cfg.database.max_connections, 10);
        assert_eq!(cfg.database.min_connections, 1);
        assert!(cfg.treasury.remitidos.is_empty());
    }
}

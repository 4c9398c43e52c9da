//! Configuration loading and management

use crate::core::auth::DemoAccount;
use crate::core::error::ConfigError;
use crate::core::validation::{RuleTable, ValidationRule};
use crate::pricing::{PriceBook, PricingConfig};
use anyhow::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable naming a YAML config file
pub const CONFIG_ENV: &str = "ONEBARN_CONFIG";

/// Listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// `host:port` for binding
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Product copy shared by responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandConfig {
    pub product_name: String,
    pub support_email: String,
    pub support_phone: String,
}

impl Default for BrandConfig {
    fn default() -> Self {
        Self {
            product_name: "One Barn AI".to_string(),
            support_email: "support@onebarn.ai".to_string(),
            support_phone: "(859) 555-0142".to_string(),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub brand: BrandConfig,

    #[serde(default)]
    pub pricing: PricingConfig,

    /// Accounts accepted by demo-mode login
    #[serde(default = "DemoAccount::defaults")]
    pub demo_accounts: Vec<DemoAccount>,

    /// Field name to rule, merged over the built-in registration rules
    #[serde(default)]
    pub validation_overrides: IndexMap<String, ValidationRule>,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(path.display().to_string()),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read the file named by `ONEBARN_CONFIG`, or fall back to defaults
    pub fn load() -> Result<Self> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) if !path.trim().is_empty() => {
                tracing::info!(path = %path, "loading configuration");
                Self::from_yaml_file(path.trim())
            }
            _ => {
                tracing::info!("{} not set, using built-in configuration", CONFIG_ENV);
                Ok(Self::default_config())
            }
        }
    }

    /// Built-in product catalogue and demo accounts
    pub fn default_config() -> Self {
        Self {
            server: ServerConfig::default(),
            brand: BrandConfig::default(),
            pricing: PricingConfig::default(),
            demo_accounts: DemoAccount::defaults(),
            validation_overrides: IndexMap::new(),
        }
    }

    /// Reject incoherent catalogues
    pub fn validate(&self) -> Result<(), ConfigError> {
        PriceBook::from_config(&self.pricing)?;

        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                value: "0".to_string(),
                message: "port must be non-zero".to_string(),
            });
        }
        for (field, rule) in &self.validation_overrides {
            if let (Some(min), Some(max)) = (rule.min_length, rule.max_length)
                && min > max
            {
                return Err(ConfigError::InvalidValue {
                    field: format!("validation_overrides.{}", field),
                    value: format!("{}..{}", min, max),
                    message: "min_length exceeds max_length".to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn price_book(&self) -> Result<PriceBook, ConfigError> {
        PriceBook::from_config(&self.pricing)
    }

    /// Registration rules with overrides applied
    pub fn rule_table(&self) -> RuleTable {
        RuleTable::registration().with_overrides(&self.validation_overrides)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

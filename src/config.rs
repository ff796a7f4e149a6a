//! Storefront settings. Defaults reproduce the storefront's built-in constants;
//! a TOML file may override any subset of them.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// GST applied to `subtotal - discount`.
    pub tax_rate: f64,
    /// Orders strictly above this subtotal ship free.
    pub free_shipping_threshold: u64,
    pub shipping_fee: u64,
    /// Coupon code to flat discount. Codes are case-sensitive.
    pub coupons: BTreeMap<String, u64>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            tax_rate: 0.12,
            free_shipping_threshold: 999,
            shipping_fee: 50,
            coupons: BTreeMap::from([("SAVE10".to_string(), 500)]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    pub page_size: usize,
    /// Name of the storage slot holding the serialized cart.
    pub cart_slot: String,
    /// Directory for file-backed cart storage; in-memory when unset.
    pub storage_dir: Option<PathBuf>,
    pub channel_buffer: usize,
    pub pricing: PricingConfig,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            page_size: 20,
            cart_slot: "cart".to_string(),
            storage_dir: None,
            channel_buffer: 32,
            pricing: PricingConfig::default(),
        }
    }
}

impl StorefrontConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be at least 1".into()));
        }
        if self.channel_buffer == 0 {
            return Err(ConfigError::Invalid("channel_buffer must be at least 1".into()));
        }
        if self.cart_slot.trim().is_empty() {
            return Err(ConfigError::Invalid("cart_slot must not be empty".into()));
        }
        if !(0.0..=1.0).contains(&self.pricing.tax_rate) {
            return Err(ConfigError::Invalid(format!(
                "tax_rate {} outside 0..=1",
                self.pricing.tax_rate
            )));
        }
        Ok(())
    }
}

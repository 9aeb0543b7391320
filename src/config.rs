//! Catalog configuration
//!
//! Loaded from YAML, every field optional:
//!
//! ```yaml
//! storage_key: demo_products_v1
//! seed_url: products.json
//! description_limit: 90
//! currency_symbol: "$"
//! messages:
//!   not_found: "Product not found"
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Key the collection is persisted under.
pub const DEFAULT_STORAGE_KEY: &str = "demo_products_v1";

/// Seed resource path, relative to the page (or an absolute URL).
pub const DEFAULT_SEED_URL: &str = "products.json";

/// Card descriptions longer than this many characters are truncated.
pub const DEFAULT_DESCRIPTION_LIMIT: usize = 90;

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Key-value store key holding the JSON product array
    pub storage_key: String,

    /// Seed resource fetched when the store is empty
    pub seed_url: String,

    /// Character bound for card descriptions
    pub description_limit: usize,

    /// Prefix for formatted prices
    pub currency_symbol: String,

    /// User-visible text
    pub messages: Messages,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            seed_url: DEFAULT_SEED_URL.to_string(),
            description_limit: DEFAULT_DESCRIPTION_LIMIT,
            currency_symbol: "$".to_string(),
            messages: Messages::default(),
        }
    }
}

impl CatalogConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: CatalogConfig = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Format a price for display, e.g. `$12.5`
    pub fn format_price(&self, price_text: &str) -> String {
        format!("{}{}", self.currency_symbol, price_text)
    }
}

/// Static UI text. Never escaped: these are template strings, not product data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    /// Placeholder shown when the filtered list is empty
    pub empty_list: String,
    /// Notice for a detail route whose product does not exist
    pub not_found: String,
    /// Notice when the seed resource could not be loaded
    pub seed_failed: String,
    /// Confirmation prompt before deleting
    pub confirm_delete: String,
    pub view_label: String,
    pub delete_label: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            empty_list: "No products found.".to_string(),
            not_found: "Product not found".to_string(),
            seed_failed: "Could not load product data.".to_string(),
            confirm_delete: "Are you sure you want to delete this product?".to_string(),
            view_label: "View".to_string(),
            delete_label: "Delete".to_string(),
        }
    }
}

//! Catalog data model
//!
//! `Product` is the only entity. Its JSON shape is shared by the seed resource
//! and the persisted store:
//!
//! ```json
//! { "id": "1", "title": "A", "description": "d", "price": 5, "image": "i.png" }
//! ```

use serde::{Deserialize, Deserializer, Serialize};

/// A catalog item
///
/// `id` is an opaque string. Numeric ids in JSON are rejected rather than
/// coerced, so `1` and `"1"` never compare equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(deserialize_with = "non_negative_price")]
    pub price: f64,
    pub image: String,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            price,
            image: image.into(),
        }
    }

    /// Shortest decimal form of the price: `5` → `"5"`, `12.5` → `"12.5"`.
    ///
    /// Prices of `1e21` and above or below `1e-6` use exponent form with an
    /// explicit sign (`1e+21`, `1.5e-7`), the way browsers print numbers.
    /// Used both for display and for query matching.
    pub fn price_text(&self) -> String {
        let price = self.price;
        if price == 0.0 {
            // also folds -0.0
            return "0".to_string();
        }
        if price.abs() >= 1e21 || price.abs() < 1e-6 {
            let exp = format!("{:e}", price);
            return match exp.split_once('e') {
                Some((mantissa, power)) if !power.starts_with('-') => {
                    format!("{}e+{}", mantissa, power)
                }
                _ => exp,
            };
        }
        price.to_string()
    }
}

fn non_negative_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let price = f64::deserialize(deserializer)?;
    if price.is_finite() && price >= 0.0 {
        Ok(price)
    } else {
        Err(serde::de::Error::custom(format!(
            "price must be a non-negative number, got {}",
            price
        )))
    }
}

/// Find the first product with the given id
pub fn find_product<'a>(products: &'a [Product], id: &str) -> Option<&'a Product> {
    products.iter().find(|p| p.id == id)
}

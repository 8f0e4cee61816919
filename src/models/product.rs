use serde::{Deserialize, Serialize};

use super::{default_true, require_text, FieldSpec, Schema};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    #[serde(default = "default_true")]
    pub in_stock: bool,
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("title", "string").describe("Product title"),
    FieldSpec::optional("description", "string").describe("Product description"),
    FieldSpec::required("price", "number").describe("Price in dollars"),
    FieldSpec::required("category", "string").describe("Product category"),
    FieldSpec::optional("in_stock", "boolean").describe("Whether product is in stock"),
];

impl Schema for Product {
    const NAME: &'static str = "Product";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn validate(&self) -> Result<(), String> {
        require_text("title", &self.title)?;
        require_text("category", &self.category)?;

        if !self.price.is_finite() || self.price < 0.0 {
            return Err("price must be a non-negative number".to_string());
        }

        Ok(())
    }
}

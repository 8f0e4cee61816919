use serde::{Deserialize, Serialize};

use super::{default_true, require_range, require_text, FieldSpec, Schema};

/// General-purpose user record kept for the database viewer.
/// `email` is free text here, unlike the school records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
    pub address: String,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", "string").describe("Full name"),
    FieldSpec::required("email", "string").describe("Email address"),
    FieldSpec::required("address", "string").describe("Address"),
    FieldSpec::optional("age", "integer").describe("Age in years"),
    FieldSpec::optional("is_active", "boolean").describe("Whether user is active"),
];

impl Schema for User {
    const NAME: &'static str = "User";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn validate(&self) -> Result<(), String> {
        require_text("name", &self.name)?;
        require_text("email", &self.email)?;
        require_text("address", &self.address)?;

        if let Some(age) = self.age {
            require_range("age", age, 0, 120)?;
        }

        Ok(())
    }
}

use serde::{Deserialize, Serialize};

use super::{default_true, require_email, require_text, FieldSpec, Schema};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("first_name", "string"),
    FieldSpec::required("last_name", "string"),
    FieldSpec::required("email", "email"),
    FieldSpec::optional("department", "string"),
    FieldSpec::optional("phone", "string"),
    FieldSpec::optional("is_active", "boolean"),
];

impl Schema for Teacher {
    const NAME: &'static str = "Teacher";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn validate(&self) -> Result<(), String> {
        require_text("first_name", &self.first_name)?;
        require_text("last_name", &self.last_name)?;
        require_email("email", &self.email)
    }
}

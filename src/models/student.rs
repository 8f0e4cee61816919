use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{default_true, require_email, require_range, require_text, FieldSpec, Schema};

/// A student enrolled at the school.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub grade_level: Option<i64>,
    #[serde(default)]
    pub enrollment_date: Option<NaiveDate>,
    #[serde(default)]
    pub guardian_name: Option<String>,
    #[serde(default)]
    pub guardian_phone: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("first_name", "string").describe("First name"),
    FieldSpec::required("last_name", "string").describe("Last name"),
    FieldSpec::required("email", "email").describe("Student email"),
    FieldSpec::optional("grade_level", "integer").describe("Grade 1-12"),
    FieldSpec::optional("enrollment_date", "date").describe("Enrollment date"),
    FieldSpec::optional("guardian_name", "string"),
    FieldSpec::optional("guardian_phone", "string"),
    FieldSpec::optional("is_active", "boolean"),
];

impl Schema for Student {
    const NAME: &'static str = "Student";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn validate(&self) -> Result<(), String> {
        require_text("first_name", &self.first_name)?;
        require_text("last_name", &self.last_name)?;
        require_email("email", &self.email)?;

        if let Some(grade) = self.grade_level {
            require_range("grade_level", grade, 1, 12)?;
        }

        Ok(())
    }
}

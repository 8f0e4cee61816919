use serde::{Deserialize, Serialize};

use super::{require_range, require_text, FieldSpec, Schema};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub code: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Reference to a teacher `_id`.
    #[serde(default)]
    pub teacher_id: Option<String>,
    #[serde(default = "default_credits")]
    pub credits: Option<i64>,
    #[serde(default)]
    pub grade_levels: Option<Vec<i64>>,
}

fn default_credits() -> Option<i64> {
    Some(1)
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("code", "string").describe("Course code, e.g., MATH101"),
    FieldSpec::required("title", "string"),
    FieldSpec::optional("description", "string"),
    FieldSpec::optional("teacher_id", "string").describe("Reference to teacher _id"),
    FieldSpec::optional("credits", "integer"),
    FieldSpec::optional("grade_levels", "integer[]").describe("Eligible grade levels"),
];

impl Schema for Course {
    const NAME: &'static str = "Course";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn validate(&self) -> Result<(), String> {
        require_text("code", &self.code)?;
        require_text("title", &self.title)?;

        if let Some(credits) = self.credits {
            require_range("credits", credits, 0, 10)?;
        }

        for grade in self.grade_levels.iter().flatten() {
            require_range("grade_levels", *grade, 1, 12)?;
        }

        Ok(())
    }
}

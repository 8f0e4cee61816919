use serde::{Deserialize, Serialize};

use super::{require_text, FieldSpec, Schema};

/// Links a student to a course for a term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    pub student_id: String,
    pub course_id: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub term: Option<String>,
}

fn default_status() -> String {
    "enrolled".to_string()
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("student_id", "string").describe("Reference to student _id"),
    FieldSpec::required("course_id", "string").describe("Reference to course _id"),
    FieldSpec::optional("status", "string").describe("enrolled, waitlisted, completed, dropped"),
    FieldSpec::optional("term", "string").describe("e.g., Fall 2025"),
];

impl Schema for Enrollment {
    const NAME: &'static str = "Enrollment";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn validate(&self) -> Result<(), String> {
        require_text("student_id", &self.student_id)?;
        require_text("course_id", &self.course_id)
    }
}

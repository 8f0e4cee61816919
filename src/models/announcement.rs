use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{require_text, FieldSpec, Schema};

/// A notice shown in the announcement feed. Pinned entries sort first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    pub title: String,
    pub body: String,
    /// Free text; the usual values are all, students, teachers and parents.
    #[serde(default = "default_audience")]
    pub audience: String,
    #[serde(default)]
    pub publish_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pinned: bool,
}

fn default_audience() -> String {
    "all".to_string()
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("title", "string"),
    FieldSpec::required("body", "string"),
    FieldSpec::optional("audience", "string").describe("all, students, teachers, parents"),
    FieldSpec::optional("publish_at", "datetime"),
    FieldSpec::optional("expires_at", "datetime"),
    FieldSpec::optional("pinned", "boolean"),
];

impl Schema for Announcement {
    const NAME: &'static str = "Announcement";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn validate(&self) -> Result<(), String> {
        require_text("title", &self.title)
    }
}

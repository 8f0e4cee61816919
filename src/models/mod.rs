// Models module
// Record schemas for the school collections, plus two general-purpose examples

pub mod announcement;
pub mod course;
pub mod enrollment;
pub mod product;
pub mod student;
pub mod teacher;
pub mod user;

use serde::{de::DeserializeOwned, Serialize};

// Re-export commonly used types
pub use announcement::Announcement;
pub use course::Course;
pub use enrollment::Enrollment;
pub use product::Product;
pub use student::Student;
pub use teacher::Teacher;
pub use user::User;

/// A record kind stored in its own collection.
pub trait Schema: Serialize + DeserializeOwned {
    /// Model name; the collection is its lowercase form.
    const NAME: &'static str;

    fn fields() -> &'static [FieldSpec];

    fn validate(&self) -> Result<(), String>;

    fn collection() -> String {
        Self::NAME.to_lowercase()
    }
}

/// One field of a schema as published by `GET /schema`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub required: bool,
    pub description: Option<&'static str>,
}

impl FieldSpec {
    pub const fn required(name: &'static str, kind: &'static str) -> Self {
        Self { name, kind, required: true, description: None }
    }

    pub const fn optional(name: &'static str, kind: &'static str) -> Self {
        Self { name, kind, required: false, description: None }
    }

    pub const fn describe(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SchemaDescriptor {
    pub name: &'static str,
    pub collection: String,
    pub fields: &'static [FieldSpec],
}

pub fn describe<S: Schema>() -> SchemaDescriptor {
    SchemaDescriptor {
        name: S::NAME,
        collection: S::collection(),
        fields: S::fields(),
    }
}

/// Every known schema, in declaration order.
pub fn catalogue() -> Vec<SchemaDescriptor> {
    vec![
        describe::<Student>(),
        describe::<Teacher>(),
        describe::<Course>(),
        describe::<Enrollment>(),
        describe::<Announcement>(),
        describe::<User>(),
        describe::<Product>(),
    ]
}

pub(crate) fn default_true() -> bool {
    true
}

pub(crate) fn require_text(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} cannot be empty", field));
    }
    Ok(())
}

pub(crate) fn require_range(field: &str, value: i64, min: i64, max: i64) -> Result<(), String> {
    if value < min || value > max {
        return Err(format!("{} must be between {} and {}", field, min, max));
    }
    Ok(())
}

/// Simple email format check: one `@`, a dotted domain, no exotic characters.
pub(crate) fn is_valid_email(email: &str) -> bool {
    let parts: Vec<&str> = email.split('@').collect();

    if parts.len() != 2 {
        return false;
    }

    let local = parts[0];
    let domain = parts[1];

    if local.is_empty() || local.len() > 64 {
        return false;
    }

    if domain.is_empty() || domain.len() > 253 {
        return false;
    }

    // Domain should contain at least one dot
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return false;
    }

    let valid_chars = |c: char| c.is_alphanumeric() || ".-_+".contains(c);

    local.chars().all(valid_chars) && domain.chars().all(|c| c.is_alphanumeric() || ".-".contains(c))
}

pub(crate) fn require_email(field: &str, value: &str) -> Result<(), String> {
    require_text(field, value)?;
    if !is_valid_email(value.trim()) {
        return Err(format!("{} is not a valid email address", field));
    }
    Ok(())
}

// File: formcraft-schema/src/field.rs
// Purpose: Field definitions and their validation settings

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::FieldId;

/// The kind of input a field renders as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Text,
    Textarea,
    Dropdown,
    Checkbox,
    Radio,
    File,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Textarea => "textarea",
            FieldType::Dropdown => "dropdown",
            FieldType::Checkbox => "checkbox",
            FieldType::Radio => "radio",
            FieldType::File => "file",
        }
    }

    /// Dropdowns and radio groups pick from `options`
    pub fn has_options(&self) -> bool {
        matches!(self, FieldType::Dropdown | FieldType::Radio)
    }

    /// Free-text inputs subject to length rules
    pub fn is_free_text(&self) -> bool {
        matches!(self, FieldType::Text | FieldType::Textarea)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Format policy for single-line text fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextFormat {
    #[default]
    None,
    Email,
    Password,
    Phone,
}

impl TextFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextFormat::None => "none",
            TextFormat::Email => "email",
            TextFormat::Password => "password",
            TextFormat::Phone => "phone",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, TextFormat::None)
    }

    /// Email, password and phone formats replace the generic length rules
    pub fn overrides_length(&self) -> bool {
        !self.is_none()
    }
}

impl fmt::Display for TextFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation settings attached to a field
///
/// Which settings take effect depends on the field type: lengths apply to
/// text and textarea, `format` to text, `file_types`/`max_size` to file.
/// Settings that do not apply are kept but ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Validations {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub format: TextFormat,
    /// Allowed MIME types
    pub file_types: Option<Vec<String>>,
    /// Maximum upload size in bytes
    pub max_size: Option<u64>,
}

impl Validations {
    pub fn is_empty(&self) -> bool {
        self == &Validations::default()
    }
}

/// A visibility condition: show this field only when the field labelled
/// `label` has a value
///
/// The label is resolved to a field id by the owning [`FormSchema`] whenever
/// the schema is edited, so a condition keeps pointing at the same field when
/// that field is renamed. A label that matches no field, or more than one,
/// leaves the condition unresolved.
///
/// [`FormSchema`]: crate::FormSchema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub(crate) label: String,
    pub(crate) target: Option<FieldId>,
}

impl Condition {
    /// A condition on `label`, not yet resolved against any schema
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: None,
        }
    }

    /// Label of the referenced field
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Id of the referenced field, when the label resolved to exactly one field
    pub fn target(&self) -> Option<&FieldId> {
        self.target.as_ref()
    }

    pub fn is_resolved(&self) -> bool {
        self.target.is_some()
    }
}

/// One configurable input in a form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    pub id: FieldId,
    pub label: String,
    pub field_type: FieldType,
    pub options: Vec<String>,
    pub required: bool,
    pub validations: Validations,
    pub condition: Option<Condition>,
}

impl FieldDefinition {
    /// A blank field: no options, optional, no validations, always shown
    pub fn new(id: impl Into<FieldId>, label: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            field_type,
            options: Vec::new(),
            required: false,
            validations: Validations::default(),
            condition: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_min_length(mut self, min: usize) -> Self {
        self.validations.min_length = Some(min);
        self
    }

    pub fn with_max_length(mut self, max: usize) -> Self {
        self.validations.max_length = Some(max);
        self
    }

    pub fn with_format(mut self, format: TextFormat) -> Self {
        self.validations.format = format;
        self
    }

    pub fn with_file_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.validations.file_types = Some(types.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_max_size(mut self, bytes: u64) -> Self {
        self.validations.max_size = Some(bytes);
        self
    }

    /// Show this field only when the field labelled `label` has a value
    pub fn shown_when(mut self, label: impl Into<String>) -> Self {
        self.condition = Some(Condition::new(label));
        self
    }

    /// Label of the field this one depends on, if any
    pub fn conditional_field(&self) -> Option<&str> {
        self.condition.as_ref().map(Condition::label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let field = FieldDefinition::new(3, "Email", FieldType::Text)
            .required()
            .with_format(TextFormat::Email)
            .shown_when("Name");

        assert_eq!(field.id, FieldId::Numeric(3));
        assert!(field.required);
        assert_eq!(field.validations.format, TextFormat::Email);
        assert_eq!(field.conditional_field(), Some("Name"));
        assert!(!field.condition.as_ref().unwrap().is_resolved());
    }

    #[test]
    fn test_format_overrides_length() {
        assert!(!TextFormat::None.overrides_length());
        assert!(TextFormat::Email.overrides_length());
        assert!(TextFormat::Password.overrides_length());
        assert!(TextFormat::Phone.overrides_length());
    }

    #[test]
    fn test_field_type_groups() {
        assert!(FieldType::Dropdown.has_options());
        assert!(FieldType::Radio.has_options());
        assert!(!FieldType::Checkbox.has_options());
        assert!(FieldType::Textarea.is_free_text());
        assert!(!FieldType::File.is_free_text());
        assert_eq!(FieldType::Textarea.to_string(), "textarea");
    }

    #[test]
    fn test_empty_validations() {
        assert!(Validations::default().is_empty());
        let field = FieldDefinition::new(1, "x", FieldType::Text).with_min_length(2);
        assert!(!field.validations.is_empty());
    }
}

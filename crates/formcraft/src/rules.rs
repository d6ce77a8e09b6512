//! # Validation Rules
//!
//! Each rule is one `(field type, validations setting)` pair. [`Rule::for_field`]
//! walks a registry of rule builders in [`RuleStage`] order and returns the
//! rules that apply to a field. The stage order is part of the contract:
//!
//! 1. `Required`
//! 2. `Length`: min then max (text and textarea, only without a format)
//! 3. `Format`: email, phone or password (text only)
//! 4. `File`: type then size (file only, first file only)
//!
//! The engine records failures in that order and the last message recorded
//! for a field is the one reported, so reordering the registry changes which
//! message users see.

use formcraft_schema::{FieldDefinition, FieldType, TextFormat};
use formcraft_validation as validators;

use crate::result::RuleKind;
use crate::value::FieldValue;

/// Evaluation stage of a rule; rules run in ascending stage order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleStage {
    Required,
    Length,
    Format,
    File,
}

/// A single check compiled from a field definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Required,
    MinLength(usize),
    MaxLength(usize),
    Format(TextFormat),
    FileType(Vec<String>),
    MaxSize(u64),
}

struct RuleEntry {
    stage: RuleStage,
    build: fn(&FieldDefinition) -> Option<Rule>,
}

/// Rule builders in evaluation order
static REGISTRY: &[RuleEntry] = &[
    RuleEntry { stage: RuleStage::Required, build: required_rule },
    RuleEntry { stage: RuleStage::Length, build: min_length_rule },
    RuleEntry { stage: RuleStage::Length, build: max_length_rule },
    RuleEntry { stage: RuleStage::Format, build: format_rule },
    RuleEntry { stage: RuleStage::File, build: file_type_rule },
    RuleEntry { stage: RuleStage::File, build: max_size_rule },
];

fn required_rule(field: &FieldDefinition) -> Option<Rule> {
    field.required.then_some(Rule::Required)
}

fn takes_length_rules(field: &FieldDefinition) -> bool {
    field.field_type.is_free_text() && !field.validations.format.overrides_length()
}

fn min_length_rule(field: &FieldDefinition) -> Option<Rule> {
    if !takes_length_rules(field) {
        return None;
    }
    field
        .validations
        .min_length
        .filter(|min| *min > 0)
        .map(Rule::MinLength)
}

fn max_length_rule(field: &FieldDefinition) -> Option<Rule> {
    if !takes_length_rules(field) {
        return None;
    }
    // Zero means "no limit", as an empty editor box does
    field
        .validations
        .max_length
        .filter(|max| *max > 0)
        .map(Rule::MaxLength)
}

fn format_rule(field: &FieldDefinition) -> Option<Rule> {
    if field.field_type != FieldType::Text || field.validations.format.is_none() {
        return None;
    }
    Some(Rule::Format(field.validations.format))
}

fn file_type_rule(field: &FieldDefinition) -> Option<Rule> {
    if field.field_type != FieldType::File {
        return None;
    }
    field
        .validations
        .file_types
        .clone()
        .filter(|types| !types.is_empty())
        .map(Rule::FileType)
}

fn max_size_rule(field: &FieldDefinition) -> Option<Rule> {
    if field.field_type != FieldType::File {
        return None;
    }
    field
        .validations
        .max_size
        .filter(|max| *max > 0)
        .map(Rule::MaxSize)
}

impl Rule {
    /// Every rule that applies to `field`, in evaluation order
    pub fn for_field(field: &FieldDefinition) -> Vec<Rule> {
        REGISTRY.iter().filter_map(|entry| (entry.build)(field)).collect()
    }

    pub fn stage(&self) -> RuleStage {
        match self {
            Rule::Required => RuleStage::Required,
            Rule::MinLength(_) | Rule::MaxLength(_) => RuleStage::Length,
            Rule::Format(_) => RuleStage::Format,
            Rule::FileType(_) | Rule::MaxSize(_) => RuleStage::File,
        }
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            Rule::Required => RuleKind::Required,
            Rule::MinLength(_) => RuleKind::MinLength,
            Rule::MaxLength(_) => RuleKind::MaxLength,
            Rule::Format(_) => RuleKind::Format,
            Rule::FileType(_) => RuleKind::FileType,
            Rule::MaxSize(_) => RuleKind::MaxSize,
        }
    }

    /// Check a value, returning the user-facing message when it fails
    ///
    /// `value` is `None` when nothing was entered. Only `Required` looks at
    /// missing or empty values; every other rule passes them. Values of the
    /// wrong shape for the rule also pass, since the engine rejects them
    /// before any rule runs.
    pub fn check(&self, field: &FieldDefinition, value: Option<&FieldValue>) -> Option<String> {
        let present = value.filter(|v| !v.is_empty());

        match self {
            Rule::Required => present
                .is_none()
                .then(|| format!("{} is required", field.label)),

            Rule::MinLength(min) => {
                let text = present?.as_text()?;
                validators::is_shorter_than(text, *min)
                    .then(|| format!("{} must be at least {} characters", field.label, min))
            }

            Rule::MaxLength(max) => {
                let text = present?.as_text()?;
                validators::is_longer_than(text, *max)
                    .then(|| format!("{} must be less than {} characters", field.label, max))
            }

            Rule::Format(format) => {
                let text = present?.as_text()?;
                check_format(*format, text)
            }

            Rule::FileType(allowed) => {
                let file = present?.as_files()?.first()?;
                (!validators::is_allowed_type(&file.mime_type, allowed))
                    .then(|| format!("Invalid file type. Allowed: {}", allowed.join(", ")))
            }

            Rule::MaxSize(max) => {
                let file = present?.as_files()?.first()?;
                validators::exceeds_size(file.size_bytes, *max).then(|| {
                    format!(
                        "File size exceeds the limit of {}MB",
                        validators::format_mebibytes(*max)
                    )
                })
            }
        }
    }
}

fn check_format(format: TextFormat, text: &str) -> Option<String> {
    match format {
        TextFormat::None => None,
        TextFormat::Email => {
            (!validators::is_valid_email(text)).then(|| "Invalid email format".to_string())
        }
        TextFormat::Phone => {
            (!validators::is_valid_phone(text)).then(|| "Invalid phone number format".to_string())
        }
        TextFormat::Password => (!validators::is_valid_password(text)).then(|| {
            "Password must have minimum eight characters, at least one letter and one number"
                .to_string()
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::FileDescriptor;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_registry_is_in_stage_order() {
        let stages: Vec<RuleStage> = REGISTRY.iter().map(|e| e.stage).collect();
        let mut sorted = stages.clone();
        sorted.sort();
        assert_eq!(stages, sorted);
    }

    #[test]
    fn test_rules_for_text_field() {
        let field = FieldDefinition::new(1, "Name", FieldType::Text)
            .required()
            .with_min_length(2)
            .with_max_length(10);
        assert_eq!(
            Rule::for_field(&field),
            vec![Rule::Required, Rule::MinLength(2), Rule::MaxLength(10)]
        );
    }

    #[test]
    fn test_format_suppresses_length_rules() {
        let field = FieldDefinition::new(1, "Email", FieldType::Text)
            .with_min_length(50)
            .with_max_length(2)
            .with_format(TextFormat::Email);
        assert_eq!(Rule::for_field(&field), vec![Rule::Format(TextFormat::Email)]);
    }

    #[test]
    fn test_type_guards() {
        let textarea = FieldDefinition::new(1, "Bio", FieldType::Textarea)
            .with_format(TextFormat::Phone)
            .with_max_size(10);
        // A format on a textarea still suppresses length rules but never runs
        assert!(Rule::for_field(&textarea.clone().with_max_length(5)).is_empty());
        assert!(Rule::for_field(&textarea).is_empty());

        let checkbox = FieldDefinition::new(2, "Agree", FieldType::Checkbox)
            .with_min_length(3)
            .with_format(TextFormat::Email)
            .with_file_types(["image/png"]);
        assert!(Rule::for_field(&checkbox).is_empty());

        let file = FieldDefinition::new(3, "Upload", FieldType::File)
            .with_min_length(3)
            .with_file_types(["image/png"])
            .with_max_size(1024);
        assert_eq!(
            Rule::for_field(&file),
            vec![Rule::FileType(vec!["image/png".to_string()]), Rule::MaxSize(1024)]
        );
    }

    #[test]
    fn test_zero_and_empty_settings_are_ignored() {
        let text = FieldDefinition::new(1, "Name", FieldType::Text)
            .with_min_length(0)
            .with_max_length(0);
        assert!(Rule::for_field(&text).is_empty());

        let file = FieldDefinition::new(2, "Upload", FieldType::File)
            .with_file_types(Vec::<String>::new())
            .with_max_size(0);
        assert!(Rule::for_field(&file).is_empty());
    }

    #[test]
    fn test_required_messages() {
        let field = FieldDefinition::new(1, "Name", FieldType::Text).required();
        let expected = Some("Name is required".to_string());
        assert_eq!(Rule::Required.check(&field, None), expected);
        assert_eq!(Rule::Required.check(&field, Some(&"".into())), expected);
        assert_eq!(Rule::Required.check(&field, Some(&"Ada".into())), None);
        assert_eq!(Rule::Required.check(&field, Some(&false.into())), None);
        assert_eq!(Rule::Required.check(&field, Some(&FieldValue::Files(vec![]))), expected);
    }

    #[rstest]
    #[case(Rule::MinLength(3), "ab", Some("Name must be at least 3 characters"))]
    #[case(Rule::MinLength(3), "  ab  ", Some("Name must be at least 3 characters"))]
    #[case(Rule::MinLength(3), "abc", None)]
    #[case(Rule::MaxLength(5), "abcdef", Some("Name must be less than 5 characters"))]
    #[case(Rule::MaxLength(5), "abcde", None)]
    #[case(Rule::MinLength(3), "", None)]
    fn test_length_messages(#[case] rule: Rule, #[case] input: &str, #[case] expected: Option<&str>) {
        let field = FieldDefinition::new(1, "Name", FieldType::Text);
        assert_eq!(
            rule.check(&field, Some(&input.into())),
            expected.map(str::to_string)
        );
    }

    #[rstest]
    #[case(TextFormat::Email, "a@b.co", None)]
    #[case(TextFormat::Email, "abc", Some("Invalid email format"))]
    #[case(TextFormat::Phone, "1234567890", None)]
    #[case(TextFormat::Phone, "12345", Some("Invalid phone number format"))]
    #[case(TextFormat::Password, "abc12345", None)]
    #[case(
        TextFormat::Password,
        "abcdefgh",
        Some("Password must have minimum eight characters, at least one letter and one number")
    )]
    fn test_format_messages(
        #[case] format: TextFormat,
        #[case] input: &str,
        #[case] expected: Option<&str>,
    ) {
        let field = FieldDefinition::new(1, "Field", FieldType::Text).with_format(format);
        assert_eq!(
            Rule::Format(format).check(&field, Some(&input.into())),
            expected.map(str::to_string)
        );
    }

    #[test]
    fn test_file_messages_use_first_file() {
        let field = FieldDefinition::new(1, "Upload", FieldType::File);
        let files = FieldValue::Files(vec![
            FileDescriptor::new("image/png", 2_000_000),
            FileDescriptor::new("image/jpeg", 10),
        ]);
        let allowed = Rule::FileType(vec!["image/jpeg".to_string(), "image/gif".to_string()]);

        assert_eq!(
            allowed.check(&field, Some(&files)),
            Some("Invalid file type. Allowed: image/jpeg, image/gif".to_string())
        );
        assert_eq!(
            Rule::MaxSize(1_048_576).check(&field, Some(&files)),
            Some("File size exceeds the limit of 1MB".to_string())
        );
        assert_eq!(Rule::MaxSize(2_000_000).check(&field, Some(&files)), None);
        assert_eq!(
            Rule::MaxSize(1_572_864).check(&field, Some(&files)),
            Some("File size exceeds the limit of 1.5MB".to_string())
        );
    }
}

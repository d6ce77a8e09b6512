// File: formcraft-schema/src/check.rs
// Purpose: Lint pass reporting schema invariants that do not hold

use std::collections::HashSet;

use thiserror::Error;

use crate::field::FieldType;
use crate::id::FieldId;
use crate::schema::FormSchema;

/// A broken schema invariant
///
/// The validation engine tolerates all of these (it skips settings that do
/// not apply and hides fields whose condition does not resolve); the lint
/// exists so an editor can point them out.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaIssue {
    #[error("field id {id} is used more than once")]
    DuplicateId { id: FieldId },

    #[error("{field_type} field {id} has no options")]
    MissingOptions { id: FieldId, field_type: FieldType },

    #[error("field {id} has minLength {min} greater than maxLength {max}")]
    InvertedLengthBounds { id: FieldId, min: usize, max: usize },

    #[error("field {id} sets a text format on a {field_type} field")]
    FormatOnNonText { id: FieldId, field_type: FieldType },

    #[error("field {id} sets file rules on a {field_type} field")]
    FileRulesOnNonFile { id: FieldId, field_type: FieldType },

    #[error("field {id} depends on {label:?}, which no field is labelled")]
    DanglingCondition { id: FieldId, label: String },

    #[error("field {id} depends on {label:?}, which labels {count} fields")]
    AmbiguousCondition {
        id: FieldId,
        label: String,
        count: usize,
    },

    #[error("field {id} depends on itself")]
    SelfCondition { id: FieldId },
}

impl FormSchema {
    /// Report every broken invariant, in field order
    pub fn check(&self) -> Vec<SchemaIssue> {
        let mut issues = Vec::new();
        let mut seen = HashSet::new();

        for field in self {
            let id = &field.id;

            if !seen.insert(id) {
                issues.push(SchemaIssue::DuplicateId { id: id.clone() });
            }

            if field.field_type.has_options() && field.options.iter().all(|o| o.trim().is_empty()) {
                issues.push(SchemaIssue::MissingOptions {
                    id: id.clone(),
                    field_type: field.field_type,
                });
            }

            let v = &field.validations;
            if let (Some(min), Some(max)) = (v.min_length, v.max_length) {
                if max > 0 && min > max {
                    issues.push(SchemaIssue::InvertedLengthBounds {
                        id: id.clone(),
                        min,
                        max,
                    });
                }
            }

            if !v.format.is_none() && field.field_type != FieldType::Text {
                issues.push(SchemaIssue::FormatOnNonText {
                    id: id.clone(),
                    field_type: field.field_type,
                });
            }

            if (v.file_types.is_some() || v.max_size.is_some()) && field.field_type != FieldType::File {
                issues.push(SchemaIssue::FileRulesOnNonFile {
                    id: id.clone(),
                    field_type: field.field_type,
                });
            }

            if let Some(label) = field.conditional_field() {
                match self.label_count(label) {
                    0 => issues.push(SchemaIssue::DanglingCondition {
                        id: id.clone(),
                        label: label.to_string(),
                    }),
                    1 if field.label == label => {
                        issues.push(SchemaIssue::SelfCondition { id: id.clone() })
                    }
                    1 => {}
                    count => issues.push(SchemaIssue::AmbiguousCondition {
                        id: id.clone(),
                        label: label.to_string(),
                        count,
                    }),
                }
            }
        }

        issues
    }
}

// File: formcraft/src/engine.rs
// Purpose: Validation entry points

use std::collections::BTreeMap;

use formcraft_schema::{FieldDefinition, FieldId, FormSchema};
use serde::Serialize;

use crate::error::EngineError;
use crate::result::{RuleKind, ValidationResult, Violation};
use crate::rules::{Rule, RuleStage};
use crate::value::{expected_kind, SubmissionData};
use crate::visibility::{is_field_visible, visibility};

/// Visibility and validation computed together for one render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub visibility: BTreeMap<FieldId, bool>,
    pub result: ValidationResult,
}

/// Validate a submission against a schema
///
/// Hidden fields are skipped entirely, even when required. For each visible
/// field the rules run in stage order (required, length, format, file) and a
/// later failure replaces an earlier message for the same field.
///
/// A value with the wrong shape for its field (say `true` for a text input)
/// is reported as `"<label> has an invalid value"` and the field's other
/// rules are skipped. Use [`try_validate`] to get an error instead.
pub fn validate(schema: &FormSchema, data: &SubmissionData) -> ValidationResult {
    run(schema, data).0
}

/// Like [`validate`], but fails on the first value with the wrong shape
pub fn try_validate(
    schema: &FormSchema,
    data: &SubmissionData,
) -> Result<ValidationResult, EngineError> {
    let (result, mismatches) = run(schema, data);
    match mismatches.into_iter().next() {
        Some(err) => Err(err),
        None => Ok(result),
    }
}

/// Visibility of every field plus the validation result
pub fn evaluate(schema: &FormSchema, data: &SubmissionData) -> Evaluation {
    Evaluation {
        visibility: visibility(schema, data),
        result: validate(schema, data),
    }
}

fn run(schema: &FormSchema, data: &SubmissionData) -> (ValidationResult, Vec<EngineError>) {
    let mut result = ValidationResult::success();
    let mut mismatches = Vec::new();

    tracing::trace!(
        "Validating {} fields against {} submitted values",
        schema.len(),
        data.len()
    );

    for field in schema {
        if !is_field_visible(schema, data, field) {
            continue;
        }

        if let Err(err) = check_field(field, data, &mut result) {
            mismatches.push(err);
        }
    }

    tracing::trace!(
        "Validation finished: {} fields with errors",
        result.errors.len()
    );
    (result, mismatches)
}

fn check_field(
    field: &FieldDefinition,
    data: &SubmissionData,
    result: &mut ValidationResult,
) -> Result<(), EngineError> {
    let value = data.get(&field.id);

    if let Some(value) = value.filter(|v| !v.fits(field.field_type)) {
        tracing::debug!(
            "Field {} expects {} but got {}",
            field.id,
            expected_kind(field.field_type),
            value.kind_name()
        );
        result.record(Violation {
            field: field.id.clone(),
            rule: RuleKind::TypeMismatch,
            message: format!("{} has an invalid value", field.label),
        });
        return Err(EngineError::TypeMismatch {
            field: field.id.clone(),
            expected: expected_kind(field.field_type),
            found: value.kind_name(),
        });
    }

    let has_value = value.is_some_and(|v| !v.is_empty());

    for rule in Rule::for_field(field) {
        if rule.stage() > RuleStage::Required && !has_value {
            break;
        }
        if let Some(message) = rule.check(field, value) {
            tracing::debug!("Field {} failed {:?}: {}", field.id, rule.kind(), message);
            result.record(Violation {
                field: field.id.clone(),
                rule: rule.kind(),
                message,
            });
        }
    }

    Ok(())
}

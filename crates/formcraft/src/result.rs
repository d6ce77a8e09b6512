// File: formcraft/src/result.rs
// Purpose: Validation outcome returned to callers

use std::collections::BTreeMap;

use formcraft_schema::FieldId;
use serde::Serialize;

/// Which check produced a violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleKind {
    Required,
    MinLength,
    MaxLength,
    Format,
    FileType,
    MaxSize,
    /// The submitted value has the wrong shape for the field type
    TypeMismatch,
}

/// One failed check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: FieldId,
    pub rule: RuleKind,
    pub message: String,
}

/// Result of validating a submission
///
/// `errors` holds one message per failing field: the message of the last
/// rule that failed for it. `violations` lists every failure in the order it
/// was found, including messages later overwritten in `errors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: BTreeMap<FieldId, String>,
    pub violations: Vec<Violation>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn success() -> Self {
        Self {
            is_valid: true,
            errors: BTreeMap::new(),
            violations: Vec::new(),
        }
    }

    /// Record a failure; a later failure for the same field replaces its message
    pub(crate) fn record(&mut self, violation: Violation) {
        self.errors
            .insert(violation.field.clone(), violation.message.clone());
        self.violations.push(violation);
        self.is_valid = false;
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The reported message for a field
    pub fn get_error(&self, field: &FieldId) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Every failure recorded for a field, in evaluation order
    pub fn violations_for<'a>(&'a self, field: &'a FieldId) -> impl Iterator<Item = &'a Violation> + 'a {
        self.violations.iter().filter(move |v| &v.field == field)
    }

    /// `Ok(())` when valid, otherwise the per-field messages
    pub fn into_result(self) -> Result<(), BTreeMap<FieldId, String>> {
        if self.is_valid {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}

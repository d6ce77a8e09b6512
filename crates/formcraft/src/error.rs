// File: formcraft/src/error.rs
// Purpose: Engine error types

use formcraft_schema::FieldId;
use thiserror::Error;

/// Error raised by strict validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A submitted value does not have the shape its field type requires
    #[error("field {field} expects a {expected} value but was given {found}")]
    TypeMismatch {
        field: FieldId,
        expected: &'static str,
        found: &'static str,
    },
}

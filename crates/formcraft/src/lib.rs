//! # formcraft
//!
//! Validation and conditional-visibility engine for user-built forms.
//!
//! Given a [`FormSchema`] and the [`SubmissionData`] a user entered, the
//! engine decides which fields are visible and whether every visible value
//! passes its rules. Everything is a pure function of its inputs: no state is
//! kept between calls and inputs are never modified.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use formcraft::{validate, FormSchema, SubmissionData};
//!
//! let schema = FormSchema::from_json(&schema_json)?;
//! let data: SubmissionData = serde_json::from_str(&data_json)?;
//!
//! let result = validate(&schema, &data);
//! if !result.is_valid {
//!     for (id, message) in &result.errors {
//!         println!("{id}: {message}");
//!     }
//! }
//! ```
//!
//! ## Rule order
//!
//! Rules run in a fixed order: required, length, format, file. When several
//! fail for one field, the message of the last failing rule is the one kept
//! in [`ValidationResult::errors`]; every failure is still listed in
//! [`ValidationResult::violations`].

pub mod engine;
pub mod error;
pub mod result;
pub mod rules;
pub mod submission;
pub mod value;
pub mod visibility;

// Re-export the schema model so callers need a single dependency
pub use formcraft_schema::{
    find_field_by_id, find_field_by_label, Condition, FieldDefinition, FieldId, FieldType,
    FormSchema, SchemaError, SchemaIssue, TextFormat, Validations,
};

pub use engine::{evaluate, try_validate, validate, Evaluation};
pub use error::EngineError;
pub use result::{RuleKind, ValidationResult, Violation};
pub use rules::{Rule, RuleStage};
pub use submission::format_submission;
pub use value::{FieldValue, FileDescriptor, SubmissionData};
pub use visibility::{is_field_visible, visibility, visible_fields};

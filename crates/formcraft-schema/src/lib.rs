//! # formcraft-schema
//!
//! The shape of a form: an ordered list of [`FieldDefinition`]s held by a
//! [`FormSchema`]. This crate has no validation behavior of its own; it
//! provides structural lookups, the editor-facing mutations that keep
//! conditional references resolved, the Schema JSON wire format, and a lint
//! pass that reports broken invariants.
//!
//! ## Schema JSON
//!
//! ```json
//! { "fields": [
//!     { "id": 1, "type": "text", "label": "Email", "options": [],
//!       "required": true, "validations": { "format": "email" } },
//!     { "id": 2, "type": "textarea", "label": "Comments", "options": [],
//!       "required": false, "validations": { "maxLength": 200 },
//!       "conditionalField": "Email" }
//! ] }
//! ```
//!
//! ```rust,ignore
//! use formcraft_schema::FormSchema;
//!
//! let schema = FormSchema::from_json(json)?;
//! let email = schema.find_field_by_label("Email");
//! ```

pub mod check;
pub mod document;
pub mod field;
pub mod id;
pub mod schema;

pub use check::SchemaIssue;
pub use document::{FieldDocument, SchemaDocument, SchemaError, ValidationsDocument};
pub use field::{Condition, FieldDefinition, FieldType, TextFormat, Validations};
pub use id::FieldId;
pub use schema::{find_field_by_id, find_field_by_label, FormSchema};

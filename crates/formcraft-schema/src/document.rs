//! # Schema JSON
//!
//! The `{ "fields": [...] }` document exchanged with form editors. Export is
//! canonical: counts are numbers and unset settings are omitted. Import is
//! lenient, because editors typically copy raw input-box contents into the
//! document:
//!
//! - `minLength`, `maxLength` and `maxSize` may be numbers or numeric
//!   strings; `""`, `null` and `0` mean "not set".
//! - `maxSize` may be fractional (megabytes multiplied out); it is rounded
//!   down, which gives the same verdict for whole-byte file sizes.
//! - `format: ""` means no format; `conditionalField: ""` means no condition.
//! - `fileType` entries are trimmed and blank entries dropped; a list with
//!   nothing left means "not set".
//! - `options`, `required`, `validations` and `label` may be missing.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::field::{Condition, FieldDefinition, FieldType, TextFormat, Validations};
use crate::id::FieldId;
use crate::schema::FormSchema;

/// Error importing or exporting Schema JSON
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The document is not valid Schema JSON
    #[error("invalid schema document: {0}")]
    Parse(#[source] serde_json::Error),

    /// The schema could not be written out
    #[error("failed to serialize schema: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Top-level Schema JSON document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SchemaDocument {
    #[serde(default)]
    pub fields: Vec<FieldDocument>,
}

/// One field as it appears in Schema JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDocument {
    pub id: FieldId,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub validations: ValidationsDocument,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub conditional_field: Option<String>,
}

/// The `validations` object of a field
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationsDocument {
    #[serde(
        default,
        deserialize_with = "loose_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_length: Option<u64>,
    #[serde(
        default,
        deserialize_with = "loose_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_length: Option<u64>,
    #[serde(
        default,
        deserialize_with = "loose_format",
        skip_serializing_if = "TextFormat::is_none"
    )]
    pub format: TextFormat,
    #[serde(
        default,
        deserialize_with = "loose_types",
        skip_serializing_if = "Option::is_none"
    )]
    pub file_type: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "loose_bytes",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_size: Option<u64>,
}

impl FormSchema {
    /// Parse Schema JSON
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let schema: FormSchema = serde_json::from_str(json).map_err(SchemaError::Parse)?;
        tracing::trace!("Imported schema with {} fields", schema.len());
        Ok(schema)
    }

    /// Parse an already-decoded JSON value
    pub fn from_value(value: Value) -> Result<Self, SchemaError> {
        serde_json::from_value(value).map_err(SchemaError::Parse)
    }

    /// Compact Schema JSON
    pub fn to_json(&self) -> Result<String, SchemaError> {
        serde_json::to_string(self).map_err(SchemaError::Serialize)
    }

    /// Indented Schema JSON
    pub fn to_json_pretty(&self) -> Result<String, SchemaError> {
        serde_json::to_string_pretty(self).map_err(SchemaError::Serialize)
    }
}

impl From<SchemaDocument> for FormSchema {
    fn from(doc: SchemaDocument) -> Self {
        FormSchema::new(doc.fields.into_iter().map(FieldDefinition::from).collect())
    }
}

impl From<FormSchema> for SchemaDocument {
    fn from(schema: FormSchema) -> Self {
        SchemaDocument {
            fields: schema.fields().iter().map(FieldDocument::from).collect(),
        }
    }
}

impl From<FieldDocument> for FieldDefinition {
    fn from(doc: FieldDocument) -> Self {
        FieldDefinition {
            id: doc.id,
            label: doc.label,
            field_type: doc.field_type,
            options: doc.options,
            required: doc.required,
            validations: Validations {
                min_length: doc.validations.min_length.map(to_usize),
                max_length: doc.validations.max_length.map(to_usize),
                format: doc.validations.format,
                file_types: doc.validations.file_type,
                max_size: doc.validations.max_size,
            },
            condition: doc.conditional_field.map(Condition::new),
        }
    }
}

impl From<&FieldDefinition> for FieldDocument {
    fn from(field: &FieldDefinition) -> Self {
        let v = &field.validations;
        FieldDocument {
            id: field.id.clone(),
            field_type: field.field_type,
            label: field.label.clone(),
            options: field.options.clone(),
            required: field.required,
            validations: ValidationsDocument {
                min_length: v.min_length.filter(|n| *n > 0).map(|n| n as u64),
                max_length: v.max_length.filter(|n| *n > 0).map(|n| n as u64),
                format: v.format,
                file_type: v.file_types.clone().filter(|t| !t.is_empty()),
                max_size: v.max_size.filter(|n| *n > 0),
            },
            conditional_field: field.conditional_field().map(str::to_string),
        }
    }
}

fn to_usize(n: u64) -> usize {
    usize::try_from(n).unwrap_or(usize::MAX)
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

/// A count given as a number or numeric string; zero or blank means unset
fn loose_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(n) = loose_number(Value::deserialize(deserializer)?).map_err(de::Error::custom)? else {
        return Ok(None);
    };
    if n < 0.0 || n.fract() != 0.0 {
        return Err(de::Error::custom(format!(
            "expected a non-negative whole number, found {}",
            n
        )));
    }
    Ok(Some(n as u64).filter(|n| *n > 0))
}

/// A byte count; fractional values are rounded down
fn loose_bytes<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(n) = loose_number(Value::deserialize(deserializer)?).map_err(de::Error::custom)? else {
        return Ok(None);
    };
    if n < 0.0 {
        return Err(de::Error::custom(format!(
            "expected a non-negative byte count, found {}",
            n
        )));
    }
    if n.fract() != 0.0 {
        tracing::warn!("Rounding fractional maxSize {} down to whole bytes", n);
    }
    Ok(Some(n.floor() as u64).filter(|n| *n > 0))
}

fn loose_number(value: Value) -> Result<Option<f64>, String> {
    let n = match value {
        Value::Null => return Ok(None),
        Value::Number(n) => n.as_f64(),
        Value::String(s) if s.trim().is_empty() => return Ok(None),
        Value::String(s) => {
            tracing::debug!("Reading numeric setting from string {:?}", s);
            s.trim().parse::<f64>().ok()
        }
        other => return Err(format!("expected a number or numeric string, found {}", other)),
    };

    match n {
        Some(n) if n.is_finite() => Ok(Some(n)),
        _ => Err("expected a finite number".to_string()),
    }
}

fn loose_format<'de, D>(deserializer: D) -> Result<TextFormat, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref() {
        None | Some("") | Some("none") => Ok(TextFormat::None),
        Some("email") => Ok(TextFormat::Email),
        Some("password") => Ok(TextFormat::Password),
        Some("phone") => Ok(TextFormat::Phone),
        Some(other) => Err(de::Error::unknown_variant(
            other,
            &["none", "email", "password", "phone"],
        )),
    }
}

fn loose_types<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let types: Vec<String> = match Value::deserialize(deserializer)? {
        Value::Null => return Ok(None),
        Value::String(s) => s.split(',').map(str::to_string).collect(),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                other => Err(de::Error::custom(format!(
                    "expected a MIME type string, found {}",
                    other
                ))),
            })
            .collect::<Result<_, _>>()?,
        other => {
            return Err(de::Error::custom(format!(
                "expected a list of MIME types, found {}",
                other
            )))
        }
    };

    let types: Vec<String> = types
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();

    Ok(Some(types).filter(|t| !t.is_empty()))
}

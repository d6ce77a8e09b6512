// File: formcraft/src/value.rs
// Purpose: Submitted values and the submission map

use std::collections::btree_map;
use std::collections::BTreeMap;

use formcraft_schema::{FieldId, FieldType};
use serde::{Deserialize, Serialize};

/// An uploaded file as the form runtime reports it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDescriptor {
    #[serde(alias = "type")]
    pub mime_type: String,
    #[serde(alias = "size")]
    pub size_bytes: u64,
}

impl FileDescriptor {
    pub fn new(mime_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            mime_type: mime_type.into(),
            size_bytes,
        }
    }
}

/// A value entered for one field
///
/// Text inputs, textareas, dropdowns and radio groups produce `Text`,
/// checkboxes produce `Bool` and file inputs produce `Files`. `Number` is
/// accepted from loosely typed callers; no field type expects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Files(Vec<FileDescriptor>),
}

impl FieldValue {
    /// Whether the value counts as "filled in" for conditional visibility
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Bool(b) => *b,
            FieldValue::Number(n) => *n != 0.0 && !n.is_nan(),
            FieldValue::Text(s) => !s.is_empty(),
            FieldValue::Files(files) => !files.is_empty(),
        }
    }

    /// Whether the value counts as missing for the required rule
    ///
    /// An unchecked checkbox (`false`) is a real answer, not a missing one.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Files(files) => files.is_empty(),
            FieldValue::Bool(_) | FieldValue::Number(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_files(&self) -> Option<&[FileDescriptor]> {
        match self {
            FieldValue::Files(files) => Some(files),
            _ => None,
        }
    }

    /// Name of the value's shape, for diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Bool(_) => "boolean",
            FieldValue::Number(_) => "number",
            FieldValue::Text(_) => "text",
            FieldValue::Files(_) => "files",
        }
    }

    /// Whether a field of `field_type` can hold this value
    pub fn fits(&self, field_type: FieldType) -> bool {
        matches!(
            (field_type, self),
            (
                FieldType::Text | FieldType::Textarea | FieldType::Dropdown | FieldType::Radio,
                FieldValue::Text(_)
            ) | (FieldType::Checkbox, FieldValue::Bool(_))
                | (FieldType::File, FieldValue::Files(_))
        )
    }
}

/// Name of the value shape a field type expects
pub fn expected_kind(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::Text | FieldType::Textarea | FieldType::Dropdown | FieldType::Radio => "text",
        FieldType::Checkbox => "boolean",
        FieldType::File => "files",
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<Vec<FileDescriptor>> for FieldValue {
    fn from(files: Vec<FileDescriptor>) -> Self {
        FieldValue::Files(files)
    }
}

impl From<FileDescriptor> for FieldValue {
    fn from(file: FileDescriptor) -> Self {
        FieldValue::Files(vec![file])
    }
}

/// Values entered by the user, keyed by field id
///
/// A missing key means nothing was entered. In JSON this is an object whose
/// keys are field ids; `null` values are treated as missing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, Option<FieldValue>>",
    into = "BTreeMap<String, FieldValue>"
)]
pub struct SubmissionData {
    values: BTreeMap<FieldId, FieldValue>,
}

impl SubmissionData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, id: impl Into<FieldId>, value: impl Into<FieldValue>) -> Self {
        self.insert(id, value);
        self
    }

    pub fn insert(&mut self, id: impl Into<FieldId>, value: impl Into<FieldValue>) -> Option<FieldValue> {
        self.values.insert(id.into(), value.into())
    }

    pub fn remove(&mut self, id: &FieldId) -> Option<FieldValue> {
        self.values.remove(id)
    }

    pub fn get(&self, id: &FieldId) -> Option<&FieldValue> {
        self.values.get(id)
    }

    pub fn contains(&self, id: &FieldId) -> bool {
        self.values.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, FieldId, FieldValue> {
        self.values.iter()
    }
}

impl<'a> IntoIterator for &'a SubmissionData {
    type Item = (&'a FieldId, &'a FieldValue);
    type IntoIter = btree_map::Iter<'a, FieldId, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl<K: Into<FieldId>, V: Into<FieldValue>> FromIterator<(K, V)> for SubmissionData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl From<BTreeMap<String, Option<FieldValue>>> for SubmissionData {
    fn from(raw: BTreeMap<String, Option<FieldValue>>) -> Self {
        Self {
            values: raw
                .into_iter()
                .filter_map(|(key, value)| Some((FieldId::from(key), value?)))
                .collect(),
        }
    }
}

impl From<SubmissionData> for BTreeMap<String, FieldValue> {
    fn from(data: SubmissionData) -> Self {
        data.values
            .into_iter()
            .map(|(id, value)| (id.to_string(), value))
            .collect()
    }
}

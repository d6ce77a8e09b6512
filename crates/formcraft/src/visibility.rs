//! # Conditional Visibility
//!
//! A field with a condition is shown only while the field it refers to holds
//! a truthy value (non-empty text, `true`, at least one file, a non-zero
//! number). A condition that does not resolve to exactly one field hides the
//! field.
//!
//! Only one level is looked at: if B depends on A and A depends on C, B is
//! shown whenever A has a value, even while A itself is hidden. Because each
//! field is decided on its own, conditions that form a cycle never loop.

use std::collections::BTreeMap;

use formcraft_schema::{FieldDefinition, FieldId, FormSchema};

use crate::value::SubmissionData;

/// Whether `field` is currently visible
pub fn is_field_visible(schema: &FormSchema, data: &SubmissionData, field: &FieldDefinition) -> bool {
    let Some(condition) = field.condition.as_ref() else {
        return true;
    };

    let Some(target) = schema.condition_target(field) else {
        tracing::debug!(
            "Field {} hidden: condition on {:?} does not resolve",
            field.id,
            condition.label()
        );
        return false;
    };

    let visible = data.get(&target.id).is_some_and(|value| value.is_truthy());
    if !visible {
        tracing::debug!("Field {} hidden: {:?} has no value", field.id, target.label);
    }
    visible
}

/// Visibility of every field, keyed by id
pub fn visibility(schema: &FormSchema, data: &SubmissionData) -> BTreeMap<FieldId, bool> {
    schema
        .iter()
        .map(|field| (field.id.clone(), is_field_visible(schema, data, field)))
        .collect()
}

/// The visible fields, in display order
pub fn visible_fields<'a>(schema: &'a FormSchema, data: &SubmissionData) -> Vec<&'a FieldDefinition> {
    schema
        .iter()
        .filter(|field| is_field_visible(schema, data, field))
        .collect()
}

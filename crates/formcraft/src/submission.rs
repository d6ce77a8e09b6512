// File: formcraft/src/submission.rs
// Purpose: Label-keyed view of submitted data for handing off after a valid submit

use std::collections::BTreeMap;

use formcraft_schema::FormSchema;

use crate::value::{FieldValue, SubmissionData};

/// Re-key submitted values by field label
///
/// Values whose id is not in the schema are dropped. When two fields share a
/// label, the one with the greater id wins.
pub fn format_submission(schema: &FormSchema, data: &SubmissionData) -> BTreeMap<String, FieldValue> {
    data.iter()
        .filter_map(|(id, value)| {
            let field = schema.find_field_by_id(id)?;
            Some((field.label.clone(), value.clone()))
        })
        .collect()
}

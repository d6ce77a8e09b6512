use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use formcraft::{FormSchema, SubmissionData};

/// Read and parse a Schema JSON file
pub fn load_schema(path: &Path) -> Result<FormSchema> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema file: {:?}", path))?;
    let schema = FormSchema::from_json(&content)
        .with_context(|| format!("Failed to parse schema file: {:?}", path))?;
    tracing::debug!("Loaded {} fields from {:?}", schema.len(), path);
    Ok(schema)
}

/// Read and parse a submission JSON file keyed by field id
pub fn load_data(path: &Path) -> Result<SubmissionData> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read data file: {:?}", path))?;
    let data: SubmissionData = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse data file: {:?}", path))?;
    tracing::debug!("Loaded {} values from {:?}", data.len(), path);
    Ok(data)
}

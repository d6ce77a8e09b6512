use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use formcraft::{visibility, FormSchema, SubmissionData};
use serde_json::{json, Value};

use crate::config::OutputFormat;
use crate::util::{load_data, load_schema};

pub fn execute(schema: &Path, data: &Path, format: OutputFormat) -> Result<ExitCode> {
    let schema = load_schema(schema)?;
    let data = load_data(data)?;

    let output = match format {
        OutputFormat::Text => render_text(&schema, &data),
        OutputFormat::Json => serde_json::to_string_pretty(&render_json(&schema, &data))?,
    };
    println!("{}", output);

    Ok(ExitCode::SUCCESS)
}

pub fn render_text(schema: &FormSchema, data: &SubmissionData) -> String {
    let shown = visibility(schema, data);
    schema
        .iter()
        .map(|field| {
            let condition = field
                .conditional_field()
                .map(|label| format!(" (when {:?})", label))
                .unwrap_or_default();
            if shown.get(&field.id).copied().unwrap_or(false) {
                format!("{} {} [{}]{}", "●".green(), field.label, field.id, condition)
            } else {
                format!("{} {} [{}]{}", "○".dimmed(), field.label.dimmed(), field.id, condition)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_json(schema: &FormSchema, data: &SubmissionData) -> Value {
    let shown = visibility(schema, data);
    Value::Array(
        schema
            .iter()
            .map(|field| {
                json!({
                    "id": field.id,
                    "label": field.label,
                    "visible": shown.get(&field.id).copied().unwrap_or(false),
                })
            })
            .collect(),
    )
}

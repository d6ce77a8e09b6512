use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use formcraft::SchemaIssue;
use serde_json::Value;

use crate::config::OutputFormat;
use crate::util::load_schema;

pub fn execute(schema: &Path, format: OutputFormat) -> Result<ExitCode> {
    let schema = load_schema(schema)?;
    let issues = schema.check();

    let output = match format {
        OutputFormat::Text => render_text(&issues),
        OutputFormat::Json => serde_json::to_string_pretty(&render_json(&issues))?,
    };
    println!("{}", output);

    Ok(if issues.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

pub fn render_text(issues: &[SchemaIssue]) -> String {
    if issues.is_empty() {
        return format!("{} no issues found", "✓".green().bold());
    }
    issues
        .iter()
        .map(|issue| format!("{} {}", "⚠".yellow(), issue))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_json(issues: &[SchemaIssue]) -> Value {
    Value::Array(
        issues
            .iter()
            .map(|issue| Value::String(issue.to_string()))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use formcraft::{FieldDefinition, FieldType, FormSchema};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_clean_schema() {
        colored::control::set_override(false);
        let schema = FormSchema::new(vec![FieldDefinition::new(1, "Name", FieldType::Text)]);
        assert_eq!(render_text(&schema.check()), "✓ no issues found");
    }

    #[test]
    fn test_reports_dangling_condition() {
        colored::control::set_override(false);
        let schema = FormSchema::new(vec![
            FieldDefinition::new(1, "Name", FieldType::Text).shown_when("Nickname"),
        ]);
        let issues = schema.check();
        assert_eq!(
            render_text(&issues),
            "⚠ field 1 depends on \"Nickname\", which no field is labelled"
        );
        assert_eq!(
            render_json(&issues),
            serde_json::json!(["field 1 depends on \"Nickname\", which no field is labelled"])
        );
    }
}

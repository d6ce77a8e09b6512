use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use formcraft::{validate, FormSchema, ValidationResult};

use crate::config::OutputFormat;
use crate::util::{load_data, load_schema};

pub fn execute(schema: &Path, data: &Path, format: OutputFormat) -> Result<ExitCode> {
    let schema = load_schema(schema)?;
    let data = load_data(data)?;
    let result = validate(&schema, &data);

    let output = match format {
        OutputFormat::Text => render_text(&schema, &result),
        OutputFormat::Json => serde_json::to_string_pretty(&result)?,
    };
    println!("{}", output);

    Ok(if result.is_valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// One line per failing field, in schema order
pub fn render_text(schema: &FormSchema, result: &ValidationResult) -> String {
    if result.is_valid {
        return format!("{} valid", "✓".green().bold());
    }

    let mut lines = vec![format!(
        "{} {} field(s) failed validation",
        "✗".red().bold(),
        result.errors.len()
    )];
    for field in schema {
        if let Some(message) = result.get_error(&field.id) {
            lines.push(format!("  {} ({}): {}", field.label.bold(), field.id, message.red()));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use formcraft::{FieldDefinition, FieldType, SubmissionData, TextFormat};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_valid() {
        colored::control::set_override(false);
        let schema = FormSchema::default();
        assert_eq!(render_text(&schema, &ValidationResult::success()), "✓ valid");
    }

    #[test]
    fn test_render_errors_in_schema_order() {
        colored::control::set_override(false);
        let schema = FormSchema::new(vec![
            FieldDefinition::new(3, "Name", FieldType::Text).required(),
            FieldDefinition::new(1, "Email", FieldType::Text).with_format(TextFormat::Email),
        ]);
        let data = SubmissionData::new().with(1, "abc");
        let result = validate(&schema, &data);

        assert_eq!(
            render_text(&schema, &result),
            "✗ 2 field(s) failed validation\n  \
             Name (3): Name is required\n  \
             Email (1): Invalid email format"
        );
    }
}

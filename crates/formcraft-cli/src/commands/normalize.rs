use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;

use crate::util::load_schema;

/// Re-emit a schema as canonical Schema JSON
///
/// Loose imports (numeric strings, blank limits, padded file types) come out
/// in their canonical form.
pub fn execute(schema: &Path, compact: bool) -> Result<ExitCode> {
    let schema = load_schema(schema)?;
    let output = if compact {
        schema.to_json()?
    } else {
        schema.to_json_pretty()?
    };
    println!("{}", output);
    Ok(ExitCode::SUCCESS)
}

//! Record check command
//!
//! Validates JSON records against a schema file.

use crate::error::{CliError, CliResult};
use colored::Colorize;
use rulechain_config::load_schema;
use rulechain_validation::{ErrorMode, ValidationResult, Validator};
use serde_json::Value;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

/// Options for `rulechain check`
#[derive(Debug, Clone)]
pub struct CheckArgs {
    pub schema: PathBuf,
    /// Record file, or `-` for stdin
    pub record: String,
    pub mode: ErrorMode,
    pub json: bool,
    pub quiet: bool,
}

pub fn execute(args: &CheckArgs) -> CliResult<()> {
    let schema = load_schema(&args.schema)?;
    let data: Value = serde_json::from_str(&read_input(&args.record)?)?;
    let validator = Validator::new().with_mode(args.mode);

    tracing::debug!(
        schema = %args.schema.display(),
        fields = schema.fields.len(),
        mode = %args.mode,
        "checking records"
    );

    // A top-level array is a batch of records
    let batch = data.is_array();
    let results: Vec<ValidationResult> = match &data {
        Value::Array(items) => items
            .iter()
            .map(|item| validator.validate(&schema.bind(item)))
            .collect(),
        record => vec![validator.validate(&schema.bind(record))],
    };

    if args.json {
        let report = if batch {
            Value::Array(results.iter().map(ValidationResult::to_json).collect())
        } else {
            results
                .first()
                .map(ValidationResult::to_json)
                .unwrap_or(Value::Null)
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if !args.quiet {
        print_results(&results, batch);
    }

    let invalid = results.iter().filter(|r| r.is_invalid()).count();
    if invalid > 0 {
        Err(CliError::Invalid(invalid))
    } else {
        Ok(())
    }
}

fn read_input(source: &str) -> CliResult<String> {
    if source == "-" {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .map_err(|source| CliError::Read {
                path: "stdin".to_string(),
                source,
            })?;
        return Ok(input);
    }

    fs::read_to_string(source).map_err(|e| CliError::Read {
        path: source.to_string(),
        source: e,
    })
}

fn print_results(results: &[ValidationResult], batch: bool) {
    for (index, result) in results.iter().enumerate() {
        let label = if batch {
            format!("record #{}", index)
        } else {
            "record".to_string()
        };

        match result {
            ValidationResult::Valid => {
                println!("  {} {} is valid", "✓".green().bold(), label);
            }
            ValidationResult::Invalid(errors) => {
                println!(
                    "  {} {} has {} invalid field(s)",
                    "✗".red().bold(),
                    label,
                    errors.len()
                );
                for (key, field_errors) in errors.iter() {
                    println!("    {}", key.bold());
                    for message in field_errors.messages() {
                        println!("      {} {}", "-".dimmed(), message);
                    }
                }
            }
        }
    }

    if batch {
        let valid = results.iter().filter(|r| r.is_valid()).count();
        println!();
        println!("  Valid records: {}/{}", valid, results.len());
    }
}

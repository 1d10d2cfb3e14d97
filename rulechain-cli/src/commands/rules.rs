//! Built-in rule listing

use crate::error::CliResult;
use colored::Colorize;
use rulechain_validation::RuleRegistry;
use rulechain_validation::rules::NULLABLE;

pub fn execute(json: bool) -> CliResult<()> {
    let registry = RuleRegistry::shared();
    let mut names = registry.names();
    names.push(NULLABLE);
    names.sort_unstable();

    if json {
        println!("{}", serde_json::to_string(&names)?);
        return Ok(());
    }

    println!("  {}", "Built-in rules".bright_white().bold());
    println!("  {}", "─".repeat(40).dimmed());
    for name in names {
        println!("  {}", name);
    }

    Ok(())
}

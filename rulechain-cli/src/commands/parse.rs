//! Chain parse command
//!
//! Prints the directives of a rule-chain encoding and flags rule names the
//! built-in registry does not know.

use crate::error::CliResult;
use colored::Colorize;
use rulechain_validation::rules::NULLABLE;
use rulechain_validation::{RuleChain, RuleRegistry};
use serde_json::json;

pub fn execute(encoding: &str, json: bool) -> CliResult<()> {
    let chain = RuleChain::parse(encoding);
    let registry = RuleRegistry::shared();

    if json {
        let directives: Vec<_> = chain
            .iter()
            .map(|directive| {
                json!({
                    "name": directive.name(),
                    "params": directive.params(),
                    "known": is_known(&registry, directive.name()),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&directives)?);
        return Ok(());
    }

    if chain.is_empty() {
        println!("  {}", "(empty chain, always valid)".dimmed());
        return Ok(());
    }

    for (index, directive) in chain.iter().enumerate() {
        let known = is_known(&registry, directive.name());

        let name = if known {
            directive.name().cyan().bold()
        } else {
            directive.name().yellow().bold()
        };

        print!("  {:>2}. {}", index + 1, name);
        if !directive.params().is_empty() {
            print!(" {}", directive.params().join(", ").dimmed());
        }
        if !known {
            print!("  {}", "(unknown rule, skipped)".yellow());
        }
        println!();
    }

    Ok(())
}

fn is_known(registry: &RuleRegistry, name: &str) -> bool {
    name == NULLABLE || registry.contains(name)
}

// Record validation

use crate::evaluator::FieldEvaluator;
use crate::rules::RuleRegistry;
use crate::{
    ErrorMode, FieldValue, Record, RuleChain, ValidationErrors, ValidationResult, ValidatorConfig,
};
use std::sync::Arc;
use tracing::debug;

/// Validates whole records against their field rule chains.
///
/// Immutable once built and cheap to clone; safe to share across threads.
#[derive(Debug, Clone)]
pub struct Validator {
    config: ValidatorConfig,
    rules: Arc<RuleRegistry>,
}

impl Validator {
    /// Validator with the default config and the built-in rules
    pub fn new() -> Self {
        Self::with_config(ValidatorConfig::default())
    }

    pub fn with_config(config: ValidatorConfig) -> Self {
        Self {
            config,
            rules: RuleRegistry::shared(),
        }
    }

    /// Replace the rule registry
    pub fn with_rules(mut self, rules: impl Into<Arc<RuleRegistry>>) -> Self {
        self.rules = rules.into();
        self
    }

    pub fn with_mode(mut self, mode: ErrorMode) -> Self {
        self.config.mode = mode;
        self
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn mode(&self) -> ErrorMode {
        self.config.mode
    }

    pub fn rules(&self) -> &RuleRegistry {
        &self.rules
    }

    /// Validate every declared field of `record`.
    pub fn validate<R: Record + ?Sized>(&self, record: &R) -> ValidationResult {
        let evaluator = FieldEvaluator::new(&self.rules, self.config.mode);
        let mut errors = ValidationErrors::new();
        let specs = record.field_specs();

        for spec in &specs {
            let chain = RuleChain::parse(spec.rules);
            if chain.is_empty() {
                continue;
            }

            let value = record.field(spec.name).unwrap_or(FieldValue::Null);
            if let Some(field_errors) = evaluator.evaluate(spec.key, &value, &chain, &record) {
                errors.add(spec.key, field_errors);
            }
        }

        debug!(
            fields = specs.len(),
            failed = errors.len(),
            mode = %self.config.mode,
            "record validated"
        );

        ValidationResult::from(errors)
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for validatable types
pub trait Validate {
    /// Validate with the default validator
    fn validate(&self) -> ValidationResult;

    /// Validate in a specific mode
    fn validate_with_mode(&self, mode: ErrorMode) -> ValidationResult;
}

impl<T: Record + ?Sized> Validate for T {
    fn validate(&self) -> ValidationResult {
        Validator::new().validate(self)
    }

    fn validate_with_mode(&self, mode: ErrorMode) -> ValidationResult {
        Validator::with_config(ValidatorConfig::new(mode)).validate(self)
    }
}

/// Validate `record` with the default validator
pub fn validate<R: Record + ?Sized>(record: &R) -> ValidationResult {
    Validator::new().validate(record)
}

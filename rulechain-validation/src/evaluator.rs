// Per-field rule evaluation

use crate::rules::{NULLABLE, RuleContext, RuleRegistry, ValueClass};
use crate::{ErrorMode, FieldAccess, FieldErrors, FieldValue, RuleChain};
use tracing::{debug, trace};

/// Runs one field's chain against its value.
///
/// Holds no state between calls; the value class lives only for the
/// duration of one [`evaluate`](Self::evaluate).
#[derive(Debug, Clone, Copy)]
pub struct FieldEvaluator<'r> {
    rules: &'r RuleRegistry,
    mode: ErrorMode,
}

impl<'r> FieldEvaluator<'r> {
    pub fn new(rules: &'r RuleRegistry, mode: ErrorMode) -> Self {
        Self { rules, mode }
    }

    pub fn mode(&self) -> ErrorMode {
        self.mode
    }

    /// Evaluate `chain` for the field keyed `field` and return its errors,
    /// or `None` when every rule passed.
    pub fn evaluate(
        &self,
        field: &str,
        value: &FieldValue,
        chain: &RuleChain,
        record: &dyn FieldAccess,
    ) -> Option<FieldErrors> {
        let mut class = ValueClass::Unset;
        let mut messages = Vec::new();

        for directive in chain {
            if directive.name() == NULLABLE {
                if value.is_empty() {
                    trace!(field, "empty nullable value, chain stopped");
                    break;
                }
                continue;
            }

            let Some(handler) = self.rules.get(directive.name()) else {
                debug!(field, rule = directive.name(), "unrecognized rule ignored");
                continue;
            };

            let verdict = handler(&RuleContext::new(field, value, directive, class, record));
            trace!(
                field,
                rule = directive.name(),
                passed = verdict.is_pass(),
                "rule evaluated"
            );

            if let Some(next) = verdict.class {
                class = next;
            }

            if let Some(message) = verdict.message {
                if self.mode == ErrorMode::FailFast {
                    return Some(FieldErrors::Single(message));
                }
                messages.push(message);
            }
        }

        if messages.is_empty() {
            None
        } else {
            Some(FieldErrors::Many(messages))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Verdict;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn eval(mode: ErrorMode, encoding: &str, value: impl Into<FieldValue>) -> Option<FieldErrors> {
        let registry = RuleRegistry::builtin();
        let record: HashMap<String, FieldValue> = HashMap::new();
        FieldEvaluator::new(&registry, mode).evaluate(
            "age",
            &value.into(),
            &RuleChain::parse(encoding),
            &record,
        )
    }

    #[test]
    fn test_empty_chain_passes() {
        assert_eq!(eval(ErrorMode::Accumulate, "", ""), None);
    }

    #[test]
    fn test_fail_fast_stops_at_first() {
        assert_eq!(
            eval(ErrorMode::FailFast, "required|numeric|min:10", ""),
            Some(FieldErrors::Single("The age field is required.".to_string()))
        );
    }

    #[test]
    fn test_accumulate_collects_all() {
        assert_eq!(
            eval(ErrorMode::Accumulate, "required|numeric", ""),
            Some(FieldErrors::Many(vec![
                "The age field is required.".to_string(),
                "The age must be a number.".to_string(),
            ]))
        );
    }

    #[test]
    fn test_class_threads_through_chain() {
        assert_eq!(
            eval(ErrorMode::FailFast, "numeric|min:10", "5"),
            Some(FieldErrors::Single("The age must be at least 10.".to_string()))
        );
        assert_eq!(eval(ErrorMode::FailFast, "numeric|min:10", "15"), None);

        // "15" is two characters once the string class takes over.
        assert_eq!(
            eval(ErrorMode::FailFast, "numeric|string|min:3", "15"),
            Some(FieldErrors::Single("The age must only contain letters.".to_string()))
        );
        assert_eq!(
            eval(ErrorMode::Accumulate, "numeric|alpha_num|min:3", "15"),
            Some(FieldErrors::Many(vec!["The age must be at least 3 characters.".to_string()]))
        );
    }

    #[test]
    fn test_size_before_classifier_is_noop() {
        assert_eq!(eval(ErrorMode::Accumulate, "min:10|numeric", "5"), None);
    }

    #[test]
    fn test_nullable_position_matters() {
        assert_eq!(eval(ErrorMode::Accumulate, "nullable|numeric|min:10", ""), None);
        assert_eq!(eval(ErrorMode::Accumulate, "nullable|numeric|min:10", FieldValue::Null), None);

        assert_eq!(
            eval(ErrorMode::Accumulate, "numeric|nullable|min:10", ""),
            Some(FieldErrors::Many(vec!["The age must be a number.".to_string()]))
        );
    }

    #[test]
    fn test_nullable_with_value_continues() {
        assert_eq!(
            eval(ErrorMode::FailFast, "nullable|numeric|min:10", "3"),
            Some(FieldErrors::Single("The age must be at least 10.".to_string()))
        );
    }

    #[test]
    fn test_unknown_rules_ignored() {
        assert_eq!(eval(ErrorMode::Accumulate, "frobnicate:1|numeric|min:1", "4"), None);
    }

    #[test]
    fn test_fail_fast_skips_later_rules() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let registry = RuleRegistry::builtin().with_rule("count", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Verdict::pass()
        });
        let record: HashMap<String, FieldValue> = HashMap::new();
        let chain = RuleChain::parse("required|count");
        let value = FieldValue::Null;

        FieldEvaluator::new(&registry, ErrorMode::FailFast).evaluate("age", &value, &chain, &record);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        FieldEvaluator::new(&registry, ErrorMode::Accumulate).evaluate("age", &value, &chain, &record);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}

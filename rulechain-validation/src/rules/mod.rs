// Rule registry and handler context

mod content;
mod cross_field;
mod presence;
mod size;

use crate::humanize::{accessor_key, humanize};
use crate::{FieldAccess, FieldValue, RuleDirective};
use once_cell::sync::Lazy;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// Rule name handled directly by the evaluator loop.
pub const NULLABLE: &str = "nullable";

/// How size and comparison rules measure the value.
///
/// Starts `Unset` for every field and is updated by classifying rules
/// earlier in the same chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueClass {
    #[default]
    Unset,
    /// Compare character length
    String,
    /// Compare numeric magnitude
    Numeric,
}

/// Everything a rule handler may look at.
pub struct RuleContext<'a> {
    /// External key of the field under evaluation
    pub field: &'a str,
    pub value: &'a FieldValue,
    pub directive: &'a RuleDirective,
    /// Value class inferred from earlier rules in the chain
    pub class: ValueClass,
    pub record: &'a dyn FieldAccess,
}

impl<'a> RuleContext<'a> {
    pub fn new(
        field: &'a str,
        value: &'a FieldValue,
        directive: &'a RuleDirective,
        class: ValueClass,
        record: &'a dyn FieldAccess,
    ) -> Self {
        Self {
            field,
            value,
            directive,
            class,
            record,
        }
    }

    /// Label used in messages
    pub fn label(&self) -> String {
        humanize(self.field)
    }

    pub fn text(&self) -> Cow<'a, str> {
        self.value.as_text()
    }

    pub fn param(&self, index: usize) -> Option<&'a str> {
        self.directive.param(index)
    }

    /// Required parameter; logs and returns `None` when missing.
    pub fn required_param(&self, index: usize) -> Option<&'a str> {
        let param = self.param(index);
        if param.is_none() {
            warn!(
                field = self.field,
                rule = self.directive.name(),
                index,
                "missing rule parameter, rule skipped"
            );
        }
        param
    }

    /// Numeric parameter; logs and returns `None` when missing or malformed.
    pub fn numeric_param(&self, index: usize) -> Option<f64> {
        let raw = self.required_param(index)?;
        let parsed = crate::predicates::parse_float(raw);
        if parsed.is_none() {
            warn!(
                field = self.field,
                rule = self.directive.name(),
                param = raw,
                "non-numeric rule parameter, rule skipped"
            );
        }
        parsed
    }

    /// Resolve another field of the same record by a rule parameter.
    ///
    /// The parameter is converted to the accessor convention first; the raw
    /// spelling is tried as a fallback.
    pub fn lookup(&self, name: &str) -> Option<FieldValue> {
        let key = accessor_key(name);
        let found = self.record.field(&key).or_else(|| {
            if key != name {
                self.record.field(name)
            } else {
                None
            }
        });

        if found.is_none() {
            warn!(
                field = self.field,
                rule = self.directive.name(),
                reference = name,
                "cross-field rule references an unknown field"
            );
        }
        found
    }
}

/// A handler's answer: an optional class update and an optional failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Verdict {
    pub class: Option<ValueClass>,
    pub message: Option<String>,
}

impl Verdict {
    pub fn pass() -> Self {
        Self::default()
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            class: None,
            message: Some(message.into()),
        }
    }

    /// Pass when `ok`, otherwise fail with the lazily built message.
    pub fn check(ok: bool, message: impl FnOnce() -> String) -> Self {
        if ok { Self::pass() } else { Self::fail(message()) }
    }

    /// Set the value class for the rest of the chain
    pub fn classify(mut self, class: ValueClass) -> Self {
        self.class = Some(class);
        self
    }

    pub fn is_pass(&self) -> bool {
        self.message.is_none()
    }
}

/// A rule implementation
pub type RuleHandler = Arc<dyn Fn(&RuleContext<'_>) -> Verdict + Send + Sync>;

static BUILTIN_RULES: Lazy<Arc<RuleRegistry>> = Lazy::new(|| Arc::new(RuleRegistry::builtin()));

/// Rule name → handler table.
#[derive(Clone, Default)]
pub struct RuleRegistry {
    handlers: HashMap<String, RuleHandler>,
}

impl RuleRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in rule
    pub fn builtin() -> Self {
        let mut registry = Self::new();

        registry.register("required", presence::required);

        registry.register("string", content::alpha);
        registry.register("alpha", content::alpha);
        registry.register("alpha_num", content::alpha_num);
        registry.register("alpha_dash", content::alpha_dash);
        registry.register("alpha_space", content::alpha_space);
        registry.register("numeric", content::numeric);
        registry.register("date", content::date);
        registry.register("email", content::email);
        registry.register("ip", content::ip);
        registry.register("ipv4", content::ipv4);
        registry.register("ipv6", content::ipv6);
        registry.register("url", content::url);
        registry.register("credit_card", content::credit_card);

        registry.register("min", size::min);
        registry.register("max", size::max);
        registry.register("between", size::between);
        registry.register("lt", size::lt);
        registry.register("gt", size::gt);
        registry.register("lte", size::lte);
        registry.register("gte", size::gte);
        registry.register("digits", size::digits);
        registry.register("digits_between", size::digits_between);

        registry.register("same", cross_field::same);
        registry.register("required_if", cross_field::required_if);
        registry.register("required_with", cross_field::required_with);

        registry
    }

    /// Process-wide built-in registry
    pub fn shared() -> Arc<RuleRegistry> {
        Arc::clone(&BUILTIN_RULES)
    }

    /// Add or replace a rule
    pub fn register<F>(&mut self, name: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(&RuleContext<'_>) -> Verdict + Send + Sync + 'static,
    {
        self.handlers.insert(name.into(), Arc::new(handler));
        self
    }

    /// Builder form of [`register`](Self::register)
    pub fn with_rule<F>(mut self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&RuleContext<'_>) -> Verdict + Send + Sync + 'static,
    {
        self.register(name, handler);
        self
    }

    pub fn get(&self, name: &str) -> Option<&RuleHandler> {
        self.handlers.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered rule names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.names())
            .finish()
    }
}

// rulechain - declarative rule-chain validation for structured records
//
// Attach chains such as "required|numeric|min:10" to record fields and get
// field-keyed error messages back.
//
// Records deriving `Record` through this crate need
// `#[record(crate = "rulechain")]`, since the derive defaults to the
// `rulechain_validation` path.

// Re-export the engine
pub use rulechain_validation::*;

// Re-export procedural macros
#[cfg(feature = "derive")]
pub use rulechain_macro::Record;

// Re-export optional crates
#[cfg(feature = "config")]
pub use rulechain_config;

#[cfg(feature = "log")]
pub use rulechain_log;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        ErrorMode,
        FieldAccess,
        FieldErrors,
        FieldValue,
        Record,
        RuleChain,
        RuleRegistry,
        Schema,
        SchemaField,
        Validate,
        ValidationErrors,
        ValidationResult,
        Validator,
        ValidatorConfig,
    };
}

// Procedural macros for rulechain
// Attach rule-chain encodings to struct fields

use proc_macro::TokenStream;

mod record;

/// Derives `FieldAccess` and `Record` for a struct with named fields.
///
/// ```ignore
/// #[derive(Record)]
/// struct Signup {
///     #[validate("required|email")]
///     email: String,
///
///     #[validate(rules = "required|string|min:8", rename = "pass")]
///     password: String,
///
///     // No rules, but visible to `same:password_confirmation`
///     password_confirmation: String,
/// }
/// ```
///
/// The external key comes from `#[validate(rename = "..")]`, then
/// `#[serde(rename = "..")]` / `#[serde(rename_all = "..")]`, then the field
/// name. `#[validate(skip)]` hides a field entirely. `#[record(crate = "..")]`
/// on the struct changes the path used for the engine crate.
#[proc_macro_derive(Record, attributes(validate, record))]
pub fn record_derive(input: TokenStream) -> TokenStream {
    record::record_derive_impl(input)
}

// Field-name formatting

use heck::ToSnakeCase;

/// Turn a field key into the label used inside messages.
///
/// `first_name`, `first-name` and `firstName` all become `first name`.
pub fn humanize(key: &str) -> String {
    key.to_snake_case().replace('_', " ")
}

/// Convert a rule parameter into the record's field-accessor convention
/// (snake_case), e.g. `PasswordConfirmation` → `password_confirmation`.
pub fn accessor_key(name: &str) -> String {
    name.to_snake_case()
}

// Presence rules

use super::{RuleContext, Verdict};

pub(super) fn required(ctx: &RuleContext<'_>) -> Verdict {
    Verdict::check(!ctx.value.is_empty(), || {
        format!("The {} field is required.", ctx.label())
    })
}

#[cfg(test)]
mod tests {
    use crate::rules::ValueClass;
    use crate::rules::test_support::{empty_record, run};
    use crate::FieldValue;

    #[test]
    fn test_required() {
        let record = empty_record();

        let verdict = run("required", "", ValueClass::Unset, &record);
        assert_eq!(verdict.message.as_deref(), Some("The field name field is required."));
        assert_eq!(verdict.class, None);

        assert!(run("required", FieldValue::Null, ValueClass::Unset, &record).message.is_some());
        assert!(run("required", 0, ValueClass::Unset, &record).message.is_some());
        assert!(run("required", "x", ValueClass::Unset, &record).is_pass());
        assert!(run("required", 12, ValueClass::Unset, &record).is_pass());
    }
}

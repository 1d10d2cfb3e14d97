// Cross-field rules

use super::{RuleContext, Verdict};
use crate::humanize::humanize;
use crate::predicates::names_equal;

/// Value must equal the referenced field's value. An unknown reference
/// fails closed.
pub(super) fn same(ctx: &RuleContext<'_>) -> Verdict {
    let Some(other) = ctx.required_param(0) else {
        return Verdict::pass();
    };

    let matches = ctx
        .lookup(other)
        .is_some_and(|value| names_equal(&ctx.text(), &value.as_text()));

    Verdict::check(matches, || {
        format!("The {} and {} must match.", ctx.label(), humanize(other))
    })
}

/// Required when the referenced field holds the expected value.
pub(super) fn required_if(ctx: &RuleContext<'_>) -> Verdict {
    if !ctx.value.is_empty() {
        return Verdict::pass();
    }
    let (Some(other), Some(expected)) = (ctx.required_param(0), ctx.required_param(1)) else {
        return Verdict::pass();
    };

    let triggered = match ctx.lookup(other) {
        Some(value) => value.as_text() == expected,
        None => true,
    };

    Verdict::check(!triggered, || {
        format!(
            "The {} field is required when {} is {}.",
            ctx.label(),
            humanize(other),
            expected
        )
    })
}

/// Required when the referenced field is present (non-empty).
pub(super) fn required_with(ctx: &RuleContext<'_>) -> Verdict {
    if !ctx.value.is_empty() {
        return Verdict::pass();
    }
    let Some(other) = ctx.required_param(0) else {
        return Verdict::pass();
    };

    let triggered = match ctx.lookup(other) {
        Some(value) => !value.is_empty(),
        None => true,
    };

    Verdict::check(!triggered, || {
        format!(
            "The {} field is required when {} is present.",
            ctx.label(),
            humanize(other)
        )
    })
}

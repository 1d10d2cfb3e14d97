// Size and comparison rules

use super::{RuleContext, ValueClass, Verdict};
use tracing::trace;

/// Measured value plus the unit suffix for messages.
struct Measure {
    amount: f64,
    unit: &'static str,
}

/// Character count for string-class values, magnitude for numeric-class
/// values, nothing while the class is unset.
fn measure(ctx: &RuleContext<'_>) -> Option<Measure> {
    match ctx.class {
        ValueClass::String => Some(Measure {
            amount: ctx.value.char_len() as f64,
            unit: " characters",
        }),
        ValueClass::Numeric => match ctx.value.to_float() {
            Some(amount) => Some(Measure { amount, unit: "" }),
            None => {
                trace!(
                    field = ctx.field,
                    rule = ctx.directive.name(),
                    "value is not numeric, rule skipped"
                );
                None
            }
        },
        ValueClass::Unset => None,
    }
}

/// Shared shape of the single-bound rules.
fn bounded(
    ctx: &RuleContext<'_>,
    holds: fn(f64, f64) -> bool,
    phrase: &str,
) -> Verdict {
    let Some(measure) = measure(ctx) else {
        return Verdict::pass();
    };
    let Some(bound) = ctx.numeric_param(0) else {
        return Verdict::pass();
    };

    Verdict::check(holds(measure.amount, bound), || {
        format!(
            "The {} {} {}{}.",
            ctx.label(),
            phrase,
            ctx.param(0).unwrap_or_default(),
            measure.unit
        )
    })
}

pub(super) fn min(ctx: &RuleContext<'_>) -> Verdict {
    bounded(ctx, |x, p| x >= p, "must be at least")
}

pub(super) fn max(ctx: &RuleContext<'_>) -> Verdict {
    bounded(ctx, |x, p| x <= p, "may not be greater than")
}

pub(super) fn lt(ctx: &RuleContext<'_>) -> Verdict {
    bounded(ctx, |x, p| x < p, "must be less than")
}

pub(super) fn gt(ctx: &RuleContext<'_>) -> Verdict {
    bounded(ctx, |x, p| x > p, "must be greater than")
}

pub(super) fn lte(ctx: &RuleContext<'_>) -> Verdict {
    bounded(ctx, |x, p| x <= p, "must be less than or equal to")
}

pub(super) fn gte(ctx: &RuleContext<'_>) -> Verdict {
    bounded(ctx, |x, p| x >= p, "must be greater than or equal to")
}

pub(super) fn between(ctx: &RuleContext<'_>) -> Verdict {
    let Some(measure) = measure(ctx) else {
        return Verdict::pass();
    };
    let (Some(low), Some(high)) = (ctx.numeric_param(0), ctx.numeric_param(1)) else {
        return Verdict::pass();
    };

    Verdict::check((low..=high).contains(&measure.amount), || {
        format!(
            "The {} must be between {} and {}{}.",
            ctx.label(),
            ctx.param(0).unwrap_or_default(),
            ctx.param(1).unwrap_or_default(),
            measure.unit
        )
    })
}

/// Exact character count, whatever the value class.
pub(super) fn digits(ctx: &RuleContext<'_>) -> Verdict {
    let Some(expected) = ctx.numeric_param(0) else {
        return Verdict::pass();
    };

    Verdict::check(ctx.value.char_len() as f64 == expected, || {
        format!(
            "The {} must be {} digits.",
            ctx.label(),
            ctx.param(0).unwrap_or_default()
        )
    })
}

pub(super) fn digits_between(ctx: &RuleContext<'_>) -> Verdict {
    let (Some(low), Some(high)) = (ctx.numeric_param(0), ctx.numeric_param(1)) else {
        return Verdict::pass();
    };
    let len = ctx.value.char_len() as f64;

    Verdict::check((low..=high).contains(&len), || {
        format!(
            "The {} must be between {} and {} digits.",
            ctx.label(),
            ctx.param(0).unwrap_or_default(),
            ctx.param(1).unwrap_or_default()
        )
    })
}

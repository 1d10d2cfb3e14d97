// Content and format rules

use super::{RuleContext, ValueClass, Verdict};
use crate::predicates;

pub(super) fn alpha(ctx: &RuleContext<'_>) -> Verdict {
    Verdict::check(predicates::is_alpha(&ctx.text()), || {
        format!("The {} must only contain letters.", ctx.label())
    })
    .classify(ValueClass::String)
}

pub(super) fn alpha_num(ctx: &RuleContext<'_>) -> Verdict {
    Verdict::check(predicates::is_alpha_numeric(&ctx.text()), || {
        format!("The {} must only contain letters and numbers.", ctx.label())
    })
    .classify(ValueClass::String)
}

pub(super) fn alpha_dash(ctx: &RuleContext<'_>) -> Verdict {
    Verdict::check(predicates::is_alpha_dash(&ctx.text()), || {
        format!(
            "The {} must only contain letters, numbers, dashes and underscores.",
            ctx.label()
        )
    })
    .classify(ValueClass::String)
}

pub(super) fn alpha_space(ctx: &RuleContext<'_>) -> Verdict {
    Verdict::check(predicates::is_alpha_space(&ctx.text()), || {
        format!(
            "The {} must only contain letters, numbers, dashes, underscores and spaces.",
            ctx.label()
        )
    })
    .classify(ValueClass::String)
}

/// The value must parse as a finite number.
pub(super) fn numeric(ctx: &RuleContext<'_>) -> Verdict {
    Verdict::check(ctx.value.to_float().is_some(), || {
        format!("The {} must be a number.", ctx.label())
    })
    .classify(ValueClass::Numeric)
}

pub(super) fn date(ctx: &RuleContext<'_>) -> Verdict {
    Verdict::check(predicates::is_date(&ctx.text()), || {
        format!("The {} is not a valid date.", ctx.label())
    })
}

pub(super) fn email(ctx: &RuleContext<'_>) -> Verdict {
    Verdict::check(predicates::is_email(&ctx.text()), || {
        format!("The {} must be a valid email address.", ctx.label())
    })
}

pub(super) fn ip(ctx: &RuleContext<'_>) -> Verdict {
    Verdict::check(predicates::is_ip(&ctx.text()), || {
        format!("The {} must be a valid IP address.", ctx.label())
    })
}

pub(super) fn ipv4(ctx: &RuleContext<'_>) -> Verdict {
    Verdict::check(predicates::is_ipv4(&ctx.text()), || {
        format!("The {} must be a valid IPv4 address.", ctx.label())
    })
}

pub(super) fn ipv6(ctx: &RuleContext<'_>) -> Verdict {
    Verdict::check(predicates::is_ipv6(&ctx.text()), || {
        format!("The {} must be a valid IPv6 address.", ctx.label())
    })
}

pub(super) fn url(ctx: &RuleContext<'_>) -> Verdict {
    Verdict::check(predicates::is_url(&ctx.text()), || {
        format!("The {} format is invalid.", ctx.label())
    })
}

pub(super) fn credit_card(ctx: &RuleContext<'_>) -> Verdict {
    Verdict::check(predicates::is_credit_card(&ctx.text()), || {
        format!("The {} must have a valid credit card number.", ctx.label())
    })
}

//! Field checks called by generated `Validate` impls.
//!
//! Every helper appends to `out` instead of returning early so a request
//! reports all of its problems at once.

/// One failed field check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Wire name of the field, dotted for nested values (`party.id`, `details[0].message`).
    pub field: String,
    pub message: String,
    /// Stable machine-readable code (`min_length`, `email`, ...).
    pub code: &'static str,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>, code: &'static str) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code,
        }
    }
}

/// Schema-level checks beyond what deserialization enforces.
pub trait Validate {
    /// Every violation found; empty when the value is acceptable.
    fn validate(&self) -> Vec<FieldViolation>;
}

/// Length of the trimmed value, in characters.
pub fn min_length(field: &str, value: &str, min: u64, out: &mut Vec<FieldViolation>) {
    let len = value.trim().chars().count() as u64;
    if len < min {
        let message = if min == 1 {
            "must not be empty".to_string()
        } else {
            format!("must be at least {min} characters")
        };
        out.push(FieldViolation::new(field, message, "min_length"));
    }
}

pub fn max_length(field: &str, value: &str, max: u64, out: &mut Vec<FieldViolation>) {
    let len = value.trim().chars().count() as u64;
    if len > max {
        out.push(FieldViolation::new(
            field,
            format!("must be at most {max} characters"),
            "max_length",
        ));
    }
}

pub fn email(field: &str, value: &str, out: &mut Vec<FieldViolation>) {
    if !is_email(value) {
        out.push(FieldViolation::new(
            field,
            "value is not a valid email address",
            "email",
        ));
    }
}

pub fn one_of(field: &str, value: &str, allowed: &[&str], out: &mut Vec<FieldViolation>) {
    if !allowed.contains(&value) {
        out.push(FieldViolation::new(
            field,
            format!("must be one of: {}", allowed.join(", ")),
            "one_of",
        ));
    }
}

pub fn range(
    field: &str,
    value: f64,
    min: Option<f64>,
    max: Option<f64>,
    out: &mut Vec<FieldViolation>,
) {
    if let Some(min) = min {
        if value < min {
            out.push(FieldViolation::new(
                field,
                format!("must be greater than or equal to {min}"),
                "minimum",
            ));
        }
    }
    if let Some(max) = max {
        if value > max {
            out.push(FieldViolation::new(
                field,
                format!("must be less than or equal to {max}"),
                "maximum",
            ));
        }
    }
}

/// Re-home violations of a nested value under `prefix`.
pub fn nested(prefix: &str, inner: Vec<FieldViolation>, out: &mut Vec<FieldViolation>) {
    out.extend(inner.into_iter().map(|mut v| {
        v.field = format!("{prefix}.{}", v.field);
        v
    }));
}

/// Pragmatic address check: `local@domain.tld`, no whitespace, one `@`,
/// dotted domain with non-empty labels.
pub fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || local.len() > 64 || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2
        && labels.iter().all(|l| {
            !l.is_empty()
                && !l.starts_with('-')
                && !l.ends_with('-')
                && l.chars().all(|c| c.is_alphanumeric() || c == '-')
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_ordinary_addresses() {
        for ok in ["john.doe@example.com", "a+tag@sub.example.org", "x@y.io"] {
            assert!(is_email(ok), "{ok}");
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in [
            "invalid-email",
            "@example.com",
            "john@",
            "john@localhost",
            "john@@example.com",
            "john doe@example.com",
            "john@exa_mple.com",
            "john@example..com",
        ] {
            assert!(!is_email(bad), "{bad}");
        }
    }

    #[test]
    fn min_length_ignores_surrounding_whitespace() {
        let mut out = Vec::new();
        min_length("first_name", "   ", 1, &mut out);
        assert_eq!(out, vec![FieldViolation::new("first_name", "must not be empty", "min_length")]);

        out.clear();
        min_length("first_name", " Jo ", 2, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn range_checks_both_bounds() {
        let mut out = Vec::new();
        range("limit", 0.0, Some(1.0), Some(1000.0), &mut out);
        range("limit", 1001.0, Some(1.0), Some(1000.0), &mut out);
        range("limit", 10.0, Some(1.0), Some(1000.0), &mut out);
        let codes: Vec<_> = out.iter().map(|v| v.code).collect();
        assert_eq!(codes, ["minimum", "maximum"]);
    }

    #[test]
    fn one_of_lists_allowed_values() {
        let mut out = Vec::new();
        one_of("status", "deleted", &["active", "archived"], &mut out);
        assert_eq!(out[0].message, "must be one of: active, archived");
    }

    #[test]
    fn nested_prefixes_field_paths() {
        let mut out = Vec::new();
        nested(
            "party",
            vec![FieldViolation::new("id", "must not be empty", "min_length")],
            &mut out,
        );
        assert_eq!(out[0].field, "party.id");
    }

    proptest! {
        #[test]
        fn simple_generated_addresses_are_accepted(
            local in "[a-z][a-z0-9.+_]{0,20}",
            domain in "[a-z][a-z0-9]{0,10}",
            tld in "[a-z]{2,6}",
        ) {
            let addr = format!("{local}@{domain}.{tld}");
            prop_assert!(is_email(&addr));
        }

        #[test]
        fn anything_without_at_sign_is_rejected(s in "[^@]{0,40}") {
            prop_assert!(!is_email(&s));
        }

        #[test]
        fn min_length_never_flags_values_at_or_above_min(s in "[a-zA-Z]{3,30}") {
            let mut out = Vec::new();
            min_length("name", &s, 3, &mut out);
            prop_assert!(out.is_empty());
        }
    }
}

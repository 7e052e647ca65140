//! Password validator - runs every policy rule and collects violations.

use secrecy::{ExposeSecret, SecretString};

use crate::policy::{PasswordPolicy, ValidationResult};
use crate::rules::{
    RuleResult, digit_rule, length_rule, lowercase_rule, special_rule, uppercase_rule,
};

/// Validates a password against a policy.
///
/// Every rule runs, in order: length, uppercase, lowercase, digit, special.
/// A failed rule never stops the remaining ones, so the result lists all
/// violations.
///
/// # Arguments
/// * `password` - The password to validate (any string, including empty)
/// * `policy` - The rules to check against
///
/// # Returns
/// A `ValidationResult` that is valid iff no rule reported a violation.
pub fn validate_password(password: &SecretString, policy: &PasswordPolicy) -> ValidationResult {
    validate_str(password.expose_secret(), policy)
}

pub(crate) fn validate_str(pwd: &str, policy: &PasswordPolicy) -> ValidationResult {
    let rules: [(&str, fn(&str, &PasswordPolicy) -> RuleResult); 5] = [
        ("length", length_rule),
        ("uppercase", uppercase_rule),
        ("lowercase", lowercase_rule),
        ("digit", digit_rule),
        ("special", special_rule),
    ];

    let mut violations = Vec::new();
    for (_rule_name, rule_fn) in rules {
        if let Some(violation) = rule_fn(pwd, policy) {
            #[cfg(feature = "tracing")]
            tracing::trace!("password rule failed: {}", _rule_name);
            violations.push(violation);
        }
    }

    ValidationResult::from_violations(violations)
}

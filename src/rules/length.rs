//! Length rule - checks password minimum length.

use super::RuleResult;
use crate::policy::PasswordPolicy;

/// Checks if the password meets the policy's minimum length.
///
/// Length counts characters, not bytes.
pub fn length_rule(password: &str, policy: &PasswordPolicy) -> RuleResult {
    if password.chars().count() < policy.min_length() {
        return Some(format!(
            "Password must be at least {} characters",
            policy.min_length()
        ));
    }
    None
}

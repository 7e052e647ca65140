//! Character class rules - uppercase, lowercase and digit presence (ASCII).

use super::RuleResult;
use crate::policy::PasswordPolicy;

/// Checks that the password contains an ASCII uppercase letter.
///
/// # Returns
/// - `Some(violation)` if the policy requires it and none is present
/// - `None` otherwise
pub fn uppercase_rule(password: &str, policy: &PasswordPolicy) -> RuleResult {
    if policy.uppercase_required() && !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Some("Password must contain at least one uppercase letter".to_string());
    }
    None
}

/// Checks that the password contains an ASCII lowercase letter.
///
/// # Returns
/// - `Some(violation)` if the policy requires it and none is present
/// - `None` otherwise
pub fn lowercase_rule(password: &str, policy: &PasswordPolicy) -> RuleResult {
    if policy.lowercase_required() && !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Some("Password must contain at least one lowercase letter".to_string());
    }
    None
}

/// Checks that the password contains an ASCII digit.
///
/// # Returns
/// - `Some(violation)` if the policy requires it and none is present
/// - `None` otherwise
pub fn digit_rule(password: &str, policy: &PasswordPolicy) -> RuleResult {
    if policy.digit_required() && !password.chars().any(|c| c.is_ascii_digit()) {
        return Some("Password must contain at least one number".to_string());
    }
    None
}

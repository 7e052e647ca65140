//! Special character rule - exact membership in the policy's special charset.

use super::RuleResult;
use crate::policy::PasswordPolicy;

/// Checks that at least one character belongs to the special charset.
///
/// Characters outside the charset (spaces, `€`, `~`...) do not count even
/// though they are not alphanumeric.
pub fn special_rule(password: &str, policy: &PasswordPolicy) -> RuleResult {
    if policy.special_required() && !password.chars().any(|c| policy.is_special(c)) {
        return Some("Password must contain at least one special character".to_string());
    }
    None
}

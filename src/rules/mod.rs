//! Password policy rules
//!
//! Each rule checks one aspect of a [`PasswordPolicy`](crate::PasswordPolicy).

mod classes;
mod length;
mod special;

pub use classes::{digit_rule, lowercase_rule, uppercase_rule};
pub use length::length_rule;
pub use special::special_rule;

/// Result type for rule functions.
/// - `Some(violation)` - Rule failed with a violation message
/// - `None` - Rule passed or is not required by the policy
pub type RuleResult = Option<String>;

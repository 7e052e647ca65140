//! Password policy and validation result types.

use std::collections::BTreeSet;

use serde::Serialize;

/// Characters accepted as "special" by the default policy.
pub const DEFAULT_SPECIAL_CHARS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

const DEFAULT_MIN_LENGTH: usize = 12;

/// Rules a password must satisfy.
///
/// Built from [`PasswordPolicy::default`] and refined with the consuming
/// `with_*` / `require_*` methods. Once built it is never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordPolicy {
    min_length: usize,
    require_uppercase: bool,
    require_lowercase: bool,
    require_digit: bool,
    require_special: bool,
    special_charset: BTreeSet<char>,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            require_uppercase: true,
            require_lowercase: true,
            require_digit: true,
            require_special: true,
            special_charset: DEFAULT_SPECIAL_CHARS.chars().collect(),
        }
    }
}

impl PasswordPolicy {
    /// Sets the minimum length. Zero is raised to one.
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length.max(1);
        self
    }

    /// Sets whether an ASCII uppercase letter is required.
    pub fn require_uppercase(mut self, required: bool) -> Self {
        self.require_uppercase = required;
        self
    }

    /// Sets whether an ASCII lowercase letter is required.
    pub fn require_lowercase(mut self, required: bool) -> Self {
        self.require_lowercase = required;
        self
    }

    /// Sets whether an ASCII digit is required.
    pub fn require_digit(mut self, required: bool) -> Self {
        self.require_digit = required;
        self
    }

    /// Sets whether a character from the special charset is required.
    pub fn require_special(mut self, required: bool) -> Self {
        self.require_special = required;
        self
    }

    /// Replaces the set of characters counted as special.
    pub fn with_special_charset(mut self, charset: &str) -> Self {
        self.special_charset = charset.chars().collect();
        self
    }

    /// Minimum number of characters (always at least 1).
    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Whether an uppercase letter is required.
    pub fn uppercase_required(&self) -> bool {
        self.require_uppercase
    }

    /// Whether a lowercase letter is required.
    pub fn lowercase_required(&self) -> bool {
        self.require_lowercase
    }

    /// Whether a digit is required.
    pub fn digit_required(&self) -> bool {
        self.require_digit
    }

    /// Whether a special character is required.
    pub fn special_required(&self) -> bool {
        self.require_special
    }

    /// Exact membership test against the special charset.
    pub fn is_special(&self, c: char) -> bool {
        self.special_charset.contains(&c)
    }
}

/// Outcome of validating a password against a [`PasswordPolicy`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    /// One entry per failed rule: length, uppercase, lowercase, digit, special.
    pub violations: Vec<String>,
}

impl ValidationResult {
    pub(crate) fn from_violations(violations: Vec<String>) -> Self {
        Self {
            valid: violations.is_empty(),
            violations,
        }
    }
}

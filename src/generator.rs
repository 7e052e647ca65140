//! Rule-based random password generator.

use rand::Rng;
use rand::seq::SliceRandom;
use secrecy::SecretString;

use crate::policy::{DEFAULT_SPECIAL_CHARS, PasswordPolicy};
use crate::validator::validate_str;

/// Shortest password the generator produces.
pub const MIN_GENERATED_LENGTH: usize = 12;
/// Longest password the generator produces.
pub const MAX_GENERATED_LENGTH: usize = 32;

const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const DIGITS: &[u8] = b"0123456789";

// Seeding makes every candidate valid; hitting this means a construction bug.
const MAX_ATTEMPTS: usize = 16;

/// Generates a random password.
///
/// `length` is clamped into `[MIN_GENERATED_LENGTH, MAX_GENERATED_LENGTH]`.
/// The result always holds at least one uppercase and one lowercase letter,
/// plus one digit if `use_numbers` and one special character if `use_special`.
///
/// # Panics
///
/// Panics if the generated candidate fails its own policy `MAX_ATTEMPTS`
/// times in a row, which cannot happen with correct seeding.
pub fn generate_password(length: usize, use_special: bool, use_numbers: bool) -> SecretString {
    let length = length.clamp(MIN_GENERATED_LENGTH, MAX_GENERATED_LENGTH);
    let policy = PasswordPolicy::default()
        .with_min_length(length)
        .require_digit(use_numbers)
        .require_special(use_special);

    for _attempt in 1..=MAX_ATTEMPTS {
        let candidate = build_candidate(length, use_special, use_numbers);
        if validate_str(&candidate, &policy).valid {
            return SecretString::new(candidate.into());
        }

        #[cfg(feature = "tracing")]
        tracing::warn!("generated password rejected by self-check (attempt {})", _attempt);
    }

    panic!("password generator failed its self-check {MAX_ATTEMPTS} times");
}

/// Generates `count` independent passwords with digits and specials enabled.
pub fn generate_passwords(count: usize, length: usize) -> Vec<SecretString> {
    (0..count)
        .map(|_| generate_password(length, true, true))
        .collect()
}

fn build_candidate(length: usize, use_special: bool, use_numbers: bool) -> String {
    let mut rng = rand::rng();
    let specials = DEFAULT_SPECIAL_CHARS.as_bytes();

    let mut password: Vec<char> = Vec::with_capacity(length);
    password.push(pick(&mut rng, UPPERCASE));
    password.push(pick(&mut rng, LOWERCASE));
    if use_numbers {
        password.push(pick(&mut rng, DIGITS));
    }
    if use_special {
        password.push(pick(&mut rng, specials));
    }

    let mut pool: Vec<u8> = [UPPERCASE, LOWERCASE].concat();
    if use_numbers {
        pool.extend_from_slice(DIGITS);
    }
    if use_special {
        pool.extend_from_slice(specials);
    }

    while password.len() < length {
        password.push(pick(&mut rng, &pool));
    }

    password.shuffle(&mut rng);
    password.into_iter().collect()
}

fn pick<R: Rng>(rng: &mut R, set: &[u8]) -> char {
    set[rng.random_range(0..set.len())] as char
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::validate_password;
    use secrecy::ExposeSecret;

    fn policy_for(length: usize, use_special: bool, use_numbers: bool) -> PasswordPolicy {
        PasswordPolicy::default()
            .with_min_length(length.clamp(MIN_GENERATED_LENGTH, MAX_GENERATED_LENGTH))
            .require_digit(use_numbers)
            .require_special(use_special)
    }

    #[test]
    fn test_generate_clamps_and_satisfies_policy() {
        for length in 1..=100 {
            for use_special in [false, true] {
                for use_numbers in [false, true] {
                    let pwd = generate_password(length, use_special, use_numbers);
                    let expected = length.clamp(MIN_GENERATED_LENGTH, MAX_GENERATED_LENGTH);
                    assert_eq!(pwd.expose_secret().chars().count(), expected);

                    let result =
                        validate_password(&pwd, &policy_for(length, use_special, use_numbers));
                    assert!(result.valid, "violations: {:?}", result.violations);
                }
            }
        }
    }

    #[test]
    fn test_generate_below_minimum_matches_minimum() {
        for _ in 0..50 {
            assert_eq!(generate_password(5, true, true).expose_secret().len(), 12);
            assert_eq!(generate_password(12, true, true).expose_secret().len(), 12);
        }
    }

    #[test]
    fn test_generate_above_maximum_is_clamped() {
        assert_eq!(generate_password(1000, true, true).expose_secret().len(), 32);
    }

    #[test]
    fn test_generate_without_numbers_or_specials() {
        for _ in 0..200 {
            let pwd = generate_password(16, false, false);
            assert!(pwd.expose_secret().chars().all(|c| c.is_ascii_alphabetic()));
        }
    }

    #[test]
    fn test_generate_only_uses_allowed_pool() {
        for _ in 0..200 {
            let pwd = generate_password(20, true, true);
            assert!(
                pwd.expose_secret()
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || DEFAULT_SPECIAL_CHARS.contains(c))
            );
        }
    }

    #[test]
    fn test_generate_repeated_full_policy() {
        let policy = policy_for(16, true, true);
        let mut previous: Option<String> = None;
        for _ in 0..1000 {
            let pwd = generate_password(16, true, true);
            let value = pwd.expose_secret().to_string();
            assert_eq!(value.len(), 16);
            assert!(validate_password(&pwd, &policy).valid);
            assert_ne!(previous.as_deref(), Some(value.as_str()));
            previous = Some(value);
        }
    }

    #[test]
    fn test_generate_passwords_count() {
        let passwords = generate_passwords(5, 20);
        assert_eq!(passwords.len(), 5);
        for pwd in &passwords {
            assert_eq!(pwd.expose_secret().len(), 20);
        }
        assert!(generate_passwords(0, 20).is_empty());
    }
}

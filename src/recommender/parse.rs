//! Cleanup of free-form service output.

use secrecy::SecretString;

use crate::generator::MIN_GENERATED_LENGTH;
use crate::policy::PasswordPolicy;
use crate::validator::validate_str;

/// Maximum number of recommendations returned.
pub const MAX_RECOMMENDATIONS: usize = 7;

/// Splits service output into recommendation lines.
///
/// Headings (`#`) and blank lines are skipped, `1.`-style numbering and
/// `-`/`•` bullets are removed, and at most [`MAX_RECOMMENDATIONS`] items are
/// kept.
pub fn parse_recommendations(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(strip_list_marker)
        .filter(|line| !line.is_empty())
        .take(MAX_RECOMMENDATIONS)
        .map(str::to_string)
        .collect()
}

/// Extracts password suggestions of roughly `length` characters.
///
/// A line is kept when it passes the default policy with a minimum length of
/// `length - 1` and is no longer than `length + 2`.
pub(crate) fn parse_password_suggestions(text: &str, length: usize) -> Vec<SecretString> {
    let policy = PasswordPolicy::default().with_min_length(length.saturating_sub(1));
    let max_len = length.saturating_add(2);

    text.trim()
        .lines()
        .map(str::trim)
        .filter(|line| line.chars().count() >= MIN_GENERATED_LENGTH)
        .map(strip_list_marker)
        .filter(|line| line.chars().count() <= max_len && validate_str(line, &policy).valid)
        .map(|line| SecretString::new(line.to_string().into()))
        .collect()
}

fn strip_list_marker(line: &str) -> &str {
    let mut line = line;

    if line.starts_with(|c: char| c.is_ascii_digit()) && line.chars().take(3).any(|c| c == '.') {
        if let Some((_, rest)) = line.split_once('.') {
            line = rest.trim();
        }
    }

    if let Some(rest) = line.strip_prefix('-').or_else(|| line.strip_prefix('•')) {
        line = rest.trim();
    }

    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_parse_recommendations_strips_markers() {
        let text = "# Tips\n1. Use more symbols\n- Avoid names\n• Make it longer\n\n10. Use a manager";
        assert_eq!(
            parse_recommendations(text),
            vec![
                "Use more symbols",
                "Avoid names",
                "Make it longer",
                "Use a manager",
            ]
        );
    }

    #[test]
    fn test_parse_recommendations_keeps_plain_lines() {
        assert_eq!(
            parse_recommendations("  Prefer passphrases  \n2024 was a year."),
            vec!["Prefer passphrases", "2024 was a year."]
        );
    }

    #[test]
    fn test_parse_recommendations_limit() {
        let text = (1..=10)
            .map(|i| format!("{i}. tip {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let parsed = parse_recommendations(&text);
        assert_eq!(parsed.len(), MAX_RECOMMENDATIONS);
        assert_eq!(parsed[0], "tip 1");
        assert_eq!(parsed[6], "tip 7");
    }

    #[test]
    fn test_parse_recommendations_drops_empty_markers() {
        assert!(parse_recommendations("1.\n-\n•\n###").is_empty());
    }

    #[test]
    fn test_parse_password_suggestions_filters() {
        let text = "\
1. Xk9#mP2$vL7@qR4!
- short1A!
Nospecialchars1234
- Tq8&wZ3^nB6*yH1(
Way2Long!Password#With#Many#Chars99";
        let accepted: Vec<String> = parse_password_suggestions(text, 16)
            .iter()
            .map(|p| p.expose_secret().to_string())
            .collect();
        assert_eq!(accepted, vec!["Xk9#mP2$vL7@qR4!", "Tq8&wZ3^nB6*yH1("]);
    }

    #[test]
    fn test_parse_password_suggestions_length_window() {
        // 15 chars is length - 1, 18 chars is length + 2
        let text = "Ab1!Ab1!Ab1!Ab1\nAb1!Ab1!Ab1!Ab1!Ab\nAb1!Ab1!Ab1!Ab1!Ab1\nAb1!Ab1!Ab1!Ab";
        let accepted = parse_password_suggestions(text, 16);
        assert_eq!(accepted.len(), 2);
    }

    #[test]
    fn test_parse_password_suggestions_huge_length() {
        assert!(parse_password_suggestions("Xk9#mP2$vL7@qR4!", usize::MAX).is_empty());
    }
}

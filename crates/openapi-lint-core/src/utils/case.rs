//! Casing conventions for identifiers, enum values and rule names.

use crate::rule::RuleError;
use std::fmt;

/// A supported identifier casing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseStyle {
    /// `camelCase`
    Camel,
    /// `kebab-case`
    Kebab,
    /// `PascalCase`
    Pascal,
    /// `snake_case`
    Snake,
}

impl CaseStyle {
    /// Every supported casing.
    pub const ALL: [Self; 4] = [Self::Camel, Self::Kebab, Self::Pascal, Self::Snake];

    /// Parses a casing name such as `camelcase`, `camelCase` or `kebab-case`.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::UnsupportedCase`] for anything else.
    pub fn parse(s: &str) -> Result<Self, RuleError> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        let base = normalized.strip_suffix("case").unwrap_or(&normalized);
        match base {
            "camel" => Ok(Self::Camel),
            "kebab" => Ok(Self::Kebab),
            "pascal" => Ok(Self::Pascal),
            "snake" => Ok(Self::Snake),
            _ => Err(RuleError::UnsupportedCase {
                value: s.to_string(),
            }),
        }
    }

    /// Name used in rule names, e.g. `camelcase`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Camel => "camelcase",
            Self::Kebab => "kebabcase",
            Self::Pascal => "pascalcase",
            Self::Snake => "snakecase",
        }
    }

    /// Human-readable label, e.g. `camelCase`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Camel => "camelCase",
            Self::Kebab => "kebab-case",
            Self::Pascal => "PascalCase",
            Self::Snake => "snake_case",
        }
    }

    /// Returns true if `s` follows this casing.
    #[must_use]
    pub fn matches(self, s: &str) -> bool {
        match self {
            Self::Camel => is_camel_case(s),
            Self::Kebab => is_delimited(s, '-'),
            Self::Pascal => is_pascal_case(s),
            Self::Snake => is_delimited(s, '_'),
        }
    }
}

impl fmt::Display for CaseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn is_camel_case(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(|c| c.is_ascii_lowercase()) && chars.all(|c| c.is_ascii_alphanumeric())
}

fn is_pascal_case(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(|c| c.is_ascii_uppercase()) && chars.all(|c| c.is_ascii_alphanumeric())
}

/// Lowercase words joined by a single `sep`, starting with a letter.
fn is_delimited(s: &str, sep: char) -> bool {
    s.chars().next().is_some_and(|c| c.is_ascii_lowercase())
        && s.split(sep).all(|word| {
            !word.is_empty()
                && word
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        })
}

/// Returns true for names like `operation-summary-exist`.
#[must_use]
pub fn is_kebab_case(s: &str) -> bool {
    CaseStyle::Kebab.matches(s)
}

/// Returns true unless the first character is a lowercase letter.
///
/// Empty strings and strings starting with a digit or symbol pass.
#[must_use]
pub fn starts_uppercase(s: &str) -> bool {
    s.chars().next().map_or(true, |c| !c.is_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_common_spellings() {
        assert_eq!(CaseStyle::parse("camelcase").unwrap(), CaseStyle::Camel);
        assert_eq!(CaseStyle::parse("camelCase").unwrap(), CaseStyle::Camel);
        assert_eq!(CaseStyle::parse("kebab-case").unwrap(), CaseStyle::Kebab);
        assert_eq!(CaseStyle::parse("PascalCase").unwrap(), CaseStyle::Pascal);
        assert_eq!(CaseStyle::parse("snake_case").unwrap(), CaseStyle::Snake);
        assert_eq!(CaseStyle::parse("snake").unwrap(), CaseStyle::Snake);
    }

    #[test]
    fn parse_rejects_unsupported() {
        let err = CaseStyle::parse("screaming").unwrap_err();
        assert!(err.to_string().contains("screaming"));
    }

    #[test]
    fn camel_case() {
        assert!(CaseStyle::Camel.matches("getUserById"));
        assert!(CaseStyle::Camel.matches("list2"));
        assert!(!CaseStyle::Camel.matches("GetUserById"));
        assert!(!CaseStyle::Camel.matches("get_user"));
        assert!(!CaseStyle::Camel.matches(""));
    }

    #[test]
    fn pascal_case() {
        assert!(CaseStyle::Pascal.matches("GetUserById"));
        assert!(!CaseStyle::Pascal.matches("getUserById"));
        assert!(!CaseStyle::Pascal.matches("Get-User"));
    }

    #[test]
    fn kebab_and_snake_case() {
        assert!(CaseStyle::Kebab.matches("get-user-by-id"));
        assert!(!CaseStyle::Kebab.matches("get--user"));
        assert!(!CaseStyle::Kebab.matches("-get"));
        assert!(!CaseStyle::Kebab.matches("get-"));
        assert!(!CaseStyle::Kebab.matches("Get-user"));
        assert!(CaseStyle::Snake.matches("get_user_2"));
        assert!(!CaseStyle::Snake.matches("get_User"));
        assert!(!CaseStyle::Snake.matches("2_get"));
    }

    #[test]
    fn rule_names_are_kebab_case() {
        assert!(is_kebab_case("operation-summary-exist"));
        assert!(!is_kebab_case("Operation-Summary"));
        assert!(!is_kebab_case(""));
    }

    #[test]
    fn first_letter_uppercase() {
        assert!(starts_uppercase("List pets"));
        assert!(!starts_uppercase("list pets"));
        assert!(starts_uppercase("2FA setup"));
        assert!(starts_uppercase(""));
    }
}

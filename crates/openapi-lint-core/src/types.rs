//! Severity and scope classifiers shared by rules and policies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Errors from parsing free-form severity and scope strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The string does not name a severity.
    #[error("unknown severity `{0}`, expected: disabled, hint, information, warning, error")]
    UnknownSeverity(String),

    /// The string does not name a scope.
    #[error("unknown scope `{0}`, expected: operation, specification")]
    UnknownScope(String),
}

/// Strictness level of a rule.
///
/// Variants are declared in ascending order, so the derived `Ord` is the
/// ordering used for floor filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Rule is configured but never runs.
    Disabled,
    /// Stylistic hint.
    Hint,
    /// Informational message.
    Information,
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl Severity {
    /// All severities in ascending order.
    pub const ALL: [Self; 5] = [
        Self::Disabled,
        Self::Hint,
        Self::Information,
        Self::Warning,
        Self::Error,
    ];

    /// Parses a severity, ignoring case and surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::UnknownSeverity`] when nothing matches.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "disabled" => Ok(Self::Disabled),
            "hint" => Ok(Self::Hint),
            "information" | "info" => Ok(Self::Information),
            "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            _ => Err(ParseError::UnknownSeverity(s.to_string())),
        }
    }

    /// Returns true when `candidate` is active under `self` as the floor.
    ///
    /// A disabled candidate is never active, whatever the floor.
    #[must_use]
    pub fn includes(self, candidate: Self) -> bool {
        candidate != Self::Disabled && candidate >= self
    }

    /// Returns the canonical lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Hint => "hint",
            Self::Information => "information",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Granularity at which a rule executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Runs once per HTTP operation.
    Operation,
    /// Runs once per document.
    Specification,
}

impl Scope {
    /// Parses a scope, accepting the short aliases `op`, `oper` and `spec`.
    ///
    /// The empty string normalizes to [`Scope::Specification`].
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::UnknownScope`] when nothing matches.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "operation" | "op" | "oper" => Ok(Self::Operation),
            "specification" | "spec" | "" => Ok(Self::Specification),
            _ => Err(ParseError::UnknownScope(s.to_string())),
        }
    }

    /// Compares two free-form scope strings after normalization.
    ///
    /// Never fails: if either side does not parse the result is `false`.
    /// Use [`Scope::parse`] directly to detect malformed scopes.
    #[must_use]
    pub fn matches(want: &str, have: &str) -> bool {
        match (Self::parse(want), Self::parse(have)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }

    /// Returns the canonical lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Operation => "operation",
            Self::Specification => "specification",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

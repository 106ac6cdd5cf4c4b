//! Rule trait for defining policy checks.

use crate::context::{OperationContext, SpecContext};
use crate::types::Severity;
use crate::violation::Violation;

/// Errors raised while constructing rules.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    /// The collection has no rule with this name.
    #[error("rule `{name}` not found in collection `{collection}`")]
    NotFound {
        /// Collection that was asked.
        collection: String,
        /// Requested rule name.
        name: String,
    },

    /// A casing parameter is not one of the supported styles.
    #[error("unsupported casing `{value}`, expected: camelcase, kebabcase, pascalcase, snakecase")]
    UnsupportedCase {
        /// The rejected value.
        value: String,
    },
}

/// A single named check over an OpenAPI document.
///
/// Rules declare a scope: `specification` rules run once per document
/// through [`Rule::process_spec`], `operation` rules run once per HTTP
/// operation through [`Rule::process_operation`]. The policy only ever
/// calls the entry point matching the declared scope.
///
/// Rules are immutable once constructed and must not keep state between
/// calls.
///
/// # Example
///
/// ```ignore
/// use openapi_lint_core::{OperationContext, Rule, Violation};
///
/// pub struct DeprecatedOperation;
///
/// impl Rule for DeprecatedOperation {
///     fn name(&self) -> &str { "operation-not-deprecated" }
///     fn scope(&self) -> &str { "operation" }
///
///     fn process_operation(&self, ctx: &OperationContext) -> Vec<Violation> {
///         if ctx.operation.deprecated {
///             vec![Violation::new(self.name(), ctx.pointer_to(&["deprecated"]))]
///         } else {
///             vec![]
///         }
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "operation-summary-exist").
    fn name(&self) -> &str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the declared scope, normalized with
    /// [`Scope::parse`](crate::Scope::parse) when the policy runs.
    fn scope(&self) -> &str;

    /// Returns the severity this rule carries when listed on its own.
    fn severity(&self) -> Severity {
        Severity::Error
    }

    /// Checks the whole document.
    fn process_spec(&self, _ctx: &SpecContext) -> Vec<Violation> {
        Vec::new()
    }

    /// Checks a single operation.
    fn process_operation(&self, _ctx: &OperationContext) -> Vec<Violation> {
        Vec::new()
    }
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

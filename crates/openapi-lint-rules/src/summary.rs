//! Rules on operation summaries.

use openapi_lint_core::utils::case::starts_uppercase;
use openapi_lint_core::{OperationContext, Rule, Violation};

/// Rule name for operation-summary-exist.
pub const EXIST_NAME: &str = "operation-summary-exist";

/// Rule name for operation-summary-style-first-uppercase.
pub const FIRST_UPPERCASE_NAME: &str = "operation-summary-style-first-uppercase";

/// Requires a non-blank `summary` on every operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryExist;

impl SummaryExist {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for SummaryExist {
    fn name(&self) -> &str {
        EXIST_NAME
    }

    fn description(&self) -> &'static str {
        "Requires every operation to have a summary"
    }

    fn scope(&self) -> &str {
        "operation"
    }

    fn process_operation(&self, ctx: &OperationContext) -> Vec<Violation> {
        let blank = ctx
            .operation
            .summary
            .as_deref()
            .map_or(true, |s| s.trim().is_empty());
        if blank {
            vec![Violation::new(EXIST_NAME, ctx.pointer_to(&["summary"]))]
        } else {
            Vec::new()
        }
    }
}

/// Requires summaries to start with an uppercase letter.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryFirstUppercase;

impl SummaryFirstUppercase {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for SummaryFirstUppercase {
    fn name(&self) -> &str {
        FIRST_UPPERCASE_NAME
    }

    fn description(&self) -> &'static str {
        "Requires operation summaries to start with an uppercase letter"
    }

    fn scope(&self) -> &str {
        "operation"
    }

    fn process_operation(&self, ctx: &OperationContext) -> Vec<Violation> {
        match ctx.operation.summary.as_deref().map(str::trim) {
            Some(summary) if !starts_uppercase(summary) => vec![Violation::new(
                FIRST_UPPERCASE_NAME,
                ctx.pointer_to(&["summary"]),
            )
            .with_value(summary)],
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openapi_lint_core::{walk_operations, Document};
    use serde_json::json;

    fn run(rule: &dyn Rule) -> Vec<Violation> {
        let doc = Document::from_value(json!({
            "paths": {
                "/users/{userId}": {
                    "get": {"operationId": "getUser", "summary": ""},
                    "put": {"summary": "update a user"},
                    "delete": {"summary": "Delete a user"},
                    "patch": {}
                }
            }
        }))
        .unwrap();
        walk_operations(&doc, "")
            .flat_map(|ctx| rule.process_operation(&ctx))
            .collect()
    }

    #[test]
    fn test_blank_and_missing_summaries() {
        let violations = run(&SummaryExist::new());
        let locations: Vec<&str> = violations.iter().map(|v| v.location.as_str()).collect();
        assert_eq!(
            locations,
            vec![
                "#/paths/~1users~1{userId}/get/summary",
                "#/paths/~1users~1{userId}/patch/summary",
            ]
        );
        assert!(violations.iter().all(|v| v.value.is_empty()));
    }

    #[test]
    fn test_lowercase_summary() {
        let violations = run(&SummaryFirstUppercase::new());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location, "#/paths/~1users~1{userId}/put/summary");
        assert_eq!(violations[0].value, "update a user");
    }
}

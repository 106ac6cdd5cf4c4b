//! Rules on `operationId`.
//!
//! # Rationale
//!
//! Operation ids become method names in generated clients, so every
//! operation needs one and they should share one casing.

use openapi_lint_core::utils::case::CaseStyle;
use openapi_lint_core::{OperationContext, Rule, RuleError, Violation};

/// Rule name for operation-operationid-exist.
pub const EXIST_NAME: &str = "operation-operationid-exist";

/// Name prefix of the casing rules; the casing name completes it.
pub const STYLE_PREFIX: &str = "operation-operationid-style-";

/// Requires a non-empty `operationId` on every operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct OperationIdExist;

impl OperationIdExist {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for OperationIdExist {
    fn name(&self) -> &str {
        EXIST_NAME
    }

    fn description(&self) -> &'static str {
        "Requires every operation to have an operationId"
    }

    fn scope(&self) -> &str {
        "operation"
    }

    fn process_operation(&self, ctx: &OperationContext) -> Vec<Violation> {
        let missing = ctx
            .operation
            .operation_id
            .as_deref()
            .map_or(true, |id| id.trim().is_empty());
        if missing {
            vec![Violation::new(EXIST_NAME, ctx.pointer_to(&["operationId"]))]
        } else {
            Vec::new()
        }
    }
}

/// Requires every `operationId` to follow one casing.
///
/// Operations without an id are left to [`OperationIdExist`].
#[derive(Debug, Clone)]
pub struct OperationIdStyle {
    style: CaseStyle,
    name: String,
}

impl OperationIdStyle {
    /// Creates the rule for a casing name such as `camelcase`.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::UnsupportedCase`] for unknown casings.
    pub fn new(case: &str) -> Result<Self, RuleError> {
        let style = CaseStyle::parse(case)?;
        Ok(Self {
            style,
            name: format!("{STYLE_PREFIX}{}", style.name()),
        })
    }

    /// The enforced casing.
    #[must_use]
    pub fn style(&self) -> CaseStyle {
        self.style
    }
}

impl Rule for OperationIdStyle {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &'static str {
        "Requires operationIds to follow a casing convention"
    }

    fn scope(&self) -> &str {
        "operation"
    }

    fn process_operation(&self, ctx: &OperationContext) -> Vec<Violation> {
        match ctx.operation.operation_id.as_deref() {
            Some(id) if !id.is_empty() && !self.style.matches(id) => {
                vec![Violation::new(&self.name, ctx.pointer_to(&["operationId"])).with_value(id)]
            }
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openapi_lint_core::{walk_operations, Document};
    use serde_json::json;

    fn run(rule: &dyn Rule, doc: &Document) -> Vec<Violation> {
        walk_operations(doc, "")
            .flat_map(|ctx| rule.process_operation(&ctx))
            .collect()
    }

    fn doc() -> Document {
        Document::from_value(json!({
            "paths": {
                "/users/{userId}": {
                    "get": {"operationId": "GetUserById"},
                    "delete": {"operationId": "deleteUser"},
                    "put": {"operationId": ""}
                },
                "/health": {"get": {}}
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_missing_operation_ids() {
        let locations: Vec<String> = run(&OperationIdExist::new(), &doc())
            .into_iter()
            .map(|v| v.location)
            .collect();
        assert_eq!(
            locations,
            vec![
                "#/paths/~1health/get/operationId",
                "#/paths/~1users~1{userId}/put/operationId",
            ]
        );
    }

    #[test]
    fn test_camelcase_reports_value() {
        let rule = OperationIdStyle::new("camelcase").unwrap();
        assert_eq!(rule.name(), "operation-operationid-style-camelcase");

        let violations = run(&rule, &doc());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule_name, "operation-operationid-style-camelcase");
        assert_eq!(
            violations[0].location,
            "#/paths/~1users~1{userId}/get/operationId"
        );
        assert_eq!(violations[0].value, "GetUserById");
    }

    #[test]
    fn test_pascalcase() {
        let rule = OperationIdStyle::new("PascalCase").unwrap();
        let values: Vec<String> = run(&rule, &doc()).into_iter().map(|v| v.value).collect();
        assert_eq!(values, vec!["deleteUser"]);
    }

    #[test]
    fn test_unsupported_case() {
        assert!(matches!(
            OperationIdStyle::new("screaming"),
            Err(RuleError::UnsupportedCase { .. })
        ));
    }
}

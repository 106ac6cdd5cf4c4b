//! Rule requiring path parameter names to follow one casing.

use openapi_lint_core::utils::case::CaseStyle;
use openapi_lint_core::{Document, Operation, OperationContext, Parameter, Rule, RuleError, Violation};

/// Name prefix of the casing rules; the casing name completes it.
pub const STYLE_PREFIX: &str = "parameter-path-style-";

/// Checks every `in: path` parameter of an operation.
///
/// Parameters given as `#/components/parameters/...` references are
/// resolved first. Operation-level parameters are reported at the
/// operation's own entry. Path-level parameters are reported at the path
/// item's entry, once per path, from the first operation that inherits
/// them; a path-level parameter every operation overrides is skipped.
#[derive(Debug, Clone)]
pub struct PathParameterStyle {
    style: CaseStyle,
    name: String,
}

impl PathParameterStyle {
    /// Creates the rule for a casing name such as `snakecase`.
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

    fn violates(&self, param: &Parameter) -> bool {
        param.location == "path" && !self.style.matches(&param.name)
    }
}

fn overrides(document: &Document, operation: &Operation, param: &Parameter) -> bool {
    operation
        .parameters
        .iter()
        .filter_map(|p| document.resolve_parameter(p))
        .any(|p| p.name == param.name && p.location == param.location)
}

impl Rule for PathParameterStyle {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &'static str {
        "Requires path parameter names to follow a casing convention"
    }

    fn scope(&self) -> &str {
        "operation"
    }

    fn process_operation(&self, ctx: &OperationContext) -> Vec<Violation> {
        let document = ctx.document;
        let mut violations: Vec<Violation> = ctx
            .operation
            .parameters
            .iter()
            .enumerate()
            .filter_map(|(i, param)| {
                let param = document.resolve_parameter(param)?;
                self.violates(param).then(|| {
                    let index = i.to_string();
                    Violation::new(&self.name, ctx.pointer_to(&["parameters", index.as_str(), "name"]))
                        .with_value(&param.name)
                })
            })
            .collect();

        for (i, param) in ctx.path_item.parameters.iter().enumerate() {
            let Some(param) = document.resolve_parameter(param) else {
                continue;
            };
            if !self.violates(param) {
                continue;
            }
            let first_inheritor = ctx
                .path_item
                .operations()
                .find(|(_, op)| !overrides(document, op, param))
                .map(|(method, _)| method);
            if first_inheritor == Some(ctx.method) {
                let index = i.to_string();
                violations.push(
                    Violation::new(&self.name, ctx.path_pointer_to(&["parameters", index.as_str(), "name"]))
                        .with_value(&param.name),
                );
            }
        }
        violations
    }
}

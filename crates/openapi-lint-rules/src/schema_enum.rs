//! Rule requiring string enum values in component schemas to follow one
//! casing.

use crate::schema_walk::walk_component_schemas;
use openapi_lint_core::utils::case::CaseStyle;
use openapi_lint_core::{Rule, RuleError, SpecContext, Violation};
use serde_json::Value;

/// Name prefix of the casing rules; the casing name completes it.
pub const STYLE_PREFIX: &str = "schema-enum-style-";

/// Checks every string `enum` value of every component schema, including
/// nested property, item and composition schemas.
///
/// Non-string values are ignored.
#[derive(Debug, Clone)]
pub struct SchemaEnumStyle {
    style: CaseStyle,
    name: String,
}

impl SchemaEnumStyle {
    /// Creates the rule for a casing name such as `kebabcase`.
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
}

impl Rule for SchemaEnumStyle {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &'static str {
        "Requires schema enum values to follow a casing convention"
    }

    fn scope(&self) -> &str {
        "specification"
    }

    fn process_spec(&self, ctx: &SpecContext) -> Vec<Violation> {
        let mut violations = Vec::new();
        walk_component_schemas(ctx.document, |segments, schema| {
            for (i, value) in schema.enum_values.iter().enumerate() {
                let Value::String(value) = value else {
                    continue;
                };
                if self.style.matches(value) {
                    continue;
                }
                let mut location = segments.to_vec();
                location.extend(["enum".to_string(), i.to_string()]);
                violations.push(Violation::new(&self.name, ctx.pointer(&location)).with_value(value));
            }
        });
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openapi_lint_core::Document;
    use serde_json::json;

    #[test]
    fn test_nested_enum_values() {
        let doc = Document::from_value(json!({
            "components": {"schemas": {
                "Status": {"type": "string", "enum": ["active", "on-hold", "archivedItem"]},
                "Pet": {
                    "type": "object",
                    "properties": {
                        "kind": {"type": "string", "enum": ["house_cat", "dog"]},
                        "size": {"type": "integer", "enum": [1, 2]}
                    }
                }
            }}
        }))
        .unwrap();

        let rule = SchemaEnumStyle::new("kebabcase").unwrap();
        let violations = rule.process_spec(&SpecContext::new(&doc, "pets.yaml"));
        let found: Vec<String> = violations.iter().map(Violation::location_with_value).collect();
        insta::assert_debug_snapshot!(found, @r###"
        [
            "pets.yaml#/components/schemas/Pet/properties/kind/enum/0 [house_cat]",
            "pets.yaml#/components/schemas/Status/enum/2 [archivedItem]",
        ]
        "###);
    }
}

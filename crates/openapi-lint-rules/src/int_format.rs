//! Rule requiring integer schemas to carry a standard format.

use crate::schema_walk::walk_component_schemas;
use openapi_lint_core::{Rule, SpecContext, Violation};

/// Rule name for datatype-int-format-standard-exist.
pub const NAME: &str = "datatype-int-format-standard-exist";

/// Formats accepted for `type: integer`.
pub const STANDARD_FORMATS: [&str; 2] = ["int32", "int64"];

/// Reports every integer component schema, at any depth, whose `format`
/// is missing or not one of [`STANDARD_FORMATS`].
#[derive(Debug, Clone, Copy, Default)]
pub struct IntFormatStandard;

impl IntFormatStandard {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for IntFormatStandard {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Requires integer schemas to use format int32 or int64"
    }

    fn scope(&self) -> &str {
        "specification"
    }

    fn process_spec(&self, ctx: &SpecContext) -> Vec<Violation> {
        let mut violations = Vec::new();
        walk_component_schemas(ctx.document, |segments, schema| {
            if !schema.is_type("integer") {
                return;
            }
            let format = schema.format.as_deref().unwrap_or_default();
            if STANDARD_FORMATS.contains(&format) {
                return;
            }
            let mut location = segments.to_vec();
            location.push("format".to_string());
            violations.push(Violation::new(NAME, ctx.pointer(&location)).with_value(format));
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
    fn test_nonstandard_and_missing_formats() {
        let doc = Document::from_value(json!({
            "components": {"schemas": {
                "Pet": {
                    "type": "object",
                    "properties": {
                        "age": {"type": "integer"},
                        "id": {"type": "integer", "format": "int64"},
                        "legs": {"type": "integer", "format": "uint8"},
                        "weight": {"type": "number", "format": "float"}
                    }
                }
            }}
        }))
        .unwrap();

        let violations = IntFormatStandard::new().process_spec(&SpecContext::new(&doc, ""));
        let found: Vec<String> = violations.iter().map(Violation::location_with_value).collect();
        assert_eq!(
            found,
            vec![
                "#/components/schemas/Pet/properties/age/format",
                "#/components/schemas/Pet/properties/legs/format [uint8]",
            ]
        );
    }
}

//! Rule flagging object schemas that describe nothing.

use openapi_lint_core::{Rule, SpecContext, Violation};
use serde_json::Value;

/// Rule name for schema-object-properties-exist.
pub const NAME: &str = "schema-object-properties-exist";

/// Reports component schemas of type `object` that declare no
/// `properties`, no `additionalProperties` and no composition.
///
/// `additionalProperties: false` counts as absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaObjectPropertiesExist;

impl SchemaObjectPropertiesExist {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for SchemaObjectPropertiesExist {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Requires object schemas to declare their properties"
    }

    fn scope(&self) -> &str {
        "specification"
    }

    fn process_spec(&self, ctx: &SpecContext) -> Vec<Violation> {
        ctx.document
            .schemas()
            .filter_map(|(name, schema)| Some((name, schema.as_item()?)))
            .filter(|(_, schema)| {
                let open = matches!(
                    schema.additional_properties,
                    Some(ref v) if *v != Value::Bool(false)
                );
                schema.is_type("object")
                    && schema.properties.is_empty()
                    && !open
                    && !schema.is_composed()
            })
            .map(|(name, _)| Violation::new(NAME, ctx.pointer(&["components", "schemas", name])))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openapi_lint_core::Document;
    use serde_json::json;

    #[test]
    fn test_empty_objects() {
        let doc = Document::from_value(json!({
            "components": {"schemas": {
                "Empty": {"type": "object"},
                "Closed": {"type": "object", "additionalProperties": false},
                "Map": {"type": "object", "additionalProperties": {"type": "string"}},
                "Pet": {"type": "object", "properties": {"id": {"type": "integer"}}},
                "Union": {"type": "object", "oneOf": [{"$ref": "#/components/schemas/Pet"}]},
                "Name": {"type": "string"}
            }}
        }))
        .unwrap();

        let violations = SchemaObjectPropertiesExist::new().process_spec(&SpecContext::new(&doc, ""));
        let locations: Vec<&str> = violations.iter().map(|v| v.location.as_str()).collect();
        assert_eq!(
            locations,
            vec!["#/components/schemas/Closed", "#/components/schemas/Empty"]
        );
        assert!(violations.iter().all(|v| v.value.is_empty()));
    }
}

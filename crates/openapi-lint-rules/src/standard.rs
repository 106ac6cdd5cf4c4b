//! The standard rule collection.

use crate::{
    IntFormatStandard, OperationIdExist, OperationIdStyle, PathParameterStyle,
    SchemaEnumStyle, SchemaHasReference, SchemaObjectPropertiesExist, SchemaReferenceHasSchema,
    SummaryExist, SummaryFirstUppercase, TagFirstUppercase,
};
use openapi_lint_core::{RuleCollection, RuleConstructor, RuleTable};

/// Name of the collection.
pub const COLLECTION: &str = "standard";

const ENTRIES: &[(&str, RuleConstructor)] = &[
    ("operation-operationid-exist", || Ok(Box::new(OperationIdExist::new()))),
    ("operation-operationid-style-camelcase", || Ok(Box::new(OperationIdStyle::new("camelcase")?))),
    ("operation-operationid-style-kebabcase", || Ok(Box::new(OperationIdStyle::new("kebabcase")?))),
    ("operation-operationid-style-pascalcase", || Ok(Box::new(OperationIdStyle::new("pascalcase")?))),
    ("operation-operationid-style-snakecase", || Ok(Box::new(OperationIdStyle::new("snakecase")?))),
    ("operation-summary-exist", || Ok(Box::new(SummaryExist::new()))),
    ("operation-summary-style-first-uppercase", || Ok(Box::new(SummaryFirstUppercase::new()))),
    ("parameter-path-style-camelcase", || Ok(Box::new(PathParameterStyle::new("camelcase")?))),
    ("parameter-path-style-kebabcase", || Ok(Box::new(PathParameterStyle::new("kebabcase")?))),
    ("parameter-path-style-pascalcase", || Ok(Box::new(PathParameterStyle::new("pascalcase")?))),
    ("parameter-path-style-snakecase", || Ok(Box::new(PathParameterStyle::new("snakecase")?))),
    ("schema-enum-style-camelcase", || Ok(Box::new(SchemaEnumStyle::new("camelcase")?))),
    ("schema-enum-style-kebabcase", || Ok(Box::new(SchemaEnumStyle::new("kebabcase")?))),
    ("schema-enum-style-pascalcase", || Ok(Box::new(SchemaEnumStyle::new("pascalcase")?))),
    ("schema-enum-style-snakecase", || Ok(Box::new(SchemaEnumStyle::new("snakecase")?))),
    ("schema-object-properties-exist", || Ok(Box::new(SchemaObjectPropertiesExist::new()))),
    ("tag-style-first-uppercase", || Ok(Box::new(TagFirstUppercase::new()))),
    ("datatype-int-format-standard-exist", || Ok(Box::new(IntFormatStandard::new()))),
    ("schema-has-reference", || Ok(Box::new(SchemaHasReference::new()))),
    ("schema-reference-has-schema", || Ok(Box::new(SchemaReferenceHasSchema::new()))),
];

/// Returns the standard collection.
///
/// Includes:
/// - operation id presence and casing (`operation-operationid-*`)
/// - summary presence and capitalization (`operation-summary-*`)
/// - path parameter casing (`parameter-path-style-*`)
/// - enum value casing (`schema-enum-style-*`)
/// - empty object schemas, integer formats and schema reference integrity
/// - tag capitalization
#[must_use]
pub fn standard_rules() -> RuleTable {
    RuleTable::new(COLLECTION, ENTRIES)
}

/// Returns every rule name of the standard collection, sorted.
#[must_use]
pub fn standard_rule_names() -> Vec<String> {
    standard_rules().rule_names()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_entry_constructs_under_its_name() {
        let rules = standard_rules();
        assert_eq!(rules.len(), 20);
        for name in rules.rule_names() {
            let rule = rules.rule(&name).unwrap();
            assert_eq!(rule.name(), name);
        }
    }

    #[test]
    fn test_unknown_rule() {
        assert!(standard_rules().rule("operation-summary-style-lowercase").is_err());
        assert!(!standard_rules().rule_exists("operation-tag-in-tag-group"));
    }
}

//! Reference-integrity rules for component schemas.

use openapi_lint_core::utils::pointer::unescape;
use openapi_lint_core::{Rule, SpecContext, Violation, COMPONENT_SCHEMA_PREFIX};
use std::collections::BTreeSet;

/// Rule name for schema-has-reference.
pub const HAS_REFERENCE_NAME: &str = "schema-has-reference";

/// Rule name for schema-reference-has-schema.
pub const REFERENCE_HAS_SCHEMA_NAME: &str = "schema-reference-has-schema";

/// Name of the component schema a reference points into. Deep references
/// such as `#/components/schemas/Pet/properties/id` name `Pet`.
fn schema_name(target: &str) -> Option<String> {
    let rest = target.strip_prefix(COMPONENT_SCHEMA_PREFIX)?;
    let name = rest.split_once('/').map_or(rest, |(name, _)| name);
    Some(unescape(name))
}

/// Reports component schemas that no `$ref` points at.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaHasReference;

impl SchemaHasReference {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for SchemaHasReference {
    fn name(&self) -> &str {
        HAS_REFERENCE_NAME
    }

    fn description(&self) -> &'static str {
        "Reports component schemas that are never referenced"
    }

    fn scope(&self) -> &str {
        "specification"
    }

    fn process_spec(&self, ctx: &SpecContext) -> Vec<Violation> {
        let referenced: BTreeSet<String> = ctx
            .document
            .references()
            .iter()
            .filter_map(|site| schema_name(&site.target))
            .collect();

        ctx.document
            .schemas()
            .filter(|(name, _)| !referenced.contains(*name))
            .map(|(name, _)| {
                Violation::new(
                    HAS_REFERENCE_NAME,
                    ctx.pointer(&["components", "schemas", name]),
                )
                .with_value(name)
            })
            .collect()
    }
}

/// Reports `$ref`s into `#/components/schemas` whose target is undefined.
///
/// The location is the `$ref` member itself and the value is the
/// reference string.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaReferenceHasSchema;

impl SchemaReferenceHasSchema {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for SchemaReferenceHasSchema {
    fn name(&self) -> &str {
        REFERENCE_HAS_SCHEMA_NAME
    }

    fn description(&self) -> &'static str {
        "Reports schema references that point at undefined schemas"
    }

    fn scope(&self) -> &str {
        "specification"
    }

    fn process_spec(&self, ctx: &SpecContext) -> Vec<Violation> {
        ctx.document
            .references()
            .into_iter()
            .filter(|site| schema_name(&site.target).is_some_and(|name| !ctx.document.has_schema(&name)))
            .map(|site| {
                Violation::new(REFERENCE_HAS_SCHEMA_NAME, ctx.pointer(&site.segments))
                    .with_value(site.target)
            })
            .collect()
    }
}

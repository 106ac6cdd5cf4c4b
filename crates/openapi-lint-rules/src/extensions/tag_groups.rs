//! Rules for the `x-tagGroups` vendor extension.
//!
//! Tag groups nest the top-level tags into navigation sections:
//!
//! ```yaml
//! x-tagGroups:
//!   - name: Accounts
//!     tags: [Users, Sessions]
//! ```

use openapi_lint_core::{OperationContext, Rule, RuleTable, SpecContext, Violation};
use serde_json::Value;
use std::collections::BTreeSet;

/// Name of the collection.
pub const COLLECTION: &str = "tag-groups";

/// Extension key holding the groups.
pub const EXTENSION: &str = "x-tagGroups";

/// Rule name for operation-tag-in-tag-group.
pub const OPERATION_TAG_IN_TAG_GROUP: &str = "operation-tag-in-tag-group";

/// Rule name for tag-group-tag-defined.
pub const TAG_GROUP_TAG_DEFINED: &str = "tag-group-tag-defined";

/// Returns the `tag-groups` extension collection.
#[must_use]
pub fn tag_group_rules() -> RuleTable {
    RuleTable::new(
        COLLECTION,
        &[
            (OPERATION_TAG_IN_TAG_GROUP, || Ok(Box::new(OperationTagInTagGroup))),
            (TAG_GROUP_TAG_DEFINED, || Ok(Box::new(TagGroupTagDefined))),
        ],
    )
}

/// `(group index, tag index, tag)` for every string tag of every group.
fn grouped_tags(document: &openapi_lint_core::Document) -> Vec<(usize, usize, &str)> {
    let groups = match document.extension(EXTENSION) {
        Some(Value::Array(groups)) => groups,
        Some(_) => {
            tracing::debug!("{EXTENSION} is not a list, ignoring it");
            return Vec::new();
        }
        None => return Vec::new(),
    };
    groups
        .iter()
        .enumerate()
        .filter_map(|(g, group)| Some((g, group.get("tags")?.as_array()?)))
        .flat_map(|(g, tags)| {
            tags.iter()
                .enumerate()
                .filter_map(move |(t, tag)| Some((g, t, tag.as_str()?)))
        })
        .collect()
}

/// Requires every operation tag to appear in some tag group.
#[derive(Debug, Clone, Copy, Default)]
pub struct OperationTagInTagGroup;

impl Rule for OperationTagInTagGroup {
    fn name(&self) -> &str {
        OPERATION_TAG_IN_TAG_GROUP
    }

    fn description(&self) -> &'static str {
        "Requires operation tags to belong to an x-tagGroups entry"
    }

    fn scope(&self) -> &str {
        "operation"
    }

    fn process_operation(&self, ctx: &OperationContext) -> Vec<Violation> {
        let grouped: BTreeSet<&str> = grouped_tags(ctx.document)
            .into_iter()
            .map(|(_, _, tag)| tag)
            .collect();

        ctx.operation
            .tags
            .iter()
            .enumerate()
            .filter(|(_, tag)| !grouped.contains(tag.as_str()))
            .map(|(i, tag)| {
                let index = i.to_string();
                Violation::new(OPERATION_TAG_IN_TAG_GROUP, ctx.pointer_to(&["tags", index.as_str()]))
                    .with_value(tag)
            })
            .collect()
    }
}

/// Requires every grouped tag to be declared in the top-level `tags`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagGroupTagDefined;

impl Rule for TagGroupTagDefined {
    fn name(&self) -> &str {
        TAG_GROUP_TAG_DEFINED
    }

    fn description(&self) -> &'static str {
        "Requires x-tagGroups entries to name declared tags"
    }

    fn scope(&self) -> &str {
        "specification"
    }

    fn process_spec(&self, ctx: &SpecContext) -> Vec<Violation> {
        let declared: BTreeSet<&str> = ctx
            .document
            .spec()
            .tags
            .iter()
            .map(|t| t.name.as_str())
            .collect();

        grouped_tags(ctx.document)
            .into_iter()
            .filter(|(_, _, tag)| !declared.contains(tag))
            .map(|(g, t, tag)| {
                let (g, t) = (g.to_string(), t.to_string());
                Violation::new(
                    TAG_GROUP_TAG_DEFINED,
                    ctx.pointer(&[EXTENSION, g.as_str(), "tags", t.as_str()]),
                )
                .with_value(tag)
            })
            .collect()
    }
}

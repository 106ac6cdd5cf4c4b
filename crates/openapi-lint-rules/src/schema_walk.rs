//! Recursive walk over component schemas.

use openapi_lint_core::{Document, ReferenceOr, Schema};

/// Calls `visit` for every inline schema under `#/components/schemas`,
/// descending through properties, items and compositions.
///
/// The segments passed to `visit` are unescaped and start with
/// `components/schemas/{name}`. References are not followed.
pub(crate) fn walk_component_schemas<F>(document: &Document, mut visit: F)
where
    F: FnMut(&[String], &Schema),
{
    for (name, schema) in document.schemas() {
        let mut segments = vec![
            "components".to_string(),
            "schemas".to_string(),
            name.to_string(),
        ];
        walk(schema, &mut segments, &mut visit);
    }
}

fn walk<F>(schema: &ReferenceOr<Schema>, segments: &mut Vec<String>, visit: &mut F)
where
    F: FnMut(&[String], &Schema),
{
    let Some(schema) = schema.as_item() else {
        return;
    };
    visit(segments, schema);
    for (relative, child) in schema.children() {
        let depth = segments.len();
        segments.extend(relative);
        walk(child, segments, visit);
        segments.truncate(depth);
    }
}

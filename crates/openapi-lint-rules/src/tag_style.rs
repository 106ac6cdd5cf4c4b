//! Rule requiring declared tag names to start with an uppercase letter.

use openapi_lint_core::utils::case::starts_uppercase;
use openapi_lint_core::{Rule, SpecContext, Violation};

/// Rule name for tag-style-first-uppercase.
pub const NAME: &str = "tag-style-first-uppercase";

/// Checks the top-level `tags` list.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagFirstUppercase;

impl TagFirstUppercase {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for TagFirstUppercase {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Requires tag names to start with an uppercase letter"
    }

    fn scope(&self) -> &str {
        "spec"
    }

    fn process_spec(&self, ctx: &SpecContext) -> Vec<Violation> {
        ctx.document
            .spec()
            .tags
            .iter()
            .enumerate()
            .filter(|(_, tag)| !starts_uppercase(&tag.name))
            .map(|(i, tag)| {
                let index = i.to_string();
                Violation::new(NAME, ctx.pointer(&["tags", index.as_str(), "name"]))
                    .with_value(&tag.name)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openapi_lint_core::Document;
    use serde_json::json;

    #[test]
    fn test_lowercase_tags() {
        let doc = Document::from_value(json!({
            "tags": [
                {"name": "Users"},
                {"name": "pets", "description": "Pet store"},
                {"name": "3rd party"}
            ]
        }))
        .unwrap();

        let violations = TagFirstUppercase::new().process_spec(&SpecContext::new(&doc, ""));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].to_string(), "tag-style-first-uppercase: #/tags/1/name [pets]");
    }
}

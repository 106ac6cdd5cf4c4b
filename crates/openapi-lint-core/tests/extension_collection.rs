//! Integration test: a hand-written extension collection end-to-end.
//!
//! Loads `tests/fixtures/orders.json`, resolves a policy against a custom
//! [`RuleCollection`] and checks what the engine reports.

use openapi_lint_core::{
    load_spec, OperationContext, PolicyConfig, PolicyError, Rule, RuleBox, RuleCollection,
    RuleError, RuleTable, Severity, SpecContext, Violation,
};
use std::path::PathBuf;

fn fixture(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
        .to_string_lossy()
        .into_owned()
}

struct NotDeprecated;

impl Rule for NotDeprecated {
    fn name(&self) -> &str {
        "operation-not-deprecated"
    }
    fn scope(&self) -> &str {
        "oper"
    }
    fn process_operation(&self, ctx: &OperationContext) -> Vec<Violation> {
        if ctx.operation.deprecated {
            vec![Violation::new(self.name(), ctx.pointer_to(&["deprecated"]))
                .with_data("method", ctx.method.as_str())]
        } else {
            Vec::new()
        }
    }
}

struct VersionMajor;

impl Rule for VersionMajor {
    fn name(&self) -> &str {
        "info-version-major-one"
    }
    fn scope(&self) -> &str {
        ""
    }
    fn process_spec(&self, ctx: &SpecContext) -> Vec<Violation> {
        let version = &ctx.document.spec().info.version;
        if version.starts_with("1.") {
            Vec::new()
        } else {
            vec![Violation::new(self.name(), ctx.pointer(&["info", "version"])).with_value(version)]
        }
    }
}

/// A collection implemented directly on the trait, without a table.
struct AcmeRules;

impl RuleCollection for AcmeRules {
    fn name(&self) -> &str {
        "acme"
    }

    fn rule_names(&self) -> Vec<String> {
        vec![
            "info-version-major-one".to_string(),
            "operation-not-deprecated".to_string(),
        ]
    }

    fn rule_exists(&self, name: &str) -> bool {
        self.rule_names().iter().any(|n| n == name)
    }

    fn rule(&self, name: &str) -> Result<RuleBox, RuleError> {
        match name {
            "operation-not-deprecated" => Ok(Box::new(NotDeprecated)),
            "info-version-major-one" => Ok(Box::new(VersionMajor)),
            _ => Err(RuleError::NotFound {
                collection: self.name().to_string(),
                name: name.to_string(),
            }),
        }
    }
}

fn empty_standard() -> RuleTable {
    RuleTable::new("standard", &[])
}

// ── Happy path ──

#[test]
fn extension_rules_report_with_aliased_scopes() {
    let config = PolicyConfig::parse_json(
        r#"{
            "name": "acme",
            "rules": {
                "operation-not-deprecated": {"severity": "warning"},
                "info-version-major-one": {}
            }
        }"#,
    )
    .expect("fixture policy should parse");
    let policy = config
        .policy(&empty_standard(), &[&AcmeRules])
        .expect("policy should resolve");

    let doc = load_spec(&fixture("orders.json"), true).expect("fixture spec should load");
    let violations = policy
        .validate_spec(&doc, "orders.json", Severity::Warning)
        .expect("validation should succeed");

    let by_rule = violations.locations_by_rule();
    assert_eq!(
        by_rule["operation-not-deprecated"],
        vec![
            "orders.json#/paths/~1orders/get/deprecated",
            "orders.json#/paths/~1orders~1{id}/delete/deprecated",
        ]
    );
    assert_eq!(by_rule["info-version-major-one"], vec!["orders.json#/info/version [2.1]"]);

    let methods: Vec<&str> = violations
        .get("operation-not-deprecated")
        .expect("set should exist")
        .violations
        .iter()
        .map(|v| v.data["method"].as_str())
        .collect();
    assert_eq!(methods, vec!["get", "delete"]);

    let errors_only = policy
        .validate_spec(&doc, "orders.json", Severity::Error)
        .expect("validation should succeed");
    assert_eq!(errors_only.counts_by_rule().len(), 1);
}

// ── Failure modes ──

#[test]
fn same_name_in_two_extensions_is_a_collision() {
    let config = PolicyConfig::new("acme").rule("operation-not-deprecated", "error");
    let err = config
        .policy(&empty_standard(), &[&AcmeRules, &AcmeRules])
        .expect_err("collision expected");
    let collisions = match err {
        PolicyError::Collision(collisions) => collisions,
        other => panic!("expected collision, got {other:?}"),
    };
    assert_eq!(collisions.len(), 1);
    assert_eq!(collisions[0].name, "operation-not-deprecated");
    assert_eq!(collisions[0].collections, vec!["acme", "acme"]);
}

#[test]
fn batch_load_error_names_the_file() {
    let config = PolicyConfig::new("acme").rule("operation-not-deprecated", "error");
    let policy = config
        .policy(&empty_standard(), &[&AcmeRules])
        .expect("policy should resolve");

    let err = policy
        .validate_spec_files("error", &[fixture("orders.json"), fixture("missing.json")])
        .expect_err("missing file should abort the batch");
    assert!(err.to_string().contains("missing.json"));
}

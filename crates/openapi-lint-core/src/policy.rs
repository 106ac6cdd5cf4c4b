//! Policy resolution and evaluation.
//!
//! A [`PolicyConfig`] names rules and severities. Resolving it against the
//! standard collection and any extension collections yields a [`Policy`],
//! which runs every active rule over one document or a batch of files.

use crate::collection::RuleCollection;
use crate::config::PolicyConfig;
use crate::context::SpecContext;
use crate::document::Document;
use crate::loader::{load_spec, LoadError};
use crate::rule::{RuleBox, RuleError};
use crate::traversal::walk_operations;
use crate::types::{ParseError, Scope, Severity};
use crate::utils::case::is_kebab_case;
use crate::violation::{ViolationCollection, ViolationError};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use tracing::{debug, info, warn};

/// Errors raised while building or running a policy.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum PolicyError {
    /// A severity or scope string did not parse.
    #[error(transparent)]
    #[diagnostic(code(openapi_lint::policy::parse))]
    Parse(#[from] ParseError),

    /// A rule could not be constructed.
    #[error(transparent)]
    #[diagnostic(code(openapi_lint::policy::rule))]
    Rule(#[from] RuleError),

    /// Rule names resolvable in more than one collection.
    #[error("rule names defined by more than one collection: {}", format_collisions(.0))]
    #[diagnostic(
        code(openapi_lint::policy::collision),
        help("rename the extension rule or drop one of the collections")
    )]
    Collision(Vec<RuleCollision>),

    /// Configured rule names that no collection defines.
    #[error("unknown rules: {}", .names.join(", "))]
    #[diagnostic(
        code(openapi_lint::policy::unknown_rule),
        help("run `openapi-lint list-rules` to see the available rules, and check `includeStandardRules`")
    )]
    UnknownRule {
        /// The unresolved names, sorted.
        names: Vec<String>,
    },

    /// A rule with this name is already part of the policy.
    #[error("rule `{name}` is already in the policy")]
    #[diagnostic(code(openapi_lint::policy::duplicate_rule))]
    DuplicateRule {
        /// Rule name.
        name: String,
    },

    /// A rule name is empty or not kebab-case.
    #[error("invalid rule name `{name}`, expected kebab-case")]
    #[diagnostic(code(openapi_lint::policy::invalid_rule_name))]
    InvalidRuleName {
        /// Rule name.
        name: String,
    },

    /// Rules whose declared scope does not parse.
    #[error("rules with invalid scopes: {}", .rules.join(", "))]
    #[diagnostic(
        code(openapi_lint::policy::invalid_scope),
        help("a scope must be `operation` or `specification`")
    )]
    InvalidScopes {
        /// Entries formatted as ``name (`scope`)``.
        rules: Vec<String>,
    },

    /// A batch run was given no files.
    #[error("no spec files to validate")]
    #[diagnostic(code(openapi_lint::policy::no_spec_files))]
    NoSpecFiles,

    /// A file in a batch run could not be loaded.
    #[error("failed to load {path}")]
    #[diagnostic(code(openapi_lint::policy::load))]
    Load {
        /// File path or URL.
        path: String,
        /// Underlying load error.
        source: LoadError,
    },

    /// Violations were filed under the wrong rule while merging.
    #[error(transparent)]
    #[diagnostic(code(openapi_lint::policy::violation))]
    Violation(#[from] ViolationError),
}

fn format_collisions(collisions: &[RuleCollision]) -> String {
    collisions
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A rule name defined by several collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleCollision {
    /// The colliding rule name.
    pub name: String,
    /// Names of every collection defining it, sorted.
    pub collections: Vec<String>,
}

impl fmt::Display for RuleCollision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.collections.join(", "))
    }
}

/// A resolved rule paired with its effective severity.
pub struct PolicyRule {
    /// The rule.
    pub rule: RuleBox,
    /// Effective severity.
    pub severity: Severity,
}

impl fmt::Debug for PolicyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyRule")
            .field("rule", &self.rule.name())
            .field("scope", &self.rule.scope())
            .field("severity", &self.severity)
            .finish()
    }
}

/// An executable set of rules keyed by rule name.
#[derive(Debug, Default)]
pub struct Policy {
    name: String,
    version: String,
    rules: BTreeMap<String, PolicyRule>,
}

impl Policy {
    /// Creates an empty policy.
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            rules: BTreeMap::new(),
        }
    }

    /// Policy name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Policy version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Adds a rule with a severity string. An empty string takes the rule's
    /// own [`Rule::severity`](crate::Rule::severity), which is `error`
    /// unless the rule overrides it.
    ///
    /// With `reject_duplicates` unset an existing rule of the same name is
    /// replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if the rule name is empty or not kebab-case, if the
    /// severity does not parse, or if the name is taken and duplicates are
    /// rejected.
    pub fn add_rule(
        &mut self,
        rule: RuleBox,
        severity: &str,
        reject_duplicates: bool,
    ) -> Result<(), PolicyError> {
        let name = rule.name().to_string();
        if !is_kebab_case(&name) {
            return Err(PolicyError::InvalidRuleName { name });
        }
        if reject_duplicates && self.rules.contains_key(&name) {
            return Err(PolicyError::DuplicateRule { name });
        }
        let severity = if severity.trim().is_empty() {
            rule.severity()
        } else {
            Severity::parse(severity)?
        };
        debug!("Adding rule {name} at {severity}");
        self.rules.insert(name, PolicyRule { rule, severity });
        Ok(())
    }

    /// Rule names, sorted.
    #[must_use]
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.keys().map(String::as_str).collect()
    }

    /// Looks up a rule by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PolicyRule> {
        self.rules.get(name)
    }

    /// Iterates over rules in name order.
    pub fn rules(&self) -> impl Iterator<Item = &PolicyRule> {
        self.rules.values()
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the policy has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Verifies that every rule declares a scope that parses.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::InvalidScopes`] naming every offending rule.
    pub fn check_scopes(&self) -> Result<(), PolicyError> {
        let invalid: Vec<String> = self
            .rules
            .iter()
            .filter(|(_, pr)| Scope::parse(pr.rule.scope()).is_err())
            .map(|(name, pr)| format!("{name} (`{}`)", pr.rule.scope()))
            .collect();
        if invalid.is_empty() {
            Ok(())
        } else {
            Err(PolicyError::InvalidScopes { rules: invalid })
        }
    }

    /// Rules of `scope` whose severity passes `floor`.
    fn active(&self, scope: Scope, floor: Severity) -> Vec<&PolicyRule> {
        self.rules
            .values()
            .filter(|pr| Scope::parse(pr.rule.scope()).is_ok_and(|s| s == scope))
            .filter(|pr| floor.includes(pr.severity))
            .collect()
    }

    /// Runs the policy over one document.
    ///
    /// Specification-scoped rules run once, then operation-scoped rules run
    /// for every defined operation. Every location starts with
    /// `pointer_prefix` (usually a file name, or empty).
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::InvalidScopes`] before any rule runs if a rule
    /// declares a malformed scope.
    pub fn validate_spec(
        &self,
        document: &Document,
        pointer_prefix: &str,
        floor: Severity,
    ) -> Result<ViolationCollection, PolicyError> {
        self.check_scopes()?;

        let mut violations = ViolationCollection::new();

        let spec_rules = self.active(Scope::Specification, floor);
        let ctx = SpecContext::new(document, pointer_prefix);
        for pr in &spec_rules {
            violations.add_many(pr.rule.process_spec(&ctx));
        }

        let operation_rules = self.active(Scope::Operation, floor);
        if !operation_rules.is_empty() {
            for op in walk_operations(document, pointer_prefix) {
                for pr in &operation_rules {
                    violations.add_many(pr.rule.process_operation(&op));
                }
            }
        }

        debug!(
            "Ran {} specification and {} operation rules: {} violations",
            spec_rules.len(),
            operation_rules.len(),
            violations.count()
        );
        Ok(violations)
    }

    /// Runs the policy over several files and merges the results.
    ///
    /// Each file's locations are prefixed with its leaf name, e.g.
    /// `users.yaml#/paths/~1users/get/operationId`. Files are loaded without
    /// structural validation.
    ///
    /// # Errors
    ///
    /// Fails on an unknown floor severity, on an empty list, or on the first
    /// file that cannot be loaded or validated.
    pub fn validate_spec_files<S: AsRef<str>>(
        &self,
        floor: &str,
        paths: &[S],
    ) -> Result<ViolationCollection, PolicyError> {
        let floor = Severity::parse(floor)?;
        if paths.is_empty() {
            return Err(PolicyError::NoSpecFiles);
        }

        for name in shared_leaf_names(paths) {
            warn!("Several files are named {name}; their locations share the prefix `{name}#`");
        }

        let mut total = ViolationCollection::new();
        for path in paths {
            let path = path.as_ref();
            let document = load(path)?;
            let violations = self.validate_spec(&document, leaf_name(path), floor)?;
            info!("{path}: {} violations", violations.count());
            total.merge(violations)?;
        }
        Ok(total)
    }

    /// Runs the policy over several files, keeping results per file.
    ///
    /// Keys are the paths as given. Locations carry no file prefix.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Policy::validate_spec_files`].
    pub fn validate_spec_files_map<S: AsRef<str>>(
        &self,
        floor: &str,
        paths: &[S],
    ) -> Result<BTreeMap<String, ViolationCollection>, PolicyError> {
        let floor = Severity::parse(floor)?;
        if paths.is_empty() {
            return Err(PolicyError::NoSpecFiles);
        }

        let mut results = BTreeMap::new();
        for path in paths {
            let path = path.as_ref();
            let document = load(path)?;
            let violations = self.validate_spec(&document, "", floor)?;
            info!("{path}: {} violations", violations.count());
            results
                .entry(path.to_string())
                .or_insert_with(ViolationCollection::new)
                .merge(violations)?;
        }
        Ok(results)
    }
}

fn load(path: &str) -> Result<Document, PolicyError> {
    load_spec(path, false).map_err(|source| PolicyError::Load {
        path: path.to_string(),
        source,
    })
}

fn leaf_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
}

/// Leaf names used by more than one path, sorted.
fn shared_leaf_names<S: AsRef<str>>(paths: &[S]) -> Vec<&str> {
    let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
    for path in paths {
        *seen.entry(leaf_name(path.as_ref())).or_default() += 1;
    }
    seen.into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, _)| name)
        .collect()
}

impl PolicyConfig {
    /// Resolves the configuration into an executable [`Policy`].
    ///
    /// Each configured name is looked up in the standard collection (when
    /// `includeStandardRules` is set) and in every extension collection. A
    /// name found in more than one collection is a collision, and a name
    /// found nowhere is unknown. Both abort resolution.
    ///
    /// # Errors
    ///
    /// Returns an error on collisions, unknown names, failing rule
    /// constructors, invalid severities or invalid rule scopes. No partial
    /// policy is returned.
    pub fn policy(
        &self,
        standard: &dyn RuleCollection,
        extensions: &[&dyn RuleCollection],
    ) -> Result<Policy, PolicyError> {
        let mut resolved: Vec<(&str, &dyn RuleCollection, &str)> = Vec::new();
        let mut defined_by: BTreeMap<&str, Vec<String>> = BTreeMap::new();
        let mut unknown = Vec::new();

        let candidates = self
            .include_standard_rules
            .then_some(standard)
            .into_iter()
            .chain(extensions.iter().copied());

        for (name, config) in &self.rules {
            let mut found = false;
            for collection in candidates.clone() {
                if !collection.rule_exists(name) {
                    continue;
                }
                debug!("Resolved rule {name} from collection {}", collection.name());
                resolved.push((name.as_str(), collection, config.severity.as_str()));
                defined_by
                    .entry(name.as_str())
                    .or_default()
                    .push(collection.name().to_string());
                found = true;
            }
            if !found {
                unknown.push(name.clone());
            }
        }

        let collisions: Vec<RuleCollision> = defined_by
            .into_iter()
            .filter(|(_, collections)| collections.len() > 1)
            .map(|(name, mut collections)| {
                collections.sort();
                RuleCollision {
                    name: name.to_string(),
                    collections,
                }
            })
            .collect();
        if !collisions.is_empty() {
            return Err(PolicyError::Collision(collisions));
        }
        if !unknown.is_empty() {
            return Err(PolicyError::UnknownRule { names: unknown });
        }

        let mut policy = Policy::new(&self.name, &self.version);
        for (name, collection, severity) in resolved {
            policy.add_rule(collection.rule(name)?, severity, true)?;
        }
        policy.check_scopes()?;

        info!("Policy `{}` resolved with {} rules", policy.name(), policy.len());
        Ok(policy)
    }
}

//! Named, enumerable registries of constructible rules.

use crate::rule::{RuleBox, RuleError};
use std::collections::HashMap;

/// A named source of rules.
///
/// Collections are stateless factories: [`RuleCollection::rule`] builds a
/// fresh rule on every call.
pub trait RuleCollection: Send + Sync {
    /// Returns the collection name (e.g. "standard").
    fn name(&self) -> &str;

    /// Returns every rule name, sorted and de-duplicated.
    fn rule_names(&self) -> Vec<String>;

    /// Returns true if the collection defines `name`.
    fn rule_exists(&self, name: &str) -> bool;

    /// Constructs the rule called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::NotFound`] for unknown names, or the error of
    /// the rule constructor itself.
    fn rule(&self, name: &str) -> Result<RuleBox, RuleError>;
}

/// Constructor stored in a [`RuleTable`].
pub type RuleConstructor = fn() -> Result<RuleBox, RuleError>;

/// A fixed name → constructor lookup table.
///
/// # Example
///
/// ```ignore
/// let table = RuleTable::new(
///     "acme",
///     &[("operation-not-deprecated", || Ok(Box::new(DeprecatedOperation)))],
/// );
/// assert!(table.rule_exists("operation-not-deprecated"));
/// ```
#[derive(Debug, Clone)]
pub struct RuleTable {
    name: String,
    constructors: HashMap<&'static str, RuleConstructor>,
    names: Vec<String>,
}

impl RuleTable {
    /// Creates a table from `(name, constructor)` entries.
    ///
    /// A later entry with a repeated name replaces the earlier one.
    #[must_use]
    pub fn new(name: impl Into<String>, entries: &[(&'static str, RuleConstructor)]) -> Self {
        let constructors: HashMap<&'static str, RuleConstructor> =
            entries.iter().copied().collect();
        let mut names: Vec<String> = constructors.keys().map(|k| (*k).to_string()).collect();
        names.sort();
        Self {
            name: name.into(),
            constructors,
            names,
        }
    }

    /// Number of rules in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl RuleCollection for RuleTable {
    fn name(&self) -> &str {
        &self.name
    }

    fn rule_names(&self) -> Vec<String> {
        self.names.clone()
    }

    fn rule_exists(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    fn rule(&self, name: &str) -> Result<RuleBox, RuleError> {
        let constructor = self
            .constructors
            .get(name)
            .ok_or_else(|| RuleError::NotFound {
                collection: self.name.clone(),
                name: name.to_string(),
            })?;
        constructor()
    }
}

//! Violation records and their per-rule aggregation.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Errors raised when violations are filed under the wrong rule.
///
/// These indicate a caller bug, never a problem in the checked document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViolationError {
    /// A violation's rule name differs from the set it was added to.
    #[error("violation for rule `{found}` cannot be added to set for rule `{expected}`")]
    RuleMismatch {
        /// Rule name of the containing set.
        expected: String,
        /// Rule name carried by the violation.
        found: String,
    },
}

/// A single policy breach found in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    /// Name of the rule that reported this violation.
    pub rule_name: String,
    /// JSON Pointer (RFC 6901) to the offending node, optionally prefixed
    /// with the source file name.
    pub location: String,
    /// The offending literal, empty when there is none.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value: String,
    /// Auxiliary key/value data.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, String>,
}

impl Violation {
    /// Creates a new violation without a value.
    #[must_use]
    pub fn new(rule_name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            rule_name: rule_name.into(),
            location: location.into(),
            value: String::new(),
            data: BTreeMap::new(),
        }
    }

    /// Sets the offending value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Adds an auxiliary data entry.
    #[must_use]
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Returns the location, suffixed with `[value]` when a value is present.
    #[must_use]
    pub fn location_with_value(&self) -> String {
        if self.value.is_empty() {
            self.location.clone()
        } else {
            format!("{} [{}]", self.location, self.value)
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.rule_name, self.location_with_value())
    }
}

/// Ordered violations reported by one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationSet {
    /// Rule every violation in this set belongs to.
    pub rule_name: String,
    /// Violations in insertion order.
    pub violations: Vec<Violation>,
}

impl ViolationSet {
    /// Creates an empty set for a rule.
    #[must_use]
    pub fn new(rule_name: impl Into<String>) -> Self {
        Self {
            rule_name: rule_name.into(),
            violations: Vec::new(),
        }
    }

    /// Appends a violation.
    ///
    /// # Errors
    ///
    /// Returns [`ViolationError::RuleMismatch`] if the violation belongs to
    /// another rule.
    pub fn add(&mut self, violation: Violation) -> Result<(), ViolationError> {
        self.check(&violation)?;
        self.violations.push(violation);
        Ok(())
    }

    fn check(&self, violation: &Violation) -> Result<(), ViolationError> {
        if violation.rule_name == self.rule_name {
            Ok(())
        } else {
            Err(ViolationError::RuleMismatch {
                expected: self.rule_name.clone(),
                found: violation.rule_name.clone(),
            })
        }
    }

    /// Number of violations in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if the set has no violations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns de-duplicated, sorted locations (with `[value]` suffixes).
    #[must_use]
    pub fn locations(&self) -> Vec<String> {
        self.violations
            .iter()
            .map(Violation::location_with_value)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// All violations of a validation run, keyed by rule name.
///
/// Keys are kept sorted so every query is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViolationCollection {
    sets: BTreeMap<String, ViolationSet>,
}

impl ViolationCollection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Files a violation under its own rule name.
    pub fn add(&mut self, violation: Violation) {
        self.sets
            .entry(violation.rule_name.clone())
            .or_insert_with(|| ViolationSet::new(violation.rule_name.clone()))
            .violations
            .push(violation);
    }

    /// Files many violations.
    pub fn add_many<I>(&mut self, violations: I)
    where
        I: IntoIterator<Item = Violation>,
    {
        for v in violations {
            self.add(v);
        }
    }

    /// Merges a whole set, appending to any existing set for the same rule.
    ///
    /// # Errors
    ///
    /// Returns [`ViolationError::RuleMismatch`] if any violation does not
    /// belong to the set's rule. Nothing is merged in that case.
    pub fn add_set(&mut self, set: ViolationSet) -> Result<(), ViolationError> {
        for v in &set.violations {
            set.check(v)?;
        }
        self.upsert(set);
        Ok(())
    }

    /// Merges another collection into this one, concatenating per-rule lists.
    ///
    /// # Errors
    ///
    /// Returns [`ViolationError::RuleMismatch`] if `other` holds a violation
    /// filed under a different rule. Nothing is merged in that case.
    pub fn merge(&mut self, other: Self) -> Result<(), ViolationError> {
        for set in other.sets.values() {
            for v in &set.violations {
                set.check(v)?;
            }
        }
        for set in other.sets.into_values() {
            self.upsert(set);
        }
        Ok(())
    }

    fn upsert(&mut self, set: ViolationSet) {
        match self.sets.get_mut(&set.rule_name) {
            Some(existing) => existing.violations.extend(set.violations),
            None => {
                self.sets.insert(set.rule_name.clone(), set);
            }
        }
    }

    /// Total number of violations.
    #[must_use]
    pub fn count(&self) -> usize {
        self.sets.values().map(ViolationSet::len).sum()
    }

    /// Returns true if there are no violations at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Violation count per rule name.
    #[must_use]
    pub fn counts_by_rule(&self) -> BTreeMap<String, usize> {
        self.sets
            .iter()
            .map(|(name, set)| (name.clone(), set.len()))
            .collect()
    }

    /// De-duplicated, sorted locations per rule name.
    ///
    /// Each location is suffixed with ` [value]` when the violation carries
    /// a value.
    #[must_use]
    pub fn locations_by_rule(&self) -> BTreeMap<String, Vec<String>> {
        self.sets
            .iter()
            .map(|(name, set)| (name.clone(), set.locations()))
            .collect()
    }

    /// Rule names that reported at least one violation, sorted.
    #[must_use]
    pub fn rule_names(&self) -> Vec<&str> {
        self.sets.keys().map(String::as_str).collect()
    }

    /// Returns the set for a rule, if any.
    #[must_use]
    pub fn get(&self, rule_name: &str) -> Option<&ViolationSet> {
        self.sets.get(rule_name)
    }

    /// Iterates over all violations, grouped by rule in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.sets.values().flat_map(|s| s.violations.iter())
    }
}

impl Extend<Violation> for ViolationCollection {
    fn extend<T: IntoIterator<Item = Violation>>(&mut self, iter: T) {
        self.add_many(iter);
    }
}

impl FromIterator<Violation> for ViolationCollection {
    fn from_iter<T: IntoIterator<Item = Violation>>(iter: T) -> Self {
        let mut collection = Self::new();
        collection.add_many(iter);
        collection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camel(location: &str, value: &str) -> Violation {
        Violation::new("operation-operationid-style-camelcase", location).with_value(value)
    }

    #[test]
    fn add_groups_by_rule() {
        let mut c = ViolationCollection::new();
        c.add(camel("#/paths/~1a/get/operationId", "GetA"));
        c.add(camel("#/paths/~1b/get/operationId", "GetB"));
        c.add(Violation::new("operation-summary-exist", "#/paths/~1a/get/summary"));

        assert_eq!(c.count(), 3);
        assert_eq!(
            c.rule_names(),
            vec!["operation-operationid-style-camelcase", "operation-summary-exist"]
        );
        assert_eq!(c.counts_by_rule()["operation-operationid-style-camelcase"], 2);
    }

    #[test]
    fn locations_are_sorted_deduplicated_and_suffixed() {
        let mut c = ViolationCollection::new();
        c.add(camel("#/paths/~1b/get/operationId", "GetB"));
        c.add(camel("#/paths/~1a/get/operationId", "GetA"));
        c.add(camel("#/paths/~1a/get/operationId", "GetA"));
        c.add(Violation::new("operation-summary-exist", "#/paths/~1a/get/summary"));

        let locations = c.locations_by_rule();
        assert_eq!(
            locations["operation-operationid-style-camelcase"],
            vec![
                "#/paths/~1a/get/operationId [GetA]".to_string(),
                "#/paths/~1b/get/operationId [GetB]".to_string(),
            ]
        );
        assert_eq!(
            locations["operation-summary-exist"],
            vec!["#/paths/~1a/get/summary".to_string()]
        );
    }

    #[test]
    fn merge_concatenates_per_rule() {
        let mut a = ViolationCollection::new();
        a.add(camel("a.yaml#/paths/~1x/get/operationId", "X"));
        let mut b = ViolationCollection::new();
        b.add(camel("b.yaml#/paths/~1x/get/operationId", "X"));

        a.merge(b).unwrap();
        let set = a.get("operation-operationid-style-camelcase").unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.violations[0].location, "a.yaml#/paths/~1x/get/operationId");
        assert_eq!(set.violations[1].location, "b.yaml#/paths/~1x/get/operationId");
    }

    #[test]
    fn merge_rejects_misfiled_violation_without_partial_merge() {
        let mut bad = ViolationSet::new("rule-a");
        bad.violations.push(Violation::new("rule-b", "#/x"));
        let mut other = ViolationCollection::new();
        other.add(Violation::new("rule-0", "#/y"));
        other.sets.insert("rule-a".to_string(), bad);

        let mut target = ViolationCollection::new();
        let err = target.merge(other).unwrap_err();
        assert_eq!(
            err,
            ViolationError::RuleMismatch {
                expected: "rule-a".to_string(),
                found: "rule-b".to_string(),
            }
        );
        assert!(target.is_empty());
    }

    #[test]
    fn set_add_rejects_other_rule() {
        let mut set = ViolationSet::new("rule-a");
        assert!(set.add(Violation::new("rule-a", "#/x")).is_ok());
        assert!(set.add(Violation::new("rule-b", "#/x")).is_err());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn add_set_appends_to_existing() {
        let mut c = ViolationCollection::new();
        c.add(Violation::new("rule-a", "#/1"));
        let mut set = ViolationSet::new("rule-a");
        set.add(Violation::new("rule-a", "#/2")).unwrap();
        c.add_set(set).unwrap();
        assert_eq!(c.counts_by_rule()["rule-a"], 2);
    }

    #[test]
    fn display_includes_value_when_present() {
        assert_eq!(
            camel("#/paths/~1a/get/operationId", "GetA").to_string(),
            "operation-operationid-style-camelcase: #/paths/~1a/get/operationId [GetA]"
        );
        assert_eq!(
            Violation::new("operation-summary-exist", "#/s").to_string(),
            "operation-summary-exist: #/s"
        );
    }

    #[test]
    fn serializes_as_map_of_sets() {
        let c: ViolationCollection = vec![Violation::new("rule-a", "#/x").with_value("v")]
            .into_iter()
            .collect();
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["rule-a"]["violations"][0]["location"], "#/x");
        assert_eq!(json["rule-a"]["violations"][0]["value"], "v");
        assert!(json["rule-a"]["violations"][0].get("data").is_none());
    }
}

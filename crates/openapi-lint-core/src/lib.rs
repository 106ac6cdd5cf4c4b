//! # openapi-lint-core
//!
//! Core framework for checking OpenAPI 3 documents against a style policy.
//!
//! This crate provides the foundational traits and types for building
//! policy-based API linters. It includes:
//!
//! - [`Rule`] trait for specification-wide and per-operation checks
//! - [`RuleCollection`] for named, enumerable sources of rules
//! - [`PolicyConfig`] and [`Policy`] for resolving and running a rule set
//! - [`Violation`] and [`ViolationCollection`] for representing findings
//!
//! ## Example
//!
//! ```ignore
//! use openapi_lint_core::{load_spec, PolicyConfig, Severity};
//!
//! let config = PolicyConfig::from_file("policy.json".as_ref())?;
//! let policy = config.policy(&standard_rules(), &[])?;
//!
//! let doc = load_spec("openapi.yaml", true)?;
//! let violations = policy.validate_spec(&doc, "", Severity::Warning)?;
//! for (rule, locations) in violations.locations_by_rule() {
//!     println!("{rule}: {}", locations.len());
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod collection;
mod config;
mod context;
mod document;
mod loader;
mod policy;
mod rule;
mod traversal;
mod types;
mod violation;

/// Utility modules for rule implementations.
pub mod utils;

pub use collection::{RuleCollection, RuleConstructor, RuleTable};
pub use config::{ConfigError, PolicyConfig, RuleConfig};
pub use context::{OperationContext, SpecContext};
pub use document::{
    Components, Document, Info, Method, OpenApi, Operation, Parameter, PathItem, ReferenceOr,
    RefSite, Schema, Tag, COMPONENT_SCHEMA_PREFIX,
};
pub use loader::{load_spec, LoadError};
pub use policy::{Policy, PolicyError, PolicyRule, RuleCollision};
pub use rule::{Rule, RuleBox, RuleError};
pub use traversal::walk_operations;
pub use types::{ParseError, Scope, Severity};
pub use violation::{Violation, ViolationCollection, ViolationError, ViolationSet};

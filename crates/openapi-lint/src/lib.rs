//! # openapi-lint
//!
//! Policy-based style linter for OpenAPI 3 documents.
//!
//! This is the main facade crate that re-exports the core engine and the
//! built-in rule collections.
//!
//! ## Programmatic Usage
//!
//! ```rust,ignore
//! use openapi_lint::{builtin_policy, expand_inputs, PolicyConfig};
//!
//! let config = PolicyConfig::from_file("policy.json".as_ref())?;
//! let policy = builtin_policy(&config)?;
//!
//! let files = expand_inputs("specs/")?;
//! let violations = policy.validate_spec_files("warning", &files)?;
//! for (rule, count) in violations.counts_by_rule() {
//!     println!("{rule}: {count}");
//! }
//! ```

#![forbid(unsafe_code)]

// Re-export core types and traits
pub use openapi_lint_core::*;

/// Built-in rule collections.
pub mod rules {
    pub use openapi_lint_rules::*;
}

mod runner;

pub use runner::{
    builtin_policy, default_policy_config, expand_inputs, lint, RunnerError, POLICY_FILE_NAMES,
};

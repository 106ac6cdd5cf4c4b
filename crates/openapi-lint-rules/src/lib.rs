//! # openapi-lint-rules
//!
//! Built-in rule collections for openapi-lint.
//!
//! ## Standard collection (`standard`)
//!
//! | Name | Scope | Description |
//! |------|-------|-------------|
//! | `operation-operationid-exist` | operation | Every operation has an `operationId` |
//! | `operation-operationid-style-{case}` | operation | `operationId` follows a casing |
//! | `operation-summary-exist` | operation | Every operation has a summary |
//! | `operation-summary-style-first-uppercase` | operation | Summaries start uppercase |
//! | `parameter-path-style-{case}` | operation | Path parameter names follow a casing |
//! | `schema-enum-style-{case}` | specification | String enum values follow a casing |
//! | `schema-object-properties-exist` | specification | Object schemas declare properties |
//! | `tag-style-first-uppercase` | specification | Tag names start uppercase |
//! | `datatype-int-format-standard-exist` | specification | Integers use `int32`/`int64` |
//! | `schema-has-reference` | specification | Every component schema is referenced |
//! | `schema-reference-has-schema` | specification | Every schema `$ref` resolves |
//!
//! `{case}` is one of `camelcase`, `kebabcase`, `pascalcase`, `snakecase`.
//!
//! ## Extension collections
//!
//! - `tag-groups`: `operation-tag-in-tag-group`, `tag-group-tag-defined`
//!
//! ## Usage
//!
//! ```ignore
//! use openapi_lint_core::PolicyConfig;
//! use openapi_lint_rules::{standard_rules, tag_group_rules};
//!
//! let config = PolicyConfig::new("acme")
//!     .include_standard_rules(true)
//!     .rule("operation-summary-exist", "warning")
//!     .rule("operation-tag-in-tag-group", "error");
//! let policy = config.policy(&standard_rules(), &[&tag_group_rules()])?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod extensions;

mod int_format;
mod operation_id;
mod path_parameter;
mod schema_enum;
mod schema_properties;
mod schema_reference;
mod schema_walk;
mod standard;
mod summary;
mod tag_style;

pub use extensions::tag_group_rules;
pub use int_format::IntFormatStandard;
pub use operation_id::{OperationIdExist, OperationIdStyle};
pub use path_parameter::PathParameterStyle;
pub use schema_enum::SchemaEnumStyle;
pub use schema_properties::SchemaObjectPropertiesExist;
pub use schema_reference::{SchemaHasReference, SchemaReferenceHasSchema};
pub use standard::{standard_rule_names, standard_rules};
pub use summary::{SummaryExist, SummaryFirstUppercase};
pub use tag_style::TagFirstUppercase;

/// Re-export core types for convenience.
pub use openapi_lint_core::{Rule, RuleCollection, Severity, Violation};

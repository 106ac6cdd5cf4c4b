//! Extension collections for vendor-specific conventions.

pub mod tag_groups;

pub use tag_groups::{tag_group_rules, OperationTagInTagGroup, TagGroupTagDefined, COLLECTION};

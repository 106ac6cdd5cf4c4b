//! Utility functions for rule implementations.

pub mod case;
pub mod pointer;

// Re-export commonly used utilities for rule implementations
#[doc(inline)]
pub use case::{is_kebab_case, starts_uppercase, CaseStyle};
#[doc(inline)]
pub use pointer::{append, build, escape, operation_pointer};

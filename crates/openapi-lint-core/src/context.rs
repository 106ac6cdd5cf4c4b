//! Context types for rule execution.

use crate::document::{Document, Method, Operation, PathItem};
use crate::utils::pointer;

/// Context provided to specification-scoped rules.
#[derive(Debug, Clone, Copy)]
pub struct SpecContext<'a> {
    /// The document being checked.
    pub document: &'a Document,
    /// Prefix for every reported location (file name, or empty).
    pub pointer_prefix: &'a str,
}

impl<'a> SpecContext<'a> {
    /// Creates a new specification context.
    #[must_use]
    pub fn new(document: &'a Document, pointer_prefix: &'a str) -> Self {
        Self {
            document,
            pointer_prefix,
        }
    }

    /// Builds a prefixed pointer from unescaped segments.
    #[must_use]
    pub fn pointer<S: AsRef<str>>(&self, segments: &[S]) -> String {
        pointer::build(self.pointer_prefix, segments)
    }
}

/// Context provided to operation-scoped rules.
#[derive(Debug, Clone)]
pub struct OperationContext<'a> {
    /// The document being checked.
    pub document: &'a Document,
    /// The operation under inspection.
    pub operation: &'a Operation,
    /// Pointer to the operation, e.g. `#/paths/~1users/get`.
    pub pointer: String,
    /// Path template the operation is defined on.
    pub path: &'a str,
    /// Path item holding the operation and any shared parameters.
    pub path_item: &'a PathItem,
    /// HTTP method of the operation.
    pub method: Method,
}

impl OperationContext<'_> {
    /// Builds a pointer below the operation from unescaped segments.
    #[must_use]
    pub fn pointer_to<S: AsRef<str>>(&self, segments: &[S]) -> String {
        pointer::append(&self.pointer, segments)
    }

    /// Builds a pointer below the enclosing path item, e.g.
    /// `#/paths/~1users/parameters/0/name`.
    #[must_use]
    pub fn path_pointer_to<S: AsRef<str>>(&self, segments: &[S]) -> String {
        let path_pointer = match self.pointer.rfind('/') {
            Some(end) => &self.pointer[..end],
            None => self.pointer.as_str(),
        };
        pointer::append(path_pointer, segments)
    }
}

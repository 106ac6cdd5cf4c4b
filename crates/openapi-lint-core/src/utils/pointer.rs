//! JSON Pointer (RFC 6901) helpers for violation locations.
//!
//! Locations take the form `{prefix}#/{segment}/{segment}`, where the
//! prefix is empty for single-document runs and the file name otherwise.

use crate::document::Method;

/// Escapes one pointer segment: `~` becomes `~0`, `/` becomes `~1`.
///
/// # Example
///
/// ```ignore
/// assert_eq!(escape("/users/{id}"), "~1users~1{id}");
/// ```
#[must_use]
pub fn escape(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

/// Reverses [`escape`].
#[must_use]
pub fn unescape(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}

/// Builds a pointer from a prefix and unescaped segments.
#[must_use]
pub fn build<S: AsRef<str>>(prefix: &str, segments: &[S]) -> String {
    append(&format!("{prefix}#"), segments)
}

/// Appends unescaped segments to an existing pointer.
#[must_use]
pub fn append<S: AsRef<str>>(pointer: &str, segments: &[S]) -> String {
    let mut out = pointer.to_string();
    for segment in segments {
        out.push('/');
        out.push_str(&escape(segment.as_ref()));
    }
    out
}

/// Pointer to an operation: `{prefix}#/paths/{escaped-path}/{method}`.
#[must_use]
pub fn operation_pointer(prefix: &str, path: &str, method: Method) -> String {
    build(prefix, &["paths", path, method.as_str()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_tilde_before_slash() {
        assert_eq!(escape("a~/b"), "a~0~1b");
        assert_eq!(unescape("a~0~1b"), "a~/b");
        assert_eq!(unescape("~01"), "~1");
    }

    #[test]
    fn builds_prefixed_pointers() {
        assert_eq!(build("", &["components", "schemas", "Pet"]), "#/components/schemas/Pet");
        assert_eq!(build("pets.yaml", &["tags", "0"]), "pets.yaml#/tags/0");
    }

    #[test]
    fn operation_pointer_escapes_path() {
        assert_eq!(
            operation_pointer("", "/users/{userId}", Method::Get),
            "#/paths/~1users~1{userId}/get"
        );
        assert_eq!(
            append(&operation_pointer("a.yaml", "/x", Method::Post), &["operationId"]),
            "a.yaml#/paths/~1x/post/operationId"
        );
    }
}

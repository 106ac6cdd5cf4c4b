//! Document walk visiting every defined HTTP operation.

use crate::context::OperationContext;
use crate::document::Document;
use crate::utils::pointer::operation_pointer;

/// Visits every defined operation under every path.
///
/// Paths are visited in sorted order and methods in
/// [`Method::ALL`](crate::Method::ALL) order. Methods without an operation
/// are skipped. Each context carries the operation pointer
/// `{prefix}#/paths/{escaped-path}/{method}`.
pub fn walk_operations<'a>(
    document: &'a Document,
    prefix: &'a str,
) -> impl Iterator<Item = OperationContext<'a>> + 'a {
    document.paths().flat_map(move |(path, item)| {
        item.operations()
            .map(move |(method, operation)| OperationContext {
                document,
                operation,
                pointer: operation_pointer(prefix, path, method),
                path,
                path_item: item,
                method,
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Method;
    use serde_json::json;

    #[test]
    fn visits_all_methods_and_skips_undefined() {
        let doc = Document::from_value(json!({
            "paths": {
                "/all": {
                    "get": {}, "put": {}, "post": {}, "patch": {}, "delete": {},
                    "head": {}, "options": {}, "trace": {}, "connect": {}
                },
                "/none": {"summary": "no operations here"}
            }
        }))
        .unwrap();

        let methods: Vec<Method> = walk_operations(&doc, "").map(|ctx| ctx.method).collect();
        assert_eq!(methods, Method::ALL.to_vec());
    }

    #[test]
    fn operation_pointers_escape_paths_and_carry_prefix() {
        let doc = Document::from_value(json!({
            "paths": {
                "/users/{userId}": {"get": {"operationId": "getUser"}},
                "/a~b": {"delete": {}}
            }
        }))
        .unwrap();

        let visits: Vec<(String, &str)> = walk_operations(&doc, "api.yaml")
            .map(|ctx| (ctx.pointer.clone(), ctx.path))
            .collect();
        assert_eq!(
            visits,
            vec![
                ("api.yaml#/paths/~1a~0b/delete".to_string(), "/a~b"),
                ("api.yaml#/paths/~1users~1{userId}/get".to_string(), "/users/{userId}"),
            ]
        );
    }

    #[test]
    fn contexts_expose_the_enclosing_path_item() {
        let doc = Document::from_value(json!({
            "paths": {
                "/users/{userId}": {
                    "parameters": [{"name": "userId", "in": "path"}],
                    "get": {}
                }
            }
        }))
        .unwrap();

        let ctx = walk_operations(&doc, "api.yaml").next().unwrap();
        assert_eq!(ctx.path_item.parameters.len(), 1);
        assert_eq!(
            ctx.path_pointer_to(&["parameters", "0", "name"]),
            "api.yaml#/paths/~1users~1{userId}/parameters/0/name"
        );
    }

    #[test]
    fn empty_document_has_no_operations() {
        let doc = Document::from_value(json!({})).unwrap();
        assert_eq!(walk_operations(&doc, "").count(), 0);
    }
}

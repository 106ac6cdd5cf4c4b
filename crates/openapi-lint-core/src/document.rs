//! Read-only OpenAPI 3 document model.
//!
//! Only the parts of the grammar that rules inspect are typed. Everything
//! else stays reachable through the raw JSON tree kept alongside.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// `$ref` prefix addressing component schemas.
pub const COMPONENT_SCHEMA_PREFIX: &str = "#/components/schemas/";

const COMPONENT_PARAMETER_PREFIX: &str = "#/components/parameters/";

/// Accepts unquoted YAML scalars such as `version: 1.0` as strings.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Decodes the Paths Object, leaving out `x-` extension members.
fn path_items<'de, D>(deserializer: D) -> Result<BTreeMap<String, PathItem>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
    raw.into_iter()
        .filter(|(key, _)| !key.starts_with("x-"))
        .map(|(key, value)| {
            PathItem::deserialize(value)
                .map(|item| (key, item))
                .map_err(serde::de::Error::custom)
        })
        .collect()
}

/// Either a `$ref` or an inline item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReferenceOr<T> {
    /// A JSON reference.
    Reference {
        /// Reference target, e.g. `#/components/schemas/Pet`.
        #[serde(rename = "$ref")]
        reference: String,
    },
    /// An inline item.
    Item(T),
}

impl<T> ReferenceOr<T> {
    /// Returns the inline item, if this is not a reference.
    #[must_use]
    pub fn as_item(&self) -> Option<&T> {
        match self {
            Self::Item(item) => Some(item),
            Self::Reference { .. } => None,
        }
    }

    /// Returns the reference target, if this is a reference.
    #[must_use]
    pub fn as_reference(&self) -> Option<&str> {
        match self {
            Self::Reference { reference } => Some(reference),
            Self::Item(_) => None,
        }
    }
}

/// Document root.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenApi {
    /// OpenAPI version string (e.g. "3.0.3").
    #[serde(default, deserialize_with = "lenient_string")]
    pub openapi: String,
    /// API metadata.
    #[serde(default)]
    pub info: Info,
    /// Path templates mapped to their path items. `x-` extension keys are
    /// skipped.
    #[serde(default, deserialize_with = "path_items")]
    pub paths: BTreeMap<String, PathItem>,
    /// Reusable components.
    #[serde(default)]
    pub components: Option<Components>,
    /// Declared tags, in document order.
    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// API metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Info {
    /// API title.
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    /// API version.
    #[serde(default, deserialize_with = "lenient_string")]
    pub version: String,
    /// API description.
    #[serde(default)]
    pub description: Option<String>,
}

/// A declared tag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag name.
    pub name: String,
    /// Tag description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Reusable components.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Components {
    /// Named schemas.
    #[serde(default)]
    pub schemas: BTreeMap<String, ReferenceOr<Schema>>,
    /// Named parameters.
    #[serde(default)]
    pub parameters: BTreeMap<String, ReferenceOr<Parameter>>,
}

/// HTTP method of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Method {
    /// GET
    Get,
    /// PUT
    Put,
    /// POST
    Post,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
    /// HEAD
    Head,
    /// OPTIONS
    Options,
    /// TRACE
    Trace,
    /// CONNECT
    Connect,
}

impl Method {
    /// Every method, in traversal order.
    pub const ALL: [Self; 9] = [
        Self::Get,
        Self::Put,
        Self::Post,
        Self::Patch,
        Self::Delete,
        Self::Head,
        Self::Options,
        Self::Trace,
        Self::Connect,
    ];

    /// Lowercase name as used for path item members and JSON Pointers.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Put => "put",
            Self::Post => "post",
            Self::Patch => "patch",
            Self::Delete => "delete",
            Self::Head => "head",
            Self::Options => "options",
            Self::Trace => "trace",
            Self::Connect => "connect",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_ascii_uppercase())
    }
}

/// Operations available on a single path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathItem {
    /// Summary shared by all operations.
    #[serde(default)]
    pub summary: Option<String>,
    /// Description shared by all operations.
    #[serde(default)]
    pub description: Option<String>,
    /// GET operation.
    #[serde(default)]
    pub get: Option<Operation>,
    /// PUT operation.
    #[serde(default)]
    pub put: Option<Operation>,
    /// POST operation.
    #[serde(default)]
    pub post: Option<Operation>,
    /// PATCH operation.
    #[serde(default)]
    pub patch: Option<Operation>,
    /// DELETE operation.
    #[serde(default)]
    pub delete: Option<Operation>,
    /// HEAD operation.
    #[serde(default)]
    pub head: Option<Operation>,
    /// OPTIONS operation.
    #[serde(default)]
    pub options: Option<Operation>,
    /// TRACE operation.
    #[serde(default)]
    pub trace: Option<Operation>,
    /// CONNECT operation.
    #[serde(default)]
    pub connect: Option<Operation>,
    /// Parameters shared by all operations.
    #[serde(default)]
    pub parameters: Vec<ReferenceOr<Parameter>>,
}

impl PathItem {
    /// Returns the operation defined for `method`, if any.
    #[must_use]
    pub fn operation(&self, method: Method) -> Option<&Operation> {
        match method {
            Method::Get => self.get.as_ref(),
            Method::Put => self.put.as_ref(),
            Method::Post => self.post.as_ref(),
            Method::Patch => self.patch.as_ref(),
            Method::Delete => self.delete.as_ref(),
            Method::Head => self.head.as_ref(),
            Method::Options => self.options.as_ref(),
            Method::Trace => self.trace.as_ref(),
            Method::Connect => self.connect.as_ref(),
        }
    }

    /// Iterates over defined operations only, in [`Method::ALL`] order.
    pub fn operations(&self) -> impl Iterator<Item = (Method, &Operation)> {
        Method::ALL
            .into_iter()
            .filter_map(move |m| self.operation(m).map(|op| (m, op)))
    }
}

/// A single API operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Unique operation identifier.
    #[serde(default)]
    pub operation_id: Option<String>,
    /// Short summary.
    #[serde(default)]
    pub summary: Option<String>,
    /// Longer description.
    #[serde(default)]
    pub description: Option<String>,
    /// Tags used for grouping.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Operation-level parameters.
    #[serde(default)]
    pub parameters: Vec<ReferenceOr<Parameter>>,
    /// Deprecation flag.
    #[serde(default)]
    pub deprecated: bool,
}

/// A parameter definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name.
    #[serde(default)]
    pub name: String,
    /// Location: query, header, path, or cookie.
    #[serde(rename = "in", default)]
    pub location: String,
    /// Required flag.
    #[serde(default)]
    pub required: bool,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Value schema.
    #[serde(default)]
    pub schema: Option<ReferenceOr<Schema>>,
}

/// A schema object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// Type, a string in 3.0 and a string or array in 3.1.
    #[serde(rename = "type", default)]
    pub schema_type: Option<Value>,
    /// Format modifier (e.g. `int64`).
    #[serde(default)]
    pub format: Option<String>,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Allowed values.
    #[serde(rename = "enum", default)]
    pub enum_values: Vec<Value>,
    /// Object properties.
    #[serde(default)]
    pub properties: BTreeMap<String, ReferenceOr<Schema>>,
    /// Array item schema.
    #[serde(default)]
    pub items: Option<Box<ReferenceOr<Schema>>>,
    /// `additionalProperties`, either a boolean or a schema.
    #[serde(default)]
    pub additional_properties: Option<Value>,
    /// `allOf` composition.
    #[serde(default)]
    pub all_of: Vec<ReferenceOr<Schema>>,
    /// `oneOf` composition.
    #[serde(default)]
    pub one_of: Vec<ReferenceOr<Schema>>,
    /// `anyOf` composition.
    #[serde(default)]
    pub any_of: Vec<ReferenceOr<Schema>>,
}

impl Schema {
    /// Returns true if the schema declares the given type.
    #[must_use]
    pub fn is_type(&self, name: &str) -> bool {
        match &self.schema_type {
            Some(Value::String(t)) => t == name,
            Some(Value::Array(types)) => types.iter().any(|t| t.as_str() == Some(name)),
            _ => false,
        }
    }

    /// Returns true if the schema uses `allOf`, `oneOf` or `anyOf`.
    #[must_use]
    pub fn is_composed(&self) -> bool {
        !self.all_of.is_empty() || !self.one_of.is_empty() || !self.any_of.is_empty()
    }

    /// Iterates over directly nested schemas with their pointer segments
    /// relative to this schema.
    pub fn children(&self) -> impl Iterator<Item = (Vec<String>, &ReferenceOr<Schema>)> {
        let properties = self
            .properties
            .iter()
            .map(|(name, s)| (vec!["properties".to_string(), name.clone()], s));
        let items = self
            .items
            .iter()
            .map(|s| (vec!["items".to_string()], &**s));
        let compositions = [
            ("allOf", &self.all_of),
            ("oneOf", &self.one_of),
            ("anyOf", &self.any_of),
        ]
        .into_iter()
        .flat_map(|(key, list)| {
            list.iter()
                .enumerate()
                .map(move |(i, s)| (vec![key.to_string(), i.to_string()], s))
        });
        properties.chain(items).chain(compositions)
    }
}

/// A `$ref` occurrence found anywhere in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefSite {
    /// Unescaped pointer segments leading to the `$ref` member itself.
    pub segments: Vec<String>,
    /// Reference target.
    pub target: String,
}

/// A parsed OpenAPI document, read-only during validation.
///
/// Bundles the typed model with the raw JSON tree it was decoded from.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    raw: Value,
    spec: OpenApi,
}

impl Document {
    /// Decodes a document from a raw JSON tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the tree does not fit the typed model.
    pub fn from_value(raw: Value) -> Result<Self, serde_json::Error> {
        let spec = OpenApi::deserialize(&raw)?;
        Ok(Self { raw, spec })
    }

    /// Builds a document from a typed model.
    ///
    /// # Errors
    ///
    /// Returns an error if the model cannot be serialized.
    pub fn from_spec(spec: OpenApi) -> Result<Self, serde_json::Error> {
        let raw = serde_json::to_value(&spec)?;
        Ok(Self { raw, spec })
    }

    /// Typed model.
    #[must_use]
    pub fn spec(&self) -> &OpenApi {
        &self.spec
    }

    /// Raw JSON tree.
    #[must_use]
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Returns a root-level vendor extension (`x-...`).
    #[must_use]
    pub fn extension(&self, name: &str) -> Option<&Value> {
        if name.starts_with("x-") {
            self.raw.get(name)
        } else {
            None
        }
    }

    /// Iterates over `(path, item)` pairs in path order.
    pub fn paths(&self) -> impl Iterator<Item = (&str, &PathItem)> {
        self.spec.paths.iter().map(|(p, item)| (p.as_str(), item))
    }

    /// Iterates over component schemas in name order.
    pub fn schemas(&self) -> impl Iterator<Item = (&str, &ReferenceOr<Schema>)> {
        self.spec
            .components
            .iter()
            .flat_map(|c| c.schemas.iter())
            .map(|(name, s)| (name.as_str(), s))
    }

    /// Returns true if a component schema with this name exists.
    #[must_use]
    pub fn has_schema(&self, name: &str) -> bool {
        self.spec
            .components
            .as_ref()
            .is_some_and(|c| c.schemas.contains_key(name))
    }

    /// Resolves a parameter, following one level of
    /// `#/components/parameters/...` reference.
    #[must_use]
    pub fn resolve_parameter<'a>(&'a self, param: &'a ReferenceOr<Parameter>) -> Option<&'a Parameter> {
        match param {
            ReferenceOr::Item(p) => Some(p),
            ReferenceOr::Reference { reference } => {
                let name = reference.strip_prefix(COMPONENT_PARAMETER_PREFIX)?;
                self.spec
                    .components
                    .as_ref()?
                    .parameters
                    .get(name)?
                    .as_item()
            }
        }
    }

    /// Collects every `$ref` in the document, in document order.
    #[must_use]
    pub fn references(&self) -> Vec<RefSite> {
        let mut sites = Vec::new();
        let mut segments = Vec::new();
        collect_refs(&self.raw, &mut segments, &mut sites);
        sites
    }
}

fn collect_refs(value: &Value, segments: &mut Vec<String>, sites: &mut Vec<RefSite>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                segments.push(key.clone());
                if key == "$ref" {
                    if let Value::String(target) = child {
                        sites.push(RefSite {
                            segments: segments.clone(),
                            target: target.clone(),
                        });
                    }
                } else {
                    collect_refs(child, segments, sites);
                }
                segments.pop();
            }
        }
        Value::Array(items) => {
            for (i, child) in items.iter().enumerate() {
                segments.push(i.to_string());
                collect_refs(child, segments, sites);
                segments.pop();
            }
        }
        _ => {}
    }
}

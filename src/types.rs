use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::Result;
use crate::fetch::parse_content;

/// Root of a Swagger 2.0 specification.
///
/// Only the parts that take part in reference resolution are typed; every
/// other top-level key (`swagger`, `info`, `host`, ...) is kept verbatim in
/// `extra` so the document serializes back to an equivalent form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub definitions: BTreeMap<String, Model>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub paths: BTreeMap<String, PathEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Document {
    /// Parses a document from JSON or YAML text.
    pub fn parse(content: &str) -> Result<Self> {
        let tree = parse_content(content)?;
        Ok(serde_json::from_value(tree)?)
    }

    /// Serializes the document to its canonical JSON form.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Registers `model` under `name`, replacing any existing definition.
    pub fn add_definition(&mut self, name: impl Into<String>, model: Model) {
        self.definitions.insert(name.into(), model);
    }
}

/// Marker for `"type": "array"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrayType {
    Array,
}

/// Marker for `"type": "object"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    Object,
}

/// Marker for `"in": "body"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyLocation {
    Body,
}

// ---------------------------------------------------------------------------
// Models
// ---------------------------------------------------------------------------

/// A schema definition, as found under `definitions` or in a body parameter.
///
/// Variants are tried in declaration order when deserializing; `Object` is
/// the catch-all for any JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Model {
    Reference(RefModel),
    Array(ArrayModel),
    Object(ObjectModel),
}

impl Model {
    /// Builds a reference model pointing at `locator`.
    pub fn reference(locator: impl Into<String>) -> Self {
        Model::Reference(RefModel {
            reference: locator.into(),
            extra: Map::new(),
        })
    }

    /// Returns the locator if this is a reference model.
    pub fn as_reference(&self) -> Option<&str> {
        match self {
            Model::Reference(r) => Some(&r.reference),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefModel {
    #[serde(rename = "$ref")]
    pub reference: String,
    /// Keys written next to `$ref`, such as `description`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayModel {
    #[serde(rename = "type")]
    pub kind: ArrayType,
    pub items: Property,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectModel {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Property>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

/// A schema used inside object fields, array items, map values and
/// response bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Property {
    Reference(RefProperty),
    Array(ArrayProperty),
    Map(MapProperty),
    /// Primitives and inline objects. Never touched by resolution.
    Other(Map<String, Value>),
}

impl Property {
    /// Builds a reference property pointing at `locator`.
    pub fn reference(locator: impl Into<String>) -> Self {
        Property::Reference(RefProperty {
            reference: locator.into(),
            extra: Map::new(),
        })
    }

    /// Builds an array property whose items are `items`.
    pub fn array(items: Property) -> Self {
        Property::Array(ArrayProperty {
            kind: ArrayType::Array,
            items: Box::new(items),
            extra: Map::new(),
        })
    }

    /// Builds a map property whose values are `values`.
    pub fn map(values: Property) -> Self {
        Property::Map(MapProperty {
            kind: Some(ObjectType::Object),
            additional_properties: Box::new(values),
            extra: Map::new(),
        })
    }

    /// Builds a primitive property of the given JSON schema type.
    pub fn primitive(type_name: &str) -> Self {
        let mut fields = Map::new();
        fields.insert("type".to_string(), Value::String(type_name.to_string()));
        Property::Other(fields)
    }

    /// Returns the locator if this is a reference property.
    pub fn as_reference(&self) -> Option<&str> {
        match self {
            Property::Reference(r) => Some(&r.reference),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefProperty {
    #[serde(rename = "$ref")]
    pub reference: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayProperty {
    #[serde(rename = "type")]
    pub kind: ArrayType,
    pub items: Box<Property>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapProperty {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ObjectType>,
    #[serde(rename = "additionalProperties")]
    pub additional_properties: Box<Property>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ---------------------------------------------------------------------------
// Paths and operations
// ---------------------------------------------------------------------------

/// HTTP verbs that can carry an operation in a path entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
}

#[allow(clippy::should_implement_trait)]
impl HttpMethod {
    /// Every verb, in the order operations are visited.
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Put,
        HttpMethod::Post,
        HttpMethod::Delete,
        HttpMethod::Options,
        HttpMethod::Head,
        HttpMethod::Patch,
    ];

    /// Returns the lowercase key used for this verb in a path entry.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Patch => "patch",
        }
    }

    /// Parses a verb case-insensitively, returning `None` for unknown verbs.
    pub fn from_str(s: &str) -> Option<HttpMethod> {
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
    }
}

/// The operations available on a single path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PathEntry {
    pub fn operation(&self, method: HttpMethod) -> Option<&Operation> {
        match method {
            HttpMethod::Get => self.get.as_ref(),
            HttpMethod::Put => self.put.as_ref(),
            HttpMethod::Post => self.post.as_ref(),
            HttpMethod::Delete => self.delete.as_ref(),
            HttpMethod::Options => self.options.as_ref(),
            HttpMethod::Head => self.head.as_ref(),
            HttpMethod::Patch => self.patch.as_ref(),
        }
    }

    pub fn operation_mut(&mut self, method: HttpMethod) -> Option<&mut Operation> {
        match method {
            HttpMethod::Get => self.get.as_mut(),
            HttpMethod::Put => self.put.as_mut(),
            HttpMethod::Post => self.post.as_mut(),
            HttpMethod::Delete => self.delete.as_mut(),
            HttpMethod::Options => self.options.as_mut(),
            HttpMethod::Head => self.head.as_mut(),
            HttpMethod::Patch => self.patch.as_mut(),
        }
    }

    /// Sets the operation for `method`, returning the previous one.
    pub fn set_operation(&mut self, method: HttpMethod, op: Operation) -> Option<Operation> {
        let slot = match method {
            HttpMethod::Get => &mut self.get,
            HttpMethod::Put => &mut self.put,
            HttpMethod::Post => &mut self.post,
            HttpMethod::Delete => &mut self.delete,
            HttpMethod::Options => &mut self.options,
            HttpMethod::Head => &mut self.head,
            HttpMethod::Patch => &mut self.patch,
        };
        slot.replace(op)
    }

    /// Returns the defined operations in verb order.
    pub fn operations(&self) -> Vec<(HttpMethod, &Operation)> {
        HttpMethod::ALL
            .into_iter()
            .filter_map(|m| self.operation(m).map(|op| (m, op)))
            .collect()
    }
}

/// A single API operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub responses: BTreeMap<String, Response>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Property>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Parameter {
    Reference(RefParameter),
    Body(BodyParameter),
    /// Query, header, path and formData parameters.
    Other(Map<String, Value>),
}

impl Parameter {
    /// Builds a reference parameter pointing at `locator`.
    pub fn reference(locator: impl Into<String>) -> Self {
        Parameter::Reference(RefParameter {
            reference: locator.into(),
            extra: Map::new(),
        })
    }

    /// Builds a body parameter named `name` with the given schema.
    pub fn body(name: impl Into<String>, schema: Model) -> Self {
        Parameter::Body(BodyParameter {
            location: BodyLocation::Body,
            name: Some(name.into()),
            schema,
            extra: Map::new(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefParameter {
    #[serde(rename = "$ref")]
    pub reference: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RefParameter {
    /// The short name of the referenced parameter: the final `/` segment of
    /// the locator's fragment (or of the whole locator when it has no `#`).
    pub fn simple_ref(&self) -> &str {
        let fragment = match self.reference.rfind('#') {
            Some(idx) => &self.reference[idx + 1..],
            None => &self.reference,
        };
        match fragment.rfind('/') {
            Some(idx) => &fragment[idx + 1..],
            None => fragment,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyParameter {
    #[serde(rename = "in")]
    pub location: BodyLocation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub schema: Model,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ---------------------------------------------------------------------------
// Authorization
// ---------------------------------------------------------------------------

/// Where an authorization value is applied on an outgoing fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorizationKind {
    Header,
    Query,
}

/// An opaque credential forwarded verbatim to the remote fetcher.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthorizationValue {
    pub key_name: String,
    pub value: String,
    #[serde(rename = "type")]
    pub kind: AuthorizationKind,
}

impl AuthorizationValue {
    pub fn header(key_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key_name: key_name.into(),
            value: value.into(),
            kind: AuthorizationKind::Header,
        }
    }

    pub fn query(key_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key_name: key_name.into(),
            value: value.into(),
            kind: AuthorizationKind::Query,
        }
    }
}

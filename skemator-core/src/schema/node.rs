use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::json_value::with_stack;

/// Placeholder description for nodes with no prior-schema description.
pub const DEFAULT_DESCRIPTION: &str = "<none>";

/// The inferred type of a schema node, taken from the runtime kind of the input value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    Object,
    Array,
    String,
    Integer,
    Float,
    Boolean,
    Null,
}

impl SchemaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaType::Object => "object",
            SchemaType::Array => "array",
            SchemaType::String => "string",
            SchemaType::Integer => "integer",
            SchemaType::Float => "float",
            SchemaType::Boolean => "boolean",
            SchemaType::Null => "null",
        }
    }

    /// Types whose nodes carry `pattern` and `value`.
    pub fn carries_value(&self) -> bool {
        matches!(
            self,
            SchemaType::String | SchemaType::Integer | SchemaType::Float
        )
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata fields attached to every node, whatever its type.
///
/// Values inherited from a prior schema are kept verbatim, so the fields are
/// plain JSON values rather than typed strings and booleans.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub description: Value,
    pub additional_properties: Value,
    pub required: Value,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            description: Value::String(DEFAULT_DESCRIPTION.to_string()),
            additional_properties: Value::Bool(false),
            required: Value::Bool(true),
        }
    }
}

impl Metadata {
    /// Baseline metadata overridden by whichever of the three keys the prior
    /// node defines. A prior that is not a JSON object contributes nothing.
    pub fn from_prior(prior: Option<&Value>) -> Self {
        let mut meta = Self::default();
        let Some(prior) = prior.and_then(Value::as_object) else {
            return meta;
        };
        if let Some(v) = prior.get("description") {
            meta.description = v.clone();
        }
        if let Some(v) = prior.get("additionalProperties") {
            meta.additional_properties = v.clone();
        }
        if let Some(v) = prior.get("required") {
            meta.required = v.clone();
        }
        meta
    }
}

/// Child nodes of a container node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Properties {
    /// One node per key of an object, in input key order.
    Object(IndexMap<String, SchemaNode>),
    /// One node per element of an array, in element order.
    Array(Vec<SchemaNode>),
}

impl Properties {
    pub fn nodes(&self) -> Box<dyn Iterator<Item = &SchemaNode> + '_> {
        match self {
            Properties::Object(map) => Box::new(map.values()),
            Properties::Array(items) => Box::new(items.iter()),
        }
    }
}

/// The schema skeleton produced for one JSON value.
///
/// Serializes with the fields in the order `description`, `additionalProperties`,
/// `required`, `type`, `properties`, `pattern`, `value`, omitting the ones that
/// do not apply to the node's type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaNode {
    #[serde(flatten)]
    pub meta: Metadata,
    #[serde(rename = "type")]
    pub kind: SchemaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl SchemaNode {
    /// A node with no children and no literal, as used for null, boolean and container types.
    pub fn bare(meta: Metadata, kind: SchemaType) -> Self {
        Self {
            meta,
            kind,
            properties: None,
            pattern: None,
            value: None,
        }
    }

    /// A string, integer or float node holding the literal it was inferred from.
    pub fn scalar(meta: Metadata, kind: SchemaType, value: Value) -> Self {
        debug_assert!(kind.carries_value(), "{} nodes carry no literal", kind);
        Self {
            meta,
            kind,
            properties: None,
            pattern: Some(String::new()),
            value: Some(value),
        }
    }

    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = Some(properties);
        self
    }

    /// Child node for `key` when this is an object node.
    pub fn property(&self, key: &str) -> Option<&SchemaNode> {
        match &self.properties {
            Some(Properties::Object(map)) => map.get(key),
            _ => None,
        }
    }

    /// Element nodes when this is an array node that was expanded.
    pub fn items(&self) -> Option<&[SchemaNode]> {
        match &self.properties {
            Some(Properties::Array(items)) => Some(items),
            _ => None,
        }
    }

    /// Number of nodes in the tree rooted here, including this one.
    pub fn node_count(&self) -> usize {
        with_stack(|| {
            1 + self
                .properties
                .iter()
                .flat_map(Properties::nodes)
                .map(SchemaNode::node_count)
                .sum::<usize>()
        })
    }

    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

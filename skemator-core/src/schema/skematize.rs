use indexmap::IndexMap;
use serde_json::Value;

use super::core::SkemaConfig;
use super::node::{Metadata, Properties, SchemaNode, SchemaType};
use crate::error::{Result, SkemaError};
use crate::json_value::{with_stack, JsonView, ValueKind};
use crate::{debug, debug_verbose};

/// Build the schema node for `value`, taking metadata defaults from `prior`.
///
/// The node's type always follows `value`; `prior` only seeds `description`,
/// `additionalProperties` and `required`. Object children are matched against
/// `prior["properties"][key]`, array elements never see a prior.
///
/// Recursion follows the nesting of `value`; the stack is grown on the heap
/// as needed, so depth is bounded by memory rather than thread stack size.
#[cfg_attr(feature = "trace", tracing::instrument(level = "trace", skip_all))]
pub fn skematize<V: JsonView>(
    value: &V,
    prior: Option<&Value>,
    config: &SkemaConfig,
) -> Result<SchemaNode> {
    with_stack(|| skematize_node(value, prior, config))
}

fn skematize_node<V: JsonView>(
    value: &V,
    prior: Option<&Value>,
    config: &SkemaConfig,
) -> Result<SchemaNode> {
    let meta = Metadata::from_prior(prior);
    let kind = value.kind();
    debug_verbose!(config, "Skematizing {:?} (prior: {})", kind, prior.is_some());

    match kind {
        ValueKind::Null => Ok(SchemaNode::bare(meta, SchemaType::Null)),
        ValueKind::Boolean => Ok(SchemaNode::bare(meta, SchemaType::Boolean)),
        ValueKind::Integer => skematize_scalar(value, meta, SchemaType::Integer),
        ValueKind::Float => skematize_scalar(value, meta, SchemaType::Float),
        ValueKind::String => skematize_scalar(value, meta, SchemaType::String),
        ValueKind::Array => skematize_array(value, meta, config),
        ValueKind::Object => skematize_object(value, meta, prior, config),
        ValueKind::Unrecognized(what) => Err(SkemaError::UnrecognizedType(what)),
    }
}

fn skematize_scalar<V: JsonView>(value: &V, meta: Metadata, kind: SchemaType) -> Result<SchemaNode> {
    let literal = value
        .literal()
        .ok_or_else(|| SkemaError::UnrecognizedType(format!("{} without a literal", kind)))?;
    Ok(SchemaNode::scalar(meta, kind, literal))
}

fn skematize_object<V: JsonView>(
    value: &V,
    meta: Metadata,
    prior: Option<&Value>,
    config: &SkemaConfig,
) -> Result<SchemaNode> {
    let prior_props = prior
        .and_then(|p| p.get("properties"))
        .and_then(Value::as_object);

    let mut properties = IndexMap::new();
    for (key, child) in value.entries() {
        let child_prior = prior_props.and_then(|props| props.get(key));
        if prior.is_some() && child_prior.is_none() {
            debug!(config, "No prior schema for property '{}'", key);
        }
        properties.insert(key.to_string(), skematize(child, child_prior, config)?);
    }

    Ok(SchemaNode::bare(meta, SchemaType::Object).with_properties(Properties::Object(properties)))
}

fn skematize_array<V: JsonView>(value: &V, meta: Metadata, config: &SkemaConfig) -> Result<SchemaNode> {
    let node = SchemaNode::bare(meta, SchemaType::Array);

    if config.skip_scalar_lists && all_scalars(value) {
        debug!(config, "Skipping per-element schema for all-scalar array");
        return Ok(node);
    }

    let items = value
        .elements()
        .map(|element| skematize(element, None, config))
        .collect::<Result<Vec<_>>>()?;

    Ok(node.with_properties(Properties::Array(items)))
}

/// True when every element is a boolean, number or string. Vacuously true for `[]`.
fn all_scalars<V: JsonView>(value: &V) -> bool {
    value.elements().all(|element| element.kind().is_scalar())
}

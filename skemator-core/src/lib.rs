pub mod error;
pub mod input;
pub mod json_value;
pub mod schema;

use serde_json::Value;

// Re-export commonly used items
pub use error::{Result, SkemaError};
pub use input::{load_source, InputSource, SourceRole};
pub use json_value::{nesting_depth, JsonView, ValueKind};
pub use schema::{
    skematize, DebugVerbosity, SchemaNode, SchemaType, SkemaConfig, SkematizeResult,
};

/// Skematize a whole document, enforcing the configured nesting limit first.
pub fn skematize_document<V: JsonView>(
    value: &V,
    prior: Option<&Value>,
    config: &SkemaConfig,
) -> Result<SkematizeResult> {
    if let Some(max) = config.max_depth {
        let depth = nesting_depth(value);
        if depth > max {
            return Err(SkemaError::DepthExceeded { depth, max });
        }
    }

    let schema = skematize(value, prior, config)?;
    let node_count = schema.node_count();
    debug!(config, "Generated {} schema node(s)", node_count);

    Ok(SkematizeResult { schema, node_count })
}

/// Helper function to skematize JSON text, with an optional prior schema as JSON text
pub fn skematize_str(
    input: &str,
    prior: Option<&str>,
    config: &SkemaConfig,
) -> Result<SkematizeResult> {
    let value = input::parse_source(input, &InputSource::Stdin, SourceRole::Input)?;
    let prior = prior
        .map(|text| input::parse_source(text, &InputSource::Stdin, SourceRole::Schema))
        .transpose()?;
    skematize_document(&value, prior.as_ref(), config)
}

/// Create a default skematizer configuration
pub fn default_config() -> SkemaConfig {
    SkemaConfig::default()
}

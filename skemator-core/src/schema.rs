mod core;
mod node;
mod skematize;

pub use self::core::*;
pub use node::{Metadata, Properties, SchemaNode, SchemaType, DEFAULT_DESCRIPTION};
pub use skematize::skematize;

#[cfg(test)]
#[path = "tests/skematize.rs"]
mod tests;

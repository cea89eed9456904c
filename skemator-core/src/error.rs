use thiserror::Error;

use crate::input::{InputSource, SourceRole};

#[derive(Error, Debug)]
pub enum SkemaError {
    #[error("Cannot open {role} file {source_name}: {error}")]
    UnresolvableInput {
        source_name: InputSource,
        role: SourceRole,
        #[source]
        error: std::io::Error,
    },
    #[error("Could not decode {role} file {source_name}: {error}")]
    MalformedJson {
        source_name: InputSource,
        role: SourceRole,
        #[source]
        error: serde_json::Error,
    },
    #[error("Unrecognized value for {0}")]
    UnrecognizedType(String),
    #[error("Input nesting depth {depth} exceeds the maximum of {max}")]
    DepthExceeded { depth: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, SkemaError>;

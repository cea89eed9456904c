use std::fmt;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, SkemaError};

/// Where a JSON document is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    Path(PathBuf),
}

impl InputSource {
    /// `None` means standard input.
    pub fn from_arg(path: Option<PathBuf>) -> Self {
        path.map_or(InputSource::Stdin, InputSource::Path)
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Stdin => f.write_str("<stdin>"),
            InputSource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Which of the two documents a source provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceRole {
    Input,
    Schema,
}

impl fmt::Display for SourceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceRole::Input => f.write_str("input"),
            SourceRole::Schema => f.write_str("schema"),
        }
    }
}

/// Read the whole text of a source.
pub fn read_source(source: &InputSource, role: SourceRole) -> Result<String> {
    let read = match source {
        InputSource::Stdin => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map(|_| buffer)
        }
        InputSource::Path(path) => fs::read_to_string(path),
    };
    read.map_err(|error| SkemaError::UnresolvableInput {
        source_name: source.clone(),
        role,
        error,
    })
}

/// Parse source text as JSON, keeping object keys in document order.
///
/// serde_json's own recursion limit is lifted and the stack grown on demand,
/// so nesting is only bounded by [`crate::SkemaConfig::max_depth`].
pub fn parse_source(text: &str, source: &InputSource, role: SourceRole) -> Result<Value> {
    parse_unbounded(text).map_err(|error| SkemaError::MalformedJson {
        source_name: source.clone(),
        role,
        error,
    })
}

fn parse_unbounded(text: &str) -> serde_json::Result<Value> {
    let mut deserializer = serde_json::Deserializer::from_str(text);
    deserializer.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    Ok(value)
}

/// Read and parse in one step.
pub fn load_source(source: &InputSource, role: SourceRole) -> Result<Value> {
    let text = read_source(source, role)?;
    parse_source(&text, source, role)
}

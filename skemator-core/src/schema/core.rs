use serde::{Deserialize, Serialize};

use super::node::SchemaNode;

/// Nesting limit applied by the document-level entry points unless overridden.
pub const DEFAULT_MAX_DEPTH: usize = 128;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkemaConfig {
    /// Whether to omit per-element nodes for arrays made up entirely of scalars
    /// (booleans, numbers, strings). Large homogeneous data arrays otherwise
    /// expand into one near-identical node per element.
    pub skip_scalar_lists: bool,
    /// Maximum container nesting depth accepted by [`crate::skematize_document`].
    /// `None` disables the check.
    pub max_depth: Option<usize>,
    /// Enable debug output. When `true`, prints information about prior-schema
    /// lookups and array policy decisions to stderr.
    pub debug: bool,
    /// Controls the verbosity level of debug output
    pub verbosity: DebugVerbosity,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub enum DebugVerbosity {
    /// Show prior-schema misses and skipped arrays
    #[default]
    Normal,
    /// Show every visited node
    Verbose,
}

impl SkemaConfig {
    pub fn debug(&self, args: std::fmt::Arguments) {
        if self.debug {
            anstream::eprintln!("{}", args);
        }
    }

    pub fn debug_verbose(&self, args: std::fmt::Arguments) {
        if self.debug && matches!(self.verbosity, DebugVerbosity::Verbose) {
            anstream::eprintln!("{}", args);
        }
    }
}

impl Default for SkemaConfig {
    fn default() -> Self {
        Self {
            skip_scalar_lists: true,
            max_depth: Some(DEFAULT_MAX_DEPTH),
            debug: false,
            verbosity: DebugVerbosity::default(),
        }
    }
}

#[macro_export]
macro_rules! debug {
    ($cfg:expr, $($arg:tt)*) => {
        $cfg.debug(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_verbose {
    ($cfg:expr, $($arg:tt)*) => {
        $cfg.debug_verbose(format_args!($($arg)*))
    };
}

#[derive(Debug, Clone, Serialize)]
pub struct SkematizeResult {
    pub schema: SchemaNode,
    pub node_count: usize,
}

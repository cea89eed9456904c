//! Thin view layer over JSON value representations, so the skematizer can
//! dispatch on a closed set of kinds whatever tree type the caller holds.

use serde_json::{Number, Value};

/// The runtime kind of a value, as far as schema inference is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Boolean,
    Integer,
    Float,
    String,
    Array,
    Object,
    /// A value with no JSON counterpart, described for diagnostics.
    Unrecognized(String),
}

impl ValueKind {
    /// Booleans, numbers and strings. Null and containers are not scalars.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            ValueKind::Boolean | ValueKind::Integer | ValueKind::Float | ValueKind::String
        )
    }
}

/// Read-only access to a JSON-like tree.
pub trait JsonView {
    fn kind(&self) -> ValueKind;

    /// The literal for a boolean, number or string value, `None` otherwise.
    fn literal(&self) -> Option<Value>;

    /// Array elements in order; empty for non-arrays.
    fn elements(&self) -> impl Iterator<Item = &Self>;

    /// Object entries in insertion order; empty for non-objects.
    fn entries(&self) -> impl Iterator<Item = (&str, &Self)>;
}

impl JsonView for Value {
    fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Number(n) => number_kind(n),
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    fn literal(&self) -> Option<Value> {
        match self {
            Value::Bool(_) | Value::Number(_) | Value::String(_) => Some(self.clone()),
            _ => None,
        }
    }

    fn elements(&self) -> impl Iterator<Item = &Self> {
        self.as_array().into_iter().flatten()
    }

    fn entries(&self) -> impl Iterator<Item = (&str, &Self)> {
        self.as_object()
            .into_iter()
            .flatten()
            .map(|(k, v)| (k.as_str(), v))
    }
}

/// Classify by the number's literal text, so integers of any magnitude stay
/// integers. `-0` is an integer, `2.0` and `1e3` are floats.
fn number_kind(n: &Number) -> ValueKind {
    if n.to_string().contains(['.', 'e', 'E']) {
        ValueKind::Float
    } else {
        ValueKind::Integer
    }
}

/// Space left on the stack below which a recursive step moves to a fresh segment.
const RED_ZONE: usize = 64 * 1024;
/// Size of each stack segment allocated by [`with_stack`].
const STACK_SEGMENT: usize = 1024 * 1024;

/// Run one step of a tree walk, growing the stack first when it is nearly exhausted.
pub(crate) fn with_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_SEGMENT, f)
}

/// Container nesting depth: 0 for scalars and null, 1 for a flat array or
/// object, plus one per further level.
pub fn nesting_depth<V: JsonView>(value: &V) -> usize {
    with_stack(|| match value.kind() {
        ValueKind::Array => 1 + value.elements().map(nesting_depth).max().unwrap_or(0),
        ValueKind::Object => {
            1 + value
                .entries()
                .map(|(_, v)| nesting_depth(v))
                .max()
                .unwrap_or(0)
        }
        _ => 0,
    })
}

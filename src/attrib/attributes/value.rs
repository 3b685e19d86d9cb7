//! Attribute value types.
//!
//! This module defines the runtime representation of untyped attribute data:
//! agreement protocol lists, counterparty expressions, property mappings, and
//! the values of every generic projection.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// String-keyed projection of an attribute's fields.
///
/// Ordered so that renderings and serialized projections are stable.
pub type GenericMappings = BTreeMap<String, AttrValue>;

/// Runtime representation of an untyped attribute value.
///
/// Serialized untagged, so it reads and writes plain JSON. Whole numbers are
/// kept as `Integer` whenever they fit an `i64`; `Unsigned` only holds values
/// above `i64::MAX`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    String(String),
    List(Vec<AttrValue>),
    Map(BTreeMap<String, AttrValue>),
}

impl AttrValue {
    /// Check if this value represents a "truthy" state, as used by
    /// `FilterOp::Truthy`.
    ///
    /// - Null: false
    /// - Bool: the boolean value itself
    /// - numbers: true if non-zero
    /// - String, List, Map: true if non-empty
    pub fn is_truthy(&self) -> bool {
        match self {
            AttrValue::Null => false,
            AttrValue::Bool(v) => *v,
            AttrValue::Integer(v) => *v != 0,
            AttrValue::Unsigned(v) => *v != 0,
            AttrValue::Float(v) => *v != 0.0,
            AttrValue::String(v) => !v.is_empty(),
            AttrValue::List(v) => !v.is_empty(),
            AttrValue::Map(v) => !v.is_empty(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, AttrValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            AttrValue::Integer(v) => Some(*v),
            AttrValue::Unsigned(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            AttrValue::Integer(v) => u64::try_from(*v).ok(),
            AttrValue::Unsigned(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttrValue::Integer(v) => Some(*v as f64),
            AttrValue::Unsigned(v) => Some(*v as f64),
            AttrValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[AttrValue]> {
        match self {
            AttrValue::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, AttrValue>> {
        match self {
            AttrValue::Map(v) => Some(v),
            _ => None,
        }
    }

    /// Equality that ignores how a whole number happens to be stored.
    ///
    /// `Integer(5)` and `Unsigned(5)` compare equal here, as do `Integer(5)`
    /// and `Float(5.0)`. Lists and maps compare element-wise with the same rule.
    pub fn loosely_eq(&self, other: &AttrValue) -> bool {
        match (self, other) {
            (AttrValue::List(a), AttrValue::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.loosely_eq(y))
            }
            (AttrValue::Map(a), AttrValue::Map(b)) => {
                a.len() == b.len()
                    && a
                        .iter()
                        .zip(b)
                        .all(|((ka, va), (kb, vb))| ka == kb && va.loosely_eq(vb))
            }
            (AttrValue::Float(_), _) | (_, AttrValue::Float(_)) => {
                match (self.as_f64(), other.as_f64()) {
                    (Some(a), Some(b)) => a == b,
                    _ => false,
                }
            }
            (
                AttrValue::Integer(_) | AttrValue::Unsigned(_),
                AttrValue::Integer(_) | AttrValue::Unsigned(_),
            ) => self.as_i64() == other.as_i64() && self.as_u64() == other.as_u64(),
            _ => self == other,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Null => write!(f, "null"),
            AttrValue::Bool(v) => write!(f, "{}", v),
            AttrValue::Integer(v) => write!(f, "{}", v),
            AttrValue::Unsigned(v) => write!(f, "{}", v),
            AttrValue::Float(v) => write!(f, "{}", v),
            AttrValue::String(v) => write!(f, "{}", v),
            AttrValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            AttrValue::Map(map) => write_map(f, map),
        }
    }
}

/// Render a map as `{k: v, ...}` in key order.
pub(crate) fn write_map<V: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    map: &BTreeMap<String, V>,
) -> fmt::Result {
    write!(f, "{{")?;
    for (i, (k, v)) in map.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}: {}", k, v)?;
    }
    write!(f, "}}")
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        AttrValue::Bool(v)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        AttrValue::Integer(v)
    }
}

impl From<u64> for AttrValue {
    fn from(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(v) => AttrValue::Integer(v),
            Err(_) => AttrValue::Unsigned(v),
        }
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Float(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        AttrValue::String(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        AttrValue::String(v)
    }
}

impl From<Vec<String>> for AttrValue {
    fn from(v: Vec<String>) -> Self {
        AttrValue::List(v.into_iter().map(AttrValue::String).collect())
    }
}

impl From<Vec<AttrValue>> for AttrValue {
    fn from(v: Vec<AttrValue>) -> Self {
        AttrValue::List(v)
    }
}

impl From<BTreeMap<String, AttrValue>> for AttrValue {
    fn from(v: BTreeMap<String, AttrValue>) -> Self {
        AttrValue::Map(v)
    }
}

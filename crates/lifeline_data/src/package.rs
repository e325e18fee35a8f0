//! Boxed, type-coercible value snapshots.
//!
//! Providers hand out `PackagePtr`s; once returned a package is never mutated,
//! so the manager can cache and share it between recorders for the rest of the
//! tick.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Shared handle to an immutable package.
pub type PackagePtr = Arc<Package>;

/// A single observed value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Package {
    Bool(bool),
    Int(i64),
    Double(f64),
    Str(String),
    Array(ArrayPackage),
}

impl Package {
    /// Wraps the package in a shared handle.
    #[must_use]
    pub fn shared(self) -> PackagePtr {
        Arc::new(self)
    }

    /// Truth view. Non-zero numbers and `"true"` (or a non-zero integer
    /// string) are true; aggregates are false.
    pub fn bool_value(&self) -> bool {
        match self {
            Package::Bool(v) => *v,
            Package::Int(v) => *v != 0,
            Package::Double(v) => *v != 0.0,
            Package::Str(s) => parse_bool(s),
            Package::Array(_) => false,
        }
    }

    /// Integer view. Doubles truncate, unparsable strings and aggregates
    /// give 0.
    pub fn int_value(&self) -> i64 {
        match self {
            Package::Bool(v) => i64::from(*v),
            Package::Int(v) => *v,
            Package::Double(v) => *v as i64,
            Package::Str(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .or_else(|_| s.parse::<f64>().map(|d| d as i64))
                    .unwrap_or(0)
            }
            Package::Array(_) => 0,
        }
    }

    /// Floating point view, 0.0 when there is no numeric reading.
    pub fn double_value(&self) -> f64 {
        match self {
            Package::Bool(v) => f64::from(u8::from(*v)),
            Package::Int(v) => *v as f64,
            Package::Double(v) => *v,
            Package::Str(s) => s.trim().parse::<f64>().unwrap_or(0.0),
            Package::Array(_) => 0.0,
        }
    }

    /// String view. Aggregates join their components with commas.
    pub fn string_value(&self) -> String {
        match self {
            Package::Bool(v) => v.to_string(),
            Package::Int(v) => v.to_string(),
            Package::Double(v) => v.to_string(),
            Package::Str(s) => s.clone(),
            Package::Array(a) => a.string_value(),
        }
    }

    /// Whether the package holds child packages.
    pub fn is_aggregate(&self) -> bool {
        matches!(self, Package::Array(_))
    }

    /// Describes the aggregate kind, or an empty string for scalars.
    pub fn aggregate_descriptor(&self) -> &str {
        match self {
            Package::Array(a) => a.descriptor(),
            _ => "",
        }
    }

    /// Number of children of an aggregate, 0 for scalars.
    pub fn num_components(&self) -> usize {
        match self {
            Package::Array(a) => a.len(),
            _ => 0,
        }
    }

    /// Returns the `index`th child of an aggregate.
    pub fn component(&self, index: usize) -> Option<PackagePtr> {
        match self {
            Package::Array(a) => a.component(index),
            _ => None,
        }
    }
}

fn parse_bool(s: &str) -> bool {
    let s = s.trim();
    if s.eq_ignore_ascii_case("true") {
        return true;
    }
    s.parse::<i64>().map(|v| v != 0).unwrap_or(false)
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.string_value())
    }
}

impl From<bool> for Package {
    fn from(v: bool) -> Self {
        Package::Bool(v)
    }
}

impl From<i64> for Package {
    fn from(v: i64) -> Self {
        Package::Int(v)
    }
}

impl From<i32> for Package {
    fn from(v: i32) -> Self {
        Package::Int(i64::from(v))
    }
}

impl From<usize> for Package {
    fn from(v: usize) -> Self {
        Package::Int(v as i64)
    }
}

impl From<f64> for Package {
    fn from(v: f64) -> Self {
        Package::Double(v)
    }
}

impl From<&str> for Package {
    fn from(v: &str) -> Self {
        Package::Str(v.to_string())
    }
}

impl From<String> for Package {
    fn from(v: String) -> Self {
        Package::Str(v)
    }
}

impl From<ArrayPackage> for Package {
    fn from(v: ArrayPackage) -> Self {
        Package::Array(v)
    }
}

/// Ordered aggregate of child packages.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ArrayPackage {
    components: Vec<PackagePtr>,
}

impl ArrayPackage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a child after the existing ones.
    pub fn push(&mut self, component: PackagePtr) {
        self.components.push(component);
    }

    /// Number of children.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Shared handle to the `index`th child.
    pub fn component(&self, index: usize) -> Option<PackagePtr> {
        self.components.get(index).cloned()
    }

    /// Aggregate kind reported through `Package::aggregate_descriptor`.
    pub fn descriptor(&self) -> &str {
        "array"
    }

    /// Children in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &PackagePtr> {
        self.components.iter()
    }

    fn string_value(&self) -> String {
        self.components
            .iter()
            .map(|c| c.string_value())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl FromIterator<PackagePtr> for ArrayPackage {
    fn from_iter<I: IntoIterator<Item = PackagePtr>>(iter: I) -> Self {
        Self {
            components: iter.into_iter().collect(),
        }
    }
}

//! # Lifeline Data
//!
//! Plain value types shared by the data manager and everything that feeds or
//! consumes it: data keys, value packages and the simulation update counter.

/// Standard and argumented data keys
pub mod key;
/// Immutable value snapshots with coercion views
pub mod package;
/// Discrete simulation time
pub mod update;

pub use key::{Argument, ArgumentSet, DataId, DataSet};
pub use package::{ArrayPackage, Package, PackagePtr};
pub use update::Update;

//! Data identifiers.
//!
//! A key is either *standard* (`core.world.organisms`) or *argumented*
//! (`core.world.lineage_size[3]`). An argumented key belongs to a family whose
//! canonical form carries an empty argument (`core.world.lineage_size[]`).
//! Arguments are compared verbatim; brackets inside them are not escaped.

use std::collections::BTreeSet;

/// Name of one time-varying value.
pub type DataId = String;
/// Runtime parameter of an argumented key.
pub type Argument = String;
/// Ordered set of keys, as supplied by a provider or requested by a recorder.
pub type DataSet = BTreeSet<DataId>;
/// Ordered set of arguments for one key family.
pub type ArgumentSet = BTreeSet<Argument>;

/// Returns true if `key` names a single, unparameterized value.
///
/// Keys shorter than three characters are always standard, even when they end
/// in `]`.
pub fn is_standard(key: &str) -> bool {
    key.len() < 3 || !key.ends_with(']')
}

/// Returns true if `key` has the `name[arg]` shape.
pub fn is_argumented(key: &str) -> bool {
    key.len() > 2 && key.ends_with(']')
}

/// Splits an argumented key into its family key and argument.
///
/// `x[123]` splits into `("x[]", "123")`. Returns `None` if the key does not
/// end in `]` or has no `[`.
pub fn split(key: &str) -> Option<(DataId, Argument)> {
    let body = key.strip_suffix(']')?;
    let open = body.find('[')?;
    let raw_key = format!("{}]", &body[..=open]);
    let argument = body[open + 1..].to_string();
    Some((raw_key, argument))
}

/// Formats the fully qualified key for `argument` within the family `raw_key`.
///
/// `raw_key` is expected in canonical `name[]` form.
pub fn join(raw_key: &str, argument: &str) -> DataId {
    let name = family_name(raw_key);
    format!("{name}[{argument}]")
}

/// Strips the trailing `[]` from a family key.
pub fn family_name(raw_key: &str) -> &str {
    raw_key.strip_suffix("[]").unwrap_or(raw_key)
}

/// Returns true if `key` is a family key of the form `name[]`.
pub fn is_family(key: &str) -> bool {
    key.len() > 2 && key.ends_with("[]")
}

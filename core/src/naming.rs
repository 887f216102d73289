#![deny(missing_docs)]

//! # Naming Utilities
//!
//! Canonicalization rules for every identifier the engine emits.
//!
//! A schema named `user-profile` and a route tag `user_profile` must fold
//! to the identical emitted identifier, so the same helpers are used for
//! interface names, reference targets and storage-group keys.

use heck::{ToLowerCamelCase, ToPascalCase};

/// Canonical capitalized-word form: case folding on `-`, `_` and word
/// boundaries. `user-profile` -> `UserProfile`.
pub fn type_name(raw: &str) -> String {
    raw.to_pascal_case()
}

/// Canonical camel form used for function names.
/// `UpdateUser` -> `updateUser`, `get-user_profile` -> `getUserProfile`.
pub fn function_name(raw: &str) -> String {
    raw.to_lower_camel_case()
}

/// Synthesizes the guaranteed operation identifier when the document omits
/// `operationId`: the verb concatenated with the path with all
/// non-alphanumeric characters stripped.
///
/// Unique per `(path, verb)` in the overwhelming majority of real specs,
/// but two paths that differ only in punctuation collide. That risk is
/// documented, not resolved here.
pub fn synthesize_operation_ident(verb: &str, path: &str) -> String {
    let stripped: String = path.chars().filter(|c| c.is_alphanumeric()).collect();
    format!("{}{}", verb.to_lowercase(), stripped)
}

/// Whether a property name can be emitted bare in a structural literal.
pub fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

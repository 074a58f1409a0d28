//! Accessor naming convention.
//!
//! `getName`/`setName` map to the property `name`, `isActive` to `active`. Names whose
//! remainder starts with two capitals keep their case, so `getURL` maps to `URL`.

use crate::{Error, Result};

/// Derive the property name from an accessor method name
///
/// # Errors
/// Returns [`Error::InvalidPropertyMethod`] if `name` does not start with `is`, `get` or `set`.
pub fn method_to_property(name: &str) -> Result<String> {
    let remainder = if let Some(rest) = name.strip_prefix("is") {
        rest
    } else if let Some(rest) = name.strip_prefix("get").or_else(|| name.strip_prefix("set")) {
        rest
    } else {
        return Err(Error::InvalidPropertyMethod(name.to_string()));
    };

    let mut chars = remainder.chars();
    let Some(first) = chars.next() else {
        return Ok(String::new());
    };

    let keep_case = chars.next().is_some_and(char::is_uppercase);
    if keep_case {
        return Ok(remainder.to_string());
    }

    let mut property: String = first.to_lowercase().collect();
    property.push_str(&remainder[first.len_utf8()..]);
    Ok(property)
}

/// Returns `true` if `name` follows the getter or setter convention
#[must_use]
pub fn is_property(name: &str) -> bool {
    is_getter(name) || is_setter(name)
}

/// Returns `true` for `getX` (longer than 3) and `isX` (longer than 2)
#[must_use]
pub fn is_getter(name: &str) -> bool {
    (name.starts_with("get") && name.len() > 3) || (name.starts_with("is") && name.len() > 2)
}

/// Returns `true` for `setX` (longer than 3)
#[must_use]
pub fn is_setter(name: &str) -> bool {
    name.starts_with("set") && name.len() > 3
}

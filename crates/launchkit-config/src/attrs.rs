//! Shared attribute validation for launch-file tags.
//!
//! Every tag kind follows the same template: declare its supported-attribute
//! whitelist, reject anything outside it, then read each field through
//! placeholder resolution and validate it. New tag kinds reuse these helpers
//! and add only their own field list and construction logic.

use crate::{ArgScope, ConfigError, ConfigResult};
use kdl::KdlNode;

/// Reject any attribute on the node that is not in the supported set.
pub fn check_unknown_attributes(
    tag: &str,
    node: &KdlNode,
    supported: &[&str],
) -> ConfigResult<()> {
    for entry in node.entries() {
        match entry.name() {
            Some(name) if supported.contains(&name.value()) => {}
            Some(name) => {
                return Err(ConfigError::UnknownAttribute {
                    tag: tag.to_string(),
                    attr: name.value().to_string(),
                });
            }
            None => {
                return Err(ConfigError::InvalidValue {
                    field: format!("<{}> tag", tag),
                    message: "positional values are not allowed; use name=value attributes"
                        .to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Raw attribute text, before placeholder resolution.
///
/// Non-string KDL scalars are rendered to their literal text so that a
/// `type=` coercion or flag parse can be applied uniformly.
pub fn attr_text(node: &KdlNode, attr: &str) -> Option<String> {
    let value = node.get(attr)?;
    let text = if let Some(s) = value.as_string() {
        s.to_string()
    } else if let Some(b) = value.as_bool() {
        b.to_string()
    } else if let Some(i) = value.as_integer() {
        i.to_string()
    } else if let Some(f) = value.as_float() {
        f.to_string()
    } else {
        String::new()
    };
    Some(text)
}

/// Read a required attribute, resolve placeholders, and reject emptiness.
///
/// An absent attribute and one that resolves to the empty string are
/// distinct errors.
pub fn required(
    tag: &str,
    node: &KdlNode,
    attr: &str,
    scope: &ArgScope,
) -> ConfigResult<String> {
    let raw = attr_text(node, attr).ok_or_else(|| ConfigError::MissingAttribute {
        tag: tag.to_string(),
        attr: attr.to_string(),
    })?;

    let resolved = scope.resolve(&raw)?;
    if resolved.is_empty() {
        return Err(ConfigError::EmptyAttribute {
            tag: tag.to_string(),
            attr: attr.to_string(),
        });
    }
    Ok(resolved)
}

/// Read an optional attribute, resolving placeholders when present.
pub fn optional(
    _tag: &str,
    node: &KdlNode,
    attr: &str,
    scope: &ArgScope,
) -> ConfigResult<Option<String>> {
    match attr_text(node, attr) {
        Some(raw) => Ok(Some(scope.resolve(&raw)?)),
        None => Ok(None),
    }
}

/// Evaluate the `if`/`unless` gating attributes once, at construction time.
///
/// The returned flag is fixed for the lifetime of the tag; traversal never
/// re-evaluates it.
pub fn enabled(tag: &str, node: &KdlNode, scope: &ArgScope) -> ConfigResult<bool> {
    let if_value = optional(tag, node, "if", scope)?;
    let unless_value = optional(tag, node, "unless", scope)?;

    match (if_value, unless_value) {
        (Some(_), Some(_)) => Err(ConfigError::InvalidValue {
            field: format!("<{}> tag", tag),
            message: "'if' and 'unless' cannot both be present".to_string(),
        }),
        (Some(value), None) => parse_flag(tag, "if", &value),
        (None, Some(value)) => Ok(!parse_flag(tag, "unless", &value)?),
        (None, None) => Ok(true),
    }
}

fn parse_flag(tag: &str, attr: &str, value: &str) -> ConfigResult<bool> {
    match value.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            field: format!("'{}' attribute of <{}> tag", attr, tag),
            message: format!("expected true/false, got {:?}", other),
        }),
    }
}

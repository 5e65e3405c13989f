//! Tag kinds of the launch-file language.
//!
//! Each tag is built from one KDL node plus the enclosing argument scope:
//! the supported-attribute whitelist is checked first, then each field is
//! read through placeholder resolution and validated. Tags are immutable
//! once constructed; `if`/`unless` gating is evaluated exactly once here.

use crate::{ArgScope, ConfigError, ConfigResult, attrs, launch::LaunchFile, names};
use kdl::KdlNode;
use launchkit_core::{Param, ParamType, ParamValue};
use std::path::{Path, PathBuf};
use tracing::warn;

const PARAM_ATTRS: &[&str] = &["name", "value", "type"];
const NODE_ATTRS: &[&str] = &["name", "pkg", "exec"];
const GROUP_ATTRS: &[&str] = &["ns", "if", "unless"];
const INCLUDE_ATTRS: &[&str] = &["path", "if", "unless"];
const REMAP_ATTRS: &[&str] = &["from", "to"];
const ARG_ATTRS: &[&str] = &["name", "value", "default"];

/// Parse a `param` tag into a resolved parameter declaration.
///
/// With an explicit `type=` attribute the value text is resolved and then
/// coerced; without one the native KDL scalar type is kept (strings still go
/// through placeholder resolution).
pub fn parse_param(node: &KdlNode, ns: &str, scope: &ArgScope) -> ConfigResult<Param> {
    attrs::check_unknown_attributes("param", node, PARAM_ATTRS)?;

    let name = attrs::required("param", node, "name", scope)?;
    let resolved_name = names::join(ns, &name);

    let value = match attrs::optional("param", node, "type", scope)? {
        Some(ty) => {
            let ty: ParamType = ty.parse()?;
            let raw = attrs::attr_text(node, "value").ok_or_else(|| {
                ConfigError::MissingAttribute {
                    tag: "param".to_string(),
                    attr: "value".to_string(),
                }
            })?;
            ParamValue::coerce(ty, &scope.resolve(&raw)?)?
        }
        None => {
            let raw = node.get("value").ok_or_else(|| ConfigError::MissingAttribute {
                tag: "param".to_string(),
                attr: "value".to_string(),
            })?;

            if let Some(s) = raw.as_string() {
                ParamValue::Str(scope.resolve(s)?)
            } else if let Some(b) = raw.as_bool() {
                ParamValue::Bool(b)
            } else if let Some(i) = raw.as_integer() {
                let i = i64::try_from(i).map_err(|_| ConfigError::InvalidValue {
                    field: format!("param '{}'", resolved_name),
                    message: "integer value out of range".to_string(),
                })?;
                ParamValue::Int(i)
            } else if let Some(f) = raw.as_float() {
                ParamValue::Double(f)
            } else {
                return Err(ConfigError::InvalidValue {
                    field: format!("param '{}'", resolved_name),
                    message: "value cannot be null".to_string(),
                });
            }
        }
    };

    Ok(Param::new(resolved_name, value))
}

/// A process declaration. Owns the parameters declared in its body, which
/// are qualified under the node's own namespace.
#[derive(Debug, Clone)]
pub struct NodeTag {
    pub name: String,
    pub pkg: String,
    pub exec: String,
    pub params: Vec<Param>,
}

impl NodeTag {
    pub fn from_kdl(node: &KdlNode, ns: &str, scope: &ArgScope) -> ConfigResult<Self> {
        attrs::check_unknown_attributes("node", node, NODE_ATTRS)?;

        let name = attrs::required("node", node, "name", scope)?;
        let pkg = attrs::required("node", node, "pkg", scope)?;
        let exec = attrs::required("node", node, "exec", scope)?;

        let node_ns = names::join(ns, &name);
        let mut params = Vec::new();
        if let Some(children) = node.children() {
            for child in children.nodes() {
                match child.name().value() {
                    "param" => params.push(parse_param(child, &node_ns, scope)?),
                    other => {
                        warn!(tag = other, node = %name, "ignoring unsupported tag inside <node>");
                    }
                }
            }
        }

        Ok(Self {
            name,
            pkg,
            exec,
            params,
        })
    }
}

/// A gated, namespaced block of launch-file content.
///
/// A disabled group's body is never parsed, so the child is present exactly
/// when the group is enabled.
#[derive(Debug, Clone)]
pub struct GroupTag {
    pub enabled: bool,
    pub ns: String,
    pub child: Option<LaunchFile>,
}

impl GroupTag {
    pub fn from_kdl(
        node: &KdlNode,
        file: &Path,
        ns: &str,
        scope: &ArgScope,
    ) -> ConfigResult<Self> {
        attrs::check_unknown_attributes("group", node, GROUP_ATTRS)?;

        let enabled = attrs::enabled("group", node, scope)?;
        let child_ns = match attrs::optional("group", node, "ns", scope)? {
            Some(sub) => names::join(ns, &sub),
            None => ns.to_string(),
        };

        // Bindings made inside the group stay inside it.
        let child = if enabled {
            let body = match node.children() {
                Some(doc) => LaunchFile::parse_body(doc, file, &child_ns, scope.clone())?,
                None => LaunchFile::empty(file, &child_ns, scope.clone()),
            };
            Some(body)
        } else {
            None
        };

        Ok(Self {
            enabled,
            ns: child_ns,
            child,
        })
    }
}

/// A gated reference to another launch file.
///
/// The child is present only when the target file was read and parsed; a
/// file that could not be read leaves the reference childless with the
/// failure recorded, which is distinguishable from `enabled=false`.
#[derive(Debug, Clone)]
pub struct IncludeTag {
    pub enabled: bool,
    pub path: PathBuf,
    pub child: Option<LaunchFile>,
    pub load_error: Option<String>,
}

impl IncludeTag {
    pub fn from_kdl(
        node: &KdlNode,
        file: &Path,
        ns: &str,
        scope: &ArgScope,
    ) -> ConfigResult<Self> {
        attrs::check_unknown_attributes("include", node, INCLUDE_ATTRS)?;

        let enabled = attrs::enabled("include", node, scope)?;
        let path = PathBuf::from(attrs::required("include", node, "path", scope)?);

        // The included file sees only the args passed to it plus its own
        // declarations; nothing else crosses the file boundary.
        let mut child_scope = ArgScope::new();
        if let Some(children) = node.children() {
            for child in children.nodes() {
                match child.name().value() {
                    "arg" => ArgTag::from_kdl(child, scope)?.apply(&mut child_scope),
                    other => {
                        warn!(tag = other, "ignoring unsupported tag inside <include>");
                    }
                }
            }
        }

        if !enabled {
            return Ok(Self {
                enabled,
                path,
                child: None,
                load_error: None,
            });
        }

        let target = match file.parent() {
            Some(dir) if path.is_relative() => dir.join(&path),
            _ => path.clone(),
        };

        let (child, load_error) = match std::fs::read_to_string(&target) {
            Ok(text) => (
                Some(LaunchFile::parse(&text, target, ns, child_scope)?),
                None,
            ),
            Err(e) => {
                warn!(
                    path = %target.display(),
                    error = %e,
                    "failed to load included launch file; it will contribute no parameters"
                );
                (None, Some(e.to_string()))
            }
        };

        Ok(Self {
            enabled,
            path,
            child,
            load_error,
        })
    }
}

/// A name remapping. The reference instance of the declarative
/// tag-construction pattern: whitelist, required fields, placeholder
/// resolution, non-emptiness.
#[derive(Debug, Clone)]
pub struct RemapTag {
    pub from: String,
    pub to: String,
}

impl RemapTag {
    pub fn from_kdl(node: &KdlNode, scope: &ArgScope) -> ConfigResult<Self> {
        attrs::check_unknown_attributes("remap", node, REMAP_ATTRS)?;

        let from = attrs::required("remap", node, "from", scope)?;
        let to = attrs::required("remap", node, "to", scope)?;

        Ok(Self { from, to })
    }
}

/// An argument declaration: `value=` binds unconditionally, `default=` only
/// when the including file has not already bound the name.
#[derive(Debug, Clone)]
pub struct ArgTag {
    pub name: String,
    pub value: Option<String>,
    pub default: Option<String>,
}

impl ArgTag {
    pub fn from_kdl(node: &KdlNode, scope: &ArgScope) -> ConfigResult<Self> {
        attrs::check_unknown_attributes("arg", node, ARG_ATTRS)?;

        let name = attrs::required("arg", node, "name", scope)?;
        let value = attrs::optional("arg", node, "value", scope)?;
        let default = attrs::optional("arg", node, "default", scope)?;

        if value.is_some() && default.is_some() {
            return Err(ConfigError::InvalidValue {
                field: format!("arg '{}'", name),
                message: "'value' and 'default' cannot both be present".to_string(),
            });
        }

        Ok(Self {
            name,
            value,
            default,
        })
    }

    /// Apply this declaration to a scope.
    pub fn apply(&self, scope: &mut ArgScope) {
        if let Some(value) = &self.value {
            scope.set_arg(&self.name, value);
        } else if let Some(default) = &self.default {
            scope.set_default(&self.name, default);
        }
    }
}

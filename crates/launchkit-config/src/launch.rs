//! Launch-file tree construction.

use crate::{ArgScope, ConfigResult, tags};
use kdl::KdlDocument;
use launchkit_core::Param;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// One launch file's parsed content.
///
/// Immutable after construction. Groups and includes own freshly parsed
/// subtrees, so the tree is acyclic and traversal is purely downward.
#[derive(Debug, Clone)]
pub struct LaunchFile {
    /// Source path, for diagnostics (inline group bodies share their
    /// enclosing file's path).
    pub path: PathBuf,
    /// Namespace this file's content was resolved under.
    pub ns: String,
    /// Parameters declared directly in this file, in declaration order.
    pub params: Vec<Param>,
    /// Process declarations, each owning its own parameters.
    pub nodes: Vec<tags::NodeTag>,
    /// Gated, namespaced sub-blocks.
    pub groups: Vec<tags::GroupTag>,
    /// Gated references to other launch files.
    pub includes: Vec<tags::IncludeTag>,
    /// Name remappings declared in this file.
    pub remaps: Vec<tags::RemapTag>,
    args: ArgScope,
}

impl LaunchFile {
    /// Read and parse a launch file from disk under the root namespace.
    pub fn load(path: impl AsRef<Path>, scope: ArgScope) -> ConfigResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading launch file");
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text, path, "/", scope)
    }

    /// Parse launch-file text under the given namespace and argument scope.
    pub fn parse(
        text: &str,
        path: impl Into<PathBuf>,
        ns: &str,
        scope: ArgScope,
    ) -> ConfigResult<Self> {
        let doc: KdlDocument = text.parse()?;
        Self::parse_body(&doc, &path.into(), ns, scope)
    }

    /// The argument scope the file ended up with after its `arg` tags.
    pub fn args(&self) -> &ArgScope {
        &self.args
    }

    pub(crate) fn empty(path: &Path, ns: &str, scope: ArgScope) -> Self {
        Self {
            path: path.to_path_buf(),
            ns: ns.to_string(),
            params: Vec::new(),
            nodes: Vec::new(),
            groups: Vec::new(),
            includes: Vec::new(),
            remaps: Vec::new(),
            args: scope,
        }
    }

    pub(crate) fn parse_body(
        doc: &KdlDocument,
        path: &Path,
        ns: &str,
        mut scope: ArgScope,
    ) -> ConfigResult<Self> {
        let mut file = Self::empty(path, ns, ArgScope::new());

        for node in doc.nodes() {
            match node.name().value() {
                "arg" => {
                    // Args take effect immediately, scoping every tag that
                    // follows them in document order.
                    tags::ArgTag::from_kdl(node, &scope)?.apply(&mut scope);
                }
                "param" => file.params.push(tags::parse_param(node, ns, &scope)?),
                "node" => file.nodes.push(tags::NodeTag::from_kdl(node, ns, &scope)?),
                "group" => file
                    .groups
                    .push(tags::GroupTag::from_kdl(node, path, ns, &scope)?),
                "include" => file
                    .includes
                    .push(tags::IncludeTag::from_kdl(node, path, ns, &scope)?),
                "remap" => file.remaps.push(tags::RemapTag::from_kdl(node, &scope)?),
                other => {
                    warn!(tag = other, file = %path.display(), "ignoring unknown tag");
                }
            }
        }

        file.args = scope;
        Ok(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigError;
    use launchkit_core::ParamValue;
    use std::io::Write;

    fn parse(text: &str) -> LaunchFile {
        LaunchFile::parse(text, "test.kdl", "/", ArgScope::new()).unwrap()
    }

    #[test]
    fn test_parse_orders_are_preserved() {
        let file = parse(
            r#"
            param name="/a" value="1"
            param name="/b" value="2"
            node name="n" pkg="p" exec="e" {
                param name="rate" value=10
            }
            "#,
        );
        assert_eq!(file.params[0].name, "/a");
        assert_eq!(file.params[1].name, "/b");
        assert_eq!(file.nodes[0].params[0].name, "/n/rate");
    }

    #[test]
    fn test_args_scope_following_tags() {
        let file = parse(
            r#"
            arg name="ns" value="robot"
            param name="/${arg.ns}/id" value="7"
            "#,
        );
        assert_eq!(file.params[0].name, "/robot/id");
        assert_eq!(file.args().arg("ns"), Some("robot"));
    }

    #[test]
    fn test_arg_defined_after_use_fails() {
        let result = LaunchFile::parse(
            r#"
            param name="/${arg.late}" value="1"
            arg name="late" value="x"
            "#,
            "test.kdl",
            "/",
            ArgScope::new(),
        );
        assert!(matches!(result, Err(ConfigError::UndefinedArg(_))));
    }

    #[test]
    fn test_validation_error_aborts_file() {
        let result = LaunchFile::parse(
            r#"remap from="/a""#,
            "test.kdl",
            "/",
            ArgScope::new(),
        );
        assert!(matches!(result, Err(ConfigError::MissingAttribute { .. })));
    }

    #[test]
    fn test_group_bindings_do_not_leak() {
        let file = parse(
            r#"
            group {
                arg name="inner" value="1"
                param name="x" value="${arg.inner}"
            }
            "#,
        );
        assert!(!file.args().has_arg("inner"));
        let child = file.groups[0].child.as_ref().unwrap();
        assert_eq!(child.params[0].value, ParamValue::Str("1".to_string()));
    }

    #[test]
    fn test_include_passes_args_and_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let child_path = dir.path().join("child.kdl");
        let mut f = std::fs::File::create(&child_path).unwrap();
        writeln!(f, r#"arg name="rate" default="10""#).unwrap();
        writeln!(f, r#"param name="rate" value="${{arg.rate}}""#).unwrap();

        let root = r#"
            include path="child.kdl" {
                arg name="rate" value="20"
            }
            include path="child.kdl"
            "#;
        let root_path = dir.path().join("root.kdl");
        let file = LaunchFile::parse(root, root_path, "/", ArgScope::new()).unwrap();

        // Passed arg wins over the child's default; the default applies
        // when nothing was passed.
        let overridden = file.includes[0].child.as_ref().unwrap();
        assert_eq!(overridden.params[0].value, ParamValue::Str("20".into()));
        let defaulted = file.includes[1].child.as_ref().unwrap();
        assert_eq!(defaulted.params[0].value, ParamValue::Str("10".into()));
    }

    #[test]
    fn test_include_parse_error_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let child_path = dir.path().join("broken.kdl");
        std::fs::write(&child_path, r#"remap from="/a" to="""#).unwrap();

        let root_path = dir.path().join("root.kdl");
        let result = LaunchFile::parse(
            r#"include path="broken.kdl""#,
            root_path,
            "/",
            ArgScope::new(),
        );
        assert!(matches!(result, Err(ConfigError::EmptyAttribute { .. })));
    }

    #[test]
    fn test_nested_include_namespaces() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("inner.kdl"),
            r#"param name="depth" value=2"#,
        )
        .unwrap();

        let root_path = dir.path().join("root.kdl");
        let file = LaunchFile::parse(
            r#"
            group ns="sim" {
                include path="inner.kdl"
            }
            "#,
            root_path,
            "/",
            ArgScope::new(),
        )
        .unwrap();

        let group = &file.groups[0];
        let include = &group.child.as_ref().unwrap().includes[0];
        let inner = include.child.as_ref().unwrap();
        assert_eq!(inner.params[0].name, "/sim/depth");
    }
}

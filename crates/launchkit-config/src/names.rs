//! Namespace-qualified parameter and node names.

/// Join a name under a namespace.
///
/// Names beginning with `/` are already global and pass through unchanged.
/// An empty namespace is the root namespace `/`.
pub fn join(ns: &str, name: &str) -> String {
    if name.starts_with('/') {
        return name.to_string();
    }

    let ns = ns.trim_end_matches('/');
    if ns.is_empty() {
        format!("/{}", name)
    } else {
        format!("{}/{}", ns, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_name_passes_through() {
        assert_eq!(join("/robot", "/speed"), "/speed");
    }

    #[test]
    fn test_relative_name_is_qualified() {
        assert_eq!(join("/robot", "speed"), "/robot/speed");
    }

    #[test]
    fn test_root_namespace() {
        assert_eq!(join("", "speed"), "/speed");
        assert_eq!(join("/", "speed"), "/speed");
    }

    #[test]
    fn test_trailing_slash_is_normalised() {
        assert_eq!(join("/robot/", "speed"), "/robot/speed");
    }
}

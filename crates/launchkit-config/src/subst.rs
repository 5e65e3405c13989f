//! Placeholder resolution for launch-file attribute values.
//!
//! Supports placeholders like:
//! - `${arg.NAME}` - argument binding from the current scope
//! - `${env.NAME}` - process environment variable
//! - `${NAME}` - shorthand for `${arg.NAME}`

use crate::{ConfigError, ConfigResult};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

// Regex for matching ${...} placeholders
static PLACEHOLDER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([a-zA-Z_][a-zA-Z0-9_]*(?:\.[a-zA-Z_][a-zA-Z0-9_]*)?)\}").unwrap()
});

/// The argument bindings visible while parsing one launch file.
///
/// A scope is cloned into each group body and rebuilt from `arg` entries for
/// each include, so bindings never leak back upward.
#[derive(Debug, Clone, Default)]
pub struct ArgScope {
    args: HashMap<String, String>,
    /// Environment overrides, consulted before the process environment.
    env: HashMap<String, String>,
}

impl ArgScope {
    /// Create an empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a scope from `NAME=VALUE`-style bindings.
    pub fn from_bindings<I, K, V>(bindings: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut scope = Self::new();
        for (name, value) in bindings {
            scope.args.insert(name.into(), value.into());
        }
        scope
    }

    /// Bind an argument, replacing any existing binding.
    pub fn set_arg(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.args.insert(name.into(), value.into());
    }

    /// Bind an argument only if no binding exists yet (for `default=`).
    pub fn set_default(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.args.entry(name.into()).or_insert_with(|| value.into());
    }

    /// Override an environment variable for this scope.
    pub fn set_env(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.env.insert(name.into(), value.into());
    }

    /// Whether an argument is bound in this scope.
    pub fn has_arg(&self, name: &str) -> bool {
        self.args.contains_key(name)
    }

    /// Look up a single argument binding.
    pub fn arg(&self, name: &str) -> Option<&str> {
        self.args.get(name).map(String::as_str)
    }

    fn lookup(&self, placeholder: &str) -> ConfigResult<String> {
        let parts: Vec<&str> = placeholder.split('.').collect();

        match parts.as_slice() {
            ["arg", name] | [name] => self
                .args
                .get(*name)
                .cloned()
                .ok_or_else(|| ConfigError::UndefinedArg(name.to_string())),
            ["env", name] => match self.env.get(*name) {
                Some(value) => Ok(value.clone()),
                None => std::env::var(name)
                    .map_err(|_| ConfigError::UndefinedEnv(name.to_string())),
            },
            _ => Err(ConfigError::UndefinedArg(placeholder.to_string())),
        }
    }

    /// Resolve every `${...}` placeholder in the input to its literal value.
    ///
    /// Pure and idempotent: resolved text contains no placeholder forms, so
    /// resolving it again returns it unchanged. Referencing an unbound
    /// argument or environment variable is an error.
    pub fn resolve(&self, input: &str) -> ConfigResult<String> {
        let mut output = String::with_capacity(input.len());
        let mut last_end = 0;

        for caps in PLACEHOLDER_REGEX.captures_iter(input) {
            let whole = caps.get(0).unwrap();
            output.push_str(&input[last_end..whole.start()]);
            output.push_str(&self.lookup(&caps[1])?);
            last_end = whole.end();
        }
        output.push_str(&input[last_end..]);

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_resolution() {
        let mut scope = ArgScope::new();
        scope.set_arg("robot", "r2d2");

        let result = scope.resolve("name is ${arg.robot}").unwrap();
        assert_eq!(result, "name is r2d2");
    }

    #[test]
    fn test_shorthand_resolves_from_args() {
        let scope = ArgScope::from_bindings([("speed", "1.5")]);
        assert_eq!(scope.resolve("${speed}").unwrap(), "1.5");
    }

    #[test]
    fn test_env_override() {
        let mut scope = ArgScope::new();
        scope.set_env("LAUNCH_HOME", "/opt/launch");

        let result = scope.resolve("${env.LAUNCH_HOME}/maps").unwrap();
        assert_eq!(result, "/opt/launch/maps");
    }

    #[test]
    fn test_undefined_arg_is_an_error() {
        let scope = ArgScope::new();
        let result = scope.resolve("${arg.missing}");
        assert!(matches!(result, Err(ConfigError::UndefinedArg(_))));
    }

    #[test]
    fn test_undefined_env_is_an_error() {
        let scope = ArgScope::new();
        let result = scope.resolve("${env.LAUNCHKIT_DOES_NOT_EXIST}");
        assert!(matches!(result, Err(ConfigError::UndefinedEnv(_))));
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let scope = ArgScope::from_bindings([("a", "literal")]);
        let once = scope.resolve("x ${a} y").unwrap();
        let twice = scope.resolve(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_plain_text_passes_through() {
        let scope = ArgScope::new();
        assert_eq!(scope.resolve("no placeholders").unwrap(), "no placeholders");
    }

    #[test]
    fn test_default_does_not_override() {
        let mut scope = ArgScope::from_bindings([("rate", "20")]);
        scope.set_default("rate", "10");
        assert_eq!(scope.arg("rate"), Some("20"));
    }
}

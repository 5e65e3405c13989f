//! Parameter types and values.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Errors raised while coercing raw text into a typed parameter value.
#[derive(Debug, thiserror::Error)]
pub enum ValueError {
    #[error("invalid {ty} value {text:?}: {message}")]
    Coerce {
        ty: ParamType,
        text: String,
        message: String,
    },

    #[error("unknown parameter type: {0:?}")]
    UnknownType(String),
}

/// The small closed set of value types the registry understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    #[display("str")]
    Str,
    #[display("int")]
    Int,
    #[display("double")]
    Double,
    #[display("bool")]
    Bool,
    /// Opaque structured payload (YAML-like, carried as JSON).
    #[display("yaml")]
    Yaml,
}

impl std::str::FromStr for ParamType {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "str" | "string" => Ok(Self::Str),
            "int" => Ok(Self::Int),
            "double" => Ok(Self::Double),
            "bool" => Ok(Self::Bool),
            "yaml" => Ok(Self::Yaml),
            other => Err(ValueError::UnknownType(other.to_string())),
        }
    }
}

/// A typed parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    Double(f64),
    Bool(bool),
    /// Opaque structured payload, kept as parsed JSON.
    Structured(serde_json::Value),
}

impl ParamValue {
    /// Coerce already-resolved text into a value of the requested type.
    pub fn coerce(ty: ParamType, text: &str) -> Result<Self, ValueError> {
        let err = |message: String| ValueError::Coerce {
            ty,
            text: text.to_string(),
            message,
        };

        match ty {
            ParamType::Str => Ok(Self::Str(text.to_string())),
            ParamType::Int => text
                .trim()
                .parse::<i64>()
                .map(Self::Int)
                .map_err(|e| err(e.to_string())),
            ParamType::Double => text
                .trim()
                .parse::<f64>()
                .map(Self::Double)
                .map_err(|e| err(e.to_string())),
            ParamType::Bool => match text.trim() {
                "true" | "1" => Ok(Self::Bool(true)),
                "false" | "0" => Ok(Self::Bool(false)),
                _ => Err(err("expected true/false".to_string())),
            },
            ParamType::Yaml => serde_json::from_str(text)
                .map(Self::Structured)
                .map_err(|e| err(e.to_string())),
        }
    }

    /// The registry type tag for this value.
    pub fn param_type(&self) -> ParamType {
        match self {
            Self::Str(_) => ParamType::Str,
            Self::Int(_) => ParamType::Int,
            Self::Double(_) => ParamType::Double,
            Self::Bool(_) => ParamType::Bool,
            Self::Structured(_) => ParamType::Yaml,
        }
    }

    /// Single-line display form used for console output.
    pub fn display_form(&self) -> String {
        match self {
            Self::Str(s) => s.clone(),
            Self::Int(i) => i.to_string(),
            Self::Double(d) => d.to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Structured(v) => v.to_string(),
        }
    }
}

/// A resolved parameter declaration destined for the remote registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    /// Fully qualified, namespace-resolved parameter name.
    pub name: String,
    /// The declared value.
    pub value: ParamValue,
}

impl Param {
    pub fn new(name: impl Into<String>, value: ParamValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_int() {
        let v = ParamValue::coerce(ParamType::Int, "42").unwrap();
        assert_eq!(v, ParamValue::Int(42));
    }

    #[test]
    fn test_coerce_bool_accepts_numeric_forms() {
        assert_eq!(
            ParamValue::coerce(ParamType::Bool, "1").unwrap(),
            ParamValue::Bool(true)
        );
        assert_eq!(
            ParamValue::coerce(ParamType::Bool, "false").unwrap(),
            ParamValue::Bool(false)
        );
    }

    #[test]
    fn test_coerce_rejects_bad_double() {
        let result = ParamValue::coerce(ParamType::Double, "fast");
        assert!(matches!(result, Err(ValueError::Coerce { .. })));
    }

    #[test]
    fn test_coerce_yaml_keeps_structure() {
        let v = ParamValue::coerce(ParamType::Yaml, r#"{"rate": 10}"#).unwrap();
        match v {
            ParamValue::Structured(json) => assert_eq!(json["rate"], 10),
            other => panic!("expected structured value, got {:?}", other),
        }
    }

    #[test]
    fn test_param_type_from_str() {
        assert_eq!("double".parse::<ParamType>().unwrap(), ParamType::Double);
        assert!("tuple".parse::<ParamType>().is_err());
    }
}

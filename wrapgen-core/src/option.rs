use std::fmt;

use serde::{Deserialize, Serialize};

/// Value of a single compiler option or directive.
///
/// Deserializes from a bare TOML/JSON scalar, so `boundscheck = true`,
/// `language_level = 3` and `profile = "on"` all work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl OptionValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Int(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Str(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Str(value)
    }
}

/// Renders booleans as `True`/`False`, the spelling the compiler expects on
/// its command line.
impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(true) => write!(f, "True"),
            OptionValue::Bool(false) => write!(f, "False"),
            OptionValue::Int(i) => write!(f, "{}", i),
            OptionValue::Str(s) => write!(f, "{}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(OptionValue::Bool(true).to_string(), "True");
        assert_eq!(OptionValue::Bool(false).to_string(), "False");
        assert_eq!(OptionValue::Int(3).to_string(), "3");
        assert_eq!(OptionValue::from("fast").to_string(), "fast");
    }

    #[test]
    fn test_deserialize_scalars() {
        let values: Vec<OptionValue> = serde_json::from_str(r#"[true, 3, "x"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                OptionValue::Bool(true),
                OptionValue::Int(3),
                OptionValue::Str("x".into())
            ]
        );
    }

    #[test]
    fn test_as_bool() {
        assert_eq!(OptionValue::Bool(false).as_bool(), Some(false));
        assert_eq!(OptionValue::Int(0).as_bool(), None);
    }
}

use serde_yaml::Value as Yaml;

use super::ConfigError;

/// A leaf of the flattened configuration, before it is read as a concrete type.
#[derive(Debug, Clone)]
pub enum ConfigValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl ConfigValue {
    /// Convert a YAML scalar. Sequences become a comma-separated string so an
    /// environment variable can override them with the same text.
    pub(crate) fn from_yaml(leaf: &Yaml) -> Self {
        match leaf {
            Yaml::Null => Self::Null,
            Yaml::Bool(flag) => Self::Bool(*flag),
            Yaml::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(int), _) => Self::Integer(int),
                (None, Some(float)) => Self::Float(float),
                (None, None) => Self::String(n.to_string()),
            },
            Yaml::String(text) => Self::String(text.clone()),
            Yaml::Sequence(items) => Self::String(
                items
                    .iter()
                    .filter_map(|item| Self::from_yaml(item).as_text())
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            Yaml::Tagged(tagged) => Self::from_yaml(&tagged.value),
            Yaml::Mapping(_) => Self::Null,
        }
    }

    pub(crate) fn as_text(&self) -> Option<String> {
        Some(match self {
            Self::String(text) => text.clone(),
            Self::Integer(int) => int.to_string(),
            Self::Float(float) => float.to_string(),
            Self::Bool(flag) => flag.to_string(),
            Self::Null => return None,
        })
    }

    /// Integers, and strings that hold one (values read from the environment).
    fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(int) => Some(*int),
            Self::String(text) => text.trim().parse().ok(),
            _ => None,
        }
    }

    fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            Self::String(text) => match text.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => Some(true),
                "false" | "no" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Read a [`ConfigValue`] as `Self`; `key` names the entry in errors.
pub trait FromConfigValue: Sized {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError>;
}

fn or_mismatch<T>(found: Option<T>, key: &str, expected: &'static str) -> Result<T, ConfigError> {
    found.ok_or_else(|| ConfigError::TypeMismatch {
        key: key.to_string(),
        expected,
    })
}

impl FromConfigValue for String {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        or_mismatch(value.as_text(), key, "String")
    }
}

impl FromConfigValue for bool {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        or_mismatch(value.as_flag(), key, "bool")
    }
}

impl FromConfigValue for i64 {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        or_mismatch(value.as_integer(), key, "i64")
    }
}

/// Missing values (`~` in YAML) read as `None`.
impl<T: FromConfigValue> FromConfigValue for Option<T> {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        if let ConfigValue::Null = value {
            return Ok(None);
        }
        T::from_config_value(value, key).map(Some)
    }
}

macro_rules! unsigned {
    ($($ty:ident)*) => {$(
        impl FromConfigValue for $ty {
            fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
                let narrowed = value.as_integer().and_then(|int| $ty::try_from(int).ok());
                or_mismatch(narrowed, key, stringify!($ty))
            }
        }
    )*};
}

unsigned!(u16 u32 u64 usize);

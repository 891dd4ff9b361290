use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Значение опции фильтра: строка или целое число.
///
/// Serialized untagged, so a schema written as JSON keeps the `(string | number)[]` shape.
/// Numbers sort before text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Number(i64),
    Text(String),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Number(n) => write!(f, "{}", n),
            OptionValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Number(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        OptionValue::Number(value.into())
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Text(value)
    }
}

/// Declared numeric bounds of a range field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeBounds {
    pub min: f64,
    pub max: f64,
}

impl RangeBounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }
}

/// Тип поля фильтра
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FieldKind {
    /// Множественный выбор: набор кнопок-переключателей
    #[serde(rename = "multi-select")]
    MultiSelect { options: Vec<OptionValue> },

    /// Одиночный выбор
    #[serde(rename = "select")]
    SingleSelect { options: Vec<OptionValue> },

    /// Числовой диапазон с двумя ползунками
    #[serde(rename = "range")]
    Range { min: f64, max: f64 },
}

impl FieldKind {
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::MultiSelect { .. } => "multi-select",
            FieldKind::SingleSelect { .. } => "select",
            FieldKind::Range { .. } => "range",
        }
    }

    pub fn bounds(&self) -> Option<RangeBounds> {
        match self {
            FieldKind::Range { min, max } => Some(RangeBounds::new(*min, *max)),
            _ => None,
        }
    }
}

/// Описание одного фильтруемого поля. `label` is both the key and the display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    pub label: String,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FieldSchema {
    pub fn multi_select(label: impl Into<String>, options: Vec<OptionValue>) -> Self {
        Self {
            label: label.into(),
            kind: FieldKind::MultiSelect { options },
        }
    }

    pub fn select(label: impl Into<String>, options: Vec<OptionValue>) -> Self {
        Self {
            label: label.into(),
            kind: FieldKind::SingleSelect { options },
        }
    }

    pub fn range(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            label: label.into(),
            kind: FieldKind::Range { min, max },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("field label must not be empty")]
    EmptyLabel,
    #[error("duplicate field label '{0}'")]
    DuplicateLabel(String),
    #[error("field '{0}' has no options")]
    EmptyOptions(String),
    #[error("field '{label}' lists option '{option}' more than once")]
    DuplicateOption { label: String, option: String },
    #[error("field '{label}' has invalid bounds [{min}, {max}]")]
    InvalidBounds { label: String, min: f64, max: f64 },
    #[error("invalid schema document: {0}")]
    Parse(String),
}

/// Checks the schema-list invariants: unique non-empty labels, non-empty option lists
/// without repeats, finite range bounds with `min <= max`.
pub fn validate_schema(schema: &[FieldSchema]) -> Result<(), SchemaError> {
    let mut labels = HashSet::new();
    for field in schema {
        if field.label.trim().is_empty() {
            return Err(SchemaError::EmptyLabel);
        }
        if !labels.insert(field.label.as_str()) {
            return Err(SchemaError::DuplicateLabel(field.label.clone()));
        }
        match &field.kind {
            FieldKind::MultiSelect { options } | FieldKind::SingleSelect { options } => {
                if options.is_empty() {
                    return Err(SchemaError::EmptyOptions(field.label.clone()));
                }
                let mut seen = HashSet::new();
                for option in options {
                    if !seen.insert(option) {
                        return Err(SchemaError::DuplicateOption {
                            label: field.label.clone(),
                            option: option.to_string(),
                        });
                    }
                }
            }
            FieldKind::Range { min, max } => {
                if !min.is_finite() || !max.is_finite() || min > max {
                    return Err(SchemaError::InvalidBounds {
                        label: field.label.clone(),
                        min: *min,
                        max: *max,
                    });
                }
            }
        }
    }
    Ok(())
}

use super::schema::{validate_schema, FieldKind, FieldSchema, SchemaError};
use super::value::{FilterValue, RangePolicy};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use thiserror::Error;

/// Bumped whenever the persisted layout of [`FormState`] changes.
pub const PERSISTED_STATE_VERSION: u32 = 1;

/// Состояние формы фильтров: схема, значения по label и флаг загрузки.
///
/// A label absent from `values` means "default/unset".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormState {
    pub schema: Vec<FieldSchema>,
    pub values: BTreeMap<String, FilterValue>,
    pub loaded: bool,
}

impl FormState {
    /// Replaces the schema (no merge), clears every value and marks the form loaded.
    pub fn load(&mut self, schema: Vec<FieldSchema>) {
        self.schema = schema;
        self.values.clear();
        self.loaded = true;
    }

    /// Replaces the value of one label wholesale. The value is not checked against the
    /// field's declared type or bounds.
    pub fn set_value(&mut self, label: impl Into<String>, value: FilterValue) {
        self.values.insert(label.into(), value);
    }

    /// Clears all values; schema and loaded flag stay.
    pub fn reset(&mut self) {
        self.values.clear();
    }

    pub fn field(&self, label: &str) -> Option<&FieldSchema> {
        self.schema.iter().find(|f| f.label == label)
    }

    pub fn value(&self, label: &str) -> Option<&FilterValue> {
        self.values.get(label)
    }

    /// Количество активных фильтров (для бейджа)
    pub fn active_count(&self) -> usize {
        self.values.values().filter(|v| !v.is_empty()).count()
    }

    /// Values as untagged JSON, keyed by label.
    pub fn values_json(&self) -> Value {
        let map: Map<String, Value> = self
            .values
            .iter()
            .map(|(label, value)| (label.clone(), value.to_plain_json()))
            .collect();
        Value::Object(map)
    }

    pub fn values_json_pretty(&self) -> String {
        serde_json::to_string_pretty(&self.values_json()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Checks that a rehydrated snapshot is consistent with its own schema.
    pub fn validate(&self, policy: RangePolicy) -> Result<(), RehydrateError> {
        validate_schema(&self.schema)?;
        if !self.loaded && !self.values.is_empty() {
            return Err(RehydrateError::ValuesWithoutSchema);
        }
        for (label, value) in &self.values {
            let field = self
                .field(label)
                .ok_or_else(|| RehydrateError::UnknownField(label.clone()))?;
            if !value.matches_kind(&field.kind) {
                return Err(RehydrateError::KindMismatch {
                    label: label.clone(),
                    expected: field.kind.name(),
                });
            }
            check_value_fits(field, value, policy)?;
        }
        Ok(())
    }
}

fn check_value_fits(
    field: &FieldSchema,
    value: &FilterValue,
    policy: RangePolicy,
) -> Result<(), RehydrateError> {
    let out_of_field = || RehydrateError::ValueOutOfField(field.label.clone());
    match (&field.kind, value) {
        (FieldKind::MultiSelect { options }, FilterValue::Multi(set)) => {
            if !set.iter().all(|o| options.contains(o)) {
                return Err(out_of_field());
            }
        }
        (FieldKind::SingleSelect { options }, FilterValue::Single(option)) => {
            if !options.contains(option) {
                return Err(out_of_field());
            }
        }
        (FieldKind::Range { .. }, FilterValue::Range(range)) => {
            let bounds = field.kind.bounds().ok_or_else(out_of_field)?;
            if !bounds.contains(range.min) || !bounds.contains(range.max) {
                return Err(out_of_field());
            }
            if policy == RangePolicy::Clamp && range.min > range.max {
                return Err(out_of_field());
            }
        }
        _ => return Err(out_of_field()),
    }
    Ok(())
}

/// Why a persisted snapshot was thrown away at startup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RehydrateError {
    #[error("snapshot is not valid JSON: {0}")]
    Malformed(String),
    #[error("snapshot version {found} does not match {expected}")]
    VersionMismatch { found: u32, expected: u32 },
    #[error("snapshot schema is invalid: {0}")]
    Schema(#[from] SchemaError),
    #[error("snapshot has values but the form was never loaded")]
    ValuesWithoutSchema,
    #[error("value stored for unknown field '{0}'")]
    UnknownField(String),
    #[error("value for '{label}' does not match field type {expected}")]
    KindMismatch { label: String, expected: &'static str },
    #[error("value for '{0}' is outside the field's options or bounds")]
    ValueOutOfField(String),
    #[error("snapshot schema differs from the current schema")]
    SchemaChanged,
}

/// Конверт для localStorage: версия + снимок состояния.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedFormState {
    pub version: u32,
    pub state: FormState,
}

impl PersistedFormState {
    pub fn new(state: FormState) -> Self {
        Self {
            version: PERSISTED_STATE_VERSION,
            state,
        }
    }

    /// Decodes a stored snapshot and applies the discard-on-mismatch policy: wrong version,
    /// inconsistent values, or (when `expected_schema` is given) a loaded schema that
    /// differs from the current one.
    pub fn decode(
        raw: &str,
        expected_schema: Option<&[FieldSchema]>,
        policy: RangePolicy,
    ) -> Result<FormState, RehydrateError> {
        let persisted: PersistedFormState =
            serde_json::from_str(raw).map_err(|e| RehydrateError::Malformed(e.to_string()))?;
        if persisted.version != PERSISTED_STATE_VERSION {
            return Err(RehydrateError::VersionMismatch {
                found: persisted.version,
                expected: PERSISTED_STATE_VERSION,
            });
        }
        persisted.state.validate(policy)?;
        if let Some(expected) = expected_schema {
            if persisted.state.loaded && persisted.state.schema != expected {
                return Err(RehydrateError::SchemaChanged);
            }
        }
        Ok(persisted.state)
    }
}

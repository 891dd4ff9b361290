use super::config::FilterFormConfig;
use crate::shared::storage::{KeyValueStorage, StorageError};
use contracts::shared::filter_form::{
    drag_range_edge, pick_option, toggle_option, FieldSchema, FilterValue, FormState,
    OptionValue, PersistedFormState, RangeEdge,
};
use std::sync::Arc;

/// Хранилище значений фильтров.
///
/// Owns the [`FormState`] and the injected storage backend. Mutations never touch storage;
/// persistence happens only through [`FilterStore::save`], which the caller schedules.
pub struct FilterStore {
    state: FormState,
    storage: Arc<dyn KeyValueStorage>,
    config: FilterFormConfig,
    revision: u64,
}

impl FilterStore {
    /// Empty, unloaded store. Nothing is read from storage.
    pub fn new(storage: Arc<dyn KeyValueStorage>, config: FilterFormConfig) -> Self {
        Self {
            state: FormState::default(),
            storage,
            config,
            revision: 0,
        }
    }

    /// Restores the last saved snapshot. Anything unreadable or inconsistent is discarded
    /// and the store starts unloaded.
    pub fn rehydrate(
        storage: Arc<dyn KeyValueStorage>,
        config: FilterFormConfig,
        expected_schema: Option<&[FieldSchema]>,
    ) -> Self {
        let mut store = Self::new(storage, config);
        let raw = match store.storage.get(&store.config.storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return store,
            Err(e) => {
                log::warn!("filter state not restored: {}", e);
                return store;
            }
        };

        let expected = if store.config.discard_on_schema_mismatch {
            expected_schema
        } else {
            None
        };
        match PersistedFormState::decode(&raw, expected, store.config.range_policy) {
            Ok(state) => {
                log::debug!(
                    "filter state restored: loaded={}, {} value(s)",
                    state.loaded,
                    state.values.len()
                );
                store.state = state;
            }
            Err(e) => {
                log::warn!("discarding stored filter state: {}", e);
                if let Err(e) = store.storage.remove(&store.config.storage_key) {
                    log::warn!("failed to remove stale filter state: {}", e);
                }
            }
        }
        store
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Owned snapshot of the current state.
    pub fn get_state(&self) -> FormState {
        self.state.clone()
    }

    pub fn config(&self) -> &FilterFormConfig {
        &self.config
    }

    /// Incremented by every mutation; used to schedule saves.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn load(&mut self, schema: Vec<FieldSchema>) {
        log::debug!("filter form loaded with {} field(s)", schema.len());
        self.state.load(schema);
        self.touch();
    }

    pub fn set_value(&mut self, label: impl Into<String>, value: FilterValue) {
        self.state.set_value(label, value);
        self.touch();
    }

    pub fn reset(&mut self) {
        self.state.reset();
        self.touch();
    }

    pub fn toggle_option(&mut self, label: &str, option: &OptionValue) {
        let current = self.state.value(label).and_then(FilterValue::as_multi);
        let selected = toggle_option(current, option);
        self.set_value(label, FilterValue::Multi(selected));
    }

    pub fn pick_option(&mut self, label: &str, option: &OptionValue) {
        self.set_value(label, FilterValue::Single(pick_option(option)));
    }

    /// Moves one slider of a range field. Ignored for labels that are not range fields.
    pub fn drag_range_edge(&mut self, label: &str, edge: RangeEdge, value: f64) {
        let Some(bounds) = self.state.field(label).and_then(|f| f.kind.bounds()) else {
            log::warn!("'{}' is not a range field, drag ignored", label);
            return;
        };
        let current = self.state.value(label).and_then(FilterValue::as_range);
        let pair = drag_range_edge(current, bounds, edge, value, self.config.range_policy);
        self.set_value(label, FilterValue::Range(pair));
    }

    /// Writes the whole state under the configured key.
    pub fn save(&self) -> Result<(), StorageError> {
        let snapshot = PersistedFormState::new(self.state.clone());
        let raw = serde_json::to_string(&snapshot)
            .map_err(|e| StorageError::Serialize(e.to_string()))?;
        self.storage.set(&self.config.storage_key, &raw)
    }

    /// Best-effort [`FilterStore::save`]: failures are logged and the in-memory state stays.
    pub fn persist(&self) {
        if let Err(e) = self.save() {
            log::warn!("filter state not saved: {}", e);
        }
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::storage::MemoryStorage;
    use crate::filter_form::config::DEFAULT_STORAGE_KEY as DEFAULT_KEY;
    use contracts::shared::filter_form::{RangePolicy, RangeValue};

    struct BrokenStorage;

    impl KeyValueStorage for BrokenStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable)
        }

        fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Write(key.to_string()))
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            Err(StorageError::Write(key.to_string()))
        }
    }

    fn schema() -> Vec<FieldSchema> {
        vec![
            FieldSchema::multi_select("Комнаты", vec!["Студия".into(), 1.into(), 2.into()]),
            FieldSchema::select("Отделка", vec!["Все".into(), "Есть".into(), "Нет".into()]),
            FieldSchema::range("Этаж", 1.0, 20.0),
        ]
    }

    fn memory_store(storage: &MemoryStorage) -> FilterStore {
        FilterStore::new(Arc::new(storage.clone()), FilterFormConfig::default())
    }

    #[test]
    fn test_load_then_get_state() {
        let mut store = memory_store(&MemoryStorage::new());
        assert!(!store.state().loaded);

        store.load(schema());
        let state = store.get_state();
        assert_eq!(state.schema, schema());
        assert!(state.values.is_empty());
        assert!(state.loaded);
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn test_typed_mutators() {
        let mut store = memory_store(&MemoryStorage::new());
        store.load(schema());

        store.toggle_option("Комнаты", &"Студия".into());
        store.toggle_option("Комнаты", &2.into());
        store.toggle_option("Комнаты", &"Студия".into());
        store.pick_option("Отделка", &"Есть".into());
        store.pick_option("Отделка", &"Нет".into());
        store.drag_range_edge("Этаж", RangeEdge::Max, 9.0);

        assert_eq!(
            store.state().values_json(),
            serde_json::json!({
                "Комнаты": [2],
                "Отделка": "Нет",
                "Этаж": {"min": 1, "max": 9},
            })
        );
    }

    #[test]
    fn test_reset_bumps_revision_and_keeps_schema() {
        let mut store = memory_store(&MemoryStorage::new());
        store.load(schema());
        store.pick_option("Отделка", &"Есть".into());
        assert_eq!(store.revision(), 2);

        store.reset();
        assert_eq!(store.revision(), 3);
        assert!(store.state().values.is_empty());
        assert!(store.state().loaded);
        assert_eq!(store.state().schema, schema());
    }

    #[test]
    fn test_drag_on_non_range_is_ignored() {
        let mut store = memory_store(&MemoryStorage::new());
        store.load(schema());
        store.drag_range_edge("Отделка", RangeEdge::Min, 3.0);
        store.drag_range_edge("Нет такого", RangeEdge::Min, 3.0);
        assert!(store.state().values.is_empty());
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn test_free_policy_keeps_inverted_pair() {
        let config = FilterFormConfig {
            range_policy: RangePolicy::Free,
            ..FilterFormConfig::default()
        };
        let mut store = FilterStore::new(Arc::new(MemoryStorage::new()), config);
        store.load(schema());
        store.drag_range_edge("Этаж", RangeEdge::Max, 5.0);
        store.drag_range_edge("Этаж", RangeEdge::Min, 12.0);
        assert_eq!(
            store.state().value("Этаж").and_then(FilterValue::as_range),
            Some(RangeValue::new(12.0, 5.0))
        );
    }

    #[test]
    fn test_save_and_rehydrate() {
        let storage = MemoryStorage::new();
        let mut store = memory_store(&storage);
        store.load(schema());
        store.pick_option("Отделка", &"Есть".into());
        store.save().unwrap();

        let restored = FilterStore::rehydrate(
            Arc::new(storage.clone()),
            FilterFormConfig::default(),
            Some(schema().as_slice()),
        );
        assert_eq!(restored.get_state(), store.get_state());
        assert_eq!(restored.revision(), 0);
    }

    #[test]
    fn test_mutations_do_not_write_until_saved() {
        let storage = MemoryStorage::new();
        let mut store = memory_store(&storage);
        store.load(schema());
        assert_eq!(storage.get(DEFAULT_KEY), Ok(None));

        store.persist();
        assert!(storage.get(DEFAULT_KEY).unwrap().is_some());
    }

    #[test]
    fn test_rehydrate_discards_changed_schema() {
        let storage = MemoryStorage::new();
        let mut store = memory_store(&storage);
        store.load(schema());
        store.save().unwrap();

        let other = vec![FieldSchema::range("Цена, млн ₽", 1.0, 20.0)];
        let restored = FilterStore::rehydrate(
            Arc::new(storage.clone()),
            FilterFormConfig::default(),
            Some(other.as_slice()),
        );
        assert_eq!(restored.get_state(), FormState::default());
        assert_eq!(storage.get(DEFAULT_KEY), Ok(None));
    }

    #[test]
    fn test_rehydrate_keeps_snapshot_when_mismatch_allowed() {
        let storage = MemoryStorage::new();
        let mut store = memory_store(&storage);
        store.load(schema());
        store.save().unwrap();

        let config = FilterFormConfig {
            discard_on_schema_mismatch: false,
            ..FilterFormConfig::default()
        };
        let other = vec![FieldSchema::range("Цена, млн ₽", 1.0, 20.0)];
        let restored =
            FilterStore::rehydrate(Arc::new(storage.clone()), config, Some(other.as_slice()));
        assert_eq!(restored.state().schema, schema());
    }

    #[test]
    fn test_rehydrate_discards_garbage() {
        let storage = MemoryStorage::new();
        storage.set(DEFAULT_KEY, r#"{"state": {"filters": []}}"#).unwrap();

        let restored =
            FilterStore::rehydrate(Arc::new(storage.clone()), FilterFormConfig::default(), None);
        assert!(!restored.state().loaded);
        assert_eq!(storage.get(DEFAULT_KEY), Ok(None));
    }

    #[test]
    fn test_broken_storage_is_not_fatal() {
        let mut store = FilterStore::rehydrate(
            Arc::new(BrokenStorage),
            FilterFormConfig::default(),
            Some(schema().as_slice()),
        );
        assert!(!store.state().loaded);

        store.load(schema());
        store.pick_option("Отделка", &"Все".into());
        assert!(matches!(store.save(), Err(StorageError::Write(_))));
        store.persist();
        assert_eq!(store.state().values_json(), serde_json::json!({"Отделка": "Все"}));
    }
}

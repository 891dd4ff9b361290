use contracts::shared::filter_form::RangePolicy;

/// Ключ localStorage, под которым хранится снимок формы
pub const DEFAULT_STORAGE_KEY: &str = "filter-storage";

/// When the store snapshot is written to storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SaveMode {
    /// After every mutation.
    #[default]
    Immediate,
    /// Once no mutation has happened for `ms` milliseconds (slider drags fire a lot).
    Debounced { ms: u32 },
    /// Only when the caller invokes `save`.
    Manual,
}

impl SaveMode {
    /// Whether a save scheduled at revision `scheduled` should be written, given the store
    /// revision `latest` at the moment the save runs (`None` once the store is gone).
    ///
    /// Revision 0 is a freshly rehydrated store with nothing new to write. A debounced
    /// save is dropped if another mutation happened while it was waiting.
    pub fn should_save(self, scheduled: u64, latest: Option<u64>) -> bool {
        if scheduled == 0 || latest != Some(scheduled) {
            return false;
        }
        match self {
            SaveMode::Immediate | SaveMode::Debounced { .. } => true,
            SaveMode::Manual => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FilterFormConfig {
    pub storage_key: String,
    pub range_policy: RangePolicy,
    pub save_mode: SaveMode,
    /// Drop a rehydrated snapshot whose schema differs from the provider's schema.
    pub discard_on_schema_mismatch: bool,
}

impl Default for FilterFormConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            range_policy: RangePolicy::Clamp,
            save_mode: SaveMode::Immediate,
            discard_on_schema_mismatch: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEBOUNCED: SaveMode = SaveMode::Debounced { ms: 300 };

    #[test]
    fn test_immediate_saves_every_mutation() {
        assert!(SaveMode::Immediate.should_save(1, Some(1)));
        assert!(SaveMode::Immediate.should_save(7, Some(7)));
    }

    #[test]
    fn test_manual_never_saves() {
        assert!(!SaveMode::Manual.should_save(3, Some(3)));
    }

    #[test]
    fn test_rehydrated_revision_is_not_saved() {
        assert!(!SaveMode::Immediate.should_save(0, Some(0)));
        assert!(!DEBOUNCED.should_save(0, Some(0)));
    }

    #[test]
    fn test_debounced_drops_stale_revision() {
        assert!(!DEBOUNCED.should_save(4, Some(5)));
        assert!(!DEBOUNCED.should_save(4, None));
    }

    #[test]
    fn test_debounced_saves_current_revision() {
        assert!(DEBOUNCED.should_save(5, Some(5)));
    }
}

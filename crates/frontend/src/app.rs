use crate::filter_form::ui::DynamicFilter;
use crate::filter_form::{provide_filter_form, FilterFormConfig, FilterStore};
use crate::shared::storage::default_storage;
use contracts::shared::filter_form::{MockSchemaProvider, SchemaProvider};
use leptos::prelude::*;
use std::sync::Arc;

#[component]
pub fn App() -> impl IntoView {
    // Схема пока захардкожена; провайдер подменяется без изменений в форме
    let provider: Arc<dyn SchemaProvider> = Arc::new(MockSchemaProvider);
    let current_schema = provider.schema();

    let store = FilterStore::rehydrate(
        default_storage(),
        FilterFormConfig::default(),
        Some(current_schema.as_slice()),
    );
    provide_filter_form(store, provider);

    view! {
        <main class="app">
            <DynamicFilter />
        </main>
    }
}

use super::config::SaveMode;
use super::store::FilterStore;
use contracts::shared::filter_form::{OptionValue, RangeEdge, SchemaProvider};
use leptos::prelude::*;
use std::sync::Arc;

/// Реактивная обёртка над [`FilterStore`], передаётся компонентам через context.
#[derive(Clone, Copy)]
pub struct FilterFormContext {
    pub store: RwSignal<FilterStore>,
    provider: StoredValue<Arc<dyn SchemaProvider>>,
}

impl FilterFormContext {
    pub fn new(store: FilterStore, provider: Arc<dyn SchemaProvider>) -> Self {
        Self {
            store: RwSignal::new(store),
            provider: StoredValue::new(provider),
        }
    }

    /// Asks the schema provider for the schema and loads it into the store.
    pub fn load_form(&self) {
        let schema = self.provider.with_value(|p| p.schema());
        self.store.update(|s| s.load(schema));
    }

    pub fn reset(&self) {
        self.store.update(|s| s.reset());
    }

    pub fn toggle_option(&self, label: &str, option: &OptionValue) {
        self.store.update(|s| s.toggle_option(label, option));
    }

    pub fn pick_option(&self, label: &str, option: &OptionValue) {
        self.store.update(|s| s.pick_option(label, option));
    }

    pub fn drag_range_edge(&self, label: &str, edge: RangeEdge, value: f64) {
        self.store.update(|s| s.drag_range_edge(label, edge, value));
    }

    /// Explicit save hook, also used by the autosave effect.
    pub fn save_now(&self) {
        self.store.with_untracked(|s| s.persist());
    }
}

/// Creates the context, wires saving according to the store's [`SaveMode`] and provides it
/// to the component tree.
pub fn provide_filter_form(
    store: FilterStore,
    provider: Arc<dyn SchemaProvider>,
) -> FilterFormContext {
    let ctx = FilterFormContext::new(store, provider);
    install_autosave(ctx);
    provide_context(ctx);
    ctx
}

/// Hook to access the filter form context
pub fn use_filter_form() -> FilterFormContext {
    use_context::<FilterFormContext>()
        .expect("FilterFormContext not found. Call provide_filter_form first.")
}

fn install_autosave(ctx: FilterFormContext) {
    let mode = ctx.store.with_untracked(|s| s.config().save_mode);
    if mode == SaveMode::Manual {
        return;
    }

    Effect::new(move |_| {
        let revision = ctx.store.with(|s| s.revision());
        if !mode.should_save(revision, Some(revision)) {
            return;
        }
        match mode {
            SaveMode::Debounced { ms } => {
                leptos::task::spawn_local(async move {
                    gloo_timers::future::TimeoutFuture::new(ms).await;
                    let latest = ctx.store.try_with_untracked(|s| s.revision());
                    if mode.should_save(revision, latest) {
                        ctx.save_now();
                    }
                });
            }
            _ => ctx.save_now(),
        }
    });
}

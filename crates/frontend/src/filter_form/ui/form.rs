use super::fields::FilterField;
use crate::filter_form::context::use_filter_form;
use crate::shared::components::filter_panel::FilterPanel;
use crate::shared::icons::icon;
use crate::shared::json_viewer::JsonViewer;
use leptos::prelude::*;
use thaw::*;

/// Динамическая форма фильтров.
///
/// Unloaded: only the "Загрузить форму" trigger. Loaded: one control group per schema
/// field, the reset trigger and the dump of the current values.
#[component]
pub fn DynamicFilter() -> impl IntoView {
    let ctx = use_filter_form();

    let is_loaded = Memo::new(move |_| ctx.store.with(|s| s.state().loaded));
    let active_count = Signal::derive(move || ctx.store.with(|s| s.state().active_count()));
    let values_dump = Signal::derive(move || ctx.store.with(|s| s.state().values_json_pretty()));
    let is_expanded = RwSignal::new(true);

    view! {
        <div class="dynamic-filter">
            <Show
                when=move || is_loaded.get()
                fallback=move || view! {
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| ctx.load_form()
                    >
                        "Загрузить форму"
                    </Button>
                }
            >
                <FilterPanel is_expanded=is_expanded active_filters_count=active_count>
                    <For
                        each=move || ctx.store.with(|s| s.state().schema.clone())
                        key=|field| field.label.clone()
                        children=move |field| view! { <FilterField field=field /> }
                    />
                </FilterPanel>

                <div class="dynamic-filter__actions">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| ctx.reset()
                    >
                        {icon("refresh")}
                        " Сбросить фильтры"
                    </Button>
                </div>

                <JsonViewer json_content=values_dump title="Выбранные значения" />
            </Show>
        </div>
    }
}

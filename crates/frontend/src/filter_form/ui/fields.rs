use crate::filter_form::context::use_filter_form;
use crate::shared::components::ui::ToggleButton;
use contracts::shared::filter_form::{
    FieldKind, FieldSchema, FilterValue, OptionValue, RangeBounds, RangeEdge, RangeValue,
};
use leptos::prelude::*;

/// Группа контролов одного поля, по типу из схемы.
#[component]
pub fn FilterField(field: FieldSchema) -> impl IntoView {
    let FieldSchema { label, kind } = field;

    let control = match kind {
        FieldKind::MultiSelect { options } => {
            view! { <MultiSelectControl label=label.clone() options=options /> }.into_any()
        }
        FieldKind::SingleSelect { options } => {
            view! { <SingleSelectControl label=label.clone() options=options /> }.into_any()
        }
        FieldKind::Range { min, max } => {
            view! { <RangeControl label=label.clone() bounds=RangeBounds::new(min, max) /> }
                .into_any()
        }
    };

    view! {
        <div class="filter-field">
            <label class="filter-field__label">{label}</label>
            <div class="filter-field__control">{control}</div>
        </div>
    }
}

#[component]
fn MultiSelectControl(label: String, options: Vec<OptionValue>) -> impl IntoView {
    let ctx = use_filter_form();

    options
        .into_iter()
        .map(|option| {
            let text = option.to_string();
            let selected = Signal::derive({
                let label = label.clone();
                let option = option.clone();
                move || {
                    ctx.store.with(|s| {
                        s.state()
                            .value(&label)
                            .and_then(FilterValue::as_multi)
                            .is_some_and(|set| set.contains(&option))
                    })
                }
            });
            let on_click = Callback::new({
                let label = label.clone();
                move |_: ()| ctx.toggle_option(&label, &option)
            });
            view! {
                <ToggleButton selected=selected on_click=on_click>
                    {text}
                </ToggleButton>
            }
        })
        .collect_view()
}

#[component]
fn SingleSelectControl(label: String, options: Vec<OptionValue>) -> impl IntoView {
    let ctx = use_filter_form();

    options
        .into_iter()
        .map(|option| {
            let text = option.to_string();
            let selected = Signal::derive({
                let label = label.clone();
                let option = option.clone();
                move || {
                    ctx.store.with(|s| {
                        s.state().value(&label).and_then(FilterValue::as_single) == Some(&option)
                    })
                }
            });
            let on_click = Callback::new({
                let label = label.clone();
                move |_: ()| ctx.pick_option(&label, &option)
            });
            view! {
                <ToggleButton selected=selected on_click=on_click>
                    {text}
                </ToggleButton>
            }
        })
        .collect_view()
}

#[component]
fn RangeControl(label: String, bounds: RangeBounds) -> impl IntoView {
    let ctx = use_filter_form();

    // Пока значение не задано, ползунки стоят на границах поля
    let current = Memo::new({
        let label = label.clone();
        move |_| {
            ctx.store
                .with(|s| s.state().value(&label).and_then(FilterValue::as_range))
                .unwrap_or_else(|| RangeValue::from(bounds))
        }
    });

    let on_edge = move |edge: RangeEdge| {
        let label = label.clone();
        move |ev: leptos::ev::Event| match event_target_value(&ev).parse::<f64>() {
            Ok(value) => ctx.drag_range_edge(&label, edge, value),
            Err(e) => log::warn!("bad slider value for '{}': {}", label, e),
        }
    };

    view! {
        <div class="range-control">
            <input
                type="range"
                class="range-control__slider"
                min=bounds.min.to_string()
                max=bounds.max.to_string()
                prop:value=move || current.get().min.to_string()
                on:input=on_edge(RangeEdge::Min)
            />
            <input
                type="range"
                class="range-control__slider"
                min=bounds.min.to_string()
                max=bounds.max.to_string()
                prop:value=move || current.get().max.to_string()
                on:input=on_edge(RangeEdge::Max)
            />
            <div class="range-control__display">{move || current.get().to_string()}</div>
        </div>
    }
}

use leptos::prelude::*;

/// Кнопка-опция фильтра: "selected" class while the option is chosen.
#[component]
pub fn ToggleButton(
    /// Whether the option is currently selected (reactive)
    #[prop(into)]
    selected: Signal<bool>,
    /// Click handler
    on_click: Callback<()>,
    /// Button content (option text)
    children: Children,
) -> impl IntoView {
    view! {
        <button
            type="button"
            class=move || {
                let state = if selected.get() { "selected" } else { "" };
                format!("button button--option {}", state)
            }
            aria-pressed=move || selected.get().to_string()
            on:click=move |_| on_click.run(())
        >
            {children()}
        </button>
    }
}

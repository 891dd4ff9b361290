use crate::shared::icons::icon;
use leptos::prelude::*;

/// Отладочный вывод JSON с копированием в буфер обмена
#[component]
pub fn JsonViewer(
    /// JSON строка для отображения (реактивная)
    #[prop(into)]
    json_content: Signal<String>,
    /// Заголовок
    #[prop(optional, into)]
    title: Option<String>,
) -> impl IntoView {
    let (copied, set_copied) = signal(false);

    // Копирование в буфер обмена
    let handle_copy = move |_| {
        let Some(window) = web_sys::window() else {
            log::warn!("clipboard unavailable: no window");
            return;
        };
        let clipboard = window.navigator().clipboard();
        let content = json_content.get_untracked();
        leptos::task::spawn_local(async move {
            let promise = clipboard.write_text(&content);
            if wasm_bindgen_futures::JsFuture::from(promise).await.is_err() {
                log::warn!("clipboard write rejected");
                return;
            }
            set_copied.set(true);

            // Сбросить через 2 секунды
            gloo_timers::future::TimeoutFuture::new(2000).await;
            set_copied.set(false);
        });
    };

    view! {
        <div class="json-viewer">
            <div class="json-viewer__header">
                <h3 class="json-viewer__title">
                    {title.unwrap_or_else(|| "JSON Данные".to_string())}
                </h3>
                <button
                    class="button button--secondary button--small"
                    on:click=handle_copy
                    title="Копировать в буфер обмена"
                >
                    {move || if copied.get() {
                        view! {
                            <>
                                {icon("check")}
                                {"Скопировано!"}
                            </>
                        }.into_any()
                    } else {
                        view! {
                            <>
                                {icon("copy")}
                                {"Копировать"}
                            </>
                        }.into_any()
                    }}
                </button>
            </div>

            <div class="json-viewer__body">
                <pre class="json-viewer__content filter">
                    {move || json_content.get()}
                </pre>
            </div>

            <div class="json-viewer__footer">
                {"Строк: "}
                <strong>{move || json_content.with(|c| c.lines().count())}</strong>
            </div>
        </div>
    }
}

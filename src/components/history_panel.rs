//! History Panel Component
//!
//! Recently toggled lists, newest first.

use leptos::prelude::*;

use crate::context::TodoContext;

#[component]
pub fn HistoryPanel() -> impl IntoView {
    let ctx = use_context::<TodoContext>().expect("TodoContext should be provided");

    let lines = move || {
        ctx.history.with(|h| {
            h.entries()
                .map(|entry| format!("{}: {}/{} done", entry.label(), entry.completed_count(), entry.todos.len()))
                .collect::<Vec<_>>()
        })
    };

    view! {
        <aside class="history-panel">
            <div class="history-header">
                <h3>"History"</h3>
                <button
                    class="clear-btn"
                    disabled=move || ctx.history.with(|h| h.is_empty())
                    on:click=move |_| ctx.clear_history()
                >
                    "Clear"
                </button>
            </div>
            <Show
                when=move || ctx.history.with(|h| !h.is_empty())
                fallback=|| view! { <p class="history-empty">"No changes yet"</p> }
            >
                <ul class="history-list">
                    {move || lines().into_iter().map(|line| view! { <li>{line}</li> }).collect_view()}
                </ul>
            </Show>
        </aside>
    }
}

//! Todo Widget App
//!
//! Lists on the left, completion history on the right.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::{HistoryPanel, TodoListCard};
use crate::context::TodoContext;
use crate::history::History;
use crate::store::{TodosState, TodosStateStoreFields, TodosStore};

#[component]
pub fn App() -> impl IntoView {
    // State
    let store: TodosStore = Store::new(TodosState::default());
    let history = signal(History::new());

    // Provide context to all children
    provide_context(store);
    let ctx = TodoContext::new(store, history);
    provide_context(ctx);

    // Hydrate from localStorage on mount
    Effect::new(move |_| {
        ctx.reload();
        log::info!("[APP] Loaded {} lists", store.list().with_untracked(|l| l.len()));
    });

    view! {
        <div class="todo-widget">
            <main class="todo-lists">
                <h1>"Todos"</h1>

                <Show
                    when=move || store.list().with(|l| !l.is_empty())
                    fallback=|| view! { <p class="todo-empty">"Nothing to do"</p> }
                >
                    <For
                        each=move || store.list().get()
                        key=|list| {
                            // Re-render a card whenever any completion flag changes
                            (
                                list.id.clone(),
                                list.todos.iter().map(|t| (t.id.clone(), t.completed)).collect::<Vec<_>>(),
                            )
                        }
                        children=move |list| view! { <TodoListCard list=list /> }
                    />
                </Show>

                <p class="item-count">{move || {
                    store.list().with(|lists| {
                        let todos: usize = lists.iter().map(|l| l.todos.len()).sum();
                        format!("{} lists, {} todos", lists.len(), todos)
                    })
                }}</p>
            </main>

            <HistoryPanel />
        </div>
    }
}

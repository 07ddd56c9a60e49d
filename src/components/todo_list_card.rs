//! Todo List Card Component
//!
//! One list with its todos, a completion checkbox per todo and a delete button.

use leptos::prelude::*;

use crate::context::TodoContext;
use crate::models::TodoList;

/// A single todo list
#[component]
pub fn TodoListCard(list: TodoList) -> impl IntoView {
    let ctx = use_context::<TodoContext>().expect("TodoContext should be provided");

    let list_id = list.id.clone();
    let delete_id = list.id.clone();
    let title = list.label();
    let progress = format!("{}/{}", list.completed_count(), list.todos.len());

    view! {
        <section class="todo-list-card">
            <header class="todo-list-header">
                <h2>{title}</h2>
                <span class="todo-list-progress">{progress}</span>
                <button
                    class="delete-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        ctx.delete(&delete_id);
                    }
                >
                    "×"
                </button>
            </header>

            <ul class="todo-items">
                {list.todos.into_iter().map(|todo| {
                    let todo_id = todo.id.clone();
                    let list_id = list_id.clone();
                    let completed = todo.completed;
                    let text = todo.label();
                    view! {
                        <li class=if completed { "todo-item completed" } else { "todo-item" }>
                            <input
                                type="checkbox"
                                checked=completed
                                on:change=move |_| ctx.toggle(&todo_id, &list_id)
                            />
                            <span class="todo-text">{text}</span>
                        </li>
                    }
                }).collect_view()}
            </ul>
        </section>
    }
}

//! Widget Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use crate::confirm::BrowserConfirm;
use crate::history::History;
use crate::models::{TodoId, TodoList};
use crate::storage::BrowserStorage;
use crate::store::{Todos, TodosStore};

/// Widget-wide handles provided via context
#[derive(Clone, Copy)]
pub struct TodoContext {
    /// Todo lists
    pub store: TodosStore,
    /// Snapshots recorded on completion - read
    pub history: ReadSignal<History>,
    /// Snapshots recorded on completion - write
    set_history: WriteSignal<History>,
}

impl TodoContext {
    pub fn new(store: TodosStore, history: (ReadSignal<History>, WriteSignal<History>)) -> Self {
        Self {
            store,
            history: history.0,
            set_history: history.1,
        }
    }

    // Storage handles are not Send, so they are looked up per action.
    fn actions(&self) -> Todos<BrowserStorage> {
        Todos::browser(self.store)
    }

    /// Reload lists from localStorage
    pub fn reload(&self) {
        self.actions().load_from_storage();
    }

    /// Toggle a todo and record the updated list in history
    pub fn toggle(&self, todo_id: &TodoId, list_id: &TodoId) {
        let set_history = self.set_history;
        let mut record = |entry: &TodoList| set_history.update(|h| h.record(entry.clone()));
        self.actions().complete_todo(todo_id, list_id, Some(&mut record));
    }

    /// Delete a list after the browser confirm dialog
    pub fn delete(&self, id: &TodoId) -> bool {
        self.actions().delete_item(id, &BrowserConfirm)
    }

    pub fn clear_history(&self) {
        self.set_history.update(History::clear);
    }
}

//! Todo State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The list is
//! mirrored to persistent storage after every mutating action.

use leptos::prelude::*;
use reactive_stores::Store;
use serde_json::Value;

use crate::confirm::Confirm;
use crate::models::{decode_each, TodoId, TodoList};
use crate::storage::{BrowserStorage, KeyValueStorage, STORAGE_KEY};

/// Prompt shown before a list is deleted
pub const DELETE_CONFIRM_MESSAGE: &str = "Are you sure you want to delete this item?";

/// Widget state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct TodosState {
    /// All todo lists, in display order
    pub list: Vec<TodoList>,
}

/// Type alias for the store
pub type TodosStore = Store<TodosState>;

/// Get the todos store from context
pub fn use_todos_store() -> TodosStore {
    expect_context::<TodosStore>()
}

/// Actions on the store, persisting through `S`.
///
/// `storage` is `None` outside the browser; actions then only touch memory.
pub struct Todos<S> {
    store: TodosStore,
    storage: Option<S>,
}

impl Todos<BrowserStorage> {
    /// Actions backed by `window.localStorage`, when there is one
    pub fn browser(store: TodosStore) -> Self {
        Self::new(store, BrowserStorage::local())
    }
}

impl<S: KeyValueStorage> Todos<S> {
    pub fn new(store: TodosStore, storage: Option<S>) -> Self {
        Self { store, storage }
    }

    /// Current list, without subscribing
    pub fn list(&self) -> Vec<TodoList> {
        self.store.list().get_untracked()
    }

    /// Replace the whole list and persist it
    pub fn update_list(&self, new_list: Vec<TodoList>) {
        let encoded = self.storage.as_ref().map(|_| serde_json::to_string(&new_list));
        *self.store.list().write() = new_list;

        if let (Some(storage), Some(encoded)) = (&self.storage, encoded) {
            let result = encoded
                .map_err(|e| e.to_string())
                .and_then(|json| storage.set_item(STORAGE_KEY, &json).map_err(|e| e.to_string()));
            if let Err(e) = result {
                log::warn!("[STORE] Failed to persist todo lists: {}", e);
            }
        }
    }

    /// Hydrate the list from storage. Absent or unreadable data yields an empty list.
    pub fn load_from_storage(&self) {
        let Some(storage) = &self.storage else {
            return;
        };

        let loaded = match storage.get_item(STORAGE_KEY) {
            Ok(Some(saved)) => parse_saved(&saved),
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("[STORE] Failed to read {}: {}", STORAGE_KEY, e);
                Vec::new()
            }
        };
        log::debug!("[STORE] Loaded {} lists", loaded.len());
        *self.store.list().write() = loaded;
    }

    /// Remove the list with `id` once the user confirms. Returns whether it was confirmed.
    pub fn delete_item(&self, id: &TodoId, confirm: &impl Confirm) -> bool {
        if !confirm.confirm(DELETE_CONFIRM_MESSAGE) {
            log::debug!("[STORE] Delete of {} cancelled", id);
            return false;
        }

        let remaining = self.list().into_iter().filter(|item| &item.id != id).collect();
        self.update_list(remaining);
        true
    }

    /// Flip `completed` of one todo inside one list, persist, and hand the
    /// updated list entry to `save_to_history` when that entry exists.
    ///
    /// Ids match by `TodoId` equality: `1` matches `1.0` but not `"1"`.
    pub fn complete_todo(
        &self,
        todo_id: &TodoId,
        list_id: &TodoId,
        save_to_history: Option<&mut dyn FnMut(&TodoList)>,
    ) {
        let updated = toggle_todo(self.list(), list_id, todo_id);
        let entry = updated.iter().find(|item| &item.id == list_id).cloned();
        self.update_list(updated);

        if let (Some(save), Some(entry)) = (save_to_history, entry) {
            save(&entry);
        }
    }

    #[cfg(test)]
    fn storage(&self) -> Option<&S> {
        self.storage.as_ref()
    }
}

// Entries are decoded one by one so a single odd entry doesn't drop the rest.
fn parse_saved(saved: &str) -> Vec<TodoList> {
    match serde_json::from_str::<Option<Vec<Value>>>(saved) {
        Ok(entries) => decode_each(entries.unwrap_or_default(), "todo list"),
        Err(e) => {
            log::warn!("[STORE] Discarding unreadable {}: {}", STORAGE_KEY, e);
            Vec::new()
        }
    }
}

fn toggle_todo(list: Vec<TodoList>, list_id: &TodoId, todo_id: &TodoId) -> Vec<TodoList> {
    list.into_iter()
        .map(|mut item| {
            if &item.id == list_id {
                item.todos
                    .iter_mut()
                    .filter(|t| &t.id == todo_id)
                    .for_each(|t| t.completed = !t.completed);
            }
            item
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TodoItem;
    use crate::storage::{MemoryStorage, StorageError, StorageResult};
    use serde_json::json;

    fn make_list(id: i64, todos: &[(i64, bool)]) -> TodoList {
        let todos = todos
            .iter()
            .map(|(tid, completed)| TodoItem {
                completed: *completed,
                ..TodoItem::new(*tid).with_field("text", format!("Todo {}", tid))
            })
            .collect();
        TodoList::new(id, todos).with_field("title", format!("List {}", id))
    }

    fn setup() -> Todos<MemoryStorage> {
        Todos::new(Store::new(TodosState::default()), Some(MemoryStorage::new()))
    }

    fn saved(todos: &Todos<MemoryStorage>) -> Option<Vec<TodoList>> {
        let raw = todos.storage().unwrap().get_item(STORAGE_KEY).unwrap()?;
        Some(serde_json::from_str(&raw).unwrap())
    }

    #[test]
    fn test_update_list_persists() {
        let todos = setup();
        let lists = vec![make_list(1, &[(10, false)]), make_list(2, &[])];

        todos.update_list(lists.clone());

        assert_eq!(todos.list(), lists);
        let raw = todos.storage().unwrap().get_item(STORAGE_KEY).unwrap().unwrap();
        assert_eq!(raw, serde_json::to_string(&lists).unwrap());
    }

    #[test]
    fn test_load_absent_key_is_empty() {
        let todos = setup();
        *todos.store.list().write() = vec![make_list(1, &[])];

        todos.load_from_storage();

        assert!(todos.list().is_empty());
    }

    #[test]
    fn test_load_garbage_is_empty() {
        for raw in ["not json", "{\"id\":1}", "null", "[{\"todos\":[]}]"] {
            let todos = setup();
            todos.storage().unwrap().set_item(STORAGE_KEY, raw).unwrap();

            todos.load_from_storage();

            assert!(todos.list().is_empty(), "input {:?}", raw);
        }
    }

    #[test]
    fn test_load_restores_saved_lists() {
        let todos = setup();
        let raw = json!([
            { "id": 1, "title": "Home", "todos": [{ "id": 5, "completed": true, "text": "Dishes" }] },
            { "id": "work", "todos": [] }
        ]);
        todos.storage().unwrap().set_item(STORAGE_KEY, &raw.to_string()).unwrap();

        todos.load_from_storage();

        let lists = todos.list();
        assert_eq!(lists.len(), 2);
        assert_eq!(lists[0].label(), "Home");
        assert!(lists[0].todos[0].completed);
        assert_eq!(lists[1].id, TodoId::from("work"));
        assert_eq!(serde_json::to_value(&lists).unwrap(), raw);
    }

    #[test]
    fn test_delete_cancelled_is_noop() {
        let todos = setup();
        todos.update_list(vec![make_list(1, &[]), make_list(2, &[])]);
        let before = saved(&todos);

        let confirmed = todos.delete_item(&TodoId::from(1), &|_: &str| false);

        assert!(!confirmed);
        assert_eq!(todos.list().len(), 2);
        assert_eq!(saved(&todos), before);
    }

    #[test]
    fn test_delete_confirmed_removes_entry() {
        let todos = setup();
        todos.update_list(vec![make_list(1, &[]), make_list(2, &[])]);

        let confirmed = todos.delete_item(&TodoId::from(1), &|msg: &str| {
            assert_eq!(msg, DELETE_CONFIRM_MESSAGE);
            true
        });

        assert!(confirmed);
        assert_eq!(todos.list(), vec![make_list(2, &[])]);
        assert_eq!(saved(&todos), Some(vec![make_list(2, &[])]));
    }

    #[test]
    fn test_delete_unknown_id_keeps_list() {
        let todos = setup();
        todos.update_list(vec![make_list(1, &[])]);

        assert!(todos.delete_item(&TodoId::from(99), &|_: &str| true));
        assert_eq!(todos.list(), vec![make_list(1, &[])]);
    }

    #[test]
    fn test_complete_todo_toggles_only_target() {
        let todos = setup();
        todos.update_list(vec![
            make_list(1, &[(10, false), (11, false)]),
            make_list(2, &[(10, false)]),
        ]);

        todos.complete_todo(&TodoId::from(10), &TodoId::from(1), None);

        let expected = vec![
            make_list(1, &[(10, true), (11, false)]),
            make_list(2, &[(10, false)]),
        ];
        assert_eq!(todos.list(), expected);
        assert_eq!(saved(&todos), Some(expected));

        todos.complete_todo(&TodoId::from(10), &TodoId::from(1), None);
        assert!(!todos.list()[0].todos[0].completed);
    }

    #[test]
    fn test_complete_todo_reports_updated_entry() {
        let todos = setup();
        todos.update_list(vec![make_list(1, &[(10, false)]), make_list(2, &[])]);
        let mut recorded = Vec::new();

        todos.complete_todo(
            &TodoId::from(10),
            &TodoId::from(1),
            Some(&mut |entry: &TodoList| recorded.push(entry.clone())),
        );

        assert_eq!(recorded, vec![make_list(1, &[(10, true)])]);
    }

    #[test]
    fn test_complete_todo_missing_list_skips_history() {
        let todos = setup();
        todos.update_list(vec![make_list(1, &[(10, false)])]);
        let mut calls = 0;

        todos.complete_todo(
            &TodoId::from(10),
            &TodoId::from(42),
            Some(&mut |_: &TodoList| calls += 1),
        );

        assert_eq!(calls, 0);
        assert_eq!(todos.list(), vec![make_list(1, &[(10, false)])]);
    }

    #[test]
    fn test_without_storage_only_memory_changes() {
        let todos: Todos<MemoryStorage> = Todos::new(Store::new(TodosState::default()), None);
        todos.update_list(vec![make_list(1, &[])]);

        todos.load_from_storage();

        assert_eq!(todos.list(), vec![make_list(1, &[])]);
        assert!(todos.storage().is_none());
    }

    /// Storage that rejects every call, like a full or blocked localStorage
    struct FailingStorage;

    impl KeyValueStorage for FailingStorage {
        fn get_item(&self, _key: &str) -> StorageResult<Option<String>> {
            Err(StorageError::Access("SecurityError".into()))
        }

        fn set_item(&self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::Access("QuotaExceededError".into()))
        }

        fn remove_item(&self, _key: &str) -> StorageResult<()> {
            Err(StorageError::Access("SecurityError".into()))
        }
    }

    #[test]
    fn test_failed_write_keeps_new_list() {
        let todos = Todos::new(Store::new(TodosState::default()), Some(FailingStorage));

        todos.update_list(vec![make_list(1, &[(10, false)])]);
        assert_eq!(todos.list(), vec![make_list(1, &[(10, false)])]);

        todos.complete_todo(&TodoId::from(10), &TodoId::from(1), None);
        assert!(todos.list()[0].todos[0].completed);
    }

    #[test]
    fn test_failed_read_loads_empty() {
        let todos = Todos::new(Store::new(TodosState::default()), Some(FailingStorage));
        *todos.store.list().write() = vec![make_list(1, &[])];

        todos.load_from_storage();

        assert!(todos.list().is_empty());
    }

    #[test]
    fn test_odd_entries_do_not_wipe_saved_lists() {
        let todos = setup();
        let raw = json!([
            { "id": 1, "todos": [{ "id": 10, "completed": null }] },
            { "id": 1.5, "todos": [] },
            { "id": 18446744073709551615u64, "todos": [] },
            { "todos": [] }
        ]);
        todos.storage().unwrap().set_item(STORAGE_KEY, &raw.to_string()).unwrap();

        todos.load_from_storage();
        let loaded = todos.list();
        assert_eq!(loaded.len(), 3);
        assert!(!loaded[0].todos[0].completed);

        // Saving back keeps the readable entries
        todos.update_list(loaded.clone());
        assert_eq!(saved(&todos), Some(loaded));
    }

    #[test]
    fn test_complete_todo_matches_whole_float_ids() {
        let todos = setup();
        let raw = json!([{ "id": 1.0, "todos": [{ "id": 10, "completed": false }] }]);
        todos.storage().unwrap().set_item(STORAGE_KEY, &raw.to_string()).unwrap();
        todos.load_from_storage();

        todos.complete_todo(&TodoId::from(10), &TodoId::from(1), None);
        assert!(todos.list()[0].todos[0].completed);

        todos.complete_todo(&TodoId::from(10), &TodoId::from("1"), None);
        assert!(todos.list()[0].todos[0].completed);
    }
}

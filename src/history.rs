//! Completion History
//!
//! Snapshots of list entries recorded after each completion toggle.

use std::collections::VecDeque;

use crate::models::TodoList;

/// Maximum number of snapshots kept
pub const HISTORY_LIMIT: usize = 20;

/// Most-recent-first buffer of list snapshots
#[derive(Clone, Debug, Default, PartialEq)]
pub struct History {
    entries: VecDeque<TodoList>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a snapshot, dropping the oldest one past the limit
    pub fn record(&mut self, snapshot: TodoList) {
        self.entries.push_front(snapshot);
        self.entries.truncate(HISTORY_LIMIT);
    }

    pub fn entries(&self) -> impl Iterator<Item = &TodoList> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

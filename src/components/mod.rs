//! UI Components
//!
//! Reusable Leptos components.

mod todo_list_card;
mod history_panel;

pub use todo_list_card::TodoListCard;
pub use history_panel::HistoryPanel;

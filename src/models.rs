//! Frontend Models
//!
//! Data structures persisted under the `listTodo` storage key.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

/// Identifier of a list or todo. Ids are compared by value and kind,
/// so `1` and `"1"` are different ids while `1` and `1.0` are the same id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum TodoId {
    Number(Number),
    Text(String),
}

impl<'de> Deserialize<'de> for TodoId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(Number),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => TodoId::Number(integral(n)),
            RawId::Text(s) => TodoId::Text(s),
        })
    }
}

/// Whole floats (`1.0`, `-0.0`) become integers, as they would in JS.
fn integral(n: Number) -> Number {
    const MAX_SAFE: f64 = 9_007_199_254_740_992.0;
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() <= MAX_SAFE => Number::from(f as i64),
        _ => n,
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TodoId::Number(n) => write!(f, "{}", n),
            TodoId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for TodoId {
    fn from(n: i64) -> Self {
        TodoId::Number(Number::from(n))
    }
}

impl From<i32> for TodoId {
    fn from(n: i32) -> Self {
        TodoId::Number(Number::from(n))
    }
}

impl From<&str> for TodoId {
    fn from(s: &str) -> Self {
        TodoId::Text(s.to_string())
    }
}

impl From<String> for TodoId {
    fn from(s: String) -> Self {
        TodoId::Text(s)
    }
}

/// Decode each value on its own, dropping (and logging) the ones that don't fit `T`
pub(crate) fn decode_each<T: DeserializeOwned>(values: Vec<Value>, what: &str) -> Vec<T> {
    values
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                log::warn!("Skipping unreadable {}: {}", what, e);
                None
            }
        })
        .collect()
}

fn lenient_todos<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<TodoItem>, D::Error> {
    let values = Option::<Vec<Value>>::deserialize(deserializer)?;
    Ok(decode_each(values.unwrap_or_default(), "todo"))
}

// JS truthiness: null, false, 0, NaN and "" are false.
fn truthy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

/// A single todo. Fields other than `id` and `completed` are kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: TodoId,
    #[serde(default, deserialize_with = "truthy")]
    pub completed: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TodoItem {
    pub fn new(id: impl Into<TodoId>) -> Self {
        Self {
            id: id.into(),
            completed: false,
            extra: Map::new(),
        }
    }

    /// Builder-style helper for setting an extra field
    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }

    /// Display text: `text`, `title` or `name`, falling back to the id
    pub fn label(&self) -> String {
        text_field(&self.extra, &["text", "title", "name"]).unwrap_or_else(|| self.id.to_string())
    }
}

/// A named collection of todos
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoList {
    pub id: TodoId,
    #[serde(default, deserialize_with = "lenient_todos")]
    pub todos: Vec<TodoItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TodoList {
    pub fn new(id: impl Into<TodoId>, todos: Vec<TodoItem>) -> Self {
        Self {
            id: id.into(),
            todos,
            extra: Map::new(),
        }
    }

    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }

    pub fn label(&self) -> String {
        text_field(&self.extra, &["title", "name"]).unwrap_or_else(|| format!("List {}", self.id))
    }

    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|t| t.completed).count()
    }
}

fn text_field(extra: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| extra.get(*k))
        .find_map(|v| v.as_str().map(str::to_string))
}

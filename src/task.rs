//! Task data structure.
//!
//! A `Task` is one line of the to-do list. It carries no identifier of its own:
//! its identity is its 1-based position in the owning [`Database`](crate::db::Database).

use chrono::Local;
use serde::{Deserialize, Deserializer, Serialize};

/// Timestamp layout used for `created`.
pub const CREATED_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A single to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub title: String,
    pub done: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub created: String,
}

/// Read a missing or `null` string as empty.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Task {
    /// Create a pending task stamped with the current local time.
    pub fn new(title: &str) -> Self {
        Task {
            title: title.to_string(),
            done: false,
            created: Local::now().format(CREATED_FORMAT).to_string(),
        }
    }

    /// Status mark shown in listings.
    pub fn mark(&self) -> &'static str {
        if self.done { "✅" } else { "⬜" }
    }
}

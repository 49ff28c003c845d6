use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single to-do item. The only entity that reaches durable storage.
///
/// `text` is always trimmed and non-empty; `TaskStore` enforces that on
/// create and edit, so a `Task` never carries whitespace-only text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: Uuid,
    pub text: String,
    pub completed: bool,
}

impl Task {
    /// `text` must already be trimmed and non-empty.
    pub fn new(text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            completed: false,
        }
    }
}

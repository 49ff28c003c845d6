use tracing::{debug, instrument};
use uuid::Uuid;

use crate::announce::Announce;
use crate::persist::Persistence;
use crate::task::Task;

/// Owns the ordered task collection and every operation that mutates it.
///
/// Order is insertion order with newest-first semantics: `add` places the
/// new task at the head, nothing else reorders. Every operation that changes
/// the collection saves through the fail-soft [`Persistence`] adapter;
/// validation rejections and unknown-id no-ops do not save.
pub struct TaskStore {
    tasks: Vec<Task>,
    persist: Persistence,
    sink: Box<dyn Announce>,
}

impl TaskStore {
    /// Loads the initial collection from storage (empty on absence or
    /// corruption, per the persistence contract).
    pub fn open(persist: Persistence, sink: Box<dyn Announce>) -> Self {
        let tasks = persist.load();
        debug!(count = tasks.len(), "opened task store");
        Self {
            tasks,
            persist,
            sink,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn remaining_count(&self) -> usize {
        self.tasks.iter().filter(|t| !t.completed).count()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    /// Adds a task at the head of the collection. Whitespace-only input is a
    /// validation rejection: announced, no mutation, no save.
    #[instrument(skip(self, raw_text))]
    pub fn add(&mut self, raw_text: &str) {
        let text = raw_text.trim();
        if text.is_empty() {
            debug!("rejected empty add");
            self.sink.announce("Cannot add an empty task");
            return;
        }

        let task = Task::new(text.to_string());
        debug!(id = %task.id, "adding task");
        self.tasks.insert(0, task);
        self.persist.save(&self.tasks);
        self.sink.announce(&format!("Added task: {text}"));
    }

    /// Flips the completion flag of the task with `id`. Unknown ids are
    /// no-ops, defending against stale references from the presentation
    /// layer.
    #[instrument(skip(self))]
    pub fn toggle(&mut self, id: Uuid) {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            debug!(%id, "toggle on unknown id ignored");
            return;
        };
        task.completed = !task.completed;
        debug!(%id, completed = task.completed, "toggled task");
        self.persist.save(&self.tasks);
    }

    /// Removes the task with `id` if present. No-op on unknown ids.
    #[instrument(skip(self))]
    pub fn delete(&mut self, id: Uuid) {
        let Some(idx) = self.tasks.iter().position(|t| t.id == id) else {
            debug!(%id, "delete on unknown id ignored");
            return;
        };
        let removed = self.tasks.remove(idx);
        debug!(%id, "deleted task");
        self.persist.save(&self.tasks);
        if removed.text.is_empty() {
            self.sink.announce("Deleted task");
        } else {
            self.sink.announce(&format!("Deleted task: {}", removed.text));
        }
    }

    /// Replaces the text of the task with `id`, preserving completion state.
    /// Empty input cancels the edit; text equal to the current value after
    /// trimming is a true no-op (no save, no announcement).
    #[instrument(skip(self, raw_text))]
    pub fn edit(&mut self, id: Uuid, raw_text: &str) {
        let text = raw_text.trim();
        if text.is_empty() {
            debug!(%id, "rejected empty edit");
            self.sink.announce("Edit cancelled. Empty value not saved.");
            return;
        }

        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            debug!(%id, "edit on unknown id ignored");
            return;
        };
        if task.text == text {
            debug!(%id, "edit with unchanged text ignored");
            return;
        }

        task.text = text.to_string();
        debug!(%id, "edited task");
        self.persist.save(&self.tasks);
        self.sink.announce(&format!("Edited task: {text}"));
    }

    /// Removes every completed task, keeping active tasks in their relative
    /// order. Safe on an empty or all-active collection.
    #[instrument(skip(self))]
    pub fn clear_completed(&mut self) {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.completed);
        let cleared = before - self.tasks.len();

        if cleared == 0 {
            debug!("nothing to clear");
            self.sink.announce("No completed tasks to clear");
            return;
        }

        debug!(cleared, "cleared completed tasks");
        self.persist.save(&self.tasks);
        let noun = if cleared == 1 { "task" } else { "tasks" };
        self.sink
            .announce(&format!("Cleared {cleared} completed {noun}"));
    }
}

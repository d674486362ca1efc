use serde::{Deserialize, Serialize};

/// Identity of a task, unique within its list
pub type TaskId = u64;

/// A single to-do entry. Owned by the list; rows only read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub done: bool,
}

impl Task {
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        Task {
            id,
            title: title.into(),
            done: false,
        }
    }
}

/// Payload of a confirmed title edit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskEdit {
    pub id: TaskId,
    pub task_new_title: String,
}

/// The mutations a row may request from whoever owns the task list.
///
/// Implementations are expected to apply the change to their own copy of
/// the task; the row never mutates a `Task` itself.
pub trait TaskActions {
    /// Flip the `done` flag of the task with this id
    fn toggle_task_done(&mut self, id: TaskId);
    /// Drop the task with this id from the list
    fn remove_task(&mut self, id: TaskId);
    /// Store a new title for `edit.id`
    fn edit_task(&mut self, edit: TaskEdit);
}

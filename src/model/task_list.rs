use tracing::debug;

use super::task::{Task, TaskActions, TaskEdit, TaskId};

/// An ordered, in-memory list of tasks. This is the authoritative copy;
/// rows receive `&Task` views into it and report changes back through
/// [`TaskActions`].
#[derive(Debug, Clone, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
    next_id: TaskId,
}

impl TaskList {
    pub fn new() -> Self {
        TaskList {
            tasks: Vec::new(),
            next_id: 1,
        }
    }

    /// Append a task with a fresh id and return that id
    pub fn add(&mut self, title: impl Into<String>) -> TaskId {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        self.tasks.push(Task::new(id, title));
        id
    }

    /// Append a task, already marked done or not
    pub fn add_with_state(&mut self, title: impl Into<String>, done: bool) -> TaskId {
        let id = self.add(title);
        if let Some(task) = self.get_mut(id) {
            task.done = done;
        }
        id
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn get_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Number of tasks marked done
    pub fn done_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.done).count()
    }
}

impl TaskActions for TaskList {
    fn toggle_task_done(&mut self, id: TaskId) {
        if let Some(task) = self.get_mut(id) {
            task.done = !task.done;
            debug!(id, done = task.done, "task toggled");
        }
    }

    fn remove_task(&mut self, id: TaskId) {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() != before {
            debug!(id, "task removed");
        }
    }

    fn edit_task(&mut self, edit: TaskEdit) {
        if let Some(task) = self.get_mut(edit.id) {
            debug!(id = edit.id, "task title updated");
            task.title = edit.task_new_title;
        }
    }
}

//! One task row: completion marker, inline-editable title, edit/cancel
//! action and a delete action.
//!
//! The row never owns the task. Every operation takes the current `&Task`
//! as a prop and reports mutations through [`TaskActions`]; the only state
//! kept here is whether the title is being edited and the text typed so far.

use crossterm::event::{KeyCode, KeyEvent};
use tracing::debug;

use crate::model::{Task, TaskActions, TaskEdit};

use super::text_input::{InputOutcome, TextInput};

/// A pressable part of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowTarget {
    /// Marker plus title: toggles completion
    Toggle,
    /// Edit glyph, or cancel glyph while editing
    Action,
    /// Delete glyph
    Trash,
}

/// Stable per-row identifiers for automated interaction
pub mod ids {
    pub fn button(index: usize) -> String {
        format!("button-{}", index)
    }

    pub fn marker(index: usize) -> String {
        format!("marker-{}", index)
    }

    pub fn edit(index: usize) -> String {
        format!("edit-{}", index)
    }

    pub fn trash(index: usize) -> String {
        format!("trash-{}", index)
    }
}

/// Local state of a mounted row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    index: usize,
    is_editing: bool,
    input: TextInput,
}

impl TaskItem {
    /// Mount a row for `task` at list position `index`
    pub fn mount(index: usize, task: &Task) -> Self {
        let mut item = TaskItem {
            index,
            is_editing: false,
            input: TextInput::new(task.title.clone()),
        };
        item.apply_focus();
        item
    }

    /// New props from the parent. Outside of editing the buffer follows
    /// the committed title.
    pub fn update(&mut self, index: usize, task: &Task) {
        self.index = index;
        if !self.is_editing && self.input.value() != task.title {
            self.input.set_value(task.title.clone());
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_editing(&self) -> bool {
        self.is_editing
    }

    pub fn edited_title(&self) -> &str {
        self.input.value()
    }

    pub fn input(&self) -> &TextInput {
        &self.input
    }

    /// Text to show in the title slot
    pub fn displayed_title<'a>(&'a self, task: &'a Task) -> &'a str {
        if self.is_editing {
            self.input.value()
        } else {
            &task.title
        }
    }

    /// Whether the delete action accepts presses
    pub fn trash_enabled(&self) -> bool {
        !self.is_editing
    }

    /// Dispatch a press on one of the row's targets
    pub fn press(&mut self, target: RowTarget, task: &Task, actions: &mut dyn TaskActions) {
        match target {
            RowTarget::Toggle => {
                debug!(index = self.index, id = task.id, "toggle pressed");
                actions.toggle_task_done(task.id);
            }
            RowTarget::Action if self.is_editing => self.cancel_editing(task),
            RowTarget::Action => self.start_editing(),
            RowTarget::Trash => {
                if self.trash_enabled() {
                    debug!(index = self.index, id = task.id, "trash pressed");
                    actions.remove_task(task.id);
                }
            }
        }
    }

    pub fn start_editing(&mut self) {
        debug!(index = self.index, "editing started");
        self.set_editing(true);
    }

    /// Leave edit mode and drop whatever was typed
    pub fn cancel_editing(&mut self, task: &Task) {
        if !self.is_editing {
            return;
        }
        debug!(index = self.index, "editing cancelled");
        self.set_editing(false);
        self.input.set_value(task.title.clone());
    }

    /// Hand the typed title to the parent and leave edit mode
    pub fn submit_editing(&mut self, task: &Task, actions: &mut dyn TaskActions) {
        if !self.is_editing {
            return;
        }
        let edit = TaskEdit {
            id: task.id,
            task_new_title: self.input.value().to_string(),
        };
        debug!(index = self.index, id = task.id, "editing submitted");
        actions.edit_task(edit);
        self.set_editing(false);
    }

    /// Replace the typed text wholesale. Ignored unless editing.
    pub fn change_text(&mut self, text: &str) {
        if self.is_editing {
            self.input.set_value(text);
        }
    }

    /// Route a key to the title field. Returns false when the row is not
    /// editing and the key should go to the host.
    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        task: &Task,
        actions: &mut dyn TaskActions,
    ) -> bool {
        if !self.is_editing {
            return false;
        }
        if key.code == KeyCode::Esc {
            self.cancel_editing(task);
            return true;
        }
        if self.input.handle_key(key) == InputOutcome::Submit {
            self.submit_editing(task, actions);
        }
        true
    }

    /// Bracketed paste into the title field
    pub fn handle_paste(&mut self, text: &str) -> bool {
        self.is_editing && self.input.insert_str(text) == InputOutcome::Changed
    }

    fn set_editing(&mut self, editing: bool) {
        if self.is_editing == editing {
            return;
        }
        self.is_editing = editing;
        self.input.set_editable(editing);
        self.apply_focus();
    }

    /// Focus follows the editing flag
    fn apply_focus(&mut self) {
        if self.is_editing {
            self.input.focus();
        } else {
            self.input.blur();
        }
    }
}

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::app::App;
use super::task_item::RowTarget;

/// Handle a key event: an editing row gets first claim, otherwise the key
/// navigates the list or presses a target on the selected row.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    if let Some(index) = app.editing_row() {
        app.cursor = index;
        app.with_row(index, |item, task, actions| {
            item.handle_key(key, task, actions)
        });
        return;
    }

    match (key.modifiers, key.code) {
        (_, KeyCode::Char('q')) | (_, KeyCode::Esc) => app.should_quit = true,
        (_, KeyCode::Down) | (KeyModifiers::NONE, KeyCode::Char('j')) => app.move_cursor(1),
        (_, KeyCode::Up) | (KeyModifiers::NONE, KeyCode::Char('k')) => app.move_cursor(-1),
        (_, KeyCode::Home) | (KeyModifiers::NONE, KeyCode::Char('g')) => app.cursor = 0,
        (_, KeyCode::End) | (_, KeyCode::Char('G')) => {
            app.cursor = app.rows.len().saturating_sub(1);
        }
        (_, KeyCode::Char(' ')) | (_, KeyCode::Enter) | (KeyModifiers::NONE, KeyCode::Char('x')) => {
            app.press(app.cursor, RowTarget::Toggle);
        }
        (KeyModifiers::NONE, KeyCode::Char('e')) | (KeyModifiers::NONE, KeyCode::Char('i')) => {
            app.press(app.cursor, RowTarget::Action);
        }
        (KeyModifiers::NONE, KeyCode::Char('d')) | (_, KeyCode::Delete) => {
            app.press(app.cursor, RowTarget::Trash);
        }
        _ => {}
    }
}

/// Left click presses whatever target is under the pointer
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let Some((index, target)) = app.hit_test(mouse.column, mouse.row) else {
                return;
            };
            // Keys stay with a row that is mid-edit
            if app.editing_row().is_none() {
                app.cursor = index;
            }
            app.press(index, target);
            if let Some(editing) = app.editing_row() {
                app.cursor = editing;
            }
        }
        MouseEventKind::ScrollDown => app.move_cursor(1),
        MouseEventKind::ScrollUp => app.move_cursor(-1),
        _ => {}
    }
}

/// Bracketed paste goes to the row being edited, if any
pub fn handle_paste(app: &mut App, text: &str) {
    if let Some(index) = app.editing_row() {
        app.with_row(index, |item, _, _| item.handle_paste(text));
    }
}

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_segmentation::UnicodeSegmentation;

use crate::model::Task;
use crate::tui::task_item::{RowTarget, TaskItem, ids};
use crate::tui::theme::{Glyphs, Theme};
use crate::util::unicode::{display_width, skip_width, truncate_to_width};

/// Blank cells left of the marker
const LEFT_PAD: u16 = 2;
/// Blank cells between marker and title, and between title and action
const GAP: u16 = 1;
/// Blank cells on each side of the trash glyph
const TRASH_PAD: u16 = 2;

/// Screen rectangles of one rendered row, used for hit testing and for
/// exposing per-row identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLayout {
    pub index: usize,
    /// Marker plus title: the toggle touch target
    pub button: Rect,
    pub marker: Rect,
    pub title: Rect,
    /// Edit or cancel glyph
    pub action: Rect,
    /// Trash glyph with its padding
    pub trash: Rect,
}

impl RowLayout {
    pub fn compute(area: Rect, index: usize, glyphs: &Glyphs) -> Self {
        let marker_w = glyph_width(&glyphs.check) + 2;
        let action_w = glyph_width(&glyphs.edit).max(glyph_width(&glyphs.cancel));
        let trash_w = TRASH_PAD * 2 + glyph_width(&glyphs.trash);
        let fixed = LEFT_PAD + marker_w + GAP + GAP + action_w + trash_w;
        let title_w = area.width.saturating_sub(fixed);
        let y = area.y;

        let marker = Rect::new(area.x + LEFT_PAD, y, marker_w, 1);
        let title = Rect::new(marker.right() + GAP, y, title_w, 1);
        let action = Rect::new(title.right() + GAP, y, action_w, 1);
        let trash = Rect::new(action.right(), y, trash_w, 1);
        let button = Rect::new(area.x, y, title.right() - area.x, 1);

        RowLayout {
            index,
            button,
            marker,
            title,
            action,
            trash,
        }
    }

    /// Which target, if any, sits under a screen cell
    pub fn hit_test(&self, column: u16, row: u16) -> Option<RowTarget> {
        let pos = Position::new(column, row);
        if self.button.contains(pos) {
            Some(RowTarget::Toggle)
        } else if self.action.contains(pos) {
            Some(RowTarget::Action)
        } else if self.trash.contains(pos) {
            Some(RowTarget::Trash)
        } else {
            None
        }
    }

    /// Stable identifiers of this row with their rectangles
    pub fn identifiers(&self) -> Vec<(String, Rect)> {
        vec![
            (ids::button(self.index), self.button),
            (ids::marker(self.index), self.marker),
            (ids::edit(self.index), self.action),
            (ids::trash(self.index), self.trash),
        ]
    }
}

fn glyph_width(g: &str) -> u16 {
    display_width(g).max(1) as u16
}

/// Everything a row needs to draw itself
pub struct RowProps<'a> {
    pub task: &'a Task,
    pub item: &'a TaskItem,
    pub theme: &'a Theme,
    pub glyphs: &'a Glyphs,
    pub selected: bool,
}

/// Draw one task row into the first line of `area` and return its layout.
/// Places the terminal cursor in the title when the field has focus.
pub fn render_task_row(frame: &mut Frame, props: &RowProps, area: Rect) -> RowLayout {
    let layout = RowLayout::compute(area, props.item.index(), props.glyphs);
    let theme = props.theme;
    let task = props.task;
    let editing = props.item.is_editing();

    let bg = if props.selected {
        theme.selection_bg
    } else {
        theme.background
    };
    let base = Style::default().bg(bg);

    let mut spans: Vec<Span> = Vec::new();
    spans.push(Span::styled(" ".repeat(LEFT_PAD as usize), base));

    // Marker: filled with a check when done, an empty box otherwise
    if task.done {
        spans.push(Span::styled(
            format!(" {} ", props.glyphs.check),
            Style::default()
                .fg(theme.check)
                .bg(theme.done)
                .add_modifier(Modifier::BOLD),
        ));
    } else {
        let inner = " ".repeat(layout.marker.width.saturating_sub(2) as usize);
        spans.push(Span::styled(
            format!("[{}]", inner),
            base.fg(theme.marker_border),
        ));
    }
    spans.push(Span::styled(" ".repeat(GAP as usize), base));

    // Title
    let title_w = layout.title.width as usize;
    let (title_text, cursor_col) = if editing {
        visible_edit_window(props.item, title_w)
    } else {
        (truncate_to_width(&task.title, title_w), None)
    };
    let mut title_style = base.fg(theme.title_color(task.done));
    if task.done {
        title_style = title_style.add_modifier(Modifier::CROSSED_OUT);
    }
    if editing {
        title_style = title_style.bg(theme.editing_bg);
    }
    let pad = title_w.saturating_sub(display_width(&title_text));
    spans.push(Span::styled(title_text, title_style));
    spans.push(Span::styled(
        " ".repeat(pad),
        if editing { title_style } else { base },
    ));
    spans.push(Span::styled(" ".repeat(GAP as usize), base));

    // Edit / cancel
    let action_glyph = if editing {
        &props.glyphs.cancel
    } else {
        &props.glyphs.edit
    };
    let action_pad = (layout.action.width as usize).saturating_sub(display_width(action_glyph));
    spans.push(Span::styled(action_glyph.clone(), base.fg(theme.icon)));
    spans.push(Span::styled(" ".repeat(action_pad), base));

    // Trash, dimmed while it is disabled
    let trash_style = if props.item.trash_enabled() {
        base.fg(theme.icon)
    } else {
        base.fg(theme.dim).add_modifier(Modifier::DIM)
    };
    spans.push(Span::styled(" ".repeat(TRASH_PAD as usize), base));
    spans.push(Span::styled(props.glyphs.trash.clone(), trash_style));
    spans.push(Span::styled(" ".repeat(TRASH_PAD as usize), base));

    let row_area = Rect::new(area.x, area.y, area.width, area.height.min(1));
    frame.render_widget(Paragraph::new(Line::from(spans)).style(base), row_area);

    if let Some(col) = cursor_col
        && props.item.input().is_focused()
    {
        let x = layout.title.x + col.min(title_w.saturating_sub(1)) as u16;
        frame.set_cursor_position(Position::new(x, layout.title.y));
    }

    layout
}

/// The slice of the edit buffer that fits in `width` cells with the cursor
/// kept visible, and the cursor column relative to the slice.
fn visible_edit_window(item: &TaskItem, width: usize) -> (String, Option<usize>) {
    if width == 0 {
        return (String::new(), None);
    }
    let value = item.input().value();
    let cursor_col = item.input().cursor_col();
    let skip = (cursor_col + 1).saturating_sub(width);
    let start = skip_width(value, skip);
    let hidden = display_width(&value[..start]);
    let mut shown = String::new();
    let mut used = 0;
    for g in value[start..].graphemes(true) {
        let gw = display_width(g);
        if used + gw > width {
            break;
        }
        used += gw;
        shown.push_str(g);
    }
    (shown, Some(cursor_col - hidden))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;
    use pretty_assertions::assert_eq;

    fn draw(task: &Task, item: &TaskItem, w: u16) -> String {
        let theme = Theme::default();
        let glyphs = Glyphs::default();
        render_to_string(w, 1, |frame, area| {
            let props = RowProps {
                task,
                item,
                theme: &theme,
                glyphs: &glyphs,
                selected: false,
            };
            render_task_row(frame, &props, area);
        })
    }

    #[test]
    fn open_task_renders_empty_marker() {
        let task = Task::new(3, "Buy milk");
        let item = TaskItem::mount(0, &task);
        let output = draw(&task, &item, 40);
        assert_eq!(output, format!("  [ ] {:<27} \u{270E}  \u{232B}", "Buy milk"));
    }

    #[test]
    fn done_task_renders_check_and_strikethrough() {
        let mut task = Task::new(3, "Buy milk");
        task.done = true;
        let item = TaskItem::mount(0, &task);
        let theme = Theme::default();
        let glyphs = Glyphs::default();
        let buf = render_to_buffer(40, 1, |frame, area| {
            let props = RowProps {
                task: &task,
                item: &item,
                theme: &theme,
                glyphs: &glyphs,
                selected: false,
            };
            render_task_row(frame, &props, area);
        });

        assert_eq!(buf[(3, 0)].symbol(), "\u{2713}");
        assert_eq!(buf[(3, 0)].bg, theme.done);
        assert_eq!(buf[(3, 0)].fg, theme.check);
        assert_eq!(buf[(6, 0)].symbol(), "B");
        assert_eq!(buf[(6, 0)].fg, theme.done);
        assert!(buf[(6, 0)].modifier.contains(Modifier::CROSSED_OUT));
    }

    #[test]
    fn open_task_title_has_default_style() {
        let task = Task::new(3, "Buy milk");
        let item = TaskItem::mount(0, &task);
        let theme = Theme::default();
        let glyphs = Glyphs::default();
        let buf = render_to_buffer(40, 1, |frame, area| {
            let props = RowProps {
                task: &task,
                item: &item,
                theme: &theme,
                glyphs: &glyphs,
                selected: false,
            };
            render_task_row(frame, &props, area);
        });
        assert_eq!(buf[(2, 0)].fg, theme.marker_border);
        assert_eq!(buf[(6, 0)].fg, theme.text);
        assert!(!buf[(6, 0)].modifier.contains(Modifier::CROSSED_OUT));
    }

    #[test]
    fn editing_shows_cancel_and_dims_trash() {
        let task = Task::new(3, "Buy milk");
        let mut item = TaskItem::mount(0, &task);
        item.start_editing();
        let theme = Theme::default();
        let glyphs = Glyphs::default();
        let buf = render_to_buffer(40, 1, |frame, area| {
            let props = RowProps {
                task: &task,
                item: &item,
                theme: &theme,
                glyphs: &glyphs,
                selected: false,
            };
            render_task_row(frame, &props, area);
        });
        assert_eq!(buf[(34, 0)].symbol(), "\u{2715}");
        assert_eq!(buf[(37, 0)].symbol(), "\u{232B}");
        assert_eq!(buf[(37, 0)].fg, theme.dim);
        assert!(buf[(37, 0)].modifier.contains(Modifier::DIM));
    }

    #[test]
    fn typed_text_is_displayed() {
        let task = Task::new(3, "Buy milk");
        let mut item = TaskItem::mount(0, &task);
        item.start_editing();
        item.change_text("Buy oat milk");
        let output = draw(&task, &item, 40);
        assert!(output.starts_with("  [ ] Buy oat milk"));

        item.cancel_editing(&task);
        let output = draw(&task, &item, 40);
        assert!(output.starts_with("  [ ] Buy milk "));
    }

    #[test]
    fn long_title_is_truncated_when_idle() {
        let task = Task::new(1, "a".repeat(50));
        let item = TaskItem::mount(0, &task);
        let output = draw(&task, &item, 40);
        assert!(output.starts_with(&format!("  [ ] {}\u{2026}", "a".repeat(26))));
    }

    #[test]
    fn edit_window_scrolls_to_cursor() {
        let task = Task::new(1, "abcdefghij");
        let mut item = TaskItem::mount(0, &task);
        item.start_editing();
        let (shown, col) = visible_edit_window(&item, 5);
        assert_eq!(shown, "ghij");
        assert_eq!(col, Some(4));
    }

    #[test]
    fn layout_rects() {
        let layout = RowLayout::compute(Rect::new(0, 5, 40, 1), 2, &Glyphs::default());
        assert_eq!(layout.marker, Rect::new(2, 5, 3, 1));
        assert_eq!(layout.title, Rect::new(6, 5, 27, 1));
        assert_eq!(layout.button, Rect::new(0, 5, 33, 1));
        assert_eq!(layout.action, Rect::new(34, 5, 1, 1));
        assert_eq!(layout.trash, Rect::new(35, 5, 5, 1));
    }

    #[test]
    fn hit_test_maps_cells_to_targets() {
        let layout = RowLayout::compute(Rect::new(0, 5, 40, 1), 0, &Glyphs::default());
        assert_eq!(layout.hit_test(3, 5), Some(RowTarget::Toggle));
        assert_eq!(layout.hit_test(20, 5), Some(RowTarget::Toggle));
        assert_eq!(layout.hit_test(34, 5), Some(RowTarget::Action));
        assert_eq!(layout.hit_test(39, 5), Some(RowTarget::Trash));
        assert_eq!(layout.hit_test(33, 5), None);
        assert_eq!(layout.hit_test(3, 6), None);
    }

    #[test]
    fn identifiers_for_row() {
        let layout = RowLayout::compute(Rect::new(0, 0, 40, 1), 7, &Glyphs::default());
        let names: Vec<String> = layout.identifiers().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["button-7", "marker-7", "edit-7", "trash-7"]);
    }
}

pub mod task_list;
pub mod task_row;

#[cfg(test)]
pub mod test_helpers;

use std::io;

use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::App;

/// Rows taken by the header and its separator
const HEADER_H: u16 = 2;

/// Main render function — header, task rows, key hints
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    let hints_h = u16::from(app.show_key_hints);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_H), // header + blank separator
            Constraint::Min(1),           // rows
            Constraint::Length(hints_h),  // key hints
        ])
        .split(area);

    let header = Rect {
        height: 1,
        ..chunks[0]
    };
    task_list::render_header(frame, app, header);
    task_list::render_task_list(frame, app, chunks[1]);
    if app.show_key_hints {
        task_list::render_key_hints(frame, app, chunks[2]);
    }
}

/// Height that fits the header, every row and the hints
pub fn full_height(app: &App) -> u16 {
    let rows = u16::try_from(app.rows.len().max(1)).unwrap_or(u16::MAX);
    HEADER_H
        .saturating_add(rows)
        .saturating_add(u16::from(app.show_key_hints))
}

/// Plain text of a buffer, one string per line, trailing blanks trimmed
pub fn buffer_to_lines(buf: &Buffer) -> Vec<String> {
    let w = buf.area.width.max(1) as usize;
    let mut lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

/// Draw the whole list once into an off-screen buffer of the given width,
/// tall enough for every row. Row layouts are left on the app.
pub fn render_offscreen(app: &mut App, width: u16) -> io::Result<Buffer> {
    let height = full_height(app);
    let mut terminal = Terminal::new(TestBackend::new(width, height))?;
    terminal.draw(|frame| render(frame, app))?;
    Ok(terminal.backend().buffer().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;
    use crate::tui::task_item::RowTarget;
    use pretty_assertions::assert_eq;

    #[test]
    fn full_screen_layout() {
        let mut app = shopping_app();
        app.press(1, RowTarget::Toggle);
        let output = render_to_string(TERM_W, TERM_H, |frame, _| {
            render(frame, &mut app);
        });
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0].trim_end(), format!(" Tasks{}1/3 done", " ".repeat(33)));
        assert_eq!(lines[1], "");
        assert!(lines[2].starts_with("  [ ] Buy milk"));
        assert!(lines[3].starts_with(&format!("   {}  Walk dog", "\u{2713}")));
        assert!(lines[4].starts_with("  [ ] Write report"));
        assert_eq!(lines[9], " space toggle  e edit  d delete  q quit");
    }

    #[test]
    fn hints_can_be_hidden() {
        let mut app = shopping_app();
        app.show_key_hints = false;
        let output = render_to_string(TERM_W, TERM_H, |frame, _| {
            render(frame, &mut app);
        });
        assert!(!output.contains("q quit"));
    }

    #[test]
    fn offscreen_fits_every_row() {
        let mut app = app_with_titles(&["a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k"]);
        let buf = render_offscreen(&mut app, 40).unwrap();
        assert_eq!(buf.area.height, 2 + 11 + 1);
        let lines = buffer_to_lines(&buf);
        assert!(lines[12].starts_with("  [ ] k"));
        assert_eq!(app.row_layouts.len(), 11);
    }

    #[test]
    fn full_height_saturates() {
        let titles: Vec<String> = (0..70_000).map(|i| i.to_string()).collect();
        let titles: Vec<&str> = titles.iter().map(String::as_str).collect();
        let app = app_with_titles(&titles);
        assert_eq!(full_height(&app), u16::MAX);
    }

    #[test]
    fn buffer_lines_trim_trailing_blank_rows() {
        let buf = Buffer::with_lines(["ab  ", "    ", "    "]);
        assert_eq!(buffer_to_lines(&buf), vec!["ab".to_string()]);
    }
}

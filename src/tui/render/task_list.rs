use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;

use super::task_row::{RowProps, render_task_row};

/// Render the header: list name on the left, completion count on the right
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let title = " Tasks";
    let mut count = format!("{}/{} done ", app.tasks.done_count(), app.tasks.len());
    // Drop the count rather than run it into the title
    if title.len() + 1 + count.len() > area.width as usize {
        count.clear();
    }
    let gap = (area.width as usize).saturating_sub(title.len() + count.len());

    let line = Line::from(vec![
        Span::styled(
            title,
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ".repeat(gap), Style::default().bg(bg)),
        Span::styled(count, Style::default().fg(app.theme.dim).bg(bg)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Render one row per task, scrolled so the cursor stays visible. Records
/// the layout of every drawn row on the app for hit testing.
pub fn render_task_list(frame: &mut Frame, app: &mut App, area: Rect) {
    app.row_layouts.clear();

    if app.rows.is_empty() {
        let empty = Paragraph::new(" No tasks")
            .style(Style::default().fg(app.theme.dim).bg(app.theme.background));
        frame.render_widget(empty, area);
        return;
    }

    let visible = area.height as usize;
    if visible == 0 {
        return;
    }
    if app.cursor < app.scroll {
        app.scroll = app.cursor;
    } else if app.cursor >= app.scroll + visible {
        app.scroll = app.cursor + 1 - visible;
    }

    let tasks = app.tasks.tasks();
    let mut layouts = Vec::new();
    for (line, index) in (app.scroll..app.rows.len()).take(visible).enumerate() {
        let (_, item) = &app.rows[index];
        let props = RowProps {
            task: &tasks[index],
            item,
            theme: &app.theme,
            glyphs: &app.glyphs,
            selected: index == app.cursor,
        };
        let row_area = Rect::new(area.x, area.y + line as u16, area.width, 1);
        layouts.push(render_task_row(frame, &props, row_area));
    }
    app.row_layouts = layouts;
}

/// Key hints for the current mode
pub fn render_key_hints(frame: &mut Frame, app: &App, area: Rect) {
    let hints = if app.editing_row().is_some() {
        " enter save  esc cancel"
    } else {
        " space toggle  e edit  d delete  q quit"
    };
    let para = Paragraph::new(hints)
        .style(Style::default().fg(app.theme.dim).bg(app.theme.background));
    frame.render_widget(para, area);
}

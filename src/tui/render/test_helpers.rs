use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use crate::model::{Config, TaskList};
use crate::tui::app::App;

pub const TERM_W: u16 = 48;
pub const TERM_H: u16 = 10;

/// Render into an in-memory buffer and return it.
pub fn render_to_buffer<F>(w: u16, h: u16, f: F) -> Buffer
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();
    terminal.backend().buffer().clone()
}

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let buf = render_to_buffer(w, h, f);
    crate::tui::render::buffer_to_lines(&buf).join("\n")
}

/// Build an App over the given titles with default config.
pub fn app_with_titles(titles: &[&str]) -> App {
    let mut tasks = TaskList::new();
    for title in titles {
        tasks.add(*title);
    }
    App::new(tasks, &Config::default().ui)
}

/// The list used by most host tests.
pub fn shopping_app() -> App {
    app_with_titles(&["Buy milk", "Walk dog", "Write report"])
}

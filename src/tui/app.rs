use std::collections::HashMap;
use std::io;
use std::time::Duration;

use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{debug, info};

use crate::model::{Config, Task, TaskActions, TaskId, TaskList, UiConfig};

use super::input;
use super::render;
use super::render::task_row::RowLayout;
use super::task_item::{RowTarget, TaskItem};
use super::theme::{Glyphs, Theme};

/// The list that hosts task rows: owns the tasks, mounts one row per task
/// and routes input to them.
pub struct App {
    pub tasks: TaskList,
    /// One mounted row per task, in list order
    pub rows: Vec<(TaskId, TaskItem)>,
    /// Selected row
    pub cursor: usize,
    /// First visible row
    pub scroll: usize,
    pub theme: Theme,
    pub glyphs: Glyphs,
    pub show_key_hints: bool,
    pub should_quit: bool,
    /// Row rectangles from the last draw, for mouse hit testing
    pub row_layouts: Vec<RowLayout>,
}

impl App {
    pub fn new(tasks: TaskList, ui: &UiConfig) -> Self {
        let mut app = App {
            tasks,
            rows: Vec::new(),
            cursor: 0,
            scroll: 0,
            theme: Theme::from_config(ui),
            glyphs: Glyphs::from_config(ui),
            show_key_hints: ui.show_key_hints,
            should_quit: false,
            row_layouts: Vec::new(),
        };
        app.reconcile();
        app
    }

    /// Seed the list from config tasks followed by extra titles
    pub fn from_config(config: &Config, titles: &[String]) -> Self {
        let mut tasks = TaskList::new();
        for seed in &config.tasks {
            tasks.add_with_state(seed.title.clone(), seed.done);
        }
        for title in titles {
            tasks.add(title.clone());
        }
        App::new(tasks, &config.ui)
    }

    /// Bring mounted rows in line with the task list. Rows are keyed by task
    /// id: surviving rows get new props, new tasks mount fresh rows, and rows
    /// whose task is gone are dropped along with their local state.
    pub fn reconcile(&mut self) {
        let mut mounted: HashMap<TaskId, TaskItem> = self.rows.drain(..).collect();
        for (index, task) in self.tasks.tasks().iter().enumerate() {
            let item = match mounted.remove(&task.id) {
                Some(mut item) => {
                    item.update(index, task);
                    item
                }
                None => {
                    debug!(index, id = task.id, "row mounted");
                    TaskItem::mount(index, task)
                }
            };
            self.rows.push((task.id, item));
        }
        for id in mounted.keys() {
            debug!(id, "row unmounted");
        }
        if self.cursor >= self.rows.len() {
            self.cursor = self.rows.len().saturating_sub(1);
        }
    }

    /// Task and row at a list position
    pub fn row(&self, index: usize) -> Option<(&Task, &TaskItem)> {
        let task = self.tasks.tasks().get(index)?;
        let (_, item) = self.rows.get(index)?;
        Some((task, item))
    }

    /// Index of the row being edited, if any
    pub fn editing_row(&self) -> Option<usize> {
        self.rows.iter().position(|(_, item)| item.is_editing())
    }

    /// Run `f` against a row with a snapshot of its task as props and the
    /// list as the action sink, then reconcile.
    pub fn with_row<R>(
        &mut self,
        index: usize,
        f: impl FnOnce(&mut TaskItem, &Task, &mut dyn TaskActions) -> R,
    ) -> Option<R> {
        let task = self.tasks.tasks().get(index)?.clone();
        let (_, item) = self.rows.get_mut(index)?;
        let result = f(item, &task, &mut self.tasks);
        self.reconcile();
        Some(result)
    }

    /// Press a target on a row. Only one row edits at a time: starting an
    /// edit on one row cancels the edit in progress on another.
    pub fn press(&mut self, index: usize, target: RowTarget) {
        if target == RowTarget::Action
            && let Some(editing) = self.editing_row()
            && editing != index
        {
            self.with_row(editing, |item, task, _| item.cancel_editing(task));
        }
        self.with_row(index, |item, task, actions| item.press(target, task, actions));
    }

    pub fn move_cursor(&mut self, delta: isize) {
        if self.rows.is_empty() {
            return;
        }
        let max = self.rows.len() - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(max);
    }

    /// Row and target under a screen cell from the last draw
    pub fn hit_test(&self, column: u16, row: u16) -> Option<(usize, RowTarget)> {
        self.row_layouts
            .iter()
            .find_map(|layout| layout.hit_test(column, row).map(|t| (layout.index, t)))
    }
}

/// Run the TUI application
pub fn run(config: &Config, titles: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::from_config(config, titles);
    info!(tasks = app.tasks.len(), "starting");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    info!(
        tasks = app.tasks.len(),
        done = app.tasks.done_count(),
        "exiting"
    );
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key);
                }
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

use std::collections::BTreeMap;

use ratatui::layout::Rect;
use serde::Serialize;

use crate::model::Task;
use crate::tui::app::App;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct RectJson {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl From<Rect> for RectJson {
    fn from(r: Rect) -> Self {
        RectJson {
            x: r.x,
            y: r.y,
            width: r.width,
            height: r.height,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RowJson {
    pub index: usize,
    pub id: u64,
    pub editing: bool,
    pub trash_enabled: bool,
    pub title: String,
    /// Identifier -> rectangle
    pub identifiers: BTreeMap<String, RectJson>,
}

#[derive(Debug, Serialize)]
pub struct RenderJson {
    pub tasks: Vec<Task>,
    pub rows: Vec<RowJson>,
    pub lines: Vec<String>,
}

/// Collect rows and identifiers from an app that has just been drawn
pub fn render_json(app: &App, lines: Vec<String>) -> RenderJson {
    let rows = app
        .row_layouts
        .iter()
        .filter_map(|layout| {
            let (task, item) = app.row(layout.index)?;
            Some(RowJson {
                index: layout.index,
                id: task.id,
                editing: item.is_editing(),
                trash_enabled: item.trash_enabled(),
                title: item.displayed_title(task).to_string(),
                identifiers: layout
                    .identifiers()
                    .into_iter()
                    .map(|(name, rect)| (name, RectJson::from(rect)))
                    .collect(),
            })
        })
        .collect();

    RenderJson {
        tasks: app.tasks.tasks().to_vec(),
        rows,
        lines,
    }
}

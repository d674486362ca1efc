pub mod app;
pub mod input;
pub mod render;
pub mod task_item;
pub mod text_input;
pub mod theme;

pub use app::run;

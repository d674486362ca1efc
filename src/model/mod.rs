pub mod config;
pub mod task;
pub mod task_list;

pub use config::*;
pub use task::*;
pub use task_list::*;

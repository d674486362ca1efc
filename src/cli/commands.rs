use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "taskrow",
    about = concat!("[✓] taskrow v", env!("CARGO_PKG_VERSION"), " - a to-do list, one row at a time"),
    version,
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (default: ./taskrow.toml when present)
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "taskrow=trace"
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Task titles to add after the configured tasks
    pub titles: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the list once and print it
    Render(RenderArgs),
}

#[derive(Args)]
pub struct RenderArgs {
    /// Task titles to add after the configured tasks
    pub titles: Vec<String>,

    /// Width of the off-screen terminal
    #[arg(short, long, default_value_t = 60)]
    pub width: u16,

    /// Print tasks and per-row identifiers as JSON
    #[arg(long)]
    pub json: bool,

    /// Mark the task at this list position done (repeatable)
    #[arg(long = "done", value_name = "INDEX")]
    pub done: Vec<usize>,

    /// Put the row at this list position in edit mode
    #[arg(long = "edit", value_name = "INDEX")]
    pub edit: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn bare_titles_launch_tui() {
        let cli = Cli::parse_from(["taskrow", "Buy milk", "Walk dog"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.titles, vec!["Buy milk", "Walk dog"]);
        assert_eq!(cli.log_level, "info");
    }

    #[test]
    fn render_args() {
        let cli = Cli::parse_from([
            "taskrow", "render", "--json", "-w", "40", "--done", "1", "--edit", "0", "a", "b",
        ]);
        let Some(Commands::Render(args)) = cli.command else {
            panic!("expected render");
        };
        assert!(args.json);
        assert_eq!(args.width, 40);
        assert_eq!(args.done, vec![1]);
        assert_eq!(args.edit, Some(0));
        assert_eq!(args.titles, vec!["a", "b"]);
    }

    #[test]
    fn global_config_after_subcommand() {
        let cli = Cli::parse_from(["taskrow", "render", "-c", "my.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("my.toml")));
    }
}

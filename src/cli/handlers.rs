use std::error::Error;

use tracing::debug;

use crate::cli::commands::{Cli, Commands, RenderArgs};
use crate::cli::output::render_json;
use crate::io::config_io::load_config;
use crate::model::Config;
use crate::tui::app::App;
use crate::tui::render::{buffer_to_lines, render_offscreen};
use crate::tui::task_item::RowTarget;

/// Resolve config for this invocation
fn config_for(cli: &Cli) -> Result<Config, Box<dyn Error>> {
    let cwd = std::env::current_dir()?;
    Ok(load_config(cli.config.as_deref(), &cwd)?)
}

/// Dispatch a parsed command line
pub fn dispatch(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = config_for(&cli)?;
    match &cli.command {
        None => crate::tui::run(&config, &cli.titles),
        Some(Commands::Render(args)) => {
            let out = cmd_render(&config, args)?;
            println!("{}", out);
            Ok(())
        }
    }
}

/// Build the list, apply `--done` / `--edit`, draw once, and format output
pub fn cmd_render(config: &Config, args: &RenderArgs) -> Result<String, Box<dyn Error>> {
    let mut app = App::from_config(config, &args.titles);
    app.show_key_hints = false;

    for &index in &args.done {
        let Some((task, _)) = app.row(index) else {
            return Err(format!("no task at position {}", index).into());
        };
        if !task.done {
            app.press(index, RowTarget::Toggle);
        }
    }
    if let Some(index) = args.edit {
        if app.row(index).is_none() {
            return Err(format!("no task at position {}", index).into());
        }
        app.cursor = index;
        app.press(index, RowTarget::Action);
    }

    let buf = render_offscreen(&mut app, args.width)?;
    let lines = buffer_to_lines(&buf);
    debug!(rows = app.rows.len(), width = args.width, "rendered");

    if args.json {
        Ok(serde_json::to_string_pretty(&render_json(&app, lines))?)
    } else {
        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskSeed;
    use pretty_assertions::assert_eq;

    fn args(titles: &[&str]) -> RenderArgs {
        RenderArgs {
            titles: titles.iter().map(|s| s.to_string()).collect(),
            width: 40,
            json: false,
            done: Vec::new(),
            edit: None,
        }
    }

    #[test]
    fn render_plain_text() {
        let out = cmd_render(&Config::default(), &args(&["Buy milk", "Walk dog"])).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with(" Tasks"));
        assert!(lines[0].ends_with("0/2 done"));
        assert_eq!(lines[2], format!("  [ ] {:<27} \u{270E}  \u{232B}", "Buy milk"));
    }

    #[test]
    fn render_marks_done_and_editing() {
        let mut a = args(&["Buy milk", "Walk dog"]);
        a.done = vec![1, 1];
        a.edit = Some(0);
        a.json = true;
        let out = cmd_render(&Config::default(), &a).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["tasks"][1]["done"], true);
        assert_eq!(value["rows"][0]["editing"], true);
        assert_eq!(value["rows"][0]["trash_enabled"], false);
        assert_eq!(value["rows"][1]["editing"], false);
    }

    #[test]
    fn render_uses_config_tasks_first() {
        let config = Config {
            tasks: vec![TaskSeed {
                title: "Configured".into(),
                done: true,
            }],
            ..Default::default()
        };
        let out = cmd_render(&config, &args(&["From args"])).unwrap();
        assert!(out.contains("1/2 done"));
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[2].contains("Configured"));
        assert!(lines[3].contains("From args"));
    }

    #[test]
    fn render_rejects_bad_positions() {
        let mut a = args(&["only"]);
        a.done = vec![3];
        assert!(cmd_render(&Config::default(), &a).is_err());

        let mut a = args(&["only"]);
        a.edit = Some(1);
        assert!(cmd_render(&Config::default(), &a).is_err());
    }
}

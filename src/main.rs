use clap::Parser;
use taskrow::cli::commands::Cli;
use taskrow::cli::handlers;
use taskrow::logging::init_logging;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.log_file.as_deref(), &cli.log_level) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

use clap::Parser;
use tasklist::cli::commands::Cli;
use tasklist::cli::handlers;
use tasklist::io::paths;
use tasklist::io::settings_io::read_settings;
use tasklist::logging;

fn main() {
    let cli = Cli::parse();

    let settings_path = cli.config.clone().unwrap_or_else(paths::default_settings_path);
    let settings = match read_settings(&settings_path) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    match cli.command {
        None => {
            // No subcommand → launch TUI
            if let Err(e) = logging::init_file(&paths::log_path()) {
                eprintln!("warning: logging disabled: {}", e);
            }
            if let Err(e) = tasklist::tui::run(cli.file.as_deref(), &settings) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(_) => {
            logging::init_stderr();
            if let Err(e) = handlers::dispatch(cli, &settings) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}

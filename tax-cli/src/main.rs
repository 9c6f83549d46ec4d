use std::{io, process::ExitCode};

use clap::Parser;
use tracing::{debug, error};

use tax_cli::{app, cli::Cli, logging};

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = logging::init_logging(cli.log_level(), cli.log_file.as_deref()) {
        eprintln!("warning: {err:#}");
    }
    debug!(?cli, "starting");

    let stdin = io::stdin();
    let stdout = io::stdout();
    match app::run(&cli, stdin.lock(), stdout.lock()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            let code = app::exit_code(&err);
            error!(error = %format!("{err:#}"), code, "run failed");
            eprintln!("error: {err:#}");
            ExitCode::from(code)
        }
    }
}

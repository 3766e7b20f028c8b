mod app;

use std::process::ExitCode;

use app::cli::{self, Cli};
use clap::Parser;

fn main() -> ExitCode {
    let cli = Cli::parse();
    if cli::run_cli(cli) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

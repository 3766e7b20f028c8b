use std::io;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{cursor, execute};
use log::warn;

use spin_group::worker::command::run_shell_command;
use spin_group::{GroupOptions, SpinGroup, StdoutTerminal};

/// Run shell commands in parallel with a live status line for each.
#[derive(Debug, Parser)]
#[command(name = "spin-group", version)]
pub struct Cli {
    /// Do not print failure reports; only set the exit status.
    #[arg(long)]
    pub no_debrief: bool,

    /// Frame period of the animation in milliseconds.
    #[arg(long, default_value_t = 100)]
    pub period_ms: u64,

    /// Commands to run, each through `sh -c`.
    #[arg(required = true)]
    pub commands: Vec<String>,
}

impl Cli {
    fn options(&self) -> GroupOptions {
        GroupOptions::default()
            .with_auto_debrief(!self.no_debrief)
            .with_period(Duration::from_millis(self.period_ms.max(1)))
    }
}

pub fn run_cli(cli: Cli) -> bool {
    if let Err(e) = execute!(io::stdout(), cursor::Hide) {
        warn!("Failed to hide cursor: {}", e);
    }

    let commands = cli.commands.clone();
    let all_ok = SpinGroup::run(cli.options(), Arc::new(StdoutTerminal), move |group| {
        for command in commands {
            group.add(command.clone(), move |task| run_shell_command(&command, task));
        }
    });

    if let Err(e) = execute!(io::stdout(), cursor::Show) {
        warn!("Failed to show cursor: {}", e);
    }
    all_ok
}

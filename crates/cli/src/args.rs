use clap::{Parser, Subcommand};
use condition_export_core::adapters::config::app_config::DEFAULT_CONFIG_PATH;
use condition_export_core::ports::command_handler::Command;

/// Copies unexported condition-check records into the report spreadsheet.
#[derive(Debug, Parser)]
#[command(name = "condition-export", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<CliCommand>,

    /// Config file, with or without extension.
    #[arg(long, global = true, env = "CONFIG_PATH", default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    /// Log at TRACE level instead of INFO.
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Ask for the admin password, then offer the export action (default).
    Interactive,

    /// Export without prompting.
    Run {
        #[arg(long, env = "CONDITION_EXPORT_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Print the rows that would be appended; write nothing.
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },

    /// Verify that the record store and the worksheet are reachable.
    Check {
        #[arg(long, env = "CONDITION_EXPORT_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
}

impl From<CliCommand> for Command {
    fn from(command: CliCommand) -> Self {
        match command {
            CliCommand::Interactive => Command::Interactive,
            CliCommand::Run { password, dry_run } => Command::Run { password, dry_run },
            CliCommand::Check { password } => Command::Check { password },
        }
    }
}

impl Cli {
    pub fn into_command(self) -> Command {
        self.command
            .map(Command::from)
            .unwrap_or(Command::Interactive)
    }
}

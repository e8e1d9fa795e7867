//! CLI module for the todolist client
//!
//! Every command runs the same operations as the GUI through a one-shot store,
//! so status tracking and error resolution behave identically.

mod commands;
mod output;

use clap::{Parser, Subcommand};

pub use output::{OutputFormat, print_error};

/// Todolist - to-do lists on the social-network backend
///
/// Starts the desktop app when no command is given.
#[derive(Parser, Debug)]
#[command(name = "todolist")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[command(flatten)]
    pub output: OutputOptions,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output formatting options
#[derive(Parser, Debug, Clone)]
pub struct OutputOptions {
    /// Output in JSON format (for machine parsing)
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl OutputOptions {
    pub fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in, log out and show the current user
    Auth {
        #[command(subcommand)]
        command: commands::auth::AuthCommands,
    },

    /// Manage todolists
    List {
        #[command(subcommand)]
        command: commands::list::ListCommands,
    },

    /// Manage the tasks of a todolist
    Task {
        #[command(subcommand)]
        command: commands::task::TaskCommands,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: commands::config::ConfigCommands,
    },
}

/// Run a parsed command
pub async fn run(command: Commands, output: &OutputOptions) -> anyhow::Result<()> {
    let format = output.format();
    let quiet = output.quiet;

    match command {
        Commands::Auth { command } => commands::auth::run(command, format, quiet).await,
        Commands::List { command } => commands::list::run(command, format, quiet).await,
        Commands::Task { command } => commands::task::run(command, format, quiet).await,
        Commands::Config { command } => commands::config::run(command, format, quiet).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_command_means_gui() {
        let cli = Cli::try_parse_from(["todolist"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_task_done() {
        let cli = Cli::try_parse_from(["todolist", "--json", "task", "done", "list-1", "task-9"]).unwrap();
        assert!(cli.output.json);
        assert!(matches!(
            cli.command,
            Some(Commands::Task {
                command: commands::task::TaskCommands::Done { .. }
            })
        ));
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tuido", about = concat!("tuido v", env!("CARGO_PKG_VERSION"), " - todo lists in your terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Read configuration from FILE instead of the default location
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Use FILE as the task document
    #[arg(long, global = true, value_name = "FILE")]
    pub data: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tasks, grouped by context
    List(ListArgs),
    /// Add a task
    Add(AddArgs),
    /// Toggle a task's completion
    Toggle(ToggleArgs),
    /// Search task text across every context
    Search(SearchArgs),
    /// List contexts with their completion counts
    Contexts,
    /// Show completion statistics
    Stats(StatsArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Only show this context
    #[arg(long)]
    pub context: Option<String>,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task text
    pub text: String,
    /// Context to add to (created if it does not exist)
    #[arg(long)]
    pub context: Option<String>,
}

#[derive(Args)]
pub struct ToggleArgs {
    /// Task ID
    pub id: u64,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Text to look for, ignoring case
    pub query: String,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct StatsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_globals_after_subcommand() {
        let cli = Cli::parse_from(["tuido", "list", "--context", "Work", "--data", "/tmp/t.json"]);
        assert_eq!(cli.data, Some(PathBuf::from("/tmp/t.json")));
        match cli.command {
            Some(Commands::List(args)) => {
                assert_eq!(args.context.as_deref(), Some("Work"));
                assert!(!args.json);
            }
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn no_subcommand_means_tui() {
        let cli = Cli::parse_from(["tuido"]);
        assert!(cli.command.is_none());
    }
}

use anyhow::Result;
use clap::{Parser, Subcommand};
use fxcall::core::config::Config;
use fxcall::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Conversion request, e.g. 100 USD to INR. Read from stdin when omitted.
    /// A query that is exactly `setup` runs the subcommand; enter it on stdin instead.
    #[arg(trailing_var_arg = true)]
    query: Vec<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fxcall::cli::setup::setup(),
        None => ask(cli.config_path.as_deref(), cli.query).await,
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

async fn ask(config_path: Option<&str>, query: Vec<String>) -> Result<()> {
    let config = Config::load(config_path)?;
    fxcall::cli::ask(&config, query).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_unquoted_query_words() {
        let cli = Cli::try_parse_from(["fxcall", "-v", "100", "USD", "to", "INR"]).unwrap();
        assert!(cli.verbose);
        assert!(cli.command.is_none());
        assert_eq!(cli.query, vec!["100", "USD", "to", "INR"]);
    }

    #[test]
    fn test_no_query_reads_stdin() {
        let cli = Cli::try_parse_from(["fxcall"]).unwrap();
        assert!(cli.query.is_empty());
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_setup_subcommand() {
        let cli = Cli::try_parse_from(["fxcall", "setup"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Setup)));
        assert!(cli.query.is_empty());
    }
}

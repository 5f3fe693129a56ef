//! Metagraph CLI - Command line interface for the BioCypher meta graph
//!
//! Builds adapter/pipeline nodes and edges from a GitHub project board.

mod commands;

use clap::{Parser, Subcommand};
use metagraph_core::{CliOverrides, Config, TokenProvider};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{ExportArgs, SummaryArgs};

/// Metagraph: the BioCypher adapter landscape as a knowledge graph
#[derive(Parser, Debug)]
#[command(name = "metagraph")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// GraphQL endpoint (overrides config and env)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Organization owning the project board (overrides config and env)
    #[arg(long, global = true)]
    organization: Option<String>,

    /// Project number (overrides config and env)
    #[arg(long, global = true)]
    project_number: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Fetch the board and write nodes and edges
    #[command(visible_alias = "x")]
    Export(ExportArgs),

    /// Fetch the board and print node/edge counts
    Summary(SummaryArgs),

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    // Load configuration with overrides
    let config = Config::load_with_overrides(CliOverrides {
        endpoint: cli.endpoint.clone(),
        organization: cli.organization.clone(),
        project_number: cli.project_number,
    })?;

    if cli.verbose {
        tracing::info!(
            endpoint = %config.github.endpoint,
            organization = %config.github.organization,
            project_number = config.github.project_number,
            "Configuration loaded"
        );
    }

    match cli.command {
        Some(Commands::Version) => {
            println!("metagraph {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Export(args)) => {
            args.execute(cli.verbose, &config).await?;
        }
        Some(Commands::Summary(args)) => {
            args.execute(&config).await?;
        }
        Some(Commands::Config) => {
            let tokens = TokenProvider::from_config(&config.auth);

            println!("Metagraph Configuration");
            println!("=======================");
            println!();
            println!("Project Board:");
            println!("  endpoint: {}", config.github.endpoint);
            println!("  organization: {}", config.github.organization);
            println!("  project_number: {}", config.github.project_number);
            println!("  item_page_size: {}", config.github.item_page_size);
            println!("  field_page_size: {}", config.github.field_page_size);
            println!("  max_pages: {}", config.github.max_pages);
            println!(
                "  request_timeout: {}s",
                config.github.request_timeout.as_secs()
            );
            println!();
            println!("Authentication:");
            println!("  token_env: {}", tokens.env_var());
            println!("  token_file: {}", tokens.token_file().display());
            println!(
                "  token: {}",
                if tokens.get_token().is_ok() {
                    "(found)"
                } else {
                    "(missing)"
                }
            );
            println!();
            if let Some(path) = Config::default_config_path() {
                println!("Config file: {}", path.display());
                if path.exists() {
                    println!("  (exists)");
                } else {
                    println!("  (not found - using defaults)");
                }
            }
        }
        None => {
            println!("Metagraph - GitHub project board to knowledge graph");
            println!();
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

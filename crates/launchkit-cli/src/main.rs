//! launchkit CLI launcher shell.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "launchkit")]
#[command(about = "Resolve launch files and push parameters to a registry", long_about = None)]
struct Cli {
    /// Parameter registry URL
    #[arg(
        long,
        env = "LAUNCHKIT_REGISTRY_URL",
        default_value = "http://localhost:11311"
    )]
    registry_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved parameters of a launch file
    Dump {
        /// Path to the root launch file
        path: String,
        /// Argument bindings, NAME=VALUE
        #[arg(long = "arg", value_name = "NAME=VALUE")]
        args: Vec<String>,
    },
    /// Resolve a launch file and push its parameters to the registry
    Load {
        /// Path to the root launch file
        path: String,
        /// Argument bindings, NAME=VALUE
        #[arg(long = "arg", value_name = "NAME=VALUE")]
        args: Vec<String>,
        /// Also print each parameter as it is resolved
        #[arg(short, long)]
        verbose: bool,
    },
    /// Validate a launch file without contacting the registry
    Validate {
        /// Path to the launch file
        path: String,
        /// Argument bindings, NAME=VALUE
        #[arg(long = "arg", value_name = "NAME=VALUE")]
        args: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Dump { path, args } => {
            commands::dump(&path, &args)?;
        }
        Commands::Load {
            path,
            args,
            verbose,
        } => {
            commands::load(&path, &args, &cli.registry_url, verbose).await?;
        }
        Commands::Validate { path, args } => {
            commands::validate(&path, &args)?;
        }
    }

    Ok(())
}

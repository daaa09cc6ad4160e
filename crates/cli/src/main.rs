//! Meridian CLI - portal operations tools.
//!
//! # Usage
//!
//! ```bash
//! # Validate configuration and check the remote API is reachable
//! mdx-cli check
//!
//! # Smoke-test a login against the remote API
//! mdx-cli whoami -e reception@meridiandx.example -p <password>
//!
//! # Preview which navigation entries each role can see
//! mdx-cli nav
//! mdx-cli nav --role TECHNICIAN
//! ```
//!
//! # Commands
//!
//! - `check` - Validate configuration, then probe the remote API
//! - `whoami` - Perform a login exchange and print the resolved identity
//! - `nav` - Print the role-filtered navigation tree

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "mdx-cli")]
#[command(author, version, about = "Meridian portal CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate configuration and check the remote API is reachable
    Check,
    /// Perform a login exchange and print the resolved identity
    Whoami {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,

        /// Remote API base URL (defaults to MERIDIAN_API_URL or localhost)
        #[arg(long)]
        api_url: Option<String>,
    },
    /// Print the navigation entries visible to each role
    Nav {
        /// Restrict the preview to one role (wire form, e.g. `BRANCH_ADMIN`)
        #[arg(short, long)]
        role: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Check => commands::check::run().await?,
        Commands::Whoami {
            email,
            password,
            api_url,
        } => commands::whoami::run(&email, &password, api_url.as_deref()).await?,
        Commands::Nav { role } => commands::nav::run(role.as_deref())?,
    }
    Ok(())
}

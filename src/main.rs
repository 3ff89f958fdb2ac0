#![forbid(unsafe_code)]
//! nx-setup command line interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use nxprompts::commands::{
    execute_init, execute_prompts, execute_stat, InitOptions, PromptsOptions, StatOptions,
};
use nxprompts::{CloudChoice, Config, RuntimeFlags};

#[derive(Parser)]
#[command(name = "nx-setup")]
#[command(about = "Workspace setup prompts with A/B variants")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path (default: .nx-setup.json, then the user config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive CI and remote caching setup
    Init {
        /// Skip interactive prompts
        #[arg(short = 'y', long)]
        yes: bool,

        /// Answer up front (yes, github, circleci, skip)
        #[arg(long)]
        nx_cloud: Option<CloudChoice>,

        /// Don't send a usage stat
        #[arg(long)]
        no_stats: bool,
    },

    /// Show the prompt variant selected for each key
    Prompts {
        /// Only this prompt key (setupCI, setupNxCloud)
        #[arg(short, long)]
        key: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Send one usage stat and wait for it
    Stat {
        /// Command name to report
        #[arg(long, default_value = "create-nx-workspace")]
        command: String,

        /// Version string whose major gates reporting
        #[arg(long)]
        nx_version: Option<String>,

        /// Report remote caching as enabled
        #[arg(long)]
        use_cloud: bool,

        /// Comma-separated tags
        #[arg(long, value_delimiter = ',')]
        meta: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut flags = RuntimeFlags::from_env();
    flags.verbose_logging |= cli.verbose;
    init_tracing(flags.verbose_logging);

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(),
    };
    tracing::debug!("Runtime flags: {:?}", flags);

    match cli.command {
        Commands::Init { yes, nx_cloud, no_stats } => {
            let options = InitOptions {
                yes,
                nx_cloud,
                no_stats,
            };
            execute_init(options, config, flags).await?;
        }

        Commands::Prompts { key, json } => {
            execute_prompts(PromptsOptions { key, json }, flags)?;
        }

        Commands::Stat {
            command,
            nx_version,
            use_cloud,
            meta,
        } => {
            let options = StatOptions {
                command,
                nx_version,
                use_cloud,
                meta,
            };
            execute_stat(options, config, flags).await?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use warpstone::WarpConfig;

#[derive(Parser)]
#[command(name = "warpstone", version, about = "Named warp points backed by SQLite")]
struct Cli {
    /// JSON configuration file
    #[arg(short = 'c', long = "config", global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Path to the warp database (overrides the configuration)
    #[arg(short = 'd', long = "db", global = true, value_name = "PATH")]
    store: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a new warp database initialised with schema and PRAGMAs
    Init {
        /// Name or path for the database file
        name: String,
    },
    /// Run one /warp command as the simulated caller
    Warp {
        #[command(flatten)]
        caller: CallerArgs,
        /// Subcommand and arguments, e.g. `new spawn 0 64 0`
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Print completion suggestions for a partial /warp command
    Complete {
        /// Tokens typed so far; pass "" for an empty final token
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// List warps with their locations
    List {
        #[arg(long = "prefix")]
        prefix: Option<String>,
        /// Emit JSON instead of one line per warp
        #[arg(long)]
        json: bool,
    },
    /// Show a warp as JSON
    Show { name: String },
    /// Interactive session issuing /warp commands as one caller
    Repl {
        #[command(flatten)]
        caller: CallerArgs,
    },
}

/// The caller the console host pretends to be.
#[derive(Args, Clone, Debug)]
pub(crate) struct CallerArgs {
    /// World the caller stands in
    #[arg(long = "world", default_value = "world")]
    world: String,

    /// Caller position as X,Y,Z; omit to act as the console
    #[arg(long = "at", value_name = "X,Y,Z", allow_hyphen_values = true)]
    at: Option<String>,

    /// Permission nodes granted to the caller (repeatable)
    #[arg(long = "grant", value_name = "PERMISSION")]
    grants: Vec<String>,
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = WarpConfig::load(cli.config.as_deref())?;
    if let Some(path) = cli.store {
        config.database = path;
    }

    match cli.command {
        Command::Init { name } => commands::cmd_init(&config, &name),
        Command::Warp { caller, args } => commands::cmd_warp(&config, &caller, &args),
        Command::Complete { args } => commands::cmd_complete(&config, &args),
        Command::List { prefix, json } => commands::cmd_list(&config, prefix.as_deref(), json),
        Command::Show { name } => commands::cmd_show(&config, &name),
        Command::Repl { caller } => commands::cmd_repl(&config, &caller),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

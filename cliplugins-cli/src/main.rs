use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use cliplugins_core::{ManagerConfig, PluginManager};
use cliplugins_paths::PluginDirs;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{Context, plugin_dispatch};
use config::ConfigLoader;

#[derive(Parser)]
#[command(name = "docker", about = "A self-sufficient runtime for containers")]
#[command(version, disable_help_flag = true, disable_help_subcommand = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable debug mode
    #[arg(short = 'D', long, global = true)]
    debug: bool,

    /// Set the logging level
    #[arg(short = 'l', long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    log_level: LogLevel,

    /// Location of client config files
    #[arg(long, value_name = "DIR", global = true)]
    config: Option<PathBuf>,

    /// Print usage
    #[arg(short = 'h', long)]
    help: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage CLI plugins
    Plugin(commands::plugin::PluginArgs),
    /// Show the docker version information
    Version(commands::version::VersionArgs),
    /// Help about any command or plugin
    Help {
        /// Command or plugin name
        topic: Option<String>,
    },
    #[command(external_subcommand)]
    External(Vec<OsString>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl LogLevel {
    fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error | LogLevel::Fatal => "error",
        }
    }
}

fn init_tracing(debug: bool, level: LogLevel) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_directive()))
    };

    // stdout belongs to the host and its plugins
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.debug, cli.log_level);

    let config = ConfigLoader::load(cli.config.as_deref())?;
    let plugin_dirs = PluginDirs::from_env_with(&config.cli_plugins_extra_dirs);
    tracing::debug!(dirs = ?plugin_dirs.as_slice(), "Plugin search path");

    let manager = PluginManager::new(ManagerConfig::new(plugin_dirs));
    let ctx = Context::new(manager, Cli::command());

    if cli.help {
        return plugin_dispatch::run_help(None, &ctx);
    }

    match cli.command {
        None => plugin_dispatch::run_help(None, &ctx),
        Some(Commands::Plugin(args)) => commands::plugin::run(args, &ctx),
        Some(Commands::Version(args)) => {
            commands::version::run(args)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Help { topic }) => plugin_dispatch::run_help(topic.as_deref(), &ctx),
        Some(Commands::External(args)) => plugin_dispatch::run(args, &ctx),
    }
}

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod api;
mod cmd;
mod config;
mod utils;

use cmd::{ListArgs, RunArgs, ShellArgs};
use config::{Config, Overrides};

/// Tianxing - chat commands backed by the tianapi knowledge API
///
/// Layout:
///   tianxing run <WORDS>...   dispatch one chat line (e.g. `run 地区 重庆`)
///   tianxing shell            dispatch chat lines read from stdin
///   tianxing list             show the supported commands
///
/// Global flags / env:
///   -v / -vv        Increase verbosity (logs go to stderr)
///   -q / --quiet    Errors only
///   -k / --key      API key (or TIANAPI_KEY env, or `key:` in the config file)
///   -c / --config   YAML config file (or TIANXING_CONFIG env)
///   --base-url      API host (default http://api.tianapi.com)
///
/// Examples:
///   tianxing -k $KEY run 热搜 -n 2
///   tianxing run --json "地区新闻 '重庆 渝中' -p 2"
///   echo "宠物 -t 0" | tianxing shell
#[derive(Parser, Debug)]
#[command(
    name = "tianxing",
    version,
    author,
    about = "Tianxing - chat commands backed by the tianapi knowledge API",
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Silence all non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// API access key
    #[arg(short = 'k', long = "key", global = true, value_name = "KEY")]
    key: Option<String>,

    /// YAML config file
    #[arg(short = 'c', long = "config", global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the API host
    #[arg(long = "base-url", global = true, value_name = "URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Dispatch one chat command line
    Run(RunArgs),

    /// Read chat command lines from stdin
    Shell(ShellArgs),

    /// List supported commands
    List(ListArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = utils::derive_level(cli.verbose, cli.quiet);
    utils::init_logging(level);

    let overrides = Overrides {
        key: cli.key,
        config: cli.config,
        base_url: cli.base_url,
    };

    match cli.command {
        Commands::List(args) => cmd::execute_list(args),
        Commands::Run(args) => {
            let config = load_config(overrides);
            cmd::execute_run(args, &config)
        }
        Commands::Shell(args) => {
            let config = load_config(overrides);
            cmd::execute_shell(args, &config)
        }
    }
}

/// Configuration problems are fatal before any command runs.
fn load_config(overrides: Overrides) -> Config {
    match Config::resolve(overrides) {
        Ok(config) => {
            log_debug!("using API host {}", config.base_url);
            config
        }
        Err(e) => {
            log_error!("{e:#}");
            std::process::exit(1);
        }
    }
}

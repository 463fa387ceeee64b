//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for civic-bridge
#[derive(Parser, Debug)]
#[command(name = "civic-bridge")]
#[command(author, version, about = "Public-sector and device APIs as callable tools")]
#[command(long_about = r##"
civic-bridge exposes a handful of upstream services as tools that a
tool-calling client can discover and invoke over stdio:

  firmenbuch   Austrian company register (needs FIRMENBUCH_API_KEY)
  klimaaktiv   klimaaktiv funding programmes
  linz         Innovationshauptplatz Linz citizen proposals
  hue          Philips Hue lights (needs PHILIPS_HUE_* settings)

Configuration files are loaded from (in priority order):
1. Environment          FIRMENBUCH_API_KEY, PHILIPS_HUE_*, CIVIC_BRIDGE_<SECTION>__<KEY>
2. --config <path>      Explicit config file
3. ./civic-bridge.toml  Project-level config
4. ~/.config/civic-bridge/config.toml   Global config

Example:
  civic-bridge serve klimaaktiv linz
  civic-bridge tools
  civic-bridge call find_funding --arg state=vienna --arg page=2
  civic-bridge call set_light --json '{"number": 1, "color": "#ff8800"}'
"##)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show the effective configuration and its sources, then exit
    #[arg(long)]
    pub show_config: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Serve the tools of the given adapters on stdin/stdout
    Serve {
        /// Adapters to serve (firmenbuch, klimaaktiv, linz, hue)
        #[arg(value_name = "ADAPTER", required = true)]
        adapters: Vec<String>,
    },

    /// List the tools offered by the given adapters (all when omitted)
    Tools {
        #[arg(value_name = "ADAPTER")]
        adapters: Vec<String>,
    },

    /// Call a single tool and print its text result
    Call {
        /// Tool name, e.g. find_funding
        #[arg(value_name = "TOOL")]
        tool: String,

        /// Argument as key=value; typed by the tool's parameter definition
        #[arg(short, long = "arg", value_name = "KEY=VALUE")]
        args: Vec<String>,

        /// Arguments as a JSON object; --arg values take precedence
        #[arg(long, value_name = "JSON")]
        json: Option<String>,
    },
}

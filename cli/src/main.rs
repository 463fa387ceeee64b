//! CLI entrypoint for civic-bridge
//!
//! This is the main binary that wires together all layers using
//! dependency injection. Stdout is reserved for protocol frames and tool
//! output; logs go to stderr or the `--log-file`.

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use civic_application::ToolExecutorPort;
use civic_infrastructure::{
    AdapterKind, ConfigLoader, FileConfig, JsonSchemaToolConverter, ToolRegistry, build_registry,
};
use civic_presentation::{Cli, Command, ConsoleFormatter, ToolServer, build_call};
use clap::{CommandFactory, Parser};
use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Flushes the log file on drop
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting civic-bridge {}", env!("CARGO_PKG_VERSION"));

    let config = if cli.no_config {
        ConfigLoader::load_without_files()
    } else {
        ConfigLoader::load(cli.config.as_ref())
    }
    .map_err(|e| anyhow!("Failed to load configuration: {}", e))?;

    if cli.show_config {
        ConfigLoader::print_config_sources();
        eprintln!();
        eprintln!("{}", toml::to_string_pretty(&config.redacted())?);
        return Ok(ExitCode::SUCCESS);
    }

    config.validate().context("Invalid configuration")?;

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Command::Serve { adapters } => {
            serve(&parse_adapters(&adapters)?, &config).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Tools { adapters } => {
            let registry = build_registry(&parse_adapters(&adapters)?, &config).await?;
            println!(
                "{}",
                ConsoleFormatter::format_tools(&registry.server_info(), registry.tool_spec())
            );
            Ok(ExitCode::SUCCESS)
        }
        Command::Call { tool, args, json } => call(&tool, &args, json.as_deref(), &config).await,
    }
}

fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match log_file {
        Some(path) => {
            let file_name = path
                .file_name()
                .ok_or_else(|| anyhow!("--log-file must name a file: {}", path.display()))?;
            let directory = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            builder.with_writer(writer).with_ansi(false).init();
            Ok(Some(guard))
        }
        None => {
            builder.with_writer(std::io::stderr).init();
            Ok(None)
        }
    }
}

fn parse_adapters(names: &[String]) -> Result<Vec<AdapterKind>> {
    names
        .iter()
        .map(|name| name.parse::<AdapterKind>().map_err(|e| anyhow!(e)))
        .collect()
}

async fn serve(adapters: &[AdapterKind], config: &FileConfig) -> Result<()> {
    let registry = build_registry(adapters, config).await?;
    if registry.tool_spec().is_empty() {
        warn!("No tools to serve, check the adapter configuration");
    }

    let server_info = registry.server_info();
    let server = ToolServer::new(
        Arc::new(registry),
        Arc::new(JsonSchemaToolConverter),
        server_info,
    );

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_signal.cancel();
        }
    });

    server
        .serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout(), cancel)
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn call(
    tool: &str,
    args: &[String],
    json: Option<&str>,
    config: &FileConfig,
) -> Result<ExitCode> {
    let registry: ToolRegistry = build_registry(&[], config).await?;
    let call = build_call(tool, args, json, registry.get_tool(tool))?;

    let result = registry.execute(&call).await;
    println!("{}", ConsoleFormatter::format_result(&result));
    eprintln!("{}", ConsoleFormatter::format_summary(&result));

    Ok(if result.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

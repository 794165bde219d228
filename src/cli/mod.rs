pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::context::ExecutionContext;

#[derive(Parser)]
#[command(name = "axiom-platform")]
#[command(about = "Inspect how Axiom telemetry endpoints resolve for this environment")]
#[command(version)]
pub struct Cli {
    /// TOML settings file (defaults to reading the environment)
    #[arg(long, global = true, env = "AXIOM_PLATFORM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Execution context to resolve for: browser or server (defaults to detection)
    #[arg(long, global = true, value_parser = parse_context)]
    pub context: Option<ExecutionContext>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check that ingestion URL, dataset and token are configured
    Check,
    /// Print the resolved logs and web-vitals endpoints as JSON
    Endpoints,
    /// Print the request report generated for a synthetic request
    RequestMeta(RequestMetaArgs),
}

#[derive(clap::Args)]
pub struct RequestMetaArgs {
    /// Request path, including query
    #[arg(long, default_value = "/")]
    pub url: String,

    /// HTTP method
    #[arg(long, default_value = "GET")]
    pub method: String,

    /// Header as name:value (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,
}

fn parse_context(value: &str) -> Result<ExecutionContext, String> {
    ExecutionContext::from_name(value)
        .ok_or_else(|| format!("unknown context '{}': expected browser or server", value))
}

fn parse_header(value: &str) -> Result<(String, String), String> {
    let (name, header_value) = value
        .split_once(':')
        .ok_or_else(|| format!("invalid header '{}': expected name:value", value))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("invalid header '{}': empty name", value));
    }
    Ok((name.to_lowercase(), header_value.trim().to_string()))
}

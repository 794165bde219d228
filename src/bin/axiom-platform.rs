use axiom_platform::cli::{commands, Cli, Commands};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.json_logs {
        axiom_platform::native::init_json_tracing();
    } else {
        axiom_platform::init_tracing();
    }

    let provider = commands::load_provider(&cli)?;

    match &cli.command {
        Commands::Check => commands::execute_check(&provider)?,
        Commands::Endpoints => commands::execute_endpoints(&provider)?,
        Commands::RequestMeta(args) => commands::execute_request_meta(&provider, args)?,
    }

    Ok(())
}

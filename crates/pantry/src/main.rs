mod cli;
mod commands;
mod error;
mod output;

use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use pantry_config::Config;
use pantry_core::{CatalogConfig, QueryClient};

use crate::cli::{Cli, Command, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output::Printer;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands work without a readable config file
        Command::Config(args) => {
            let printer = printer(&cli.global, cli.global.output.unwrap_or(OutputFormat::Table));
            commands::config_cmd::handle(args, &printer)
        }

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "pantry", &mut std::io::stdout());
            Ok(())
        }

        // Everything else talks to the catalog
        cmd => {
            let cfg = pantry_config::load_config()?;
            let format = resolve_output(&cli.global, &cfg)?;
            let catalog = build_catalog_config(&cli.global, &cfg)?;
            let client = QueryClient::from_config(&catalog)?;
            let printer = printer(&cli.global, format);

            tracing::debug!(command = ?cmd, base_url = %catalog.base_url, "dispatching command");
            commands::dispatch(cmd, client, &catalog, &printer).await
        }
    }
}

fn printer(global: &GlobalOpts, format: OutputFormat) -> Printer {
    Printer {
        format,
        color: output::should_color(global.color),
        quiet: global.quiet,
    }
}

/// `--output`, else the config file's default.
fn resolve_output(global: &GlobalOpts, cfg: &Config) -> Result<OutputFormat, CliError> {
    if let Some(format) = global.output {
        return Ok(format);
    }
    OutputFormat::from_str(&cfg.defaults.output, true).map_err(|_| CliError::Validation {
        field: "defaults.output".into(),
        reason: format!("unknown output format '{}'", cfg.defaults.output),
    })
}

/// Build a `CatalogConfig` from the config file, profile, and CLI overrides.
fn build_catalog_config(global: &GlobalOpts, cfg: &Config) -> Result<CatalogConfig, CliError> {
    let mut catalog = cfg.catalog_config(global.profile.as_deref())?;

    if let Some(ref raw) = global.base_url {
        let url: url::Url = raw.parse().map_err(|_| CliError::Validation {
            field: "base-url".into(),
            reason: format!("invalid URL: {raw}"),
        })?;
        if url.cannot_be_a_base() {
            return Err(CliError::Validation {
                field: "base-url".into(),
                reason: format!("not a base URL: {raw}"),
            });
        }
        catalog.base_url = url;
    }

    if let Some(secs) = global.timeout {
        catalog.timeout = Duration::from_secs(secs);
    }

    Ok(catalog)
}

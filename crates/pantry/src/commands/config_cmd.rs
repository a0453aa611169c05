//! Config subcommand handlers.

use pantry_config::{self as config, Config};

use crate::cli::{ConfigArgs, ConfigCommand, OutputFormat};
use crate::error::CliError;
use crate::output::{self, Printer};

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, printer: &Printer) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            printer.print(&config::config_path().display().to_string());
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            let out = match printer.format {
                OutputFormat::Table | OutputFormat::Plain => {
                    toml::to_string_pretty(&cfg).map_err(|e| CliError::Render(e.to_string()))?
                }
                structured => output::render_structured(structured, &cfg)?,
            };
            printer.print(out.trim_end());
            Ok(())
        }

        ConfigCommand::Init { force } => {
            let path = config::config_path();
            if path.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }

            let written = config::save_config(&Config::default())?;
            if !printer.quiet {
                eprintln!("Config written to {}", written.display());
            }
            Ok(())
        }
    }
}

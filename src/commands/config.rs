//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use vertdrop_core::AppError;
use vertdrop_core::config::AppConfig;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Check the configuration for unusable values
    Validate,
}

/// Execute config commands
pub fn execute(
    args: &ConfigArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => match format {
            OutputFormat::Json => output::print_json(config, "{}"),
            OutputFormat::Table => {
                output::print_kv("API base URL", &config.api.base_url);
                output::print_kv("Timeout", &format!("{}s", config.api.timeout_seconds));
                output::print_kv("Login path", &config.api.login_path);
                output::print_kv("Identity path", &config.api.identity_path);
                let slot = config.session.slot_path();
                output::print_kv("Credential slot", &slot.display().to_string());
                output::print_kv("Log level", &config.logging.level);
                output::print_kv("Log format", &config.logging.format);
            }
        },
        ConfigCommand::Validate => {
            let problems = validate(config);
            if problems.is_empty() {
                output::print_success("Configuration is valid");
            } else {
                for problem in &problems {
                    output::print_error(problem);
                }
                return Err(AppError::configuration(format!(
                    "{} configuration problem(s)",
                    problems.len()
                )));
            }
        }
    }

    Ok(())
}

fn validate(config: &AppConfig) -> Vec<String> {
    let mut problems = Vec::new();

    let base = &config.api.base_url;
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        problems.push(format!("api.base_url must be an http(s) URL, got '{base}'"));
    }
    if config.api.timeout_seconds == 0 {
        problems.push("api.timeout_seconds must be greater than zero".to_string());
    }
    for (key, path) in [
        ("api.login_path", &config.api.login_path),
        ("api.register_path", &config.api.register_path),
        ("api.identity_path", &config.api.identity_path),
    ] {
        if !path.starts_with('/') {
            problems.push(format!("{key} must start with '/', got '{path}'"));
        }
    }
    if config.session.slot_name.trim().is_empty() {
        problems.push("session.slot_name must not be empty".to_string());
    }
    if !matches!(config.logging.format.as_str(), "pretty" | "json") {
        problems.push(format!(
            "logging.format must be 'pretty' or 'json', got '{}'",
            config.logging.format
        ));
    }

    problems
}

//! CLI command definitions and dispatch.

pub mod api;
pub mod config;
pub mod login;
pub mod logout;
pub mod menu;
pub mod navigate;
pub mod register;
pub mod whoami;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use vertdrop_core::AppError;
use vertdrop_core::config::AppConfig;
use vertdrop_entity::Identity;

use crate::app::AppContext;
use crate::output::OutputFormat;

/// VertDrop: delivery dashboard console
#[derive(Debug, Parser)]
#[command(name = "vertdrop", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding default.toml and the environment overlays
    #[arg(long, default_value = "config")]
    pub config_dir: String,

    /// Configuration environment (overrides VERTDROP_ENV)
    #[arg(long)]
    pub env: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log in and land on the dashboard
    Login(login::LoginArgs),
    /// Create an account and log in with it
    Register(register::RegisterArgs),
    /// End the current session
    Logout,
    /// Show the current identity
    Whoami,
    /// Open a dashboard path through the access guard
    Navigate(navigate::NavigateArgs),
    /// List the navigation entries for the current role
    Menu,
    /// Call a backend endpoint with the session token
    Api(api::ApiArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, app_config: AppConfig) -> Result<(), AppError> {
        if let Commands::Config(args) = &self.command {
            return config::execute(args, &app_config, self.format);
        }

        let ctx = AppContext::build(app_config)?;
        match &self.command {
            Commands::Login(args) => login::execute(args, &ctx, self.format).await,
            Commands::Register(args) => register::execute(args, &ctx, self.format).await,
            Commands::Logout => logout::execute(&ctx).await,
            Commands::Whoami => whoami::execute(&ctx, self.format).await,
            Commands::Navigate(args) => navigate::execute(args, &ctx, self.format).await,
            Commands::Menu => menu::execute(&ctx, self.format).await,
            Commands::Api(args) => api::execute(args, &ctx).await,
            Commands::Config(_) => Ok(()),
        }
    }
}

/// Identity display row
#[derive(Debug, Serialize, Tabled)]
pub struct IdentityRow {
    /// Identity ID
    pub id: i64,
    /// Display name
    pub name: String,
    /// Email
    pub email: String,
    /// Role
    pub role: String,
    /// Phone
    pub phone: String,
}

impl From<&Identity> for IdentityRow {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id,
            name: identity.display_name.clone(),
            email: identity.email.clone(),
            role: identity.role.to_string(),
            phone: identity.phone.clone().unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Helper: read a value from the prompt
pub fn prompt_text(prompt: &str) -> Result<String, AppError> {
    dialoguer::Input::new()
        .with_prompt(prompt)
        .interact_text()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))
}

/// Helper: read a password from the prompt without echo
pub fn prompt_password(prompt: &str, confirm: bool) -> Result<String, AppError> {
    let mut input = dialoguer::Password::new().with_prompt(prompt);
    if confirm {
        input = input.with_confirmation("Confirm password", "Passwords do not match");
    }
    input
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))
}

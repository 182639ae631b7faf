//! `vertdrop login`

use clap::Args;

use vertdrop_core::AppError;
use vertdrop_entity::LoginCredentials;

use super::IdentityRow;
use crate::app::AppContext;
use crate::output::{self, OutputFormat};

/// Arguments for login
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Email or username (prompted when omitted)
    #[arg(short, long)]
    pub username: Option<String>,

    /// Password (prompted when omitted)
    #[arg(short, long)]
    pub password: Option<String>,

    /// Dashboard path that was being opened; login lands there if the role allows it
    #[arg(long)]
    pub from: Option<String>,
}

/// Execute login
pub async fn execute(
    args: &LoginArgs,
    ctx: &AppContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let username = match &args.username {
        Some(u) => u.clone(),
        None => super::prompt_text("Email or username")?,
    };
    let password = match &args.password {
        Some(p) => p.clone(),
        None => super::prompt_password("Password", false)?,
    };

    let mut navigator = ctx.navigator();
    if let Some(from) = &args.from {
        navigator.navigate(from);
    }

    let session = ctx
        .resolver
        .login(LoginCredentials::new(username, password))
        .await?;
    let landing = navigator.after_login();

    let identity = session
        .identity()
        .ok_or_else(|| AppError::internal("Login completed without an identity"))?;

    match format {
        OutputFormat::Json => output::print_json(
            &serde_json::json!({ "identity": identity, "landing": landing }),
            "{}",
        ),
        OutputFormat::Table => {
            output::print_success(&format!("Logged in as {}", identity.display_name));
            output::print_item(&IdentityRow::from(identity), format);
            output::print_kv("Landing", landing.path());
        }
    }

    Ok(())
}

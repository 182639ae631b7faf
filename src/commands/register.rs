//! `vertdrop register`

use clap::Args;

use vertdrop_core::AppError;
use vertdrop_entity::{RegisterRequest, Role};

use super::IdentityRow;
use crate::app::AppContext;
use crate::output::{self, OutputFormat};

/// Arguments for registration
#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Email address, used to log in
    #[arg(short, long)]
    pub email: String,

    /// Family name
    #[arg(long)]
    pub nom: String,

    /// Given name
    #[arg(long)]
    pub prenom: String,

    /// Phone number
    #[arg(long, default_value = "")]
    pub telephone: String,

    /// Requested role (ADMIN, MANAGER, LIVREUR, CLIENT)
    #[arg(short, long, default_value = "CLIENT")]
    pub role: Role,

    /// Password (prompted with confirmation when omitted)
    #[arg(short, long)]
    pub password: Option<String>,
}

/// Execute registration
pub async fn execute(
    args: &RegisterArgs,
    ctx: &AppContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let password = match &args.password {
        Some(p) => p.clone(),
        None => super::prompt_password("Password", true)?,
    };

    let request = RegisterRequest {
        email: args.email.trim().to_string(),
        password,
        nom: args.nom.trim().to_string(),
        prenom: args.prenom.trim().to_string(),
        telephone: args.telephone.trim().to_string(),
        role: args.role,
    };

    let session = ctx.resolver.register(request).await?;
    let landing = ctx.navigator().after_login();

    let identity = session
        .identity()
        .ok_or_else(|| AppError::internal("Registration completed without an identity"))?;

    match format {
        OutputFormat::Json => output::print_json(
            &serde_json::json!({ "identity": identity, "landing": landing }),
            "{}",
        ),
        OutputFormat::Table => {
            output::print_success(&format!("Account created for {}", identity.email));
            output::print_item(&IdentityRow::from(identity), format);
            output::print_kv("Landing", landing.path());
        }
    }

    Ok(())
}

//! `vertdrop navigate <path>`

use clap::Args;

use vertdrop_auth::{NavigationOutcome, RedirectReason};
use vertdrop_core::AppError;

use crate::app::AppContext;
use crate::output::{self, OutputFormat};

/// Arguments for navigate
#[derive(Debug, Args)]
pub struct NavigateArgs {
    /// Dashboard path, e.g. /admin/zones
    pub path: String,
}

/// Execute navigate
pub async fn execute(
    args: &NavigateArgs,
    ctx: &AppContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let mut navigator = ctx.navigator();
    if let Err(e) = ctx.restore().await {
        output::print_warning(&format!("Session could not be restored: {e}"));
    }

    let outcome = navigator.navigate(&args.path);

    if format == OutputFormat::Json {
        output::print_json(&outcome, "{}");
        return Ok(());
    }

    match &outcome {
        NavigationOutcome::Rendered { path } => output::print_success(&format!("Showing {path}")),
        NavigationOutcome::Loading { path } => {
            output::print_warning(&format!("Session still resolving, {path} pending"))
        }
        NavigationOutcome::Redirected { to, reason } => {
            output::print_warning(&format!("Redirected to {to} ({})", describe(*reason)));
            if *reason == RedirectReason::NotAuthenticated {
                output::print_kv(
                    "Hint",
                    &format!("vertdrop login --from {}", navigator.return_to().unwrap_or("/")),
                );
            }
        }
    }
    Ok(())
}

fn describe(reason: RedirectReason) -> &'static str {
    match reason {
        RedirectReason::NotAuthenticated => "login required",
        RedirectReason::RoleNotAdmitted => "not available for your role",
        RedirectReason::UnknownRoute => "unknown page",
        RedirectReason::AlreadyAuthenticated => "already logged in",
        RedirectReason::SessionEnded => "session ended",
    }
}

//! `vertdrop api <path>`

use clap::Args;

use vertdrop_core::AppError;

use crate::app::AppContext;
use crate::output;

/// Arguments for api
#[derive(Debug, Args)]
pub struct ApiArgs {
    /// Backend path relative to the base URL, e.g. /parcels
    pub path: String,
}

/// Execute a GET against the backend with the session token
pub async fn execute(args: &ApiArgs, ctx: &AppContext) -> Result<(), AppError> {
    let mut navigator = ctx.navigator();
    ctx.restore().await?;

    match ctx.api.get_json::<serde_json::Value>(&args.path).await {
        Ok(body) => {
            output::print_json(&body, "null");
            Ok(())
        }
        Err(e) => {
            if let Some(outcome) = navigator.process_events() {
                output::print_warning(&format!(
                    "Session ended, returned to {}. Run `vertdrop login`.",
                    outcome.path()
                ));
            }
            Err(e)
        }
    }
}

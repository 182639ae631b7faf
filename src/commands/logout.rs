//! `vertdrop logout`

use vertdrop_core::AppError;

use crate::app::AppContext;
use crate::output;

/// Execute logout
pub async fn execute(ctx: &AppContext) -> Result<(), AppError> {
    let had_token = ctx.store.persisted_token().await?.is_some();
    ctx.resolver.logout().await?;

    if had_token {
        output::print_success("Logged out");
    } else {
        output::print_warning("No session to end");
    }
    Ok(())
}

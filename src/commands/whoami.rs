//! `vertdrop whoami`

use vertdrop_core::AppError;

use super::IdentityRow;
use crate::app::AppContext;
use crate::output::{self, OutputFormat};

/// Execute whoami
pub async fn execute(ctx: &AppContext, format: OutputFormat) -> Result<(), AppError> {
    let Some(session) = ctx.restore().await? else {
        output::print_warning("Not logged in. Run `vertdrop login`.");
        return Ok(());
    };

    match session.identity() {
        Some(identity) => output::print_item(&IdentityRow::from(identity), format),
        None => output::print_warning("Session has no identity"),
    }
    Ok(())
}

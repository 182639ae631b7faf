//! `vertdrop menu`

use serde::Serialize;
use tabled::Tabled;

use vertdrop_core::AppError;

use crate::app::AppContext;
use crate::output::{self, OutputFormat};

/// Menu display row
#[derive(Debug, Serialize, Tabled)]
struct MenuRow {
    /// Entry label
    label: String,
    /// Target path
    path: String,
}

/// Execute menu
pub async fn execute(ctx: &AppContext, format: OutputFormat) -> Result<(), AppError> {
    ctx.restore().await?;
    let navigator = ctx.navigator();

    let rows: Vec<MenuRow> = navigator
        .menu()
        .into_iter()
        .map(|item| MenuRow {
            label: item.label.to_string(),
            path: item.href.to_string(),
        })
        .collect();

    if rows.is_empty() && format == OutputFormat::Table {
        output::print_warning("Not logged in. Run `vertdrop login`.");
        return Ok(());
    }

    output::print_list(&rows, format);
    Ok(())
}

use washbook_core::history;

use crate::app::AppContext;
use crate::cli::SearchArgs;
use crate::errors::CliError;
use crate::helpers::parse_date_key;
use crate::output::{day_json, print_day};
use crate::ui::{header, print, print_json};

pub fn handle_search(ctx: &AppContext<'_>, args: &SearchArgs) -> anyhow::Result<()> {
    let date_key = parse_date_key(&args.date)?;
    let store = ctx.open_store()?;
    let snapshot = store.snapshot();

    let day = history::search(&snapshot, &date_key).map_err(|_| {
        CliError::not_found(
            "No data found for this date.",
            "Hint: Run `washbook history` to see recorded dates.",
        )
    })?;

    let ui_ctx = ctx.ui_context();
    if ui_ctx.mode.is_json() {
        return print_json(&day_json(&date_key, day));
    }
    if !ctx.quiet() {
        print(&ui_ctx, &header(&ui_ctx, "search", Some(&date_key)));
    }
    print_day(&ui_ctx, &date_key, day);
    Ok(())
}

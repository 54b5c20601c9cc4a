use crate::app::AppContext;
use crate::cli::EntryArgs;
use crate::helpers::parse_date_key;
use crate::output::entry_json;
use crate::ui::{format_amount, print, print_json, receipt};

use super::entry_not_found;

pub async fn handle_delete(ctx: &AppContext<'_>, args: &EntryArgs) -> anyhow::Result<()> {
    let date_key = parse_date_key(&args.date)?;
    let mut store = ctx.open_store()?;

    let removed = store
        .delete_entry(&date_key, args.index)
        .map_err(|_| entry_not_found(&date_key, args.index))?;
    store.flush().await?;

    if ctx.quiet() {
        return Ok(());
    }
    let ui_ctx = ctx.ui_context();
    if ui_ctx.mode.is_json() {
        return print_json(&entry_json(&date_key, args.index, &removed));
    }

    let remaining = store
        .snapshot()
        .get(&date_key)
        .map(|day| day.entries.len())
        .unwrap_or(0);
    let items = [
        ("Date", date_key.clone()),
        ("Name", removed.name.clone()),
        ("Type", removed.kind.to_string()),
        ("Amount", format_amount(removed.amount)),
        ("Remaining", remaining.to_string()),
    ];
    print(&ui_ctx, &receipt(&ui_ctx, "Deleted entry", &items));
    Ok(())
}

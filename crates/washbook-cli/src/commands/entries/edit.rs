use washbook_core::ledger::parse_amount;
use washbook_core::EntryUpdate;

use crate::app::AppContext;
use crate::cli::EditArgs;
use crate::helpers::{parse_date_key, require_field};
use crate::output::entry_json;
use crate::ui::{format_amount, print, print_json, receipt};

use super::entry_not_found;

pub async fn handle_edit(ctx: &AppContext<'_>, args: &EditArgs) -> anyhow::Result<()> {
    let date_key = parse_date_key(&args.date)?;
    let mut store = ctx.open_store()?;

    let snapshot = store.snapshot();
    let current = snapshot
        .entry(&date_key, args.index)
        .map_err(|_| entry_not_found(&date_key, args.index))?;

    let mut update = EntryUpdate::from_entry(current);
    if let Some(name) = args.name.as_deref() {
        update = update.name(require_field(Some(name))?);
    }
    if let Some(amount) = args.amount.as_deref() {
        update = update.amount(parse_amount(amount)?);
    }
    if let Some(desc) = args.desc.as_deref() {
        update = update.desc(desc.trim());
    }
    if let Some(kind) = args.kind {
        update = update.kind(kind);
    }

    store.edit_entry(&date_key, args.index, &update)?;
    store.flush().await?;

    if ctx.quiet() {
        return Ok(());
    }
    let ui_ctx = ctx.ui_context();
    if ui_ctx.mode.is_json() {
        let snapshot = store.snapshot();
        let entry = snapshot.entry(&date_key, args.index)?;
        return print_json(&entry_json(&date_key, args.index, entry));
    }

    let items = [
        ("Date", date_key.clone()),
        ("Index", args.index.to_string()),
        ("Name", update.name.clone()),
        ("Type", update.kind.to_string()),
        ("Amount", format_amount(update.amount)),
    ];
    print(&ui_ctx, &receipt(&ui_ctx, "Updated entry", &items));
    Ok(())
}

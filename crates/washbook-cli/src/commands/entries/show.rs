use crate::app::AppContext;
use crate::cli::EntryArgs;
use crate::helpers::parse_date_key;
use crate::output::{entry_json, print_entry};
use crate::ui::print_json;

use super::entry_not_found;

pub fn handle_show(ctx: &AppContext<'_>, args: &EntryArgs) -> anyhow::Result<()> {
    let date_key = parse_date_key(&args.date)?;
    let store = ctx.open_store()?;
    let snapshot = store.snapshot();
    let entry = snapshot
        .entry(&date_key, args.index)
        .map_err(|_| entry_not_found(&date_key, args.index))?;

    let ui_ctx = ctx.ui_context();
    if ui_ctx.mode.is_json() {
        return print_json(&entry_json(&date_key, args.index, entry));
    }
    print_entry(&ui_ctx, &date_key, args.index, entry);
    Ok(())
}

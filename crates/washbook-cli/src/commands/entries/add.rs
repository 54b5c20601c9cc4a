//! Add entry command handler.

use chrono::Utc;

use washbook_core::ledger::parse_amount;

use crate::app::AppContext;
use crate::cli::AddArgs;
use crate::helpers::{parse_entry_timestamp, require_field};
use crate::output::entry_json;
use crate::ui::{format_amount, print, print_json, receipt};

pub async fn handle_add(ctx: &AppContext<'_>, args: &AddArgs) -> anyhow::Result<()> {
    let name = require_field(args.name.as_deref())?;
    let amount = parse_amount(require_field(args.amount.as_deref())?)?;
    let timestamp = parse_entry_timestamp(args.date.as_deref(), Utc::now())?;

    let mut store = ctx.open_store()?;
    let location = store.add_entry(&timestamp, name, amount, args.desc.trim(), args.kind)?;
    store.flush().await?;

    if ctx.quiet() {
        return Ok(());
    }
    let ui_ctx = ctx.ui_context();
    if ui_ctx.mode.is_json() {
        let snapshot = store.snapshot();
        let entry = snapshot.entry(&location.date_key, location.index)?;
        return print_json(&entry_json(&location.date_key, location.index, entry));
    }

    let items = [
        ("Date", location.date_key.clone()),
        ("Index", location.index.to_string()),
        ("Name", name.to_string()),
        ("Type", args.kind.to_string()),
        ("Amount", format_amount(amount)),
    ];
    print(
        &ui_ctx,
        &receipt(&ui_ctx, &format!("Added {} entry", args.kind), &items),
    );
    Ok(())
}

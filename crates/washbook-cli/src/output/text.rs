//! Text and table output formatting for entries and days.

use washbook_core::{DayRecord, Entry};

use crate::ui::theme::{kind_style, styled};
use crate::ui::{
    format_amount, format_net, kv, print, single_line, table, time_of_day, truncate, Column,
    UiContext,
};

const DESC_MAX: usize = 40;

const ENTRY_COLUMNS: [Column; 6] = [
    Column::new("#"),
    Column::new("Time"),
    Column::entry_type("Type"),
    Column::amount("Amount"),
    Column::new("Name"),
    Column::new("Description"),
];

/// Table rows for the entries of one day, in stored order.
pub fn entry_rows(ctx: &UiContext, day: &DayRecord) -> Vec<Vec<String>> {
    day.entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let desc = single_line(&entry.desc);
            vec![
                index.to_string(),
                if ctx.mode.is_pretty() {
                    time_of_day(&entry.time)
                } else {
                    entry.time.clone()
                },
                entry.kind.to_string(),
                format_amount(entry.amount),
                single_line(&entry.name),
                if ctx.mode.is_pretty() {
                    truncate(&desc, DESC_MAX)
                } else {
                    desc
                },
            ]
        })
        .collect()
}

/// Print a day's totals followed by its entries.
pub fn print_day(ctx: &UiContext, date_key: &str, day: &DayRecord) {
    print(ctx, &kv(ctx, "Date", date_key));
    print(ctx, &kv(ctx, "Credit", &format_amount(day.credit)));
    print(ctx, &kv(ctx, "Debit", &format_amount(day.debit)));
    print(ctx, &kv(ctx, "Net", &format_net(day.net())));
    print(ctx, &table(ctx, &ENTRY_COLUMNS, &entry_rows(ctx, day)));
}

/// Print every field of one entry.
pub fn print_entry(ctx: &UiContext, date_key: &str, index: usize, entry: &Entry) {
    let amount = styled(
        &format_amount(entry.amount),
        kind_style(entry.kind),
        ctx.color,
    );
    print(ctx, &kv(ctx, "Date", date_key));
    print(ctx, &kv(ctx, "Index", &index.to_string()));
    print(ctx, &kv(ctx, "Time", &entry.time));
    print(ctx, &kv(ctx, "Name", &entry.name));
    print(ctx, &kv(ctx, "Type", entry.kind.as_str()));
    print(ctx, &kv(ctx, "Amount", &amount));
    print(ctx, &kv(ctx, "Description", &single_line(&entry.desc)));
}

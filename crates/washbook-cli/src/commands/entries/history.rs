use serde_json::Value;

use washbook_core::history::{self, MonthSummary};
use washbook_core::Ledger;

use crate::app::AppContext;
use crate::cli::HistoryArgs;
use crate::output::{day_json, month_json, print_day};
use crate::ui::{
    blank_line, format_amount, format_net, header, hint, kv, print, print_json, table, Column,
    UiContext,
};

const MONTH_COLUMNS: [Column; 5] = [
    Column::new("Month"),
    Column::amount("Credit"),
    Column::amount("Debit"),
    Column::amount("Net"),
    Column::new("Dates"),
];

pub fn handle_history(ctx: &AppContext<'_>, args: &HistoryArgs) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let snapshot = store.snapshot();
    let ui_ctx = ctx.ui_context();

    if args.monthly {
        print_monthly(ctx, &ui_ctx, &history::monthly(&snapshot))
    } else {
        print_daily(ctx, &ui_ctx, &snapshot)
    }
}

fn print_daily(ctx: &AppContext<'_>, ui_ctx: &UiContext, ledger: &Ledger) -> anyhow::Result<()> {
    let days = history::daily(ledger);
    if ui_ctx.mode.is_json() {
        let values: Vec<Value> = days
            .iter()
            .map(|(date_key, day)| day_json(date_key, day))
            .collect();
        return print_json(&Value::Array(values));
    }

    if !ctx.quiet() {
        print(ui_ctx, &header(ui_ctx, "history", None));
    }
    if days.is_empty() {
        print_empty(ctx, ui_ctx);
        return Ok(());
    }
    for (date_key, day) in days {
        blank_line(ui_ctx);
        print_day(ui_ctx, date_key, day);
    }
    if !ctx.quiet() {
        let (credit, debit) = history::totals(ledger);
        blank_line(ui_ctx);
        print(ui_ctx, &kv(ui_ctx, "Total Net", &format_net(credit - debit)));
    }
    Ok(())
}

fn print_monthly(
    ctx: &AppContext<'_>,
    ui_ctx: &UiContext,
    months: &[MonthSummary],
) -> anyhow::Result<()> {
    if ui_ctx.mode.is_json() {
        return print_json(&Value::Array(months.iter().map(month_json).collect()));
    }

    if !ctx.quiet() {
        print(ui_ctx, &header(ui_ctx, "history", Some("monthly")));
    }
    if months.is_empty() {
        print_empty(ctx, ui_ctx);
        return Ok(());
    }
    let rows: Vec<Vec<String>> = months
        .iter()
        .map(|month| {
            vec![
                month.month.clone(),
                format_amount(month.credit),
                format_amount(month.debit),
                format_net(month.net()),
                month.dates.join(","),
            ]
        })
        .collect();
    print(ui_ctx, &table(ui_ctx, &MONTH_COLUMNS, &rows));
    Ok(())
}

fn print_empty(ctx: &AppContext<'_>, ui_ctx: &UiContext) {
    if ctx.quiet() {
        return;
    }
    print(ui_ctx, "No records yet.");
    print(
        ui_ctx,
        &hint(ui_ctx, "washbook add --name <NAME> --amount <AMOUNT>"),
    );
}

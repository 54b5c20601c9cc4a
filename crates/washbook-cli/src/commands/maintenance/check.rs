use crate::app::AppContext;
use crate::errors::CliError;
use crate::ui::{badge, hint, kv, print, print_json, Badge};

pub fn handle_check(ctx: &AppContext<'_>) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let snapshot = store.snapshot();

    let mut problems: Vec<String> = snapshot
        .check_integrity()
        .into_iter()
        .map(|issue| format!("{}: {}", issue.date_key, issue.message))
        .collect();
    if let Some(warning) = store.load_warning() {
        problems.insert(0, warning.to_string());
    }

    let ui_ctx = ctx.ui_context();
    if ui_ctx.mode.is_json() {
        print_json(&serde_json::json!({
            "ok": problems.is_empty(),
            "days": snapshot.len(),
            "entries": snapshot.entry_count(),
            "problems": problems,
        }))?;
    } else if problems.is_empty() {
        if !ctx.quiet() {
            print(&ui_ctx, &badge(&ui_ctx, Badge::Ok, "Integrity check passed"));
            print(&ui_ctx, &kv(&ui_ctx, "Days", &snapshot.len().to_string()));
            print(
                &ui_ctx,
                &kv(&ui_ctx, "Entries", &snapshot.entry_count().to_string()),
            );
        }
    } else {
        for problem in &problems {
            eprintln!("{}", badge(&ui_ctx, Badge::Err, problem));
        }
        eprintln!(
            "{}",
            hint(
                &ui_ctx,
                "Restore from an export with `washbook import <FILE>` or fix the entries with `washbook edit`."
            )
        );
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(CliError::IntegrityFailed(problems.len()).into())
    }
}

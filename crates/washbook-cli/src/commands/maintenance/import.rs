use std::path::Path;

use washbook_core::storage::PersistenceAdapter;

use crate::app::AppContext;
use crate::cli::ImportArgs;
use crate::ui::{print, print_json, print_warning, receipt, UiContext};

pub async fn handle_import(ctx: &AppContext<'_>, args: &ImportArgs) -> anyhow::Result<()> {
    let value = PersistenceAdapter::import_from_file(Path::new(&args.path))?;
    let ui_ctx = ctx.ui_context();

    if !args.yes && UiContext::is_interactive() {
        let proceed = dialoguer::Confirm::new()
            .with_prompt(format!(
                "Replace all saved records with the contents of {}?",
                args.path
            ))
            .default(false)
            .interact()?;
        if !proceed {
            if !ctx.quiet() {
                print(&ui_ctx, "Import cancelled.");
            }
            return Ok(());
        }
    }

    let mut store = ctx.open_store()?;
    store.replace_all(&value).await?;

    let snapshot = store.snapshot();
    let issues = snapshot.check_integrity();
    for issue in &issues {
        print_warning(
            &ui_ctx,
            &format!("{}: {}", issue.date_key, issue.message),
        );
    }

    if ctx.quiet() {
        return Ok(());
    }
    if ui_ctx.mode.is_json() {
        return print_json(&serde_json::json!({
            "days": snapshot.len(),
            "entries": snapshot.entry_count(),
            "issues": issues.len(),
        }));
    }
    let items = [
        ("Source", args.path.clone()),
        ("Days", snapshot.len().to_string()),
        ("Entries", snapshot.entry_count().to_string()),
    ];
    print(&ui_ctx, &receipt(&ui_ctx, "Imported ledger", &items));
    Ok(())
}

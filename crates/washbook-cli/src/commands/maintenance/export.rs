use std::path::{Path, PathBuf};
use std::process::Command;

use washbook_core::LedgerError;

use crate::app::{default_export_path, AppContext};
use crate::cli::ExportArgs;
use crate::ui::{format_bytes, print, print_json, print_warning, receipt};

pub fn handle_export(ctx: &AppContext<'_>, args: &ExportArgs) -> anyhow::Result<()> {
    let destination = match args.path.as_deref() {
        Some(path) => PathBuf::from(path),
        None => default_export_path(&ctx.data_dir()?, ctx.config()?),
    };

    let bytes = ctx.adapter()?.export_to_file(&destination)?;
    log::debug!("exported {} bytes to {}", bytes, destination.display());

    let share_command = ctx.config()?.export.share_command.clone();
    let shared = match share_command.filter(|_| !args.no_share) {
        Some(command) => {
            share(&command, &destination)?;
            true
        }
        None => false,
    };

    if ctx.quiet() {
        return Ok(());
    }
    let ui_ctx = ctx.ui_context();
    if ui_ctx.mode.is_json() {
        return print_json(&serde_json::json!({
            "path": destination,
            "bytes": bytes,
            "shared": shared,
        }));
    }
    let items = [
        ("Path", destination.display().to_string()),
        ("Size", format_bytes(bytes)),
    ];
    print(&ui_ctx, &receipt(&ui_ctx, "Exported ledger", &items));
    if !shared && args.path.is_none() && !args.no_share {
        print_warning(
            &ui_ctx,
            "No share command configured; the file was only saved locally.",
        );
    }
    Ok(())
}

/// Hand the exported file to the configured share program.
fn share(command: &str, path: &Path) -> Result<(), LedgerError> {
    log::debug!("sharing {} via {}", path.display(), command);
    let status = Command::new(command)
        .arg(path)
        .status()
        .map_err(|e| LedgerError::Export(format!("Failed to run {}: {}", command, e)))?;
    if !status.success() {
        return Err(LedgerError::Export(format!(
            "Share command {} exited with {}",
            command, status
        )));
    }
    Ok(())
}

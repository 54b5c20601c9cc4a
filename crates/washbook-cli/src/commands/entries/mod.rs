pub mod add;
pub mod delete;
pub mod edit;
pub mod history;
pub mod search;
pub mod show;

pub use add::handle_add;
pub use delete::handle_delete;
pub use edit::handle_edit;
pub use history::handle_history;
pub use search::handle_search;
pub use show::handle_show;

use crate::errors::CliError;

fn entry_not_found(date_key: &str, index: usize) -> anyhow::Error {
    CliError::not_found(
        format!("No entry #{} on {}", index, date_key),
        format!(
            "Hint: Run `washbook search {}` to see entry positions.",
            date_key
        ),
    )
    .into()
}

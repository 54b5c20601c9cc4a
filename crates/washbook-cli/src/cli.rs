use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use washbook_core::{EntryKind, VERSION};

/// Washbook - local bookkeeping for a small car wash
#[derive(Parser)]
#[command(name = "washbook")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding the ledger data
    #[arg(long, global = true, env = "WASHBOOK_DATA_DIR", value_name = "DIR")]
    pub data_dir: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// Vehicle or customer name
    #[arg(long)]
    pub name: Option<String>,

    /// Amount (non-negative number)
    #[arg(long)]
    pub amount: Option<String>,

    /// Service description
    #[arg(long, default_value = "")]
    pub desc: String,

    /// Entry type (credit or debit)
    #[arg(long = "type", value_name = "TYPE", default_value = "credit")]
    pub kind: EntryKind,

    /// Date (YYYY-MM-DD) or timestamp (RFC 3339); defaults to now
    #[arg(long)]
    pub date: Option<String>,
}

/// Arguments for the `edit` command
#[derive(Args)]
pub struct EditArgs {
    /// Day of the entry (YYYY-MM-DD)
    #[arg(value_name = "DATE")]
    pub date: String,

    /// Position of the entry within the day
    #[arg(value_name = "INDEX")]
    pub index: usize,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New amount
    #[arg(long)]
    pub amount: Option<String>,

    /// New description
    #[arg(long)]
    pub desc: Option<String>,

    /// New entry type (credit or debit)
    #[arg(long = "type", value_name = "TYPE")]
    pub kind: Option<EntryKind>,
}

/// Arguments for commands addressing a single entry
#[derive(Args)]
pub struct EntryArgs {
    /// Day of the entry (YYYY-MM-DD)
    #[arg(value_name = "DATE")]
    pub date: String,

    /// Position of the entry within the day
    #[arg(value_name = "INDEX")]
    pub index: usize,
}

/// Arguments for the `search` command
#[derive(Args)]
pub struct SearchArgs {
    /// Day to look up (YYYY-MM-DD)
    #[arg(value_name = "DATE")]
    pub date: String,
}

/// Arguments for the `history` command
#[derive(Args)]
pub struct HistoryArgs {
    /// Group days by month
    #[arg(long)]
    pub monthly: bool,
}

/// Arguments for the `export` command
#[derive(Args)]
pub struct ExportArgs {
    /// Destination file (defaults to the configured backup file in the data directory)
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Skip the configured share command
    #[arg(long)]
    pub no_share: bool,
}

/// Arguments for the `import` command
#[derive(Args)]
pub struct ImportArgs {
    /// JSON file to import
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Replace existing records without asking
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record a new credit or debit entry
    Add(AddArgs),

    /// Show the records of a single day
    Search(SearchArgs),

    /// List all days, or monthly totals
    History(HistoryArgs),

    /// Show a single entry
    Show(EntryArgs),

    /// Change fields of an existing entry
    Edit(EditArgs),

    /// Remove an entry
    Delete(EntryArgs),

    /// Write the saved ledger to a JSON file
    Export(ExportArgs),

    /// Replace all records with the contents of a JSON file
    Import(ImportArgs),

    /// Check ledger integrity
    Check,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

pub mod check;
pub mod export;
pub mod import;

pub use check::handle_check;
pub use export::handle_export;
pub use import::handle_import;

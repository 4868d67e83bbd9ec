//! Display formatting for terminal output
//!
//! Turns entries and ledger summaries into plain-text tables and bars.

pub mod entry;
pub mod format;
pub mod summary;

pub use entry::{format_entry_list, format_entry_line};
pub use summary::format_summary;

//! Audit logging for the calorie tracker
//!
//! Every mutation of the ledger (meal or workout added or removed, limit
//! changed, ledger reset) is appended to a line-delimited JSON log with
//! before/after values.
//!
//! - `AuditEntry`: a single record with timestamp, operation and entity.
//! - `AuditLogger`: appends entries to the log file and reads them back.

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;

//! Business logic layer
//!
//! Services sit between the CLI and storage, keeping the ledger and its
//! persistent mirror in step.

pub mod tracker;

pub use tracker::TrackerService;

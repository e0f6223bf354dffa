//! Audit trail for store mutations
//!
//! Every row added, removed or edited and every cutoff day change is appended
//! to a line-delimited JSON log with before/after values.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;

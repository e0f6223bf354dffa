//! Kinsenas - cutoff-based salary budgeting
//!
//! A salary paid in two halves ("kinsenas") is budgeted as a table of
//! recurring rows, each with an amount due on the first and on the second
//! cutoff day. Alongside it, variable spending is tracked month by month.
//!
//! # Architecture
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Rows, cutoff days, months and amount parsing
//! - `storage`: Key-value persistence with atomic JSON file writes
//! - `services`: The budget and expenses stores
//! - `audit`: Append-only log of store mutations
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `kinsenas` binary
//!
//! # Example
//!
//! ```rust
//! use kinsenas::services::BudgetStore;
//! use kinsenas::storage::MemoryStore;
//!
//! let store = BudgetStore::load(MemoryStore::new());
//! assert_eq!(store.remaining_after_first_cutoff(), 5843.0);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{KinsenasError, KinsenasResult};

//! FamLedger - family finance tracker
//!
//! Records a household's income and expenses, keeps a monthly plan of what it
//! expects to earn and spend, and derives dashboards and plan-versus-actual
//! reports from them.
//!
//! # Architecture
//!
//! - `config`: path resolution and user settings
//! - `error`: error types
//! - `models`: transactions, categories, the family roster and monthly plans
//! - `storage`: JSON file storage
//! - `audit`: JSONL audit trail of every change
//! - `services`: validation and persistence at the boundary
//! - `aggregation`: the pure budget aggregation engine
//! - `reports`, `display`, `export`: output
//! - `cli`: clap command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use famledger::config::{LedgerPaths, Settings};
//! use famledger::storage::Storage;
//!
//! let paths = LedgerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(paths)?;
//! storage.load_all()?;
//! ```

pub mod aggregation;
pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod log;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};

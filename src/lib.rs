#![doc(test(attr(deny(warnings))))]

//! Budget Tracker exposes expenses, recurring (predefined) expenses, and monthly
//! salaries over a JSON REST API, plus the batch operation that materializes
//! recurring expenses into concrete monthly records.

pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod server;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Budget Tracker tracing initialized.");
    });
}

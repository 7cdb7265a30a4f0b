#![doc(test(attr(deny(warnings))))]

//! Catatan Core is a single-user income/expense ledger: entry bookkeeping,
//! local JSON persistence, a static session gate, and the filtered report
//! aggregation that powers the `catatan_cli` shell.

pub mod auth;
pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod ledger;
pub mod report;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Catatan Core tracing initialized.");
    });
}

#![doc(test(attr(deny(warnings))))]

//! Monthly Budget tracks one open budget period at a time: expenses with optional
//! receipt photos, closure into an archived history, and PDF reports.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod receipt;
pub mod report;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Monthly Budget tracing initialized.");
    });
}

#![doc(test(attr(deny(warnings))))]

//! Studio Core offers record, filtering, and aggregation primitives that
//! power fitness-studio business dashboards: flat and nested breakdowns,
//! pivot views, month-on-month matrices, and year-on-year comparisons.

pub mod config;
pub mod dates;
pub mod engine;
pub mod errors;
pub mod filter;
pub mod records;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Studio Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}

#![doc(test(attr(deny(warnings))))]

//! Trip Core is the selection-state and derivation engine behind a
//! travel-expense estimator: a static catalog of priced expense items,
//! per-day selection state with custom line items, pure total derivation,
//! debounced persistence, and display-currency conversion.

pub mod catalog;
pub mod currency;
pub mod errors;
pub mod planner;
pub mod selection;
pub mod storage;
pub mod totals;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Trip Core tracing initialized.");
    });
}

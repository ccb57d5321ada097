#![doc(test(attr(deny(warnings))))]

//! Billsync Core offers the domain, persistence, and advisory primitives that
//! power a local-first personal bill tracker: recurring-bill expansion,
//! series-aware collection management, JSON storage, and AI insight prompts.

pub mod advisor;
pub mod bills;
pub mod config;
pub mod errors;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Billsync Core tracing initialized.");
    });
}

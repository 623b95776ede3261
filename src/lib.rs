#![doc(test(attr(deny(warnings))))]

//! D-Day Core offers the countdown, milestone, savings-pacing, and analytics
//! primitives that power the D-Day Mate front ends, plus a local JSON store
//! and a small shell for driving the engine from a terminal.

pub mod cli;
pub mod dday;
pub mod errors;
#[cfg(feature = "ffi")]
pub mod ffi;
pub mod store;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        init_tracing();
        tracing::info!("D-Day Core tracing initialized.");
    });
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::from_default_env().add_directive("dday_core=info".parse().unwrap());

    fmt().with_env_filter(filter).init();
}

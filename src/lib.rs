#![doc(test(attr(deny(warnings))))]

//! Request Wizard drives the multi-step builder that accumulates a service
//! request draft, for both individual and group requests, and exposes a small
//! terminal driver for running the flow end-to-end.

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod utils;
pub mod wizard;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Request wizard tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}

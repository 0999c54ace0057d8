//! Anti-Spam Limiter
//!
//! Sliding-window probe counting per source address with temporary blocks.
//! An address that sends more than `max_pings` probes inside `time_window`
//! is blocked for a flat `block_duration`; its probe history is cleared so
//! counting restarts from zero once the block lifts.

mod api;
mod config;
mod limiter;

pub use api::{AntiSpamApi, AntiSpamStats};
pub use config::AntiSpamLimits;
pub use limiter::AntiSpamManager;

// vim: ts=4

//! Decision core of the ForceHosts admission gate.
//!
//! Two pieces live here: the anti-spam limiter, which tracks recent probes
//! per source address and keeps a list of temporarily blocked addresses,
//! and the admission gate, which combines that verdict with the hostname
//! allowlist for probes and connection attempts.
//!
//! Nothing in this crate spawns threads, suspends or performs I/O. Every
//! entry point is safe to call concurrently from the hosting event system.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod admission;
pub mod anti_spam;
pub mod clock;
pub mod notify;
pub mod policy;
pub mod prelude;

pub use admission::AdmissionGate;
pub use anti_spam::{AntiSpamApi, AntiSpamLimits, AntiSpamManager, AntiSpamStats};
pub use clock::{Clock, ManualClock, SystemClock};
pub use notify::{NotificationSink, RecordingSink};
pub use policy::PolicyStore;

// vim: ts=4

//! Shared types and error definitions for the ForceHosts admission gate.
//!
//! This crate holds the data model that flows between the decision core,
//! the policy source and the notification sink. It carries no behaviour
//! beyond normalization and small accessors.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod address;
pub mod error;
pub mod event;
pub mod message;
pub mod policy;
pub mod prelude;

pub use address::Address;
pub use error::{Error, FhResult};
pub use event::{ConnectionAttemptEvent, Decision, ProbeEvent, Verdict};
pub use message::{LogEvent, MessageKey};
pub use policy::{AntiSpamConfig, PolicyConfig};

// vim: ts=4

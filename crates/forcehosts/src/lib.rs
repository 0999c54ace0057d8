//! ForceHosts: forced-hostname admission gate for game proxies.
//!
//! Wires the decision core to its collaborators: the YAML policy source,
//! the message catalog, a tracing-backed notification sink and the reload
//! command. Hosts embed a [`ForceHosts`] and call [`ForceHosts::on_probe`]
//! and [`ForceHosts::on_pre_login`] from their event handlers.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod command;
pub mod logging;
pub mod messages;
pub mod plugin;
pub mod settings;
pub mod sink;

mod prelude;

pub use command::{CommandSource, ConsoleSource, ForceHostsCommand, RELOAD_PERMISSION};
pub use messages::{MessageCatalog, SharedCatalog};
pub use plugin::{ForceHosts, ForceHostsBuilder};
pub use sink::TracingSink;

pub use forcehosts_core as core;
pub use forcehosts_types as types;

// vim: ts=4

//! Anti-Spam API
//!
//! The contract the admission gate relies on.

use std::time::Duration;

use crate::prelude::*;

/// Statistics about the limiter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AntiSpamStats {
	/// Addresses with a probe history inside the LRU
	pub tracked_addresses: usize,
	/// Blocks whose expiry is still in the future
	pub active_blocks: usize,
	/// Blocks installed since start or the last reset
	pub total_blocks_issued: u64,
	/// Probes denied because their address was blocked
	pub total_probes_denied: u64,
}

pub trait AntiSpamApi: Send + Sync {
	/// True iff the address has a block whose expiry is in the future.
	///
	/// An expired block is removed on the way out. Never touches probe history.
	fn is_blocked(&self, addr: &Address) -> bool;

	/// Record one probe and report whether it must be treated as blocked.
	///
	/// Always false while the policy is disabled. An address that is already
	/// blocked returns true without any bookkeeping. Otherwise the timestamp is
	/// appended, entries older than the window are dropped, and a count above
	/// `max_pings` installs a block and clears the history. The whole
	/// append-prune-check-block sequence is atomic for concurrent callers.
	fn check_and_handle_probe(&self, addr: &Address) -> bool;

	/// Log request for a dropped probe, throttled to one per address per cooldown.
	///
	/// Observational only: block and history state are left untouched.
	fn notify_blocked(&self, addr: &Address) -> Option<LogEvent>;

	/// Time left on an active block
	fn remaining(&self, addr: &Address) -> Option<Duration>;

	/// Remove every expired block and stale auxiliary entry; returns removed blocks
	fn sweep_expired(&self) -> usize;

	/// Drop all history, block and throttle state
	fn reset(&self);

	fn stats(&self) -> AntiSpamStats;
}

// vim: ts=4

//! Anti-Spam Limits
//!
//! Process-level bounds that are not part of the reloadable policy.

use std::time::Duration;

/// Memory and log-throttle bounds of the limiter
#[derive(Clone, Debug)]
pub struct AntiSpamLimits {
	/// Maximum number of addresses with a tracked probe history.
	///
	/// Least recently probing addresses are evicted first. With more active
	/// addresses than this, an evicted address loses its history mid-window
	/// and starts counting from zero again; blocks are not affected.
	pub max_tracked_addresses: usize,
	/// Minimum gap between two "probe blocked" log lines for one address
	pub log_cooldown: Duration,
}

impl Default for AntiSpamLimits {
	fn default() -> Self {
		Self { max_tracked_addresses: 100_000, log_cooldown: Duration::from_secs(1) }
	}
}

// vim: ts=4

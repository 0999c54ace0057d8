//! Policy Snapshot
//!
//! Immutable, strongly typed policy. The policy source builds one per
//! (re)load; the core only ever reads whole snapshots.

use std::collections::HashSet;
use std::time::Duration;

pub const DEFAULT_TIME_WINDOW_SECS: u64 = 10;
pub const DEFAULT_MAX_PINGS: u32 = 5;
pub const DEFAULT_BLOCK_DURATION_SECS: u64 = 60;

/// Probe flood protection settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AntiSpamConfig {
	pub enabled: bool,
	/// Sliding window length
	pub time_window: Duration,
	/// Probes allowed inside one window; one more triggers a block
	pub max_pings: u32,
	/// Flat cooldown applied to an address once it crosses the threshold
	pub block_duration: Duration,
	/// Emit a log line when a probe is dropped because of a block
	pub log_block: bool,
}

impl Default for AntiSpamConfig {
	fn default() -> Self {
		Self {
			enabled: true,
			time_window: Duration::from_secs(DEFAULT_TIME_WINDOW_SECS),
			max_pings: DEFAULT_MAX_PINGS,
			block_duration: Duration::from_secs(DEFAULT_BLOCK_DURATION_SECS),
			log_block: true,
		}
	}
}

/// Complete admission policy
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolicyConfig {
	/// Lowercase hostnames clients may use to address the proxy
	pub allowed_hosts: HashSet<Box<str>>,
	/// Log probes denied for an invalid hostname
	pub log_ping: bool,
	/// Log connection attempts denied for an invalid hostname
	pub log_connection: bool,
	pub anti_spam: AntiSpamConfig,
}

impl Default for PolicyConfig {
	fn default() -> Self {
		Self {
			allowed_hosts: HashSet::new(),
			log_ping: true,
			log_connection: true,
			anti_spam: AntiSpamConfig::default(),
		}
	}
}

impl PolicyConfig {
	/// Replace the allowlist, lowercasing every entry
	pub fn with_hosts<I, S>(mut self, hosts: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		self.allowed_hosts = hosts.into_iter().map(|h| h.as_ref().to_lowercase().into()).collect();
		self
	}

	pub fn with_anti_spam(mut self, anti_spam: AntiSpamConfig) -> Self {
		self.anti_spam = anti_spam;
		self
	}

	/// Check an already lowercased hostname against the allowlist
	pub fn is_allowed(&self, hostname: &str) -> bool {
		self.allowed_hosts.contains(hostname)
	}
}


// vim: ts=4

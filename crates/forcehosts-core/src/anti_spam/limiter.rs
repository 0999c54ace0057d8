//! Anti-Spam Manager
//!
//! Probe histories live in one LRU behind a single mutex, which is the
//! critical section for the append-prune-check-block sequence. Blocks and
//! log-throttle marks live in concurrent maps, so the `is_blocked` read path
//! never waits on that mutex. Expired blocks are removed lazily by readers;
//! `sweep_expired` only bounds memory.

use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use lru::LruCache;
use parking_lot::Mutex;

use super::api::{AntiSpamApi, AntiSpamStats};
use super::config::AntiSpamLimits;
use crate::clock::{Clock, SystemClock};
use crate::policy::PolicyStore;
use crate::prelude::*;

/// Probe timestamps of one address, oldest first
type ProbeHistory = VecDeque<Instant>;

/// Stand-in expiry for block durations that overflow `Instant`
const FAR_FUTURE: Duration = Duration::from_secs(100 * 365 * 86400);

fn expiry(now: Instant, duration: Duration) -> Instant {
	now.checked_add(duration).unwrap_or_else(|| now + FAR_FUTURE)
}

pub struct AntiSpamManager {
	policy: Arc<PolicyStore>,
	clock: Arc<dyn Clock>,
	log_cooldown: Duration,
	history: Mutex<LruCache<Address, ProbeHistory>>,
	/// Block expiry per address
	blocks: DashMap<Address, Instant>,
	/// Last "probe blocked" log emission per address
	last_log: DashMap<Address, Instant>,
	total_blocks: AtomicU64,
	total_denied: AtomicU64,
}

impl AntiSpamManager {
	pub fn new(policy: Arc<PolicyStore>) -> Self {
		Self::with_clock(policy, Arc::new(SystemClock), AntiSpamLimits::default())
	}

	pub fn with_clock(
		policy: Arc<PolicyStore>,
		clock: Arc<dyn Clock>,
		limits: AntiSpamLimits,
	) -> Self {
		// SAFETY: non-zero constant
		const TEN_THOUSAND: NonZeroUsize = match NonZeroUsize::new(10_000) {
			Some(v) => v,
			None => unreachable!(),
		};
		let history_cap = NonZeroUsize::new(limits.max_tracked_addresses).unwrap_or(TEN_THOUSAND);

		Self {
			policy,
			clock,
			log_cooldown: limits.log_cooldown,
			history: Mutex::new(LruCache::new(history_cap)),
			blocks: DashMap::new(),
			last_log: DashMap::new(),
			total_blocks: AtomicU64::new(0),
			total_denied: AtomicU64::new(0),
		}
	}

	/// Block check against a given instant, removing the entry if it has expired
	fn blocked_at(&self, addr: &Address, now: Instant) -> bool {
		let Some(expires_at) = self.blocks.get(addr).map(|entry| *entry.value()) else {
			return false;
		};
		if now < expires_at {
			return true;
		}
		// Only remove if still expired: a fresh block may have replaced it meanwhile
		self.blocks.remove_if(addr, |_, expires_at| now >= *expires_at);
		false
	}

	fn remaining_at(&self, addr: &Address, now: Instant) -> Option<Duration> {
		let expires_at = self.blocks.get(addr).map(|entry| *entry.value())?;
		expires_at.checked_duration_since(now).filter(|left| !left.is_zero())
	}

	fn deny(&self) -> bool {
		self.total_denied.fetch_add(1, Ordering::Relaxed);
		true
	}
}

impl AntiSpamApi for AntiSpamManager {
	fn is_blocked(&self, addr: &Address) -> bool {
		self.blocked_at(addr, self.clock.now())
	}

	fn check_and_handle_probe(&self, addr: &Address) -> bool {
		let policy = self.policy.snapshot();
		let config = &policy.anti_spam;
		if !config.enabled {
			return false;
		}
		if self.is_blocked(addr) {
			return self.deny();
		}

		let mut history = self.history.lock();
		let now = self.clock.now();
		// A concurrent probe from the same address may have installed a block while we waited
		if self.blocked_at(addr, now) {
			return self.deny();
		}

		let probes = history.get_or_insert_mut(addr.clone(), ProbeHistory::new);
		probes.push_back(now);
		if let Some(window_start) = now.checked_sub(config.time_window) {
			while probes.front().is_some_and(|probe| *probe < window_start) {
				probes.pop_front();
			}
		}

		let count = probes.len();
		if count <= config.max_pings as usize {
			return false;
		}

		// The triggering probe is counted, then the history starts over
		history.pop(addr);
		self.blocks.insert(addr.clone(), expiry(now, config.block_duration));
		drop(history);

		self.total_blocks.fetch_add(1, Ordering::Relaxed);
		debug!(
			"Blocked {} for {:?} after {} probes within {:?}",
			addr, config.block_duration, count, config.time_window
		);
		self.deny()
	}

	fn notify_blocked(&self, addr: &Address) -> Option<LogEvent> {
		if !self.policy.snapshot().anti_spam.log_block {
			return None;
		}

		let now = self.clock.now();
		match self.last_log.entry(addr.clone()) {
			Entry::Occupied(mut entry) => {
				if now.saturating_duration_since(*entry.get()) < self.log_cooldown {
					return None;
				}
				entry.insert(now);
			}
			Entry::Vacant(entry) => {
				entry.insert(now);
			}
		}

		let remaining = self.remaining_at(addr, now).unwrap_or_default();
		Some(LogEvent::new(MessageKey::PingSpamBlocked).arg(addr).arg(remaining.as_secs()))
	}

	fn remaining(&self, addr: &Address) -> Option<Duration> {
		self.remaining_at(addr, self.clock.now())
	}

	fn sweep_expired(&self) -> usize {
		let now = self.clock.now();

		let mut removed = 0;
		self.blocks.retain(|_, expires_at| {
			let keep = now < *expires_at;
			if !keep {
				removed += 1;
			}
			keep
		});

		let cooldown = self.log_cooldown;
		self.last_log.retain(|_, logged_at| now.saturating_duration_since(*logged_at) < cooldown);

		let window = self.policy.snapshot().anti_spam.time_window;
		let idle = {
			let mut history = self.history.lock();
			let idle: Vec<Address> = history
				.iter()
				.filter(|(_, probes)| {
					probes.back().is_none_or(|last| now.saturating_duration_since(*last) > window)
				})
				.map(|(addr, _)| addr.clone())
				.collect();
			for addr in &idle {
				history.pop(addr);
			}
			idle.len()
		};

		if removed > 0 || idle > 0 {
			debug!("Swept {} expired blocks and {} idle probe histories", removed, idle);
		}
		removed
	}

	fn reset(&self) {
		self.history.lock().clear();
		self.blocks.clear();
		self.last_log.clear();
		self.total_blocks.store(0, Ordering::Relaxed);
		self.total_denied.store(0, Ordering::Relaxed);
	}

	fn stats(&self) -> AntiSpamStats {
		let now = self.clock.now();
		AntiSpamStats {
			tracked_addresses: self.history.lock().len(),
			active_blocks: self.blocks.iter().filter(|entry| now < *entry.value()).count(),
			total_blocks_issued: self.total_blocks.load(Ordering::Relaxed),
			total_probes_denied: self.total_denied.load(Ordering::Relaxed),
		}
	}
}


// vim: ts=4

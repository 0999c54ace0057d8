//! Time source for expiry and window arithmetic

use std::time::{Duration, Instant};

use parking_lot::Mutex;

pub trait Clock: Send + Sync {
	fn now(&self) -> Instant;
}

/// Monotonic system clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
	fn now(&self) -> Instant {
		Instant::now()
	}
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
	now: Mutex<Instant>,
}

impl ManualClock {
	pub fn new() -> Self {
		Self { now: Mutex::new(Instant::now()) }
	}

	pub fn advance(&self, by: Duration) {
		let mut now = self.now.lock();
		*now += by;
	}
}

impl Default for ManualClock {
	fn default() -> Self {
		Self::new()
	}
}

impl Clock for ManualClock {
	fn now(&self) -> Instant {
		*self.now.lock()
	}
}


// vim: ts=4

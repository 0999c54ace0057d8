//! Notification Sink
//!
//! Receives the log requests produced by the decision core and turns them
//! into whatever output the host wants.

use parking_lot::Mutex;

use crate::prelude::*;

pub trait NotificationSink: Send + Sync {
	fn emit(&self, event: &LogEvent);
}

/// Sink that keeps every event in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
	events: Mutex<Vec<LogEvent>>,
}

impl RecordingSink {
	pub fn new() -> Self {
		Self::default()
	}

	/// Take all recorded events, leaving the sink empty
	pub fn drain(&self) -> Vec<LogEvent> {
		std::mem::take(&mut *self.events.lock())
	}

	pub fn len(&self) -> usize {
		self.events.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.events.lock().is_empty()
	}
}

impl NotificationSink for RecordingSink {
	fn emit(&self, event: &LogEvent) {
		self.events.lock().push(event.clone());
	}
}

// vim: ts=4

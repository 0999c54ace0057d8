//! Shared test fixtures
//!
//! Each fixture owns its TempDir so the data directory is removed when the
//! test ends.

#![allow(dead_code)]

use std::cell::RefCell;
use std::sync::Arc;

use forcehosts::core::{ManualClock, RecordingSink};
use forcehosts::{CommandSource, ForceHosts};
use tempfile::TempDir;

pub const CONFIG: &str = "\
hosts:
  - play.example.com
antiSpamRefresh:
  maxPings: 5
  timeWindow: 10
  blockDuration: 60
";

pub struct Fixture {
	pub plugin: ForceHosts,
	pub clock: Arc<ManualClock>,
	pub sink: Arc<RecordingSink>,
	pub dir: TempDir,
}

impl Fixture {
	pub fn write_config(&self, content: &str) {
		std::fs::write(self.dir.path().join("config.yml"), content).unwrap();
	}

	pub fn write_messages(&self, content: &str) {
		std::fs::write(self.dir.path().join("messages.yml"), content).unwrap();
	}
}

/// Plugin over a temp data dir with the given config, not yet initialized
pub fn fixture_with(config: Option<&str>) -> Fixture {
	let dir = TempDir::new().unwrap();
	if let Some(config) = config {
		std::fs::write(dir.path().join("config.yml"), config).unwrap();
	}
	let clock = Arc::new(ManualClock::new());
	let sink = Arc::new(RecordingSink::new());
	let plugin = ForceHosts::builder(dir.path())
		.clock(clock.clone())
		.sink(sink.clone())
		.build();
	Fixture { plugin, clock, sink, dir }
}

/// Initialized plugin with [`CONFIG`], recorded startup logs discarded
pub fn fixture() -> Fixture {
	let f = fixture_with(Some(CONFIG));
	f.plugin.initialize();
	f.sink.drain();
	f
}

pub fn setup_test_logging() {
	let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Command sender that records replies
pub struct TestSource {
	pub permitted: bool,
	pub replies: RefCell<Vec<String>>,
}

impl TestSource {
	pub fn new(permitted: bool) -> Self {
		Self { permitted, replies: RefCell::new(Vec::new()) }
	}

	pub fn replies(&self) -> Vec<String> {
		self.replies.borrow().clone()
	}
}

impl CommandSource for TestSource {
	fn has_permission(&self, permission: &str) -> bool {
		self.permitted && permission == forcehosts::RELOAD_PERMISSION
	}

	fn send_message(&self, message: &str) {
		self.replies.borrow_mut().push(message.to_string());
	}
}

// vim: ts=4

//! Tracing-backed notification sink
//!
//! Renders log requests through the current message catalog and writes
//! them as colorized lines, the way proxy consoles display them.

use std::sync::Arc;

use forcehosts_core::notify::NotificationSink;

use crate::messages::{SharedCatalog, colorize};
use crate::prelude::*;

pub struct TracingSink {
	catalog: SharedCatalog,
}

impl TracingSink {
	pub fn new(catalog: SharedCatalog) -> Self {
		Self { catalog }
	}

	pub fn render(&self, event: &LogEvent) -> String {
		let catalog = Arc::clone(&self.catalog.read());
		colorize(&catalog.render(event.key, &event.args))
	}
}

impl NotificationSink for TracingSink {
	fn emit(&self, event: &LogEvent) {
		let line = self.render(event);
		match event.key {
			MessageKey::ConfigLoadError | MessageKey::ReloadFailed => error!("{}", line),
			_ => info!("{}", line),
		}
	}
}


// vim: ts=4

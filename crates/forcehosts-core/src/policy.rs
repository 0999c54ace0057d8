//! Policy Store
//!
//! Publishes policy snapshots by swapping the whole `Arc`. Readers clone the
//! current `Arc` and keep a consistent view for the rest of their decision,
//! even if a reload lands meanwhile.

use std::sync::Arc;

use forcehosts_types::policy::PolicyConfig;
use parking_lot::RwLock;

#[derive(Debug, Default)]
pub struct PolicyStore {
	current: RwLock<Arc<PolicyConfig>>,
}

impl PolicyStore {
	pub fn new(config: PolicyConfig) -> Self {
		Self { current: RwLock::new(Arc::new(config)) }
	}

	/// Current snapshot
	pub fn snapshot(&self) -> Arc<PolicyConfig> {
		Arc::clone(&self.current.read())
	}

	/// Publish a new snapshot, returning the one it replaced
	pub fn replace(&self, config: PolicyConfig) -> Arc<PolicyConfig> {
		let next = Arc::new(config);
		std::mem::replace(&mut *self.current.write(), next)
	}
}


// vim: ts=4

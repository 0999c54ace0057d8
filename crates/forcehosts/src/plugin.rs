//! Plugin Lifecycle
//!
//! [`ForceHosts`] owns the policy store, the message catalog, the anti-spam
//! limiter and the admission gate. Hosts call [`ForceHosts::initialize`]
//! once, route probe and pre-login events through it, and call
//! [`ForceHosts::shutdown`] when the proxy stops.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use forcehosts_core::admission::AdmissionGate;
use forcehosts_core::anti_spam::{AntiSpamApi, AntiSpamLimits, AntiSpamManager};
use forcehosts_core::clock::{Clock, SystemClock};
use forcehosts_core::notify::NotificationSink;
use forcehosts_core::policy::PolicyStore;
use forcehosts_types::event::{ConnectionAttemptEvent, Decision, ProbeEvent, Verdict};
use forcehosts_types::policy::PolicyConfig;
use parking_lot::RwLock;

use crate::command::ForceHostsCommand;
use crate::messages::{MessageCatalog, SharedCatalog, colorize};
use crate::prelude::*;
use crate::settings;
use crate::sink::TracingSink;

struct Inner {
	data_dir: PathBuf,
	policy: Arc<PolicyStore>,
	catalog: SharedCatalog,
	anti_spam: Arc<AntiSpamManager>,
	gate: AdmissionGate,
	sink: Arc<dyn NotificationSink>,
}

/// Handle to the gate; clones share all state
#[derive(Clone)]
pub struct ForceHosts {
	inner: Arc<Inner>,
}

pub struct ForceHostsBuilder {
	data_dir: PathBuf,
	clock: Arc<dyn Clock>,
	limits: AntiSpamLimits,
	sink: Option<Arc<dyn NotificationSink>>,
}

impl ForceHostsBuilder {
	pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
		self.clock = clock;
		self
	}

	pub fn limits(mut self, limits: AntiSpamLimits) -> Self {
		self.limits = limits;
		self
	}

	/// Replace the default tracing sink
	pub fn sink(mut self, sink: Arc<dyn NotificationSink>) -> Self {
		self.sink = Some(sink);
		self
	}

	pub fn build(self) -> ForceHosts {
		let policy = Arc::new(PolicyStore::default());
		let catalog: SharedCatalog = Arc::new(RwLock::new(Arc::new(MessageCatalog::new())));
		let anti_spam =
			Arc::new(AntiSpamManager::with_clock(Arc::clone(&policy), self.clock, self.limits));
		let gate = AdmissionGate::new(Arc::clone(&policy), anti_spam.clone());
		let sink: Arc<dyn NotificationSink> = match self.sink {
			Some(sink) => sink,
			None => Arc::new(TracingSink::new(Arc::clone(&catalog))),
		};

		ForceHosts {
			inner: Arc::new(Inner { data_dir: self.data_dir, policy, catalog, anti_spam, gate, sink }),
		}
	}
}

impl ForceHosts {
	pub fn new(data_dir: impl Into<PathBuf>) -> Self {
		Self::builder(data_dir).build()
	}

	pub fn builder(data_dir: impl Into<PathBuf>) -> ForceHostsBuilder {
		ForceHostsBuilder {
			data_dir: data_dir.into(),
			clock: Arc::new(SystemClock),
			limits: AntiSpamLimits::default(),
			sink: None,
		}
	}

	/// Load messages and policy. Failures leave the fallback catalog and
	/// the default policy (empty allowlist) in place.
	pub fn initialize(&self) {
		let catalog = MessageCatalog::load(&self.inner.data_dir);
		*self.inner.catalog.write() = Arc::new(catalog);

		if let Err(e) = self.reload_policy() {
			self.emit(&LogEvent::new(MessageKey::ConfigLoadError).arg(e));
		}
		self.emit(&LogEvent::new(MessageKey::PluginInitialized));
	}

	/// Reload messages first, then the policy. A failing step keeps the
	/// previous state of that step.
	pub fn reload(&self) -> FhResult<()> {
		let catalog = MessageCatalog::try_load(&self.inner.data_dir)?;
		*self.inner.catalog.write() = Arc::new(catalog);
		self.reload_policy()
	}

	fn reload_policy(&self) -> FhResult<()> {
		let policy = settings::load_policy(&self.inner.data_dir)?;
		let hosts = policy.allowed_hosts.len();
		self.inner.policy.replace(policy);
		self.emit(&LogEvent::new(MessageKey::HostsLoaded).arg(hosts));
		Ok(())
	}

	/// Sweep expired blocks and log the shutdown
	pub fn shutdown(&self) {
		let removed = self.sweep();
		debug!("Shutdown sweep removed {} expired blocks", removed);
		self.emit(&LogEvent::new(MessageKey::PluginShutdown));
	}

	/// Periodic housekeeping; returns the number of expired blocks removed
	pub fn sweep(&self) -> usize {
		self.inner.anti_spam.sweep_expired()
	}

	pub fn on_probe(&self, event: &ProbeEvent) -> Verdict {
		self.dispatch(self.inner.gate.on_probe(event))
	}

	pub fn on_pre_login(&self, event: &ConnectionAttemptEvent) -> Verdict {
		self.dispatch(self.inner.gate.on_connection_attempt(event))
	}

	fn dispatch(&self, decision: Decision) -> Verdict {
		if let Some(log) = &decision.log {
			self.emit(log);
		}
		decision.verdict
	}

	fn emit(&self, event: &LogEvent) {
		self.inner.sink.emit(event);
	}

	/// Rendered, colorized client-facing text of a denial
	pub fn kick_message(&self, verdict: &Verdict) -> Option<String> {
		verdict.kick_message_key().map(|key| self.render(key, &[]))
	}

	/// Rendered, colorized text for a message key
	pub fn render(&self, key: MessageKey, args: &[String]) -> String {
		colorize(&self.catalog().render(key, args))
	}

	pub fn catalog(&self) -> Arc<MessageCatalog> {
		Arc::clone(&self.inner.catalog.read())
	}

	pub fn policy(&self) -> Arc<PolicyConfig> {
		self.inner.policy.snapshot()
	}

	pub fn anti_spam(&self) -> &Arc<AntiSpamManager> {
		&self.inner.anti_spam
	}

	pub fn data_dir(&self) -> &Path {
		&self.inner.data_dir
	}

	pub fn command(&self) -> ForceHostsCommand {
		ForceHostsCommand::new(self.clone())
	}
}

// vim: ts=4

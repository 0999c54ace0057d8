//! Admission Gate
//!
//! Turns an inbound probe or connection attempt into a verdict plus at most
//! one log request. Probes go through the anti-spam limiter first and are
//! denied without a hostname check while their address is blocked.
//! Connection attempts only face the hostname allowlist.

use std::sync::Arc;

use forcehosts_types::event::{ConnectionAttemptEvent, Decision, ProbeEvent, Verdict};

use crate::anti_spam::AntiSpamApi;
use crate::policy::PolicyStore;
use crate::prelude::*;

pub struct AdmissionGate {
	policy: Arc<PolicyStore>,
	anti_spam: Arc<dyn AntiSpamApi>,
}

impl AdmissionGate {
	pub fn new(policy: Arc<PolicyStore>, anti_spam: Arc<dyn AntiSpamApi>) -> Self {
		Self { policy, anti_spam }
	}

	pub fn on_probe(&self, event: &ProbeEvent) -> Decision {
		let hostname = event.hostname();
		let address = Address::parse(&event.source_address);

		if self.anti_spam.check_and_handle_probe(&address) {
			return Decision::deny(Verdict::deny(), self.anti_spam.notify_blocked(&address));
		}

		let policy = self.policy.snapshot();
		if !policy.is_allowed(&hostname) {
			let log = policy
				.log_ping
				.then(|| LogEvent::new(MessageKey::PingBlocked).arg(&address).arg(&hostname));
			return Decision::deny(Verdict::deny(), log);
		}

		Decision::allow()
	}

	pub fn on_connection_attempt(&self, event: &ConnectionAttemptEvent) -> Decision {
		let hostname = event.hostname();

		let policy = self.policy.snapshot();
		if !policy.is_allowed(&hostname) {
			let log = policy.log_connection.then(|| {
				let address = Address::parse(&event.source_address);
				LogEvent::new(MessageKey::ConnectionBlocked).arg(address).arg(&hostname)
			});
			return Decision::deny(Verdict::kick(MessageKey::KickMessage), log);
		}

		Decision::allow()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::anti_spam::{AntiSpamLimits, AntiSpamManager};
	use crate::clock::ManualClock;
	use forcehosts_types::policy::{AntiSpamConfig, PolicyConfig};
	use std::time::Duration;

	struct Fixture {
		gate: AdmissionGate,
		policy: Arc<PolicyStore>,
		anti_spam: Arc<AntiSpamManager>,
		clock: Arc<ManualClock>,
	}

	fn fixture(config: PolicyConfig) -> Fixture {
		let policy = Arc::new(PolicyStore::new(config));
		let clock = Arc::new(ManualClock::new());
		let anti_spam = Arc::new(AntiSpamManager::with_clock(
			Arc::clone(&policy),
			clock.clone(),
			AntiSpamLimits::default(),
		));
		let gate = AdmissionGate::new(Arc::clone(&policy), anti_spam.clone());
		Fixture { gate, policy, anti_spam, clock }
	}

	fn allowlist() -> PolicyConfig {
		PolicyConfig::default().with_hosts(["play.example.com"])
	}

	#[test]
	fn test_probe_allowed_host() {
		let f = fixture(allowlist());
		let decision = f.gate.on_probe(&ProbeEvent::new(Some("play.example.com"), "1.2.3.4"));
		assert_eq!(decision, Decision::allow());
	}

	#[test]
	fn test_probe_invalid_host() {
		let f = fixture(allowlist());
		let decision = f.gate.on_probe(&ProbeEvent::new(Some("other.com"), "1.2.3.4"));

		assert_eq!(decision.verdict, Verdict::deny());
		let log = decision.log.expect("ping-blocked log");
		assert_eq!(log.key.as_str(), "ping-blocked");
		assert_eq!(log.args, vec!["1.2.3.4".to_string(), "other.com".to_string()]);
	}

	#[test]
	fn test_probe_invalid_host_without_logging() {
		let f = fixture(PolicyConfig { log_ping: false, ..allowlist() });
		let decision = f.gate.on_probe(&ProbeEvent::new(Some("other.com"), "1.2.3.4"));
		assert_eq!(decision, Decision::deny(Verdict::deny(), None));
	}

	#[test]
	fn test_hostname_case_insensitive() {
		let f = fixture(allowlist());
		let probe = f.gate.on_probe(&ProbeEvent::new(Some("Play.Example.COM"), "1.2.3.4"));
		assert!(probe.verdict.is_allowed());

		let conn =
			f.gate.on_connection_attempt(&ConnectionAttemptEvent::new(Some("PLAY.example.com"), "1.2.3.4"));
		assert!(conn.verdict.is_allowed());
	}

	#[test]
	fn test_missing_hostname_denied() {
		let f = fixture(allowlist());
		let decision = f.gate.on_connection_attempt(&ConnectionAttemptEvent::new(None, "1.2.3.4"));
		assert_eq!(decision.verdict.kick_message_key(), Some(MessageKey::KickMessage));
		let log = decision.log.expect("connection-blocked log");
		assert_eq!(log.args, vec!["1.2.3.4".to_string(), String::new()]);
	}

	#[test]
	fn test_empty_allowlist_entry_admits_missing_hostname() {
		let f = fixture(PolicyConfig::default().with_hosts([""]));
		let decision = f.gate.on_probe(&ProbeEvent::new(None, "1.2.3.4"));
		assert!(decision.verdict.is_allowed());
	}

	#[test]
	fn test_spam_block_skips_hostname_check() {
		let f = fixture(allowlist());
		for _ in 0..5 {
			let decision = f.gate.on_probe(&ProbeEvent::new(Some("other.com"), "1.2.3.4"));
			assert_eq!(decision.log.map(|l| l.key), Some(MessageKey::PingBlocked));
		}

		// Sixth probe trips the limiter; even a valid hostname is denied now
		let decision = f.gate.on_probe(&ProbeEvent::new(Some("play.example.com"), "1.2.3.4"));
		assert_eq!(decision.verdict, Verdict::deny());
		let log = decision.log.expect("ping-spam-blocked log");
		assert_eq!(log.key, MessageKey::PingSpamBlocked);
		assert_eq!(log.args, vec!["1.2.3.4".to_string(), "60".to_string()]);

		// Throttled: no second spam log within the cooldown
		let decision = f.gate.on_probe(&ProbeEvent::new(Some("play.example.com"), "1.2.3.4"));
		assert_eq!(decision, Decision::deny(Verdict::deny(), None));
	}

	#[test]
	fn test_connection_ignores_probe_block() {
		let f = fixture(allowlist());
		for _ in 0..6 {
			f.gate.on_probe(&ProbeEvent::new(Some("play.example.com"), "1.2.3.4"));
		}
		assert!(f.anti_spam.is_blocked(&Address::parse("1.2.3.4")));

		let conn =
			f.gate.on_connection_attempt(&ConnectionAttemptEvent::new(Some("play.example.com"), "1.2.3.4"));
		assert_eq!(conn, Decision::allow());

		let probe = f.gate.on_probe(&ProbeEvent::new(Some("play.example.com"), "1.2.3.4"));
		assert!(!probe.verdict.is_allowed());
	}

	#[test]
	fn test_probe_admitted_after_block_lifts() {
		let f = fixture(allowlist());
		for _ in 0..6 {
			f.gate.on_probe(&ProbeEvent::new(Some("play.example.com"), "1.2.3.4:50000"));
		}
		f.clock.advance(Duration::from_secs(61));
		let decision = f.gate.on_probe(&ProbeEvent::new(Some("play.example.com"), "1.2.3.4:50001"));
		assert!(decision.verdict.is_allowed());
	}

	#[test]
	fn test_reload_applies_to_next_event() {
		let f = fixture(allowlist());
		let event = ProbeEvent::new(Some("new.example.com"), "1.2.3.4");
		assert!(!f.gate.on_probe(&event).verdict.is_allowed());

		f.policy.replace(PolicyConfig::default().with_hosts(["new.example.com"]));
		assert!(f.gate.on_probe(&event).verdict.is_allowed());
	}

	#[test]
	fn test_disabled_anti_spam_never_blocks_probes() {
		let config = allowlist().with_anti_spam(AntiSpamConfig { enabled: false, ..Default::default() });
		let f = fixture(config);
		for _ in 0..50 {
			let decision = f.gate.on_probe(&ProbeEvent::new(Some("play.example.com"), "1.2.3.4"));
			assert!(decision.verdict.is_allowed());
		}
	}
}

// vim: ts=4

//! End-to-end behaviour of the plugin facade: startup, event routing,
//! logging through the sink and shutdown.

mod common;

use std::time::Duration;

use common::{fixture, fixture_with, setup_test_logging};
use forcehosts::core::AntiSpamApi;
use forcehosts::types::{ConnectionAttemptEvent, LogEvent, MessageKey, ProbeEvent, Verdict};

#[test]
fn test_initialize_logs_hosts_and_startup() {
	setup_test_logging();
	let f = fixture_with(Some(common::CONFIG));
	f.plugin.initialize();

	let events = f.sink.drain();
	assert_eq!(
		events,
		vec![
			LogEvent::new(MessageKey::HostsLoaded).arg(1),
			LogEvent::new(MessageKey::PluginInitialized),
		]
	);
	assert!(f.plugin.policy().is_allowed("play.example.com"));
}

#[test]
fn test_initialize_creates_default_files() {
	let f = fixture_with(None);
	f.plugin.initialize();

	assert!(f.dir.path().join("config.yml").exists());
	assert!(f.dir.path().join("messages.yml").exists());
	assert!(f.plugin.policy().is_allowed("example.com"));
}

#[test]
fn test_broken_config_denies_everything() {
	let f = fixture_with(Some("hosts: [play.example.com\n"));
	f.plugin.initialize();

	let events = f.sink.drain();
	assert_eq!(events[0].key, MessageKey::ConfigLoadError);
	assert_eq!(events[1].key, MessageKey::PluginInitialized);
	assert!(f.plugin.policy().allowed_hosts.is_empty());

	let verdict = f.plugin.on_pre_login(&ConnectionAttemptEvent::new(Some("play.example.com"), "1.2.3.4"));
	assert!(!verdict.is_allowed());
}

#[test]
fn test_wrongly_typed_value_keeps_allowlist() {
	let f = fixture_with(Some("hosts: [play.example.com]\nantiSpamRefresh:\n  maxPings: lots\n"));
	f.plugin.initialize();

	assert_eq!(f.sink.drain()[0], LogEvent::new(MessageKey::HostsLoaded).arg(1));
	let policy = f.plugin.policy();
	assert!(policy.is_allowed("play.example.com"));
	assert_eq!(policy.anti_spam.max_pings, 5);
}

#[test]
fn test_ping_with_invalid_hostname() {
	let f = fixture();
	let verdict = f.plugin.on_probe(&ProbeEvent::new(Some("other.com"), "1.2.3.4"));

	assert_eq!(verdict, Verdict::deny());
	assert_eq!(
		f.sink.drain(),
		vec![LogEvent::new(MessageKey::PingBlocked).arg("1.2.3.4").arg("other.com")]
	);
}

#[test]
fn test_pre_login_kick_message() {
	let f = fixture();
	let verdict = f.plugin.on_pre_login(&ConnectionAttemptEvent::new(Some("other.com"), "1.2.3.4:51234"));

	assert_eq!(verdict.kick_message_key(), Some(MessageKey::KickMessage));
	assert_eq!(
		f.plugin.kick_message(&verdict).as_deref(),
		Some("§cYou must connect to this server using the correct hostname!")
	);
	assert_eq!(
		f.sink.drain(),
		vec![LogEvent::new(MessageKey::ConnectionBlocked).arg("1.2.3.4").arg("other.com")]
	);

	let allowed = f.plugin.on_pre_login(&ConnectionAttemptEvent::new(Some("Play.Example.com"), "1.2.3.4"));
	assert_eq!(allowed, Verdict::Allow);
	assert_eq!(f.plugin.kick_message(&allowed), None);
	assert!(f.sink.is_empty());
}

#[test]
fn test_custom_kick_message() {
	let f = fixture_with(Some(common::CONFIG));
	f.write_messages("kick-message: '&4Use play.example.com'\n");
	f.plugin.initialize();

	let verdict = f.plugin.on_pre_login(&ConnectionAttemptEvent::new(None, "1.2.3.4"));
	assert_eq!(f.plugin.kick_message(&verdict).as_deref(), Some("§4Use play.example.com"));
}

#[test]
fn test_probe_flood_scenario() {
	let f = fixture();
	let probe = ProbeEvent::new(Some("play.example.com"), "1.2.3.4");

	for _ in 0..5 {
		assert!(f.plugin.on_probe(&probe).is_allowed());
		f.clock.advance(Duration::from_millis(400));
	}
	assert!(!f.plugin.on_probe(&probe).is_allowed());
	assert_eq!(
		f.sink.drain(),
		vec![LogEvent::new(MessageKey::PingSpamBlocked).arg("1.2.3.4").arg(60)]
	);

	// Connections from the same address are unaffected by the probe block
	let conn = ConnectionAttemptEvent::new(Some("play.example.com"), "1.2.3.4");
	assert!(f.plugin.on_pre_login(&conn).is_allowed());

	f.clock.advance(Duration::from_secs(1));
	assert!(!f.plugin.on_probe(&probe).is_allowed());
	assert_eq!(f.sink.drain()[0].args, vec!["1.2.3.4".to_string(), "59".to_string()]);

	f.clock.advance(Duration::from_secs(60));
	assert!(f.plugin.on_probe(&probe).is_allowed());
	assert!(f.sink.is_empty());
}

#[test]
fn test_shutdown_sweeps_expired_blocks() {
	let f = fixture();
	let probe = ProbeEvent::new(Some("play.example.com"), "10.0.0.1");
	for _ in 0..6 {
		f.plugin.on_probe(&probe);
	}
	f.sink.drain();
	assert_eq!(f.plugin.anti_spam().stats().active_blocks, 1);

	f.clock.advance(Duration::from_secs(61));
	f.plugin.shutdown();

	assert_eq!(f.plugin.anti_spam().stats().total_blocks_issued, 1);
	assert_eq!(f.plugin.anti_spam().remaining(&forcehosts::types::Address::parse("10.0.0.1")), None);
	assert_eq!(f.sink.drain(), vec![LogEvent::new(MessageKey::PluginShutdown)]);
}

#[test]
fn test_concurrent_events() {
	let f = fixture();
	let plugin = f.plugin.clone();

	std::thread::scope(|s| {
		for t in 0..8 {
			let plugin = plugin.clone();
			s.spawn(move || {
				let address = format!("10.1.0.{}", t);
				for _ in 0..5 {
					let verdict = plugin.on_probe(&ProbeEvent::new(Some("play.example.com"), address.as_str()));
					assert!(verdict.is_allowed());
				}
				let verdict = plugin.on_probe(&ProbeEvent::new(Some("play.example.com"), address.as_str()));
				assert!(!verdict.is_allowed());
			});
		}
	});

	let stats = f.plugin.anti_spam().stats();
	assert_eq!(stats.total_blocks_issued, 8);
	assert_eq!(stats.active_blocks, 8);
	assert_eq!(f.sink.len(), 8);
}

// vim: ts=4

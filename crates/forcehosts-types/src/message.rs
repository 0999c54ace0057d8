//! Message keys and log event descriptors
//!
//! The core never builds display strings. It hands the notification sink a
//! symbolic key plus ordered substitution values.

use std::fmt;

/// Symbolic key of a localized message template
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum MessageKey {
	/// Client-facing text of a denied connection attempt
	KickMessage,
	PluginInitialized,
	PluginShutdown,
	/// Args: number of allowed hosts
	HostsLoaded,
	ConfigLoadError,
	/// Args: address, hostname
	ConnectionBlocked,
	/// Args: address, hostname
	PingBlocked,
	/// Args: address, remaining block seconds
	PingSpamBlocked,
	ReloadSuccess,
	/// Args: error text
	ReloadFailed,
	CommandUsage,
	NoPermission,
}

impl MessageKey {
	pub const ALL: [MessageKey; 12] = [
		MessageKey::KickMessage,
		MessageKey::PluginInitialized,
		MessageKey::PluginShutdown,
		MessageKey::HostsLoaded,
		MessageKey::ConfigLoadError,
		MessageKey::ConnectionBlocked,
		MessageKey::PingBlocked,
		MessageKey::PingSpamBlocked,
		MessageKey::ReloadSuccess,
		MessageKey::ReloadFailed,
		MessageKey::CommandUsage,
		MessageKey::NoPermission,
	];

	/// Key as it appears in the message file
	pub fn as_str(self) -> &'static str {
		match self {
			MessageKey::KickMessage => "kick-message",
			MessageKey::PluginInitialized => "plugin-initialized",
			MessageKey::PluginShutdown => "plugin-shutdown",
			MessageKey::HostsLoaded => "hosts-loaded",
			MessageKey::ConfigLoadError => "config-load-error",
			MessageKey::ConnectionBlocked => "connection-blocked",
			MessageKey::PingBlocked => "ping-blocked",
			MessageKey::PingSpamBlocked => "ping-spam-blocked",
			MessageKey::ReloadSuccess => "reload-success",
			MessageKey::ReloadFailed => "reload-failed",
			MessageKey::CommandUsage => "command-usage",
			MessageKey::NoPermission => "no-permission",
		}
	}

	pub fn from_key(key: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|k| k.as_str() == key)
	}
}

impl fmt::Display for MessageKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Request for the notification sink to emit one log line
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEvent {
	pub key: MessageKey,
	pub args: Vec<String>,
}

impl LogEvent {
	pub fn new(key: MessageKey) -> Self {
		Self { key, args: Vec::new() }
	}

	/// Append the next substitution value
	pub fn arg(mut self, value: impl fmt::Display) -> Self {
		self.args.push(value.to_string());
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_key_lookup() {
		for key in MessageKey::ALL {
			assert_eq!(MessageKey::from_key(key.as_str()), Some(key));
		}
		assert_eq!(MessageKey::from_key("no-such-key"), None);
	}

	#[test]
	fn test_log_event_args() {
		let event = LogEvent::new(MessageKey::PingSpamBlocked).arg("1.2.3.4").arg(59);
		assert_eq!(event.key.as_str(), "ping-spam-blocked");
		assert_eq!(event.args, vec!["1.2.3.4".to_string(), "59".to_string()]);
	}
}

// vim: ts=4

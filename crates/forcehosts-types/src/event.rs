//! Inbound events and the verdicts produced for them

use crate::message::{LogEvent, MessageKey};

/// Lowercase a claimed hostname, treating an absent claim as empty
fn normalize_hostname(claimed: Option<&str>) -> String {
	claimed.map(str::to_lowercase).unwrap_or_default()
}

/// Lightweight server-status inquiry
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProbeEvent {
	pub claimed_hostname: Option<String>,
	pub source_address: String,
}

impl ProbeEvent {
	pub fn new(claimed_hostname: Option<&str>, source_address: impl Into<String>) -> Self {
		Self { claimed_hostname: claimed_hostname.map(Into::into), source_address: source_address.into() }
	}

	/// Lowercased claimed hostname, empty when absent
	pub fn hostname(&self) -> String {
		normalize_hostname(self.claimed_hostname.as_deref())
	}
}

/// Pre-authentication connection attempt
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectionAttemptEvent {
	pub claimed_hostname: Option<String>,
	pub source_address: String,
}

impl ConnectionAttemptEvent {
	pub fn new(claimed_hostname: Option<&str>, source_address: impl Into<String>) -> Self {
		Self { claimed_hostname: claimed_hostname.map(Into::into), source_address: source_address.into() }
	}

	/// Lowercased claimed hostname, empty when absent
	pub fn hostname(&self) -> String {
		normalize_hostname(self.claimed_hostname.as_deref())
	}
}

/// Allow or deny, with the key of the client-facing message for denials that carry one
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
	Allow,
	Deny { kick_message: Option<MessageKey> },
}

impl Verdict {
	pub fn deny() -> Self {
		Verdict::Deny { kick_message: None }
	}

	pub fn kick(key: MessageKey) -> Self {
		Verdict::Deny { kick_message: Some(key) }
	}

	pub fn is_allowed(&self) -> bool {
		matches!(self, Verdict::Allow)
	}

	pub fn kick_message_key(&self) -> Option<MessageKey> {
		match self {
			Verdict::Allow => None,
			Verdict::Deny { kick_message } => *kick_message,
		}
	}
}

/// Output of the admission gate: a verdict plus at most one log request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decision {
	pub verdict: Verdict,
	pub log: Option<LogEvent>,
}

impl Decision {
	pub fn allow() -> Self {
		Self { verdict: Verdict::Allow, log: None }
	}

	pub fn deny(verdict: Verdict, log: Option<LogEvent>) -> Self {
		debug_assert!(!verdict.is_allowed());
		Self { verdict, log }
	}
}


// vim: ts=4

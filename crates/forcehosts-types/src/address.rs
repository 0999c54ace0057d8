//! Source Address
//!
//! Normalized string identity of the network source of an event. It is the
//! key for all rate-limit state and is never persisted.

use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Presentation-form numeric address of an event source
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Address(Box<str>);

impl Address {
	/// Identity used when the hosting system could not tell where an event came from
	pub const UNKNOWN: &'static str = "unknown";

	/// Normalize a raw source string.
	///
	/// Socket addresses lose their port and IPv4-mapped IPv6 addresses collapse
	/// to IPv4, so `"[::ffff:1.2.3.4]:5000"` and `"1.2.3.4"` share one key.
	/// Anything that is not an IP address is trimmed and lowercased.
	pub fn parse(raw: &str) -> Self {
		let raw = raw.trim();
		if let Ok(ip) = raw.parse::<IpAddr>() {
			return Self::from(ip);
		}
		if let Ok(sock) = raw.parse::<SocketAddr>() {
			return Self::from(sock.ip());
		}
		if raw.is_empty() {
			return Self::unknown();
		}
		Self(raw.to_lowercase().into())
	}

	pub fn unknown() -> Self {
		Self(Self::UNKNOWN.into())
	}

	/// Address of an optional remote socket
	pub fn from_socket(addr: Option<SocketAddr>) -> Self {
		addr.map_or_else(Self::unknown, |sock| Self::from(sock.ip()))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl From<IpAddr> for Address {
	fn from(ip: IpAddr) -> Self {
		Self(ip.to_canonical().to_string().into())
	}
}

impl AsRef<str> for Address {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for Address {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}


// vim: ts=4

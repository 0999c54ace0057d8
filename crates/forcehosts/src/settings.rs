//! Policy Source
//!
//! Loads `config.yml` from the data directory into a typed [`PolicyConfig`].
//! Missing or wrongly typed fields take their defaults with a warning, so one
//! bad value never costs the whole allowlist. A missing file is created with
//! the default content first.
//!
//! ```yaml
//! hosts:
//!   - play.example.com
//! logPing: true
//! logConnection: true
//! antiSpamRefresh:
//!   enabled: true
//!   timeWindow: 10
//!   maxPings: 5
//!   blockDuration: 60
//!   logBlock: true
//! ```

use std::path::Path;
use std::time::Duration;

use forcehosts_types::policy::{
	AntiSpamConfig, DEFAULT_BLOCK_DURATION_SECS, DEFAULT_MAX_PINGS, DEFAULT_TIME_WINDOW_SECS,
	PolicyConfig,
};
use serde::Deserialize;

use crate::prelude::*;

pub const CONFIG_FILE: &str = "config.yml";

pub const DEFAULT_CONFIG: &str = "\
# Hostnames clients must use to reach this proxy (case-insensitive)
hosts:
  - example.com

# Log probes / connections rejected for an invalid hostname
logPing: true
logConnection: true

# Probe flood protection
antiSpamRefresh:
  enabled: true
  # Sliding window, seconds
  timeWindow: 10
  # Probes allowed per window; one more blocks the address
  maxPings: 5
  # Block length, seconds
  blockDuration: 60
  logBlock: true
";

type Value = serde_yaml::Value;

/// Raw file model; every field is checked and defaulted on its own
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct PolicyFile {
	hosts: Option<Value>,
	log_ping: Option<Value>,
	log_connection: Option<Value>,
	anti_spam_refresh: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct AntiSpamSection {
	enabled: Option<Value>,
	time_window: Option<Value>,
	max_pings: Option<Value>,
	block_duration: Option<Value>,
	log_block: Option<Value>,
}

/// Booleans, including the YAML 1.1 spellings older configs use
fn as_bool(value: &Value) -> Option<bool> {
	match value {
		Value::Bool(b) => Some(*b),
		Value::String(s) => match s.to_ascii_lowercase().as_str() {
			"true" | "yes" | "y" | "on" => Some(true),
			"false" | "no" | "n" | "off" => Some(false),
			_ => None,
		},
		_ => None,
	}
}

fn bool_field(name: &str, value: Option<Value>, default: bool) -> bool {
	let Some(value) = value else {
		return default;
	};
	as_bool(&value).unwrap_or_else(|| {
		warn!("Ignoring {}: expected a boolean, got {:?}; using {}", name, value, default);
		default
	})
}

/// Non-negative integer that fits `T`, else the default
fn int_field<T>(name: &str, value: Option<Value>, default: T) -> T
where
	T: TryFrom<u64> + std::fmt::Display,
{
	let Some(value) = value else {
		return default;
	};
	let parsed = match &value {
		Value::Number(n) => n.as_u64().and_then(|n| T::try_from(n).ok()),
		_ => None,
	};
	parsed.unwrap_or_else(|| {
		warn!("Ignoring {}: expected a non-negative integer, got {:?}; using {}", name, value, default);
		default
	})
}

/// Scalar host entries as text; nulls and nested values are skipped
fn host_entry(value: Value) -> Option<String> {
	match value {
		Value::String(s) => Some(s),
		Value::Number(n) => Some(n.to_string()),
		Value::Bool(b) => Some(b.to_string()),
		_ => None,
	}
}

fn hosts_field(value: Option<Value>) -> Vec<String> {
	match value {
		None | Some(Value::Null) => Vec::new(),
		Some(Value::Sequence(items)) => items.into_iter().filter_map(host_entry).collect(),
		Some(other) => {
			warn!("Ignoring hosts: expected a list, got {:?}; no hostname is allowed", other);
			Vec::new()
		}
	}
}

impl AntiSpamSection {
	fn from_value(value: Option<Value>) -> FhResult<Self> {
		match value {
			None | Some(Value::Null) => Ok(Self::default()),
			Some(value @ Value::Mapping(_)) => Ok(serde_yaml::from_value(value)?),
			Some(other) => {
				warn!("Ignoring antiSpamRefresh: expected a mapping, got {:?}", other);
				Ok(Self::default())
			}
		}
	}

	fn into_config(self) -> AntiSpamConfig {
		AntiSpamConfig {
			enabled: bool_field("antiSpamRefresh.enabled", self.enabled, true),
			time_window: Duration::from_secs(int_field(
				"antiSpamRefresh.timeWindow",
				self.time_window,
				DEFAULT_TIME_WINDOW_SECS,
			)),
			max_pings: int_field("antiSpamRefresh.maxPings", self.max_pings, DEFAULT_MAX_PINGS),
			block_duration: Duration::from_secs(int_field(
				"antiSpamRefresh.blockDuration",
				self.block_duration,
				DEFAULT_BLOCK_DURATION_SECS,
			)),
			log_block: bool_field("antiSpamRefresh.logBlock", self.log_block, true),
		}
	}
}

impl PolicyFile {
	fn into_policy(self) -> FhResult<PolicyConfig> {
		let anti_spam = AntiSpamSection::from_value(self.anti_spam_refresh)?.into_config();

		Ok(PolicyConfig {
			log_ping: bool_field("logPing", self.log_ping, true),
			log_connection: bool_field("logConnection", self.log_connection, true),
			..PolicyConfig::default()
		}
		.with_hosts(hosts_field(self.hosts))
		.with_anti_spam(anti_spam))
	}
}

/// Parse policy YAML.
///
/// Only malformed YAML is an error. An empty document, a non-mapping root
/// or a wrongly typed field falls back to the defaults for what it covers.
pub fn parse_policy(content: &str) -> FhResult<PolicyConfig> {
	if content.trim().is_empty() {
		return Ok(PolicyConfig::default());
	}
	match serde_yaml::from_str::<Value>(content)? {
		Value::Null => Ok(PolicyConfig::default()),
		root @ Value::Mapping(_) => serde_yaml::from_value::<PolicyFile>(root)?.into_policy(),
		other => {
			warn!("Ignoring configuration: expected a mapping, got {:?}", other);
			Ok(PolicyConfig::default())
		}
	}
}

/// Load `config.yml`, writing the default file first if it does not exist
pub fn load_policy(data_dir: &Path) -> FhResult<PolicyConfig> {
	std::fs::create_dir_all(data_dir)?;

	let path = data_dir.join(CONFIG_FILE);
	if !path.exists() {
		std::fs::write(&path, DEFAULT_CONFIG)?;
		info!("Created default configuration file {}", path.display());
	}

	let content = std::fs::read_to_string(&path)?;
	let policy = parse_policy(&content)?;
	debug!(
		"Loaded policy from {}: {} hosts, anti-spam {}",
		path.display(),
		policy.allowed_hosts.len(),
		if policy.anti_spam.enabled { "enabled" } else { "disabled" }
	);
	Ok(policy)
}


// vim: ts=4

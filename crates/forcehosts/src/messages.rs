//! Message Catalog
//!
//! Localized templates keyed by [`MessageKey`], loaded from `messages.yml`.
//! Templates use `{}` placeholders filled in order, and `&` color codes that
//! [`colorize`] turns into the section-sign codes game clients render.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::prelude::*;

pub const MESSAGES_FILE: &str = "messages.yml";

/// Catalog shared between the sink, the plugin and reloads
pub type SharedCatalog = Arc<RwLock<Arc<MessageCatalog>>>;

const FALLBACK_KICK_MESSAGE: &str =
	"&cUnable to load message configuration, please contact an administrator";

/// Built-in template for a key
pub fn default_template(key: MessageKey) -> &'static str {
	match key {
		MessageKey::KickMessage => "&cYou must connect to this server using the correct hostname!",
		MessageKey::PluginInitialized => "&aForceHosts initialized!",
		MessageKey::PluginShutdown => "&aForceHosts shut down!",
		MessageKey::HostsLoaded => "&aLoaded {} allowed hostnames",
		MessageKey::ConfigLoadError => "&cFailed to load configuration file: {}",
		MessageKey::ConnectionBlocked => "&cBlocked connection from {} using invalid hostname: {}",
		MessageKey::PingBlocked => "&cBlocked ping from {} using invalid hostname: {}",
		MessageKey::PingSpamBlocked => {
			"&cBlocked frequent pings from {}, block lifts in {} seconds"
		}
		MessageKey::ReloadSuccess => "&aConfiguration and messages reloaded!",
		MessageKey::ReloadFailed => "&cError while reloading configuration: {}",
		MessageKey::CommandUsage => "&eUsage: /forcehosts reload - reload configuration",
		MessageKey::NoPermission => "&cYou do not have permission to run this command!",
	}
}

/// Content of a freshly created `messages.yml`
pub fn default_messages_file() -> String {
	let mut out = String::new();
	for key in MessageKey::ALL {
		let template = default_template(key).replace('\'', "''");
		let _ = writeln!(out, "{}: '{}'", key.as_str(), template);
	}
	out
}

/// Replace each `{}` with the next argument; surplus placeholders stay verbatim
pub fn fill(template: &str, args: &[String]) -> String {
	let mut out = String::with_capacity(template.len());
	let mut args = args.iter();
	let mut rest = template;
	while let Some(pos) = rest.find("{}") {
		out.push_str(&rest[..pos]);
		match args.next() {
			Some(arg) => out.push_str(arg),
			None => out.push_str("{}"),
		}
		rest = &rest[pos + 2..];
	}
	out.push_str(rest);
	out
}

/// Convert `&` color codes to `§` codes
pub fn colorize(text: &str) -> String {
	text.replace('&', "§")
}

fn scalar_text(value: &serde_yaml::Value) -> String {
	match value {
		serde_yaml::Value::Null => String::new(),
		serde_yaml::Value::Bool(b) => b.to_string(),
		serde_yaml::Value::Number(n) => n.to_string(),
		serde_yaml::Value::String(s) => s.clone(),
		serde_yaml::Value::Sequence(items) => {
			let items: Vec<String> = items.iter().map(scalar_text).collect();
			format!("[{}]", items.join(", "))
		}
		serde_yaml::Value::Mapping(_) => String::new(),
		serde_yaml::Value::Tagged(tagged) => scalar_text(&tagged.value),
	}
}

/// Flatten nested mappings into dotted keys
fn flatten(mapping: &serde_yaml::Mapping, prefix: &str, out: &mut HashMap<String, String>) {
	for (key, value) in mapping {
		let key = scalar_text(key);
		let key = if prefix.is_empty() { key } else { format!("{}.{}", prefix, key) };
		match value {
			serde_yaml::Value::Mapping(nested) => flatten(nested, &key, out),
			other => {
				out.insert(key, scalar_text(other));
			}
		}
	}
}

#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
	messages: HashMap<String, String>,
}

impl MessageCatalog {
	pub fn new() -> Self {
		Self::default()
	}

	/// Catalog used when the message file cannot be read
	pub fn fallback() -> Self {
		let mut messages = HashMap::new();
		messages.insert(MessageKey::KickMessage.as_str().to_string(), FALLBACK_KICK_MESSAGE.into());
		Self { messages }
	}

	pub fn from_yaml_str(content: &str) -> FhResult<Self> {
		let mut messages = HashMap::new();
		if !content.trim().is_empty() {
			match serde_yaml::from_str::<serde_yaml::Value>(content)? {
				serde_yaml::Value::Mapping(mapping) => flatten(&mapping, "", &mut messages),
				serde_yaml::Value::Null => {}
				_ => return Err(Error::Config("message file must be a mapping".into())),
			}
		}
		Ok(Self { messages })
	}

	/// Load `messages.yml`, writing the default file first if it does not exist
	pub fn try_load(data_dir: &Path) -> FhResult<Self> {
		std::fs::create_dir_all(data_dir)?;

		let path = data_dir.join(MESSAGES_FILE);
		if !path.exists() {
			std::fs::write(&path, default_messages_file())?;
			info!("Created default message file {}", path.display());
		}

		let content = std::fs::read_to_string(&path)?;
		Self::from_yaml_str(&content)
	}

	/// Like [`MessageCatalog::try_load`], degrading to [`MessageCatalog::fallback`] on failure
	pub fn load(data_dir: &Path) -> Self {
		match Self::try_load(data_dir) {
			Ok(catalog) => catalog,
			Err(e) => {
				error!("Failed to load message file: {}", e);
				Self::fallback()
			}
		}
	}

	pub fn len(&self) -> usize {
		self.messages.len()
	}

	pub fn is_empty(&self) -> bool {
		self.messages.is_empty()
	}

	/// Catalog entry, else the built-in default for known keys, else the key itself
	pub fn get_or_default<'a>(&'a self, key: &'a str) -> &'a str {
		if let Some(message) = self.messages.get(key) {
			return message;
		}
		match MessageKey::from_key(key) {
			Some(known) => default_template(known),
			None => key,
		}
	}

	pub fn template(&self, key: MessageKey) -> &str {
		self.get_or_default(key.as_str())
	}

	/// Template for `key` with placeholders filled, color codes left as `&`
	pub fn render(&self, key: MessageKey, args: &[String]) -> String {
		fill(self.template(key), args)
	}
}


// vim: ts=4

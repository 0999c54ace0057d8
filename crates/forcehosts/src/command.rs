//! Reload Command
//!
//! `/forcehosts reload` (alias `/fh`) reloads messages and then the policy.
//! Every outcome is reported back to the sender through the message catalog.

use crate::plugin::ForceHosts;
use crate::prelude::*;

pub const COMMAND_NAME: &str = "forcehosts";
pub const COMMAND_ALIASES: &[&str] = &["fh"];
pub const RELOAD_PERMISSION: &str = "forcehosts.reload";

/// Whoever typed the command
pub trait CommandSource {
	fn has_permission(&self, permission: &str) -> bool;
	fn send_message(&self, message: &str);
}

/// The proxy console: holds every permission, replies go to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSource;

impl CommandSource for ConsoleSource {
	fn has_permission(&self, _permission: &str) -> bool {
		true
	}

	fn send_message(&self, message: &str) {
		info!("{}", message);
	}
}

pub struct ForceHostsCommand {
	plugin: ForceHosts,
}

impl ForceHostsCommand {
	pub fn new(plugin: ForceHosts) -> Self {
		Self { plugin }
	}

	fn reply(&self, source: &dyn CommandSource, key: MessageKey, args: &[String]) {
		source.send_message(&self.plugin.render(key, args));
	}

	pub fn execute(&self, source: &dyn CommandSource, args: &[&str]) -> FhResult<()> {
		let [arg] = args else {
			self.reply(source, MessageKey::CommandUsage, &[]);
			return Ok(());
		};
		if !arg.eq_ignore_ascii_case("reload") {
			self.reply(source, MessageKey::CommandUsage, &[]);
			return Ok(());
		}
		if !source.has_permission(RELOAD_PERMISSION) {
			self.reply(source, MessageKey::NoPermission, &[]);
			return Err(Error::PermissionDenied);
		}

		match self.plugin.reload() {
			Ok(()) => {
				self.reply(source, MessageKey::ReloadSuccess, &[]);
				Ok(())
			}
			Err(e) => {
				error!("Failed to reload configuration: {}", e);
				self.reply(source, MessageKey::ReloadFailed, &[e.to_string()]);
				Err(e)
			}
		}
	}

	/// Tab completions for the typed arguments
	pub fn suggest(&self, source: &dyn CommandSource, args: &[&str]) -> Vec<&'static str> {
		if args.is_empty() && source.has_permission(RELOAD_PERMISSION) {
			vec!["reload"]
		} else {
			Vec::new()
		}
	}

	pub fn has_permission(&self, source: &dyn CommandSource) -> bool {
		source.has_permission(RELOAD_PERMISSION)
	}
}

// vim: ts=4

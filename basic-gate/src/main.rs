//! Basic Gate
//!
//! Minimal host process: reads one JSON event per line from stdin and answers
//! each probe or connection attempt with a JSON verdict on stdout.

use std::time::Duration;
use std::{env, path};

use forcehosts::types::{ConnectionAttemptEvent, ProbeEvent, Verdict};
use forcehosts::{ConsoleSource, ForceHosts};
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, warn};

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

pub struct Config {
	pub data_dir: path::PathBuf,
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum Request {
	Probe {
		hostname: Option<String>,
		address: String,
	},
	Connect {
		hostname: Option<String>,
		address: String,
	},
	Reload,
}

#[derive(Serialize)]
struct Reply {
	allow: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	kick: Option<String>,
}

fn reply(plugin: &ForceHosts, verdict: Verdict) -> Reply {
	Reply { allow: verdict.is_allowed(), kick: plugin.kick_message(&verdict) }
}

fn handle(plugin: &ForceHosts, line: &str) -> Option<Reply> {
	let request = match serde_json::from_str::<Request>(line) {
		Ok(request) => request,
		Err(e) => {
			warn!("Skipping malformed request: {}", e);
			return None;
		}
	};

	let reply = match request {
		Request::Probe { hostname, address } => {
			let verdict = plugin.on_probe(&ProbeEvent::new(hostname.as_deref(), address));
			reply(plugin, verdict)
		}
		Request::Connect { hostname, address } => {
			let verdict =
				plugin.on_pre_login(&ConnectionAttemptEvent::new(hostname.as_deref(), address));
			reply(plugin, verdict)
		}
		Request::Reload => {
			let ok = plugin.command().execute(&ConsoleSource, &["reload"]).is_ok();
			Reply { allow: ok, kick: None }
		}
	};
	Some(reply)
}

/// Write one reply line and flush it
async fn write_line<W: AsyncWrite + Unpin>(out: &mut W, line: &str) -> std::io::Result<()> {
	out.write_all(line.as_bytes()).await?;
	out.write_all(b"\n").await?;
	out.flush().await
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
	forcehosts::logging::init_logging();

	let config = Config {
		data_dir: path::PathBuf::from(env::var("DATA_DIR").unwrap_or_else(|_| "./data".to_string())),
	};

	let plugin = ForceHosts::new(&config.data_dir);
	plugin.initialize();

	let mut lines = BufReader::new(tokio::io::stdin()).lines();
	let mut stdout = tokio::io::stdout();
	let mut sweep = tokio::time::interval(SWEEP_INTERVAL);
	sweep.tick().await;

	loop {
		tokio::select! {
			line = lines.next_line() => {
				let line = match line {
					Ok(Some(line)) => line,
					Ok(None) => break,
					Err(e) => {
						error!("Failed to read stdin: {}", e);
						break;
					}
				};
				if line.trim().is_empty() {
					continue;
				}
				let Some(reply) = handle(&plugin, &line) else { continue };
				let out = match serde_json::to_string(&reply) {
					Ok(out) => out,
					Err(e) => {
						error!("Failed to encode reply: {}", e);
						continue;
					}
				};
				if let Err(e) = write_line(&mut stdout, &out).await {
					error!("Failed to write stdout: {}", e);
					break;
				}
			}
			_ = sweep.tick() => {
				let removed = plugin.sweep();
				debug!("Periodic sweep removed {} expired blocks", removed);
			}
		}
	}

	plugin.shutdown();
}


// vim: ts=4

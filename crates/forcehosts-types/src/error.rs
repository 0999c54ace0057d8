//! Error type shared by the policy source, message catalog and command surface.
//!
//! The decision core never produces errors; every inbound event yields a verdict.

use std::fmt;

pub type FhResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	PermissionDenied,
	/// Configuration content is well-formed but unusable
	Config(String),
	/// YAML or JSON input could not be parsed
	Parse(String),

	// externals
	Io(std::io::Error),
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Error::PermissionDenied => write!(f, "permission denied"),
			Error::Config(msg) => write!(f, "configuration error: {}", msg),
			Error::Parse(msg) => write!(f, "parse error: {}", msg),
			Error::Io(err) => write!(f, "I/O error: {}", err),
		}
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Error::Io(err) => Some(err),
			_ => None,
		}
	}
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl From<serde_yaml::Error> for Error {
	fn from(err: serde_yaml::Error) -> Self {
		Self::Parse(err.to_string())
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Self::Parse(err.to_string())
	}
}


// vim: ts=4

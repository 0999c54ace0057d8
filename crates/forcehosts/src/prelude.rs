pub use forcehosts_types::error::{Error, FhResult};
pub use forcehosts_types::message::{LogEvent, MessageKey};

pub use tracing::{debug, error, info, warn};

// vim: ts=4

pub use crate::error::{Error, FhResult};

pub use tracing::{debug, error, info, warn};

// vim: ts=4

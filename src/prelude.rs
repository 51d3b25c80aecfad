pub use std::sync::Arc;
pub use std::time::Instant;

pub use anyhow::{anyhow, bail, Context, Error};
pub use tracing::{debug, error, info, instrument, warn};

pub type AHashMap<K, V> = std::collections::HashMap<K, V, ahash::RandomState>;

pub type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;

//! Service configuration, read from TOML.
//!
//! ```toml
//! engine = "indexed"          # or "scan"
//! max_concurrent_searches = 8
//! timeout_ms = 250            # omit for no timeout
//! ```

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tally_engine::EngineKind;
use tokio::sync::Semaphore;

const FALLBACK_CONCURRENCY: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
	/// Engine serving the queries.
	pub engine: EngineKind,
	/// Upper bound on evaluations running at once.
	pub max_concurrent_searches: usize,
	/// Per-search deadline covering queueing and evaluation.
	pub timeout_ms: Option<u64>,
}

impl Default for ServiceConfig {
	fn default() -> Self {
		Self {
			engine: EngineKind::default(),
			max_concurrent_searches: std::thread::available_parallelism().map(NonZeroUsize::get).unwrap_or(FALLBACK_CONCURRENCY),
			timeout_ms: None,
		}
	}
}

impl ServiceConfig {
	pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(content)?;
		config.validate()?;
		Ok(config)
	}

	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		let config = Self::from_toml_str(&content)?;
		tracing::debug!(path = %path.display(), ?config, "service config loaded");
		Ok(config)
	}

	#[inline]
	pub fn timeout(&self) -> Option<Duration> {
		self.timeout_ms.map(Duration::from_millis)
	}

	fn validate(&self) -> Result<(), ConfigError> {
		if self.max_concurrent_searches == 0 {
			return Err(ConfigError::Invalid("max_concurrent_searches must be at least 1".into()));
		}
		if self.max_concurrent_searches > Semaphore::MAX_PERMITS {
			return Err(ConfigError::Invalid(format!("max_concurrent_searches must not exceed {}", Semaphore::MAX_PERMITS)));
		}
		if self.timeout_ms == Some(0) {
			return Err(ConfigError::Invalid("timeout_ms must be positive; omit it to disable the timeout".into()));
		}
		Ok(())
	}
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("failed to read {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("TOML parse error: {0}")]
	Parse(#[from] toml::de::Error),

	#[error("invalid configuration: {0}")]
	Invalid(String),
}

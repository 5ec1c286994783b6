use std::sync::Arc;
use std::time::Duration;

use tally_catalog::Catalog;
use tally_engine::{Query, SearchEngine, SearchResults, build_engine};
use tokio::sync::Semaphore;
use tokio::task::JoinError;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::config::ServiceConfig;

/// Why a search produced no results.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
	#[error("search cancelled before evaluation started")]
	Cancelled,

	#[error("search timed out after {after:?}")]
	TimedOut { after: Duration },

	#[error("search service is shut down")]
	ShutDown,

	#[error("search worker failed: {0}")]
	Worker(#[from] JoinError),
}

/// Async front for a [`SearchEngine`].
///
/// Evaluation itself is synchronous and CPU-bound, so it runs on the blocking pool with at most
/// `max_concurrent_searches` evaluations in flight. Cancellation is honored up to the moment an
/// evaluation starts; a timeout abandons the wait but the running evaluation still finishes and
/// releases its permit.
pub struct SearchService {
	engine: Arc<dyn SearchEngine>,
	permits: Arc<Semaphore>,
	timeout: Option<Duration>,
}

impl SearchService {
	pub fn new(engine: Arc<dyn SearchEngine>, config: &ServiceConfig) -> Self {
		Self {
			engine,
			permits: Arc::new(Semaphore::new(config.max_concurrent_searches.clamp(1, Semaphore::MAX_PERMITS))),
			timeout: config.timeout(),
		}
	}

	/// Builds the configured engine over `catalog`.
	pub fn from_catalog(catalog: Catalog, config: &ServiceConfig) -> Self {
		Self::new(build_engine(config.engine, catalog), config)
	}

	#[inline]
	pub fn engine(&self) -> &Arc<dyn SearchEngine> {
		&self.engine
	}

	/// Evaluation slots not currently taken.
	#[inline]
	pub fn available_permits(&self) -> usize {
		self.permits.available_permits()
	}

	/// Rejects every later search. Evaluations already running finish normally.
	pub fn shutdown(&self) {
		tracing::debug!("search service shutting down");
		self.permits.close();
	}

	pub fn is_shut_down(&self) -> bool {
		self.permits.is_closed()
	}

	/// Evaluates `query`, waiting for a free slot first.
	pub async fn search(&self, query: Query, cancel: &CancellationToken) -> Result<SearchResults, SearchError> {
		let span = tracing::debug_span!("search", filters = query.filters().count(), mode = %query.mode());
		let run = self.run(query, cancel).instrument(span);
		match self.timeout {
			Some(after) => tokio::time::timeout(after, run).await.map_err(|_| {
				tracing::debug!(?after, "search timed out");
				SearchError::TimedOut { after }
			})?,
			None => run.await,
		}
	}

	async fn run(&self, query: Query, cancel: &CancellationToken) -> Result<SearchResults, SearchError> {
		if cancel.is_cancelled() {
			return Err(SearchError::Cancelled);
		}

		let permit = tokio::select! {
			biased;
			_ = cancel.cancelled() => return Err(SearchError::Cancelled),
			permit = Arc::clone(&self.permits).acquire_owned() => permit.map_err(|_| SearchError::ShutDown)?,
		};

		// Last point at which cancellation is observed.
		if cancel.is_cancelled() {
			return Err(SearchError::Cancelled);
		}

		let engine = Arc::clone(&self.engine);
		let results = tokio::task::spawn_blocking(move || {
			let _permit = permit;
			engine.search(&query)
		})
		.await?;
		tracing::debug!(matches = results.len(), "search finished");
		Ok(results)
	}
}

impl std::fmt::Debug for SearchService {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SearchService")
			.field("items", &self.engine.catalog().len())
			.field("available_permits", &self.permits.available_permits())
			.field("timeout", &self.timeout)
			.finish()
	}
}

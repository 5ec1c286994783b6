//! Async search front over tally engines.
//!
//! # Purpose
//!
//! Lets async callers run facet queries without blocking their executor: evaluations go to the
//! blocking pool, bounded by a semaphore, with optional per-search timeouts and cooperative
//! cancellation through [`CancellationToken`].
//!
//! # Invariants
//!
//! - A search whose token is cancelled before evaluation starts never reaches the engine.
//!   - Enforced in: [`SearchService::search`].
//!   - Tested by: `service::tests::cancelled_token_skips_evaluation`, `service::tests::cancellation_while_queued`.
//! - A timed-out search releases its slot once its evaluation returns.
//!   - Tested by: `service::tests::slow_search_times_out_and_releases_its_slot`.

mod config;
mod service;

pub use config::{ConfigError, ServiceConfig};
pub use service::{SearchError, SearchService};
pub use tokio_util::sync::CancellationToken;

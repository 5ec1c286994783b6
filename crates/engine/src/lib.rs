//! Faceted search over frozen catalogs.
//!
//! # Purpose
//!
//! Given a [`Query`] (accepted values per attribute domain), return the matching items and, per
//! domain, the cross-filtered count of each counted value: the number of items carrying that value
//! which satisfy every *other* domain's restriction.
//!
//! # Mental Model
//!
//! 1. **Build:** [`CatalogIndex::build`] turns a [`Catalog`] into per-value posting sets, once.
//! 2. **Resolve:** [`ResolvedQuery::resolve`] maps query keys onto schema positions and slots.
//! 3. **Evaluate:** [`IndexedEngine`] answers with unions and intersections of posting sets.
//!    [`ScanEngine`] answers the same question with a full scan and serves as the reference.
//!
//! # Key Types
//!
//! | Type | Role |
//! |------|------|
//! | [`SearchEngine`] | Common evaluation interface of both engines. |
//! | [`CatalogIndex`] | Immutable posting sets per domain value. |
//! | [`Query`] | Accepted values per domain plus a [`FacetMode`]. |
//! | [`SearchResults`] | Matches in catalog order plus [`FacetCounts`]. |
//!
//! # Concurrency
//!
//! Indexes and catalogs are immutable and `Send + Sync`. Any number of queries may run in parallel
//! against one engine without locking; [`SearchEngine::search_many`] does so with `rayon` when the
//! `parallel` feature is on.
//!
//! # Invariants
//!
//! - Counts of domain `d` ignore `d`'s own restriction.
//!   - Enforced in: [`IndexedEngine::evaluate`], [`ScanEngine::evaluate`].
//!   - Tested by: `differential::own_domain_restriction_never_changes_its_counts`.
//! - Zero counts are omitted.
//!   - Enforced in: `FacetCounts::record`.
//!   - Tested by: `differential::zero_counts_are_omitted`.
//! - Unknown values match nothing; they never error.
//!   - Enforced in: [`ResolvedQuery::resolve`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};

mod index;
mod indexed;
mod query;
mod results;
mod scan;

#[cfg(test)]
mod tests;

pub use index::CatalogIndex;
pub use indexed::IndexedEngine;
pub use query::{FacetMode, Query, ResolvedQuery};
pub use results::{DomainCounts, FacetCounts, ItemSummary, SearchReport, SearchResults};
pub use scan::ScanEngine;
pub use tally_catalog::Catalog;

/// Evaluates facet queries against one catalog.
pub trait SearchEngine: Send + Sync {
	fn catalog(&self) -> &Catalog;

	/// Evaluates one query. Never fails: unknown input matches nothing.
	fn search(&self, query: &Query) -> SearchResults;

	/// Evaluates independent queries, in parallel when the `parallel` feature is enabled.
	///
	/// Results keep the order of `queries`.
	fn search_many(&self, queries: &[Query]) -> Vec<SearchResults> {
		#[cfg(feature = "parallel")]
		use rayon::prelude::*;

		#[cfg(feature = "parallel")]
		let queries = queries.par_iter();
		#[cfg(not(feature = "parallel"))]
		let queries = queries.iter();

		queries.map(|query| self.search(query)).collect()
	}
}

/// Engine implementation selector.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumString, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EngineKind {
	#[default]
	Indexed,
	Scan,
}

/// Builds the engine `kind` over `catalog`.
pub fn build_engine(kind: EngineKind, catalog: Catalog) -> Arc<dyn SearchEngine> {
	tracing::info!(engine = %kind, items = catalog.len(), "building search engine");
	match kind {
		EngineKind::Indexed => Arc::new(IndexedEngine::new(catalog)),
		EngineKind::Scan => Arc::new(ScanEngine::new(catalog)),
	}
}

//! Query evaluation by posting-set algebra.
//!
//! For domains `0..D` with restricted unions `F_0..F_{D-1}` (absent = universe):
//!
//! - matches = `F_0 ∩ … ∩ F_{D-1}`;
//! - counts of domain `d` use `E_d = ∩_{i≠d} F_i`, the filters of every *other* domain.
//!
//! `E_d` is `prefix[d] ∩ suffix[d + 1]`, so a query costs O(D) set intersections plus one
//! intersection count per counted value, independent of how many items the catalog holds.

use std::sync::Arc;

use roaring::RoaringBitmap;
use tally_catalog::Catalog;

use crate::index::CatalogIndex;
use crate::query::{Query, ResolvedQuery};
use crate::results::{FacetCounts, SearchResults};
use crate::SearchEngine;

/// Production engine: evaluates queries against a prebuilt [`CatalogIndex`].
#[derive(Clone, Debug)]
pub struct IndexedEngine {
	index: Arc<CatalogIndex>,
}

impl IndexedEngine {
	/// Builds the index for `catalog`.
	pub fn new(catalog: Catalog) -> Self {
		Self::from_index(Arc::new(CatalogIndex::build(catalog)))
	}

	pub fn from_index(index: Arc<CatalogIndex>) -> Self {
		Self { index }
	}

	#[inline]
	pub fn index(&self) -> &CatalogIndex {
		&self.index
	}

	pub fn evaluate(&self, query: &Query) -> SearchResults {
		let index = &*self.index;
		let catalog = index.catalog();
		let schema = catalog.schema();
		let resolved = ResolvedQuery::resolve(schema, query);
		let mut counts = FacetCounts::for_schema(schema);

		if resolved.is_unsatisfiable() {
			return SearchResults::new(catalog.clone(), Vec::new(), counts);
		}

		let filters: Vec<Option<RoaringBitmap>> = (0..schema.len())
			.map(|pos| resolved.restriction(pos).map(|slots| index.union(pos, slots)))
			.collect();

		let width = filters.len();
		let mut prefix: Vec<Option<RoaringBitmap>> = Vec::with_capacity(width + 1);
		prefix.push(None);
		for (pos, filter) in filters.iter().enumerate() {
			let next = meet(prefix[pos].as_ref(), filter.as_ref());
			prefix.push(next);
		}

		let mut suffix: Vec<Option<RoaringBitmap>> = vec![None; width + 1];
		for pos in (0..width).rev() {
			suffix[pos] = meet(filters[pos].as_ref(), suffix[pos + 1].as_ref());
		}

		let positions: Vec<u32> = prefix[width].as_ref().unwrap_or(index.universe()).iter().collect();

		for (pos, domain) in schema.domains().iter().enumerate() {
			let others = meet(prefix[pos].as_ref(), suffix[pos + 1].as_ref());
			for slot in resolved.counted_slots(pos, domain) {
				let postings = index.postings(pos, slot);
				let count = match &others {
					Some(others) => postings.intersection_len(others),
					None => postings.len(),
				};
				if let Some(value) = domain.value(slot) {
					counts.record(pos, &value.key, count);
				}
			}
		}

		tracing::trace!(matches = positions.len(), mode = %resolved.mode(), "indexed query evaluated");
		SearchResults::new(catalog.clone(), positions, counts)
	}
}

impl SearchEngine for IndexedEngine {
	fn catalog(&self) -> &Catalog {
		self.index.catalog()
	}

	fn search(&self, query: &Query) -> SearchResults {
		self.evaluate(query)
	}
}

/// Intersection where `None` stands for the universe.
fn meet(a: Option<&RoaringBitmap>, b: Option<&RoaringBitmap>) -> Option<RoaringBitmap> {
	match (a, b) {
		(None, None) => None,
		(Some(set), None) | (None, Some(set)) => Some(set.clone()),
		(Some(a), Some(b)) => Some(a & b),
	}
}

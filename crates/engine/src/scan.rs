//! Reference engine: one full pass over the catalog per query.
//!
//! An item failing no restriction is a match and counts toward every domain. An item failing
//! exactly one restriction, in domain `d`, still satisfies every *other* domain, so it counts
//! toward `d` alone. Items failing two or more restrictions count nowhere.

use tally_catalog::Catalog;

use crate::SearchEngine;
use crate::query::{Query, ResolvedQuery};
use crate::results::{FacetCounts, SearchResults};

/// Full-scan engine, kept to differential-test [`crate::IndexedEngine`].
#[derive(Clone, Debug)]
pub struct ScanEngine {
	catalog: Catalog,
}

impl ScanEngine {
	pub fn new(catalog: Catalog) -> Self {
		Self { catalog }
	}

	pub fn evaluate(&self, query: &Query) -> SearchResults {
		let catalog = &self.catalog;
		let schema = catalog.schema();
		let resolved = ResolvedQuery::resolve(schema, query);
		let mut counts = FacetCounts::for_schema(schema);

		if resolved.is_unsatisfiable() {
			return SearchResults::new(catalog.clone(), Vec::new(), counts);
		}

		let mut tallies: Vec<Vec<u64>> = schema.domains().iter().map(|domain| vec![0; domain.len()]).collect();
		let mut positions = Vec::new();

		for pos in 0..catalog.len() as u32 {
			let slots = catalog.slots_of(pos);
			let mut failures = 0usize;
			let mut failed_at = 0usize;
			for (domain_pos, &slot) in slots.iter().enumerate() {
				if !resolved.accepts(domain_pos, slot) {
					failures += 1;
					failed_at = domain_pos;
					if failures > 1 {
						break;
					}
				}
			}

			match failures {
				0 => {
					positions.push(pos);
					for (domain_pos, slot) in slots.iter().enumerate() {
						tallies[domain_pos][slot.index()] += 1;
					}
				}
				1 => tallies[failed_at][slots[failed_at].index()] += 1,
				_ => {}
			}
		}

		for (pos, domain) in schema.domains().iter().enumerate() {
			for slot in resolved.counted_slots(pos, domain) {
				if let Some(value) = domain.value(slot) {
					counts.record(pos, &value.key, tallies[pos][slot.index()]);
				}
			}
		}

		tracing::trace!(matches = positions.len(), scanned = catalog.len(), "scan query evaluated");
		SearchResults::new(catalog.clone(), positions, counts)
	}
}

impl SearchEngine for ScanEngine {
	fn catalog(&self) -> &Catalog {
		&self.catalog
	}

	fn search(&self, query: &Query) -> SearchResults {
		self.evaluate(query)
	}
}

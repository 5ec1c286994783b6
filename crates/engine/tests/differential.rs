//! Property tests: the indexed engine against the scan engine and a brute-force oracle.

use proptest::prelude::*;
use roaring::RoaringBitmap;
use tally_catalog::{AttributeDomain, Catalog, DomainValue, Item, ItemId, Schema};
use tally_engine::{CatalogIndex, FacetMode, IndexedEngine, Query, ScanEngine, SearchEngine, SearchResults};

/// Raw catalog and query description, independent of the engine types.
#[derive(Debug, Clone)]
struct Fixture {
	/// Value count per domain.
	widths: Vec<usize>,
	/// One slot per domain per item.
	rows: Vec<Vec<usize>>,
	/// Accepted slots per domain; `widths[d]` stands for an undeclared value.
	filters: Vec<Option<Vec<usize>>>,
	exploratory: bool,
}

fn domain_id(d: usize) -> String {
	format!("d{d}")
}

fn value_key(width: usize, v: usize) -> String {
	if v < width { format!("v{v}") } else { "undeclared".to_owned() }
}

impl Fixture {
	fn catalog(&self) -> Catalog {
		let domains = self.widths.iter().enumerate().map(|(d, &width)| {
			let values = (0..width).map(|v| DomainValue::new(value_key(width, v), format!("V{v}")));
			AttributeDomain::new(domain_id(d), domain_id(d), values).unwrap()
		});
		let schema = Schema::new(domains.collect::<Vec<_>>()).unwrap();
		let items = self.rows.iter().enumerate().map(|(i, row)| {
			row.iter()
				.enumerate()
				.fold(Item::new(ItemId::new_v4(), format!("item-{i}")), |item, (d, &v)| item.with(domain_id(d), value_key(self.widths[d], v)))
		});
		Catalog::new(schema, items.collect::<Vec<_>>()).unwrap()
	}

	fn query(&self) -> Query {
		let mut query = Query::new();
		for (d, filter) in self.filters.iter().enumerate() {
			if let Some(values) = filter {
				query = query.accept(domain_id(d), values.iter().map(|&v| value_key(self.widths[d], v)));
			}
		}
		if self.exploratory { query.with_mode(FacetMode::Exploratory) } else { query }
	}

	fn restricted(&self, d: usize) -> Option<&[usize]> {
		self.filters[d].as_deref().filter(|values| !values.is_empty())
	}

	fn passes(&self, d: usize, slot: usize) -> bool {
		self.restricted(d).is_none_or(|values| values.contains(&slot))
	}

	fn matches(&self) -> Vec<String> {
		self.rows
			.iter()
			.enumerate()
			.filter(|(_, row)| row.iter().enumerate().all(|(d, &v)| self.passes(d, v)))
			.map(|(i, _)| format!("item-{i}"))
			.collect()
	}

	fn counts(&self, d: usize) -> Vec<(String, u64)> {
		let counted: Vec<usize> = match (self.exploratory, self.restricted(d)) {
			(false, Some(values)) => (0..self.widths[d]).filter(|v| values.contains(v)).collect(),
			_ => (0..self.widths[d]).collect(),
		};
		counted
			.into_iter()
			.filter_map(|v| {
				let count = self
					.rows
					.iter()
					.filter(|row| row[d] == v && row.iter().enumerate().all(|(e, &slot)| e == d || self.passes(e, slot)))
					.count() as u64;
				(count > 0).then(|| (value_key(self.widths[d], v), count))
			})
			.collect()
	}
}

fn arb_fixture() -> impl Strategy<Value = Fixture> {
	prop::collection::vec(1usize..=5, 1..=4).prop_flat_map(|widths| {
		let rows = prop::collection::vec(widths.iter().map(|&w| 0..w).collect::<Vec<_>>(), 0..48);
		let filters = widths
			.iter()
			.map(|&w| prop::option::of(prop::collection::vec(0..=w, 0..=3)))
			.collect::<Vec<_>>();
		(Just(widths), rows, filters, any::<bool>()).prop_map(|(widths, rows, filters, exploratory)| Fixture {
			widths,
			rows,
			filters,
			exploratory,
		})
	})
}

fn names(results: &SearchResults) -> Vec<String> {
	results.items().map(|item| item.name().to_owned()).collect()
}

fn counts(results: &SearchResults, d: usize) -> Vec<(String, u64)> {
	results
		.counts()
		.domain(&domain_id(d))
		.map(|counts| counts.iter().map(|(value, &count)| (value.to_string(), count)).collect())
		.unwrap_or_default()
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(256))]

	#[test]
	fn indexed_matches_scan(fixture in arb_fixture()) {
		let catalog = fixture.catalog();
		let query = fixture.query();
		let indexed = IndexedEngine::new(catalog.clone()).search(&query);
		let scanned = ScanEngine::new(catalog).search(&query);
		prop_assert_eq!(indexed, scanned);
	}

	#[test]
	fn engines_agree_with_oracle(fixture in arb_fixture()) {
		let catalog = fixture.catalog();
		let query = fixture.query();
		for engine in [&IndexedEngine::new(catalog.clone()) as &dyn SearchEngine, &ScanEngine::new(catalog.clone())] {
			let results = engine.search(&query);
			prop_assert_eq!(names(&results), fixture.matches());
			for d in 0..fixture.widths.len() {
				prop_assert_eq!(counts(&results, d), fixture.counts(d), "domain d{}", d);
			}
		}
	}

	#[test]
	fn index_partitions_catalog(fixture in arb_fixture()) {
		let index = CatalogIndex::build(fixture.catalog());
		for d in 0..fixture.widths.len() {
			let mut union = RoaringBitmap::new();
			for set in index.domain_postings(d) {
				prop_assert!(union.is_disjoint(set));
				union |= set;
			}
			prop_assert_eq!(&union, index.universe());
		}
	}

	#[test]
	fn evaluation_is_idempotent(fixture in arb_fixture()) {
		let engine = IndexedEngine::new(fixture.catalog());
		let query = fixture.query();
		prop_assert_eq!(engine.search(&query), engine.search(&query));
	}

	#[test]
	fn zero_counts_are_omitted(fixture in arb_fixture()) {
		let results = IndexedEngine::new(fixture.catalog()).search(&fixture.query());
		for (_, counts) in results.counts().iter() {
			prop_assert!(counts.values().all(|&count| count > 0));
		}
	}

	#[test]
	fn accepting_more_values_never_shrinks_matches(fixture in arb_fixture(), d in 0usize..4, extra in 0usize..5) {
		let d = d % fixture.widths.len();
		let engine = IndexedEngine::new(fixture.catalog());
		let before = engine.search(&fixture.query()).len();

		let mut widened = fixture.clone();
		if let Some(values) = widened.filters[d].as_mut().filter(|values| !values.is_empty()) {
			values.push(extra % fixture.widths[d]);
		}
		prop_assert!(engine.search(&widened.query()).len() >= before);
	}

	#[test]
	fn own_domain_restriction_never_changes_its_counts(fixture in arb_fixture(), d in 0usize..4) {
		let d = d % fixture.widths.len();
		let engine = IndexedEngine::new(fixture.catalog());

		// Exploratory counts of `d` do not depend on `d`'s restriction at all.
		let mut exploratory = fixture.clone();
		exploratory.exploratory = true;
		let mut unrestricted = exploratory.clone();
		unrestricted.filters[d] = None;
		prop_assert_eq!(
			counts(&engine.search(&exploratory.query()), d),
			counts(&engine.search(&unrestricted.query()), d)
		);

		// An accepted value's count does not depend on which other values of `d` are accepted.
		let mut accepted = fixture.clone();
		accepted.exploratory = false;
		let full = counts(&engine.search(&accepted.query()), d);
		if let Some(values) = accepted.restricted(d).map(<[usize]>::to_vec) {
			for v in values {
				let mut single = accepted.clone();
				single.filters[d] = Some(vec![v]);
				let alone = counts(&engine.search(&single.query()), d);
				let key = value_key(fixture.widths[d], v);
				prop_assert_eq!(
					alone.first().map(|(_, count)| *count),
					full.iter().find(|(value, _)| *value == key).map(|(_, count)| *count)
				);
			}
		}
	}
}

use indexmap::IndexMap;
use serde::Serialize;
use tally_catalog::{Catalog, DomainId, Item, ItemId, Schema, ValueKey};

/// Cross-filtered counts of one domain, keyed by value.
pub type DomainCounts = IndexMap<ValueKey, u64>;

/// Cross-filtered counts for every schema domain, in schema order.
///
/// A value whose count is zero is absent, never stored as `0`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FacetCounts {
	domains: IndexMap<DomainId, DomainCounts>,
}

impl FacetCounts {
	/// Creates an empty mapping for every domain of `schema`.
	pub(crate) fn for_schema(schema: &Schema) -> Self {
		Self {
			domains: schema.domains().iter().map(|domain| (domain.id().clone(), DomainCounts::new())).collect(),
		}
	}

	/// Records `count` for `value` of the domain at `domain_pos`; zero is dropped.
	pub(crate) fn record(&mut self, domain_pos: usize, value: &ValueKey, count: u64) {
		if count == 0 {
			return;
		}
		if let Some((_, counts)) = self.domains.get_index_mut(domain_pos) {
			counts.insert(value.clone(), count);
		}
	}

	/// Returns the count of `value` in `domain`, if it is non-zero.
	pub fn get(&self, domain: &str, value: &str) -> Option<u64> {
		self.domains.get(domain)?.get(value).copied()
	}

	pub fn domain(&self, domain: &str) -> Option<&DomainCounts> {
		self.domains.get(domain)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&DomainId, &DomainCounts)> {
		self.domains.iter()
	}
}

/// Matching items plus facet counts for one query.
///
/// Holds the catalog snapshot, so results stay valid independently of the engine.
#[derive(Clone, Debug)]
pub struct SearchResults {
	catalog: Catalog,
	positions: Vec<u32>,
	counts: FacetCounts,
}

impl PartialEq for SearchResults {
	fn eq(&self, other: &Self) -> bool {
		self.positions == other.positions && self.counts == other.counts
	}
}

impl SearchResults {
	pub(crate) fn new(catalog: Catalog, positions: Vec<u32>, counts: FacetCounts) -> Self {
		debug_assert!(positions.is_sorted(), "matches must be in catalog order");
		Self { catalog, positions, counts }
	}

	/// Matching items in catalog order.
	pub fn items(&self) -> impl ExactSizeIterator<Item = &Item> + '_ {
		let items = self.catalog.items();
		self.positions.iter().map(move |&pos| &items[pos as usize])
	}

	pub fn ids(&self) -> impl ExactSizeIterator<Item = ItemId> + '_ {
		self.items().map(Item::id)
	}

	/// Catalog positions of the matching items, ascending.
	#[inline]
	pub fn positions(&self) -> &[u32] {
		&self.positions
	}

	#[inline]
	pub fn counts(&self) -> &FacetCounts {
		&self.counts
	}

	#[inline]
	pub fn catalog(&self) -> &Catalog {
		&self.catalog
	}

	#[inline]
	pub fn len(&self) -> usize {
		self.positions.len()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.positions.is_empty()
	}

	/// Builds a serializable view, keeping at most `limit` items.
	pub fn report(&self, limit: Option<usize>) -> SearchReport {
		let limit = limit.unwrap_or(usize::MAX);
		SearchReport {
			total: self.len(),
			items: self.items().take(limit).map(ItemSummary::from).collect(),
			counts: self.counts.clone(),
		}
	}
}

/// Presentation-ready form of [`SearchResults`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SearchReport {
	pub total: usize,
	pub items: Vec<ItemSummary>,
	pub counts: FacetCounts,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ItemSummary {
	pub id: ItemId,
	pub name: String,
	pub attributes: IndexMap<DomainId, ValueKey>,
}

impl From<&Item> for ItemSummary {
	fn from(item: &Item) -> Self {
		Self {
			id: item.id(),
			name: item.name().to_owned(),
			attributes: item.attributes().iter().cloned().collect(),
		}
	}
}

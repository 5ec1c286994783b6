//! Per-domain posting sets built once from a frozen catalog.
//!
//! # Invariants
//!
//! - Postings of one domain partition the universe: pairwise disjoint, union equals `0..len`.
//!   - Enforced in: [`CatalogIndex::build`] (one insertion per item per domain).
//!   - Tested by: `tests::postings_partition_every_domain`, `differential::index_partitions_catalog`.
//!   - Failure symptom: counts that exceed or undercount the catalog.
//! - The index never copies items; it shares the catalog snapshot.

use roaring::RoaringBitmap;
use tally_catalog::{Catalog, ValueSlot};

/// Read-only lookup structure mapping each domain value to the item positions carrying it.
pub struct CatalogIndex {
	catalog: Catalog,
	universe: RoaringBitmap,
	/// Indexed by schema position, then by value slot.
	postings: Box<[Box<[RoaringBitmap]>]>,
}

impl std::fmt::Debug for CatalogIndex {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CatalogIndex")
			.field("items", &self.universe.len())
			.field("domains", &self.postings.len())
			.finish()
	}
}

impl CatalogIndex {
	/// Indexes `catalog` in one pass: O(items × domains).
	pub fn build(catalog: Catalog) -> Self {
		let schema = catalog.schema();
		let _span = tracing::debug_span!("catalog_index_build", items = catalog.len(), domains = schema.len()).entered();

		let mut postings: Vec<Vec<RoaringBitmap>> = schema.domains().iter().map(|domain| vec![RoaringBitmap::new(); domain.len()]).collect();

		let len = catalog.len() as u32;
		for pos in 0..len {
			for (domain_pos, slot) in catalog.slots_of(pos).iter().enumerate() {
				// Positions arrive in ascending order, so every push appends.
				postings[domain_pos][slot.index()].push(pos);
			}
		}

		let mut universe = RoaringBitmap::new();
		universe.insert_range(0..len);

		tracing::debug!(postings = postings.iter().map(Vec::len).sum::<usize>(), "catalog index built");

		Self {
			catalog,
			universe,
			postings: postings.into_iter().map(Vec::into_boxed_slice).collect(),
		}
	}

	#[inline]
	pub fn catalog(&self) -> &Catalog {
		&self.catalog
	}

	/// Every item position.
	#[inline]
	pub fn universe(&self) -> &RoaringBitmap {
		&self.universe
	}

	/// Positions of items carrying `slot` in the domain at `domain_pos`.
	///
	/// # Panics
	///
	/// Panics if either index is out of range.
	#[inline]
	pub fn postings(&self, domain_pos: usize, slot: ValueSlot) -> &RoaringBitmap {
		&self.postings[domain_pos][slot.index()]
	}

	/// All posting sets of the domain at `domain_pos`, in slot order.
	#[inline]
	pub fn domain_postings(&self, domain_pos: usize) -> &[RoaringBitmap] {
		&self.postings[domain_pos]
	}

	/// Union of the posting sets of `slots` in the domain at `domain_pos`.
	pub fn union(&self, domain_pos: usize, slots: &[ValueSlot]) -> RoaringBitmap {
		let mut set = RoaringBitmap::new();
		for &slot in slots {
			set |= self.postings(domain_pos, slot);
		}
		set
	}

	#[inline]
	pub fn len(&self) -> usize {
		self.catalog.len()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.catalog.is_empty()
	}
}

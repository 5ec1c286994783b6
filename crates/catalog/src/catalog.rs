//! Validated, frozen item snapshots.
//!
//! # Invariants
//!
//! - Each item has exactly one slot per schema domain, stored row-major in `slots`.
//!   - Enforced in: [`Catalog::new`].
//!   - Tested by: `tests::rejects_missing_attribute`, `tests::rejects_duplicate_attribute`.
//! - Cloning a catalog shares items; it never copies them.
//!   - Enforced in: `Catalog` (holds `Arc<CatalogInner>`).

use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::{CatalogError, Item, Schema, ValueSlot};

struct CatalogInner {
	schema: Schema,
	items: Box<[Item]>,
	slots: Box<[ValueSlot]>,
}

/// Frozen catalog: a schema plus items resolved against it.
#[derive(Clone)]
pub struct Catalog {
	inner: Arc<CatalogInner>,
}

impl std::fmt::Debug for Catalog {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Catalog")
			.field("domains", &self.inner.schema.len())
			.field("items", &self.inner.items.len())
			.finish()
	}
}

impl Catalog {
	/// Validates `items` against `schema` and freezes them in the given order.
	///
	/// Nothing is returned on failure; a catalog is never partially built.
	pub fn new(schema: Schema, items: impl IntoIterator<Item = Item>) -> Result<Self, CatalogError> {
		let items: Box<[Item]> = items.into_iter().collect();
		if items.len() > u32::MAX as usize {
			return Err(CatalogError::TooManyItems { count: items.len() });
		}

		let width = schema.len();
		let mut slots = Vec::with_capacity(items.len() * width);
		let mut seen = FxHashSet::with_capacity_and_hasher(items.len(), Default::default());
		let mut row: Vec<Option<ValueSlot>> = vec![None; width];

		for item in items.iter() {
			if !seen.insert(item.id()) {
				return Err(CatalogError::DuplicateItem { item: item.id() });
			}

			row.fill(None);
			for (domain_id, value) in item.attributes() {
				let Some(pos) = schema.position(domain_id.as_str()) else {
					return Err(CatalogError::UnknownDomain {
						item: item.id(),
						domain: domain_id.clone(),
					});
				};
				if row[pos].is_some() {
					return Err(CatalogError::DuplicateAttribute {
						item: item.id(),
						domain: domain_id.clone(),
					});
				}
				let Some(slot) = schema.domains()[pos].slot(value.as_str()) else {
					return Err(CatalogError::UnknownValue {
						item: item.id(),
						domain: domain_id.clone(),
						value: value.clone(),
					});
				};
				row[pos] = Some(slot);
			}

			for (pos, slot) in row.iter().enumerate() {
				match slot {
					Some(slot) => slots.push(*slot),
					None => {
						return Err(CatalogError::MissingAttribute {
							item: item.id(),
							domain: schema.domains()[pos].id().clone(),
						});
					}
				}
			}
		}

		tracing::debug!(items = items.len(), domains = width, "catalog frozen");

		Ok(Self {
			inner: Arc::new(CatalogInner {
				schema,
				items,
				slots: slots.into_boxed_slice(),
			}),
		})
	}

	#[inline]
	pub fn schema(&self) -> &Schema {
		&self.inner.schema
	}

	/// Returns the items in catalog order.
	#[inline]
	pub fn items(&self) -> &[Item] {
		&self.inner.items
	}

	#[inline]
	pub fn item(&self, pos: u32) -> Option<&Item> {
		self.inner.items.get(pos as usize)
	}

	/// Returns the slot item `pos` carries for the domain at `domain_pos`.
	///
	/// # Panics
	///
	/// Panics if either position is out of range.
	#[inline]
	pub fn slot(&self, pos: u32, domain_pos: usize) -> ValueSlot {
		self.slots_of(pos)[domain_pos]
	}

	/// Returns every slot of item `pos`, in schema order.
	///
	/// # Panics
	///
	/// Panics if `pos` is out of range.
	#[inline]
	pub fn slots_of(&self, pos: u32) -> &[ValueSlot] {
		let width = self.inner.schema.len();
		let start = pos as usize * width;
		&self.inner.slots[start..start + width]
	}

	#[inline]
	pub fn len(&self) -> usize {
		self.inner.items.len()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.inner.items.is_empty()
	}

	/// Returns true if both handles share one snapshot.
	#[inline]
	pub fn ptr_eq(&self, other: &Catalog) -> bool {
		Arc::ptr_eq(&self.inner, &other.inner)
	}
}

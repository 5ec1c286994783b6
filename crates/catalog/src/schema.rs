use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::{AttributeDomain, CatalogError, DomainId};

/// Ordered set of the attribute domains a catalog is faceted on.
#[derive(Clone, Debug)]
pub struct Schema {
	domains: Arc<[AttributeDomain]>,
	by_id: Arc<FxHashMap<DomainId, usize>>,
}

impl Schema {
	pub fn new(domains: impl IntoIterator<Item = AttributeDomain>) -> Result<Self, CatalogError> {
		let domains: Arc<[AttributeDomain]> = domains.into_iter().collect();
		let mut by_id = FxHashMap::with_capacity_and_hasher(domains.len(), Default::default());
		for (pos, domain) in domains.iter().enumerate() {
			if by_id.insert(domain.id().clone(), pos).is_some() {
				return Err(CatalogError::DuplicateDomain { domain: domain.id().clone() });
			}
		}

		Ok(Self {
			domains,
			by_id: Arc::new(by_id),
		})
	}

	/// Returns the position of a domain within the schema.
	#[inline]
	pub fn position(&self, id: &str) -> Option<usize> {
		self.by_id.get(id).copied()
	}

	#[inline]
	pub fn domain(&self, id: &str) -> Option<&AttributeDomain> {
		self.position(id).map(|pos| &self.domains[pos])
	}

	#[inline]
	pub fn domain_at(&self, pos: usize) -> Option<&AttributeDomain> {
		self.domains.get(pos)
	}

	#[inline]
	pub fn domains(&self) -> &[AttributeDomain] {
		&self.domains
	}

	#[inline]
	pub fn len(&self) -> usize {
		self.domains.len()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.domains.is_empty()
	}
}

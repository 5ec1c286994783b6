//! Facet queries and their resolution against a schema.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tally_catalog::{AttributeDomain, DomainId, Schema, ValueKey, ValueSlot};

/// Which values a domain reports counts for.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumString, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FacetMode {
	/// A restricted domain counts its accepted values; an unrestricted one counts every value.
	#[default]
	Accepted,
	/// Every domain counts every value under the other domains' filters.
	Exploratory,
}

/// Accepted values per attribute domain.
///
/// A domain with no accepted values is unrestricted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
	#[serde(default)]
	filters: IndexMap<DomainId, Vec<ValueKey>>,
	#[serde(default)]
	mode: FacetMode,
}

impl Query {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds accepted values for `domain`, keeping any accepted earlier.
	pub fn accept<V>(mut self, domain: impl Into<DomainId>, values: impl IntoIterator<Item = V>) -> Self
	where
		V: Into<ValueKey>,
	{
		self.filters.entry(domain.into()).or_default().extend(values.into_iter().map(Into::into));
		self
	}

	pub fn with_mode(mut self, mode: FacetMode) -> Self {
		self.mode = mode;
		self
	}

	#[inline]
	pub fn mode(&self) -> FacetMode {
		self.mode
	}

	/// Returns the accepted values for `domain`; empty when unrestricted.
	pub fn restriction(&self, domain: &str) -> &[ValueKey] {
		self.filters.get(domain).map(Vec::as_slice).unwrap_or(&[])
	}

	pub fn filters(&self) -> impl Iterator<Item = (&DomainId, &[ValueKey])> {
		self.filters.iter().map(|(domain, values)| (domain, values.as_slice()))
	}

	/// Returns true if no domain is restricted.
	pub fn is_unrestricted(&self) -> bool {
		self.filters.values().all(Vec::is_empty)
	}
}

/// A [`Query`] mapped onto schema positions and value slots.
///
/// Both engines evaluate this form, so they agree on how unknown input is read:
/// - unknown values resolve to nothing and are dropped;
/// - a restriction left with no known values matches nothing;
/// - a non-empty restriction on an undeclared domain makes the whole query unsatisfiable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedQuery {
	restrictions: Vec<Option<Vec<ValueSlot>>>,
	unsatisfiable: bool,
	mode: FacetMode,
}

impl ResolvedQuery {
	pub fn resolve(schema: &Schema, query: &Query) -> Self {
		let mut restrictions: Vec<Option<Vec<ValueSlot>>> = vec![None; schema.len()];
		let mut unsatisfiable = false;

		for (domain_id, values) in query.filters() {
			if values.is_empty() {
				continue;
			}

			let Some(pos) = schema.position(domain_id.as_str()) else {
				tracing::debug!(domain = %domain_id, "query restricts an undeclared domain");
				unsatisfiable = true;
				continue;
			};

			let domain = &schema.domains()[pos];
			let slots = restrictions[pos].get_or_insert_with(Vec::new);
			for value in values {
				match domain.slot(value.as_str()) {
					Some(slot) => slots.push(slot),
					None => tracing::debug!(domain = %domain_id, value = %value, "query accepts an undeclared value"),
				}
			}
		}

		for slots in restrictions.iter_mut().flatten() {
			slots.sort_unstable();
			slots.dedup();
		}

		Self {
			restrictions,
			unsatisfiable,
			mode: query.mode(),
		}
	}

	/// Returns the accepted slots of the domain at `pos`, sorted; `None` when unrestricted.
	#[inline]
	pub fn restriction(&self, pos: usize) -> Option<&[ValueSlot]> {
		self.restrictions[pos].as_deref()
	}

	#[inline]
	pub fn accepts(&self, pos: usize, slot: ValueSlot) -> bool {
		match &self.restrictions[pos] {
			None => true,
			Some(slots) => slots.binary_search(&slot).is_ok(),
		}
	}

	/// Returns the slots whose counts are reported for the domain at `pos`, in slot order.
	pub fn counted_slots(&self, pos: usize, domain: &AttributeDomain) -> Vec<ValueSlot> {
		match (self.mode, self.restriction(pos)) {
			(FacetMode::Accepted, Some(slots)) => slots.to_vec(),
			_ => domain.slots().collect(),
		}
	}

	#[inline]
	pub fn is_unsatisfiable(&self) -> bool {
		self.unsatisfiable
	}

	#[inline]
	pub fn mode(&self) -> FacetMode {
		self.mode
	}

	#[inline]
	pub fn len(&self) -> usize {
		self.restrictions.len()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.restrictions.is_empty()
	}
}

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::CatalogError;

macro_rules! interned_key {
	($(#[$meta:meta])* $name:ident) => {
		$(#[$meta])*
		#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(Arc<str>);

		impl $name {
			/// Returns the key as a string slice.
			#[inline]
			pub fn as_str(&self) -> &str {
				&self.0
			}
		}

		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}

		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				f.write_str(&self.0)
			}
		}

		impl From<&str> for $name {
			fn from(value: &str) -> Self {
				Self(Arc::from(value))
			}
		}

		impl From<String> for $name {
			fn from(value: String) -> Self {
				Self(Arc::from(value))
			}
		}

		impl PartialEq<str> for $name {
			fn eq(&self, other: &str) -> bool {
				&*self.0 == other
			}
		}

		impl PartialEq<&str> for $name {
			fn eq(&self, other: &&str) -> bool {
				&*self.0 == *other
			}
		}
	};
}

interned_key! {
	/// Identifier of an attribute domain, e.g. `size`.
	DomainId
}

interned_key! {
	/// Identity of a value within one attribute domain, e.g. `red`.
	ValueKey
}

/// Dense position of a value within its domain, in declaration order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValueSlot(u32);

impl ValueSlot {
	#[inline]
	pub const fn from_u32(raw: u32) -> Self {
		Self(raw)
	}

	#[inline]
	pub const fn as_u32(self) -> u32 {
		self.0
	}

	#[inline]
	pub const fn index(self) -> usize {
		self.0 as usize
	}
}

/// One declared value of a domain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainValue {
	pub key: ValueKey,
	pub label: String,
}

impl DomainValue {
	pub fn new(key: impl Into<ValueKey>, label: impl Into<String>) -> Self {
		Self {
			key: key.into(),
			label: label.into(),
		}
	}
}

/// A closed, enumerable set of values for one facet.
#[derive(Clone, Debug)]
pub struct AttributeDomain {
	id: DomainId,
	label: String,
	values: Arc<[DomainValue]>,
	slots: Arc<FxHashMap<ValueKey, ValueSlot>>,
}

impl AttributeDomain {
	/// Declares a domain. Values keep the given order; their slots follow it.
	pub fn new(id: impl Into<DomainId>, label: impl Into<String>, values: impl IntoIterator<Item = DomainValue>) -> Result<Self, CatalogError> {
		let id = id.into();
		let values: Arc<[DomainValue]> = values.into_iter().collect();

		if values.len() > u32::MAX as usize {
			return Err(CatalogError::TooManyValues {
				domain: id,
				count: values.len(),
			});
		}

		let mut slots = FxHashMap::with_capacity_and_hasher(values.len(), Default::default());
		for (idx, value) in values.iter().enumerate() {
			if slots.insert(value.key.clone(), ValueSlot::from_u32(idx as u32)).is_some() {
				return Err(CatalogError::DuplicateValue {
					domain: id,
					value: value.key.clone(),
				});
			}
		}

		Ok(Self {
			id,
			label: label.into(),
			values,
			slots: Arc::new(slots),
		})
	}

	#[inline]
	pub fn id(&self) -> &DomainId {
		&self.id
	}

	#[inline]
	pub fn label(&self) -> &str {
		&self.label
	}

	/// Returns the declared values in slot order.
	#[inline]
	pub fn values(&self) -> &[DomainValue] {
		&self.values
	}

	/// Resolves a value key to its slot.
	#[inline]
	pub fn slot(&self, key: &str) -> Option<ValueSlot> {
		self.slots.get(key).copied()
	}

	#[inline]
	pub fn value(&self, slot: ValueSlot) -> Option<&DomainValue> {
		self.values.get(slot.index())
	}

	#[inline]
	pub fn contains(&self, key: &str) -> bool {
		self.slots.contains_key(key)
	}

	/// Returns every slot of the domain in declaration order.
	pub fn slots(&self) -> impl ExactSizeIterator<Item = ValueSlot> + '_ {
		(0..self.values.len() as u32).map(ValueSlot::from_u32)
	}

	#[inline]
	pub fn len(&self) -> usize {
		self.values.len()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}
}

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{DomainId, ValueKey};

/// Catalog-unique item identity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
	/// Creates a random (v4) id.
	pub fn new_v4() -> Self {
		Self(Uuid::new_v4())
	}

	pub const fn from_uuid(uuid: Uuid) -> Self {
		Self(uuid)
	}

	pub const fn as_uuid(&self) -> &Uuid {
		&self.0
	}
}

impl fmt::Display for ItemId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(&self.0, f)
	}
}

/// Immutable catalog record: an identity, a display name, and one value per attribute domain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
	id: ItemId,
	name: String,
	attributes: Vec<(DomainId, ValueKey)>,
}

impl Item {
	pub fn new(id: ItemId, name: impl Into<String>) -> Self {
		Self {
			id,
			name: name.into(),
			attributes: Vec::new(),
		}
	}

	/// Attaches a value for `domain`. Validation happens when the catalog is frozen.
	pub fn with(mut self, domain: impl Into<DomainId>, value: impl Into<ValueKey>) -> Self {
		self.attributes.push((domain.into(), value.into()));
		self
	}

	#[inline]
	pub fn id(&self) -> ItemId {
		self.id
	}

	#[inline]
	pub fn name(&self) -> &str {
		&self.name
	}

	#[inline]
	pub fn attributes(&self) -> &[(DomainId, ValueKey)] {
		&self.attributes
	}

	/// Returns the value this item carries for `domain`.
	pub fn value_of(&self, domain: &str) -> Option<&ValueKey> {
		self.attributes.iter().find(|(id, _)| id.as_str() == domain).map(|(_, value)| value)
	}
}

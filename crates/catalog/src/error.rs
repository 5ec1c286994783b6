use crate::{DomainId, ItemId, ValueKey};

/// Precondition violations detected while declaring domains or freezing a catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
	/// Two values of one domain share a key.
	#[error("domain '{domain}' declares value '{value}' twice")]
	DuplicateValue { domain: DomainId, value: ValueKey },

	/// Slots are `u32`; a domain cannot hold more values than that.
	#[error("domain '{domain}' declares {count} values, more than a slot can address")]
	TooManyValues { domain: DomainId, count: usize },

	/// Two schema domains share an id.
	#[error("schema declares domain '{domain}' twice")]
	DuplicateDomain { domain: DomainId },

	/// An item carries no value for a schema domain.
	#[error("item {item} has no value for domain '{domain}'")]
	MissingAttribute { item: ItemId, domain: DomainId },

	/// An item names the same domain more than once.
	#[error("item {item} names domain '{domain}' more than once")]
	DuplicateAttribute { item: ItemId, domain: DomainId },

	/// An item names a domain the schema does not declare.
	#[error("item {item} names undeclared domain '{domain}'")]
	UnknownDomain { item: ItemId, domain: DomainId },

	/// An item names a value its domain does not declare.
	#[error("item {item} has value '{value}' not declared by domain '{domain}'")]
	UnknownValue { item: ItemId, domain: DomainId, value: ValueKey },

	/// Two items share an id.
	#[error("item id {item} appears more than once")]
	DuplicateItem { item: ItemId },

	/// Item positions are `u32`.
	#[error("catalog holds {count} items, more than a position can address")]
	TooManyItems { count: usize },
}

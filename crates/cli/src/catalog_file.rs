//! JSON catalog files.
//!
//! ```json
//! {
//!   "domains": [{ "id": "size", "label": "Size", "values": [{ "key": "small", "label": "Small" }] }],
//!   "items": [{ "name": "Red - Small", "attributes": { "size": "small" } }]
//! }
//! ```
//!
//! Item ids are optional; missing ones are generated.

use std::fmt;
use std::path::Path;

use anyhow::Context;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use tally_catalog::{AttributeDomain, Catalog, DomainValue, Item, ItemId, Schema};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
	domains: Vec<DomainEntry>,
	#[serde(default)]
	items: Vec<ItemEntry>,
}

/// Serialized form of one attribute domain, shared by catalog files and `tally domains`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DomainEntry {
	pub id: String,
	#[serde(default)]
	pub label: Option<String>,
	pub values: Vec<DomainValue>,
}

impl From<&AttributeDomain> for DomainEntry {
	fn from(domain: &AttributeDomain) -> Self {
		Self {
			id: domain.id().to_string(),
			label: Some(domain.label().to_owned()),
			values: domain.values().to_vec(),
		}
	}
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ItemEntry {
	#[serde(default)]
	id: Option<ItemId>,
	name: String,
	/// Kept as written, repeats included, so the catalog can reject them.
	#[serde(deserialize_with = "attribute_pairs")]
	attributes: Vec<(String, String)>,
}

fn attribute_pairs<'de, D>(deserializer: D) -> Result<Vec<(String, String)>, D::Error>
where
	D: Deserializer<'de>,
{
	struct Pairs;

	impl<'de> Visitor<'de> for Pairs {
		type Value = Vec<(String, String)>;

		fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
			f.write_str("a map from domain id to value key")
		}

		fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
			let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
			while let Some(pair) = map.next_entry()? {
				pairs.push(pair);
			}
			Ok(pairs)
		}
	}

	deserializer.deserialize_map(Pairs)
}

/// Parses and validates a catalog document.
pub fn from_json(content: &str) -> anyhow::Result<Catalog> {
	let file: CatalogFile = serde_json::from_str(content).context("malformed catalog document")?;

	let domains = file
		.domains
		.into_iter()
		.map(|entry| {
			let label = entry.label.unwrap_or_else(|| entry.id.clone());
			AttributeDomain::new(entry.id, label, entry.values)
		})
		.collect::<Result<Vec<_>, _>>()?;
	let schema = Schema::new(domains)?;

	let items = file.items.into_iter().map(|entry| {
		let id = entry.id.unwrap_or_else(ItemId::new_v4);
		entry.attributes.into_iter().fold(Item::new(id, entry.name), |item, (domain, value)| item.with(domain, value))
	});
	Ok(Catalog::new(schema, items.collect::<Vec<_>>())?)
}

pub fn load(path: &Path) -> anyhow::Result<Catalog> {
	let content = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
	let catalog = from_json(&content).with_context(|| format!("invalid catalog {}", path.display()))?;
	tracing::info!(path = %path.display(), items = catalog.len(), domains = catalog.schema().len(), "catalog loaded");
	Ok(catalog)
}

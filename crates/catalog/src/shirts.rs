//! Built-in shirt domains: `size` and `color`.

use strum::IntoEnumIterator;

use crate::{AttributeDomain, DomainValue, Item, ItemId, Schema};

pub const SIZE: &str = "size";
pub const COLOR: &str = "color";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, strum::EnumIter, strum::IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Size {
	Small,
	Medium,
	Large,
}

impl Size {
	/// Value key within the `size` domain.
	pub fn key(self) -> &'static str {
		self.into()
	}

	pub fn label(self) -> &'static str {
		match self {
			Size::Small => "Small",
			Size::Medium => "Medium",
			Size::Large => "Large",
		}
	}
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, strum::EnumIter, strum::IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Color {
	Red,
	Blue,
	Yellow,
	White,
	Black,
}

impl Color {
	/// Value key within the `color` domain.
	pub fn key(self) -> &'static str {
		self.into()
	}

	pub fn label(self) -> &'static str {
		match self {
			Color::Red => "Red",
			Color::Blue => "Blue",
			Color::Yellow => "Yellow",
			Color::White => "White",
			Color::Black => "Black",
		}
	}
}

pub fn size_domain() -> AttributeDomain {
	AttributeDomain::new(SIZE, "Size", Size::iter().map(|size| DomainValue::new(size.key(), size.label())))
		.expect("size keys are distinct")
}

pub fn color_domain() -> AttributeDomain {
	AttributeDomain::new(COLOR, "Color", Color::iter().map(|color| DomainValue::new(color.key(), color.label())))
		.expect("color keys are distinct")
}

/// Two-domain schema: `size` then `color`.
pub fn schema() -> Schema {
	Schema::new([size_domain(), color_domain()]).expect("shirt domains are distinct")
}

/// Builds a shirt with a fresh random id.
pub fn shirt(name: impl Into<String>, size: Size, color: Color) -> Item {
	shirt_with_id(ItemId::new_v4(), name, size, color)
}

pub fn shirt_with_id(id: ItemId, name: impl Into<String>, size: Size, color: Color) -> Item {
	Item::new(id, name).with(SIZE, size.key()).with(COLOR, color.key())
}

//! Seeded sample catalogs of shirts, for load tests, benchmarks and demos.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use strum::IntoEnumIterator;

use crate::shirts::{self, Color, Size};
use crate::{Catalog, CatalogError, ItemId};

const DEFAULT_SEED: u64 = 0x7a11_7a11;

/// Builds a catalog of `count` shirts with uniformly drawn sizes and colors.
///
/// The same seed always yields the same catalog, ids included.
#[derive(Debug, Clone)]
pub struct SampleBuilder {
	count: usize,
	seed: u64,
}

impl SampleBuilder {
	pub fn new(count: usize) -> Self {
		Self { count, seed: DEFAULT_SEED }
	}

	pub fn seed(mut self, seed: u64) -> Self {
		self.seed = seed;
		self
	}

	pub fn build(self) -> Result<Catalog, CatalogError> {
		let sizes: Vec<Size> = Size::iter().collect();
		let colors: Vec<Color> = Color::iter().collect();
		let mut rng = StdRng::seed_from_u64(self.seed);

		let items: Vec<_> = (0..self.count)
			.map(|_| {
				let size = sizes[rng.gen_range(0..sizes.len())];
				let color = colors[rng.gen_range(0..colors.len())];
				let id = ItemId::from_uuid(uuid::Builder::from_random_bytes(rng.r#gen()).into_uuid());
				shirts::shirt_with_id(id, format!("{} - {}", color.label(), size.label()), size, color)
			})
			.collect();

		tracing::debug!(count = self.count, seed = self.seed, "sample catalog generated");
		Catalog::new(shirts::schema(), items)
	}
}

//! Item catalogs over closed attribute domains.
//!
//! # Mental Model
//!
//! 1. **Domains:** An [`AttributeDomain`] is a small, closed enumeration of values for one facet
//!    (every size, every color). Values are addressed by [`ValueKey`] and, once declared, by a dense
//!    [`ValueSlot`].
//! 2. **Schema:** A [`Schema`] orders the domains a catalog is faceted on. Nothing assumes a fixed
//!    number of domains.
//! 3. **Items:** An [`Item`] names exactly one value per schema domain.
//! 4. **Catalog:** [`Catalog::new`] validates every item against the schema, resolves each
//!    attribute to its slot and freezes the result. Consumers share it by cheap clone.
//!
//! # Invariants
//!
//! - Value keys are unique within a domain; domain ids are unique within a schema.
//!   - Enforced in: [`AttributeDomain::new`], [`Schema::new`].
//! - Every catalog item has exactly one declared value per schema domain.
//!   - Enforced in: [`Catalog::new`].
//!   - Failure symptom: [`CatalogError`] returned before any index can be built.

mod catalog;
mod domain;
mod error;
mod item;
pub mod sample;
mod schema;
pub mod shirts;

pub use catalog::Catalog;
pub use domain::{AttributeDomain, DomainId, DomainValue, ValueKey, ValueSlot};
pub use error::CatalogError;
pub use item::{Item, ItemId};
pub use sample::SampleBuilder;
pub use schema::Schema;

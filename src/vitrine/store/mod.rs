//! # Catalog Layer
//!
//! This module defines the catalog abstraction for vitrine. The
//! [`CatalogSource`] trait is the seam between the filtering engine and
//! whatever delivers the item snapshot.
//!
//! ## Design Rationale
//!
//! The catalog is abstracted behind a trait to:
//! - Enable **testing** with `InMemoryCatalog` (no filesystem needed)
//! - Allow **future sources** (HTTP fetch, embedded data) without changing
//!   the engine
//! - Keep the filtering core **decoupled** from where the snapshot comes from
//!
//! ## Implementations
//!
//! - [`fs::JsonCatalog`]: reads a JSON array of items from a file. This is
//!   what the CLI uses.
//! - [`memory::InMemoryCatalog`]: holds items directly, for tests and
//!   embedding.
//!
//! The engine always operates on the **full snapshot**; scoping and
//! filtering happen downstream, never at the source.

use crate::error::Result;
use crate::model::Item;

pub mod fs;
pub mod memory;

/// Abstract interface for the catalog collaborator.
///
/// Implementations return the complete item set; the engine filters it
/// in memory.
pub trait CatalogSource {
    /// Fetch the full item snapshot.
    fn items(&self) -> Result<Vec<Item>>;
}

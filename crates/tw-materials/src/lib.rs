//! tw-materials: thermal material properties for thermowall.
//!
//! Provides:
//! - `MaterialProperties` (conductivity, density, specific heat)
//! - `MaterialCatalog` trait, the read-only lookup used by the discretizer
//! - `InMemoryCatalog` for caller-assembled catalogs
//! - A built-in catalog of common envelope materials
//!
//! # Example
//!
//! ```
//! use tw_materials::{MaterialCatalog, standard_catalog};
//!
//! let catalog = standard_catalog();
//! let concrete = catalog.get_material("concrete").unwrap();
//! assert!(concrete.conductivity() > 1.0);
//! ```

pub mod catalog;
pub mod error;
pub mod properties;
pub mod standard;

pub use catalog::{InMemoryCatalog, MaterialCatalog};
pub use error::{MaterialError, MaterialResult};
pub use properties::MaterialProperties;
pub use standard::{
    MaterialCatalogEntry, filter_standard_materials, standard_catalog, standard_materials,
};

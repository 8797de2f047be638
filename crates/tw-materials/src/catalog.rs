//! Read-only material lookup.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{MaterialError, MaterialResult};
use crate::properties::MaterialProperties;

/// Maps a material identifier to its thermal properties.
///
/// Implementations are populated before any simulation starts and are only
/// read afterwards, so a single catalog can be shared by concurrent runs.
pub trait MaterialCatalog: Send + Sync {
    /// Look up a material by id, failing with [`MaterialError::NotFound`].
    fn get_material(&self, id: &str) -> MaterialResult<MaterialProperties>;

    /// Whether the catalog knows `id`.
    fn contains(&self, id: &str) -> bool {
        self.get_material(id).is_ok()
    }
}

impl<C: MaterialCatalog + ?Sized> MaterialCatalog for &C {
    fn get_material(&self, id: &str) -> MaterialResult<MaterialProperties> {
        (**self).get_material(id)
    }
}

impl<C: MaterialCatalog + ?Sized> MaterialCatalog for Arc<C> {
    fn get_material(&self, id: &str) -> MaterialResult<MaterialProperties> {
        (**self).get_material(id)
    }
}

/// Catalog backed by an ordered map.
///
/// Lookups try the id verbatim first, then a trimmed lowercase form, so
/// `"Concrete"` resolves to an entry registered as `"concrete"`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemoryCatalog {
    entries: BTreeMap<String, MaterialProperties>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry. Returns the previous properties, if any.
    pub fn insert(
        &mut self,
        id: impl Into<String>,
        properties: MaterialProperties,
    ) -> MaterialResult<Option<MaterialProperties>> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(MaterialError::InvalidArg {
                what: "material id must not be empty",
            });
        }
        Ok(self.entries.insert(id, properties))
    }

    /// Insert from the built-in table, whose ids are never blank.
    pub(crate) fn insert_builtin(&mut self, id: &'static str, properties: MaterialProperties) {
        self.entries.insert(id.to_string(), properties);
    }

    /// Builder-style insert from raw SI values.
    pub fn with_material(
        mut self,
        id: impl Into<String>,
        conductivity: f64,
        density: f64,
        specific_heat: f64,
    ) -> MaterialResult<Self> {
        let properties = MaterialProperties::new(conductivity, density, specific_heat)?;
        self.insert(id, properties)?;
        Ok(self)
    }

    /// Copy every entry of `other` into `self`, overriding duplicates.
    pub fn extend_from(&mut self, other: &InMemoryCatalog) {
        for (id, props) in &other.entries {
            self.entries.insert(id.clone(), *props);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MaterialProperties)> {
        self.entries.iter().map(|(id, p)| (id.as_str(), p))
    }
}

impl MaterialCatalog for InMemoryCatalog {
    fn get_material(&self, id: &str) -> MaterialResult<MaterialProperties> {
        if let Some(props) = self.entries.get(id) {
            return Ok(*props);
        }
        let normalized = id.trim().to_ascii_lowercase();
        self.entries
            .get(&normalized)
            .copied()
            .ok_or_else(|| MaterialError::NotFound { id: id.to_string() })
    }
}

//! Built-in catalog of common envelope materials.

use crate::catalog::InMemoryCatalog;
use crate::properties::MaterialProperties;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialCatalogEntry {
    pub canonical_id: &'static str,
    pub display_name: &'static str,
    pub aliases: &'static [&'static str],
    /// W/(m·K)
    pub conductivity: f64,
    /// kg/m³
    pub density: f64,
    /// J/(kg·K)
    pub specific_heat: f64,
}

impl MaterialCatalogEntry {
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_ascii_lowercase();
        if query.is_empty() {
            return true;
        }

        self.canonical_id.to_ascii_lowercase().contains(&query)
            || self.display_name.to_ascii_lowercase().contains(&query)
            || self
                .aliases
                .iter()
                .any(|alias| alias.to_ascii_lowercase().contains(&query))
    }

    pub fn properties(&self) -> MaterialProperties {
        MaterialProperties::from_table(self.conductivity, self.density, self.specific_heat)
    }
}

const STANDARD_MATERIALS: [MaterialCatalogEntry; 10] = [
    MaterialCatalogEntry {
        canonical_id: "concrete",
        display_name: "Concrete",
        aliases: &["hormigon", "concreto"],
        conductivity: 1.75,
        density: 2400.0,
        specific_heat: 840.0,
    },
    MaterialCatalogEntry {
        canonical_id: "eps",
        display_name: "Expanded polystyrene",
        aliases: &["polystyrene", "insulation", "poliestireno"],
        conductivity: 0.04,
        density: 20.0,
        specific_heat: 1400.0,
    },
    MaterialCatalogEntry {
        canonical_id: "brick",
        display_name: "Fired clay brick",
        aliases: &["ladrillo", "clay brick"],
        conductivity: 0.72,
        density: 1920.0,
        specific_heat: 835.0,
    },
    MaterialCatalogEntry {
        canonical_id: "adobe",
        display_name: "Adobe",
        aliases: &["mud brick"],
        conductivity: 0.58,
        density: 1500.0,
        specific_heat: 1480.0,
    },
    MaterialCatalogEntry {
        canonical_id: "mortar",
        display_name: "Cement mortar",
        aliases: &["mortero", "plaster"],
        conductivity: 0.72,
        density: 1860.0,
        specific_heat: 780.0,
    },
    MaterialCatalogEntry {
        canonical_id: "gypsum",
        display_name: "Gypsum board",
        aliases: &["drywall", "yeso"],
        conductivity: 0.16,
        density: 800.0,
        specific_heat: 1090.0,
    },
    MaterialCatalogEntry {
        canonical_id: "wood",
        display_name: "Softwood",
        aliases: &["madera", "timber"],
        conductivity: 0.13,
        density: 500.0,
        specific_heat: 1600.0,
    },
    MaterialCatalogEntry {
        canonical_id: "steel",
        display_name: "Carbon steel",
        aliases: &["acero"],
        conductivity: 45.0,
        density: 7800.0,
        specific_heat: 500.0,
    },
    MaterialCatalogEntry {
        canonical_id: "mineral_wool",
        display_name: "Mineral wool",
        aliases: &["rock wool", "glass wool"],
        conductivity: 0.035,
        density: 40.0,
        specific_heat: 840.0,
    },
    MaterialCatalogEntry {
        canonical_id: "bitumen",
        display_name: "Bituminous membrane",
        aliases: &["impermeabilizante", "membrane"],
        conductivity: 0.17,
        density: 1050.0,
        specific_heat: 1000.0,
    },
];

pub fn standard_materials() -> &'static [MaterialCatalogEntry] {
    &STANDARD_MATERIALS
}

pub fn filter_standard_materials(query: &str) -> Vec<MaterialCatalogEntry> {
    standard_materials()
        .iter()
        .copied()
        .filter(|entry| entry.matches_query(query))
        .collect()
}

/// Catalog holding every standard material under its canonical id and aliases.
pub fn standard_catalog() -> InMemoryCatalog {
    let mut catalog = InMemoryCatalog::new();
    for entry in standard_materials() {
        let props = entry.properties();
        for id in std::iter::once(&entry.canonical_id).chain(entry.aliases.iter()) {
            catalog.insert_builtin(*id, props);
        }
    }
    catalog
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MaterialCatalog;
    use std::collections::HashSet;

    #[test]
    fn table_ids_are_not_blank() {
        for entry in standard_materials() {
            assert!(!entry.canonical_id.trim().is_empty());
            assert!(entry.aliases.iter().all(|a| !a.trim().is_empty()));
        }
    }

    #[test]
    fn canonical_ids_are_unique() {
        let mut seen = HashSet::new();
        for entry in standard_materials() {
            assert!(
                seen.insert(entry.canonical_id),
                "duplicate canonical id: {}",
                entry.canonical_id
            );
        }
    }

    #[test]
    fn every_entry_is_physical() {
        for entry in standard_materials() {
            assert!(
                MaterialProperties::new(entry.conductivity, entry.density, entry.specific_heat)
                    .is_ok(),
                "{} has non-physical properties",
                entry.canonical_id
            );
        }
    }

    #[test]
    fn aliases_resolve_to_canonical_properties() {
        let catalog = standard_catalog();
        let by_alias = catalog.get_material("polystyrene").unwrap();
        let by_id = catalog.get_material("eps").unwrap();
        assert_eq!(by_alias, by_id);
        assert_eq!(by_id.conductivity(), 0.04);
    }

    #[test]
    fn search_finds_insulation() {
        let results = filter_standard_materials("wool");
        assert!(results.iter().any(|e| e.canonical_id == "mineral_wool"));
        assert_eq!(filter_standard_materials("").len(), standard_materials().len());
    }
}

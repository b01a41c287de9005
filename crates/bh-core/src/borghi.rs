//! Static borgo and POI index.
//!
//! The directory front-end ships with a fixed set of villages; this
//! module is the seed data plus the coordinate lookup used by the
//! itinerary proximity query. `BorgoIndex` is injectable so tests can
//! control coordinates.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::geo::Coord;

/// A named Italian village, the primary geographic anchor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Borgo {
    pub slug: String,
    pub name: String,
    pub province: String,
    pub coord: Coord,
}

/// A point of interest associated with a borgo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Poi {
    pub id: String,
    pub borgo_slug: String,
    pub name: String,
    pub category: String,
}

/// Canonical slug form: trimmed and lowercased. Applied on every write
/// of `main_borgo_slug` and on every slug-keyed lookup.
pub fn normalize_slug(raw: &str) -> String {
    raw.trim().to_lowercase()
}

macro_rules! borgo {
    ($slug:expr, $name:expr, $prov:expr, $lat:expr, $lng:expr) => {
        Borgo {
            slug: $slug.to_string(),
            name: $name.to_string(),
            province: $prov.to_string(),
            coord: Coord { lat: $lat, lng: $lng },
        }
    };
}

static BORGHI: Lazy<Vec<Borgo>> = Lazy::new(|| {
    vec![
        borgo!("viggiano", "Viggiano", "PZ", 40.3406, 15.9028),
        borgo!("castelmezzano", "Castelmezzano", "PZ", 40.5300, 16.0467),
        borgo!("pietrapertosa", "Pietrapertosa", "PZ", 40.5486, 16.0622),
        borgo!("guardia-perticara", "Guardia Perticara", "PZ", 40.3633, 16.0992),
        borgo!("sasso-di-castalda", "Sasso di Castalda", "PZ", 40.4861, 15.6761),
        borgo!("venosa", "Venosa", "PZ", 40.9617, 15.8183),
        borgo!("craco", "Craco", "MT", 40.3781, 16.4400),
        borgo!("irsina", "Irsina", "MT", 40.7394, 16.2394),
        borgo!("valsinni", "Valsinni", "MT", 40.1681, 16.4428),
        borgo!("aliano", "Aliano", "MT", 40.3128, 16.2286),
    ]
});

static POI: Lazy<Vec<Poi>> = Lazy::new(|| {
    fn poi(id: &str, borgo: &str, name: &str, category: &str) -> Poi {
        Poi {
            id: id.to_string(),
            borgo_slug: borgo.to_string(),
            name: name.to_string(),
            category: category.to_string(),
        }
    }
    vec![
        poi("poi-volo-angelo", "castelmezzano", "Volo dell'Angelo", "esperienze"),
        poi("poi-dolomiti-trek", "pietrapertosa", "Sentiero delle Sette Pietre", "natura"),
        poi("poi-sacro-monte", "viggiano", "Santuario della Madonna Nera", "cultura"),
        poi("poi-ponte-nepal", "sasso-di-castalda", "Ponte alla Luna", "esperienze"),
        poi("poi-craco-ghost", "craco", "Parco Museale Scenografico", "cultura"),
        poi("poi-incompiuta", "venosa", "Chiesa dell'Incompiuta", "cultura"),
        poi("poi-isabella", "valsinni", "Castello di Isabella Morra", "cultura"),
        poi("poi-calanchi", "aliano", "Calanchi di Aliano", "natura"),
    ]
});

/// The seeded borgo directory.
pub fn all_borghi() -> &'static [Borgo] {
    &BORGHI
}

/// Seeded POIs for a borgo.
pub fn poi_for(slug: &str) -> Vec<Poi> {
    let slug = normalize_slug(slug);
    POI.iter().filter(|p| p.borgo_slug == slug).cloned().collect()
}

pub fn find_borgo(slug: &str) -> Option<&'static Borgo> {
    let slug = normalize_slug(slug);
    BORGHI.iter().find(|b| b.slug == slug)
}

/// Slug → coordinate lookup backing the proximity query.
#[derive(Debug, Clone)]
pub struct BorgoIndex {
    coords: HashMap<String, Coord>,
}

impl BorgoIndex {
    /// Index over the seeded directory.
    pub fn from_seed() -> Self {
        Self::from_entries(BORGHI.iter().map(|b| (b.slug.clone(), b.coord)))
    }

    /// Index over arbitrary entries; slugs are normalized on the way in.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, Coord)>) -> Self {
        let coords = entries
            .into_iter()
            .map(|(slug, coord)| (normalize_slug(&slug), coord))
            .collect();
        Self { coords }
    }

    pub fn coords(&self, slug: &str) -> Option<Coord> {
        self.coords.get(&normalize_slug(slug)).copied()
    }
}

impl Default for BorgoIndex {
    fn default() -> Self {
        Self::from_seed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_slug(" Viggiano "), "viggiano");
    }

    #[test]
    fn seed_index_resolves_known_slug() {
        let index = BorgoIndex::from_seed();
        assert!(index.coords("castelmezzano").is_some());
        assert!(index.coords(" CASTELMEZZANO ").is_some());
        assert!(index.coords("atlantide").is_none());
    }

    #[test]
    fn poi_lookup_is_borgo_scoped() {
        let poi = poi_for("craco");
        assert_eq!(poi.len(), 1);
        assert_eq!(poi[0].id, "poi-craco-ghost");
    }
}

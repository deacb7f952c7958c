//! Fishing spot catalog for the waters around Chatham
//!
//! Append-only reference data: loaded once at startup and injected into the
//! forecast service, never mutated at runtime.

use serde::{Deserialize, Serialize};

/// Kilometers per nautical mile
const KM_PER_NM: f64 = 1.852;

/// Spot category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpotCategory {
    /// Open-water grounds east and south of the harbor
    Offshore,
    /// Rips, shoals, and harbor structure
    Inshore,
}

/// A named fishing location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FishingSpot {
    /// Spot name, unique within its catalog
    pub name: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// One-way distance from the harbor in nautical miles
    pub distance_nm: f64,
    /// Offshore or inshore
    pub category: SpotCategory,
    /// Local knowledge
    pub notes: String,
    /// Months (1-12) the spot typically holds fish, when known
    pub active_months: Option<Vec<u32>>,
}

impl FishingSpot {
    /// Great-circle distance from an arbitrary origin, in nautical miles
    #[must_use]
    pub fn distance_nm_from(&self, latitude: f64, longitude: f64) -> f64 {
        let km = haversine::distance(
            haversine::Location {
                latitude,
                longitude,
            },
            haversine::Location {
                latitude: self.latitude,
                longitude: self.longitude,
            },
            haversine::Units::Kilometers,
        );
        km / KM_PER_NM
    }

    /// Whether the spot is known to hold fish in the given month.
    ///
    /// Spots without month data are considered active year-round.
    #[must_use]
    pub fn active_in(&self, month: u32) -> bool {
        self.active_months
            .as_ref()
            .is_none_or(|months| months.contains(&month))
    }
}

/// The static offshore and inshore spot lists
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotCatalog {
    offshore: Vec<FishingSpot>,
    inshore: Vec<FishingSpot>,
}

impl SpotCatalog {
    /// The built-in Chatham spot catalog
    #[must_use]
    pub fn builtin() -> Self {
        let spot = |name: &str,
                    latitude: f64,
                    longitude: f64,
                    distance_nm: f64,
                    category: SpotCategory,
                    notes: &str,
                    active_months: Option<Vec<u32>>| FishingSpot {
            name: name.to_string(),
            latitude,
            longitude,
            distance_nm,
            category,
            notes: notes.to_string(),
            active_months,
        };

        let offshore = vec![
            spot(
                "Crab Ledge",
                41.72,
                -69.6,
                15.0,
                SpotCategory::Offshore,
                "Closest tuna spot. Expansive area off Orleans/Chatham. Holds tons of bait. Great early season.",
                Some(vec![5, 6, 7, 8, 9]),
            ),
            spot(
                "BC Buoy",
                41.58,
                -69.35,
                25.0,
                SpotCategory::Offshore,
                "Shipping lanes area. Big area to cover.",
                Some(vec![6, 7, 8, 9, 10]),
            ),
            spot(
                "Regal Sword",
                41.47,
                -69.34,
                35.0,
                SpotCategory::Offshore,
                "Multiple wrecks, varied depths (210-230ft). Holds bait all season. Strong currents. Also great for cod.",
                Some(vec![7, 8, 9, 10, 11]),
            ),
            spot(
                "BB Buoy",
                41.26,
                -69.29,
                40.0,
                SpotCategory::Offshore,
                "Furthest south. Under-fished. Deep water (~200ft). Often where fish show after leaving south of MV.",
                Some(vec![6, 7, 8, 9]),
            ),
            spot(
                "Nauset / Outer Beach",
                41.78,
                -69.9,
                8.0,
                SpotCategory::Offshore,
                "Run north up the beach from Chatham. Good for smaller boats.",
                Some(vec![6, 7, 8, 9]),
            ),
            spot(
                "Shipping Lanes",
                41.55,
                -69.45,
                25.0,
                SpotCategory::Offshore,
                "Broad area between spots. Tuna transit through here.",
                Some(vec![7, 8, 9, 10]),
            ),
        ];

        let inshore = vec![
            spot(
                "Bearse Shoals",
                41.605,
                -69.96,
                2.0,
                SpotCategory::Inshore,
                "First rips south of Chatham. Good on incoming tide.",
                None,
            ),
            spot(
                "Stonehorse Shoals",
                41.58,
                -69.95,
                4.0,
                SpotCategory::Inshore,
                "Middle shoals. Miles of rips.",
                None,
            ),
            spot(
                "Handkerchief Shoal",
                41.55,
                -70.0,
                6.0,
                SpotCategory::Inshore,
                "Southern shoals. Steep drop-offs. Dangerous in rough weather.",
                None,
            ),
            spot(
                "Monomoy Point",
                41.56,
                -69.93,
                5.0,
                SpotCategory::Inshore,
                "Tip of the island. Extremely strong currents. Expert area.",
                None,
            ),
            spot(
                "Chatham Harbor Mouth",
                41.67,
                -69.95,
                1.0,
                SpotCategory::Inshore,
                "Good on outgoing tide. Strong currents.",
                None,
            ),
            spot(
                "South Beach (inside)",
                41.65,
                -69.95,
                1.5,
                SpotCategory::Inshore,
                "Flats fishing. Fly fishing for stripers on incoming tide.",
                None,
            ),
            spot(
                "Stage Harbor",
                41.66,
                -69.97,
                0.5,
                SpotCategory::Inshore,
                "Protected. Good for smaller boats.",
                None,
            ),
        ];

        Self { offshore, inshore }
    }

    /// The offshore grounds
    #[must_use]
    pub fn offshore(&self) -> &[FishingSpot] {
        &self.offshore
    }

    /// The inshore rips and structure
    #[must_use]
    pub fn inshore(&self) -> &[FishingSpot] {
        &self.inshore
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_shape() {
        let catalog = SpotCatalog::builtin();
        assert_eq!(catalog.offshore().len(), 6);
        assert_eq!(catalog.inshore().len(), 7);
        assert!(catalog
            .offshore()
            .iter()
            .all(|s| s.category == SpotCategory::Offshore));
        assert!(catalog
            .inshore()
            .iter()
            .all(|s| s.category == SpotCategory::Inshore));
    }

    #[test]
    fn test_names_unique_within_catalog() {
        let catalog = SpotCatalog::builtin();
        for spots in [catalog.offshore(), catalog.inshore()] {
            let mut names: Vec<&str> = spots.iter().map(|s| s.name.as_str()).collect();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), spots.len());
        }
    }

    #[test]
    fn test_distances_non_negative() {
        let catalog = SpotCatalog::builtin();
        for spot in catalog.offshore().iter().chain(catalog.inshore()) {
            assert!(spot.distance_nm >= 0.0);
        }
    }

    #[test]
    fn test_haversine_roughly_matches_catalog_distance() {
        let catalog = SpotCatalog::builtin();
        let crab_ledge = &catalog.offshore()[0];
        // From the harbor the great-circle distance should be in the same
        // ballpark as the charted run distance
        let computed = crab_ledge.distance_nm_from(41.6823, -69.9597);
        assert!((computed - crab_ledge.distance_nm).abs() < 5.0);
    }

    #[test]
    fn test_active_in_respects_month_data() {
        let catalog = SpotCatalog::builtin();
        let crab_ledge = &catalog.offshore()[0];
        assert!(crab_ledge.active_in(6));
        assert!(!crab_ledge.active_in(1));

        // Inshore spots carry no month data and count as year-round
        assert!(catalog.inshore().iter().all(|s| s.active_in(1)));
    }
}

//! Monthly seasonal reference table for the Chatham fishery
//!
//! Append-only reference data: loaded once at startup and injected into the
//! forecast service, never mutated at runtime.

use crate::models::FishingMode;
use serde::{Deserialize, Serialize};

/// Seasonal suitability for one calendar month
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonEntry {
    /// Calendar month, 1-12
    pub month: u32,
    /// Offshore suitability in [0,1]
    pub offshore_score: f64,
    /// Offshore season summary
    pub offshore_status: String,
    /// Offshore spots holding fish this month
    pub offshore_spots: Vec<String>,
    /// Inshore suitability in [0,1]
    pub inshore_score: f64,
    /// Inshore season summary
    pub inshore_status: String,
    /// Inshore species around this month
    pub inshore_species: Vec<String>,
}

impl SeasonEntry {
    /// Seasonal suitability for a mode
    #[must_use]
    pub fn score_for(&self, mode: FishingMode) -> f64 {
        match mode {
            FishingMode::Offshore => self.offshore_score,
            FishingMode::Inshore => self.inshore_score,
        }
    }

    /// Season summary for a mode
    #[must_use]
    pub fn status_for(&self, mode: FishingMode) -> &str {
        match mode {
            FishingMode::Offshore => &self.offshore_status,
            FishingMode::Inshore => &self.inshore_status,
        }
    }
}

/// The twelve-month seasonal table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalTable {
    entries: Vec<SeasonEntry>,
}

impl SeasonalTable {
    /// The built-in Chatham seasonal calendar
    #[must_use]
    pub fn builtin() -> Self {
        let entry = |month: u32,
                     offshore_score: f64,
                     offshore_status: &str,
                     offshore_spots: &[&str],
                     inshore_score: f64,
                     inshore_status: &str,
                     inshore_species: &[&str]| SeasonEntry {
            month,
            offshore_score,
            offshore_status: offshore_status.to_string(),
            offshore_spots: offshore_spots.iter().map(|s| (*s).to_string()).collect(),
            inshore_score,
            inshore_status: inshore_status.to_string(),
            inshore_species: inshore_species.iter().map(|s| (*s).to_string()).collect(),
        };

        let off_season = "Off season. No tuna until late May.";
        Self {
            entries: vec![
                entry(1, 0.0, off_season, &[], 0.0, "Off season.", &[]),
                entry(2, 0.0, off_season, &[], 0.0, "Off season.", &[]),
                entry(3, 0.0, off_season, &[], 0.0, "Off season.", &[]),
                entry(
                    4,
                    0.0,
                    "Off season. First tuna may show in 4-6 weeks.",
                    &[],
                    0.1,
                    "Pre-season. A few early schoolies possible.",
                    &[],
                ),
                entry(
                    5,
                    0.3,
                    "Early season. First bluefin arriving. Fish are thin, feeding aggressively on herring/mackerel/sand eels.",
                    &["Crab Ledge", "BC Buoy"],
                    0.5,
                    "Stripers arriving. Schoolies first, then keepers. Sand eels and herring as bait.",
                    &["Striped bass"],
                ),
                entry(
                    6,
                    0.7,
                    "Strong early season. Schools of bluefin east of Chatham. Great jigging/popping bite.",
                    &["Crab Ledge", "BC Buoy", "Nauset / Outer Beach"],
                    0.8,
                    "Peak rip fishing. Squid run. Blues arriving. Massive bait concentrations on the shoals.",
                    &["Striped bass", "Bluefish", "Sea bass"],
                ),
                entry(
                    7,
                    0.8,
                    "Peak early season. Fish also showing south of Martha's Vineyard.",
                    &["Crab Ledge", "BC Buoy", "Regal Sword", "BB Buoy"],
                    0.9,
                    "Bonito and false albacore arriving. Fluke on the shoals. Best variety.",
                    &[
                        "Striped bass",
                        "Bluefish",
                        "Bonito",
                        "False albacore",
                        "Fluke",
                        "Scup",
                        "Sea bass",
                    ],
                ),
                entry(
                    8,
                    0.85,
                    "Good consistent fishing. Variety of sizes. Trolling, jigging, live bait all working.",
                    &[
                        "Crab Ledge",
                        "BC Buoy",
                        "Regal Sword",
                        "BB Buoy",
                        "Shipping Lanes",
                    ],
                    0.85,
                    "Great variety continues. Peak bonito and albie season.",
                    &[
                        "Striped bass",
                        "Bluefish",
                        "Bonito",
                        "False albacore",
                        "Fluke",
                        "Scup",
                        "Sea bass",
                    ],
                ),
                entry(
                    9,
                    1.0,
                    "BEST MONTH. Fall run begins. Multiple size classes feeding aggressively. Giants come through. Can be incredible.",
                    &[
                        "Regal Sword",
                        "Crab Ledge",
                        "Shipping Lanes",
                        "BC Buoy",
                        "BB Buoy",
                    ],
                    0.9,
                    "Fall run. Big stripers moving south. Blues aggressive.",
                    &["Striped bass (large)", "Bluefish"],
                ),
                entry(
                    10,
                    0.8,
                    "Late season. Largest fish migrating through. Weather windows critical - big fish but rough seas.",
                    &["Regal Sword", "Shipping Lanes"],
                    0.7,
                    "Fall run continues. Big stripers still moving.",
                    &["Striped bass (large)", "Bluefish"],
                ),
                entry(
                    11,
                    0.4,
                    "Very late season. Biggest fish but tough weather. Trolling natural baits, chunking.",
                    &["Regal Sword", "Shipping Lanes"],
                    0.3,
                    "Late season. Fish moving out.",
                    &["Striped bass (dwindling)"],
                ),
                entry(
                    12,
                    0.1,
                    "Rare but possible. Season effectively over.",
                    &[],
                    0.0,
                    "Off season.",
                    &[],
                ),
            ],
        }
    }

    /// Look up the entry for a calendar month (1-12), falling back to
    /// January for out-of-range input
    #[must_use]
    pub fn entry(&self, month: u32) -> &SeasonEntry {
        self.entries
            .iter()
            .find(|e| e.month == month)
            .unwrap_or(&self.entries[0])
    }

    /// All entries in month order
    #[must_use]
    pub fn entries(&self) -> &[SeasonEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twelve_months_in_order() {
        let table = SeasonalTable::builtin();
        assert_eq!(table.entries().len(), 12);
        for (i, entry) in table.entries().iter().enumerate() {
            assert_eq!(entry.month, i as u32 + 1);
        }
    }

    #[test]
    fn test_scores_in_unit_interval() {
        for entry in SeasonalTable::builtin().entries() {
            assert!((0.0..=1.0).contains(&entry.offshore_score));
            assert!((0.0..=1.0).contains(&entry.inshore_score));
        }
    }

    #[test]
    fn test_september_is_peak_offshore() {
        let table = SeasonalTable::builtin();
        let september = table.entry(9);
        assert_eq!(september.offshore_score, 1.0);
        assert!(september.offshore_status.contains("BEST MONTH"));
        assert!(!september.offshore_spots.is_empty());
    }

    #[test]
    fn test_winter_is_off_season() {
        let table = SeasonalTable::builtin();
        let january = table.entry(1);
        assert_eq!(january.score_for(crate::models::FishingMode::Offshore), 0.0);
        assert_eq!(january.score_for(crate::models::FishingMode::Inshore), 0.0);
        assert!(january.offshore_spots.is_empty());
    }

    #[test]
    fn test_out_of_range_month_falls_back() {
        let table = SeasonalTable::builtin();
        assert_eq!(table.entry(13).month, 1);
        assert_eq!(table.entry(0).month, 1);
    }

    #[test]
    fn test_mode_accessors() {
        let table = SeasonalTable::builtin();
        let june = table.entry(6);
        assert_eq!(june.score_for(FishingMode::Offshore), 0.7);
        assert_eq!(june.score_for(FishingMode::Inshore), 0.8);
        assert!(june.status_for(FishingMode::Inshore).contains("rip"));
    }
}

//! Water-balance classification
//!
//! Maps the derived water balance into ordinal stress and wastage bands,
//! and the raw inputs into a uniformity flag. The bands are spelled out as
//! ordered half-open interval tables so every boundary tie-break is a
//! visible table entry rather than an if-chain artifact.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Crop water-deficit severity, ordered by increasing deficit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StressLevel {
    #[serde(rename = "No Stress")]
    NoStress,
    #[serde(rename = "Mild Stress")]
    Mild,
    #[serde(rename = "Moderate Stress")]
    Moderate,
    #[serde(rename = "Severe Stress")]
    Severe,
}

impl StressLevel {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            StressLevel::NoStress => "No Stress",
            StressLevel::Mild => "Mild Stress",
            StressLevel::Moderate => "Moderate Stress",
            StressLevel::Severe => "Severe Stress",
        }
    }
}

impl fmt::Display for StressLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Water-surplus severity, ordered by increasing surplus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WastageLevel {
    #[serde(rename = "No Wastage")]
    None,
    #[serde(rename = "Low Wastage")]
    Low,
    #[serde(rename = "Medium Wastage")]
    Medium,
    #[serde(rename = "High Wastage")]
    High,
}

impl WastageLevel {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            WastageLevel::None => "No Wastage",
            WastageLevel::Low => "Low Wastage",
            WastageLevel::Medium => "Medium Wastage",
            WastageLevel::High => "High Wastage",
        }
    }
}

impl fmt::Display for WastageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Irrigation uniformity flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IrrigationType {
    #[serde(rename = "Uniform Irrigation")]
    Uniform,
    #[serde(rename = "Non-Uniform Irrigation")]
    NonUniform,
}

impl IrrigationType {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            IrrigationType::Uniform => "Uniform Irrigation",
            IrrigationType::NonUniform => "Non-Uniform Irrigation",
        }
    }
}

impl fmt::Display for IrrigationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Stress bands over the balance, walked in order. Each band covers
/// `[lower, upper)` (lower inclusive), so ties at 0 / -3 / -6 land in the
/// less-severe band.
const STRESS_BANDS: [(f64, f64, StressLevel); 4] = [
    (0.0, f64::INFINITY, StressLevel::NoStress),
    (-3.0, 0.0, StressLevel::Mild),
    (-6.0, -3.0, StressLevel::Moderate),
    (f64::NEG_INFINITY, -6.0, StressLevel::Severe),
];

/// Wastage bands over the balance, walked in order. Each band covers
/// `(lower, upper]` (upper inclusive), so ties at 0 / 3 / 6 land in the
/// lower band.
const WASTAGE_BANDS: [(f64, f64, WastageLevel); 4] = [
    (f64::NEG_INFINITY, 0.0, WastageLevel::None),
    (0.0, 3.0, WastageLevel::Low),
    (3.0, 6.0, WastageLevel::Medium),
    (6.0, f64::INFINITY, WastageLevel::High),
];

/// Classify the water balance into a stress band.
///
/// Total over the reals: the bands partition the line with no gaps or
/// overlaps. An unbounded upper edge admits the boundary itself.
pub fn classify_stress(balance: f64) -> StressLevel {
    for &(lower, upper, level) in &STRESS_BANDS {
        if balance >= lower && (upper.is_infinite() || balance < upper) {
            return level;
        }
    }
    // Only reachable for NaN, which the boundary layer rejects.
    StressLevel::Severe
}

/// Classify the water balance into a wastage band.
pub fn classify_wastage(balance: f64) -> WastageLevel {
    for &(lower, upper, level) in &WASTAGE_BANDS {
        if balance <= upper && (lower.is_infinite() || balance > lower) {
            return level;
        }
    }
    WastageLevel::High
}

/// Classify irrigation uniformity.
///
/// Uniform iff the irrigation amount exactly equals the crop requirement
/// and rainfall is exactly zero. Exact equality on real-valued inputs is
/// intentional; this check is not tolerance-based.
pub fn classify_irrigation_type(irrigation: f64, crop_need: f64, rainfall: f64) -> IrrigationType {
    if irrigation == crop_need && rainfall == 0.0 {
        IrrigationType::Uniform
    } else {
        IrrigationType::NonUniform
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stress_bands_cover_interior_points() {
        assert_eq!(classify_stress(5.0), StressLevel::NoStress);
        assert_eq!(classify_stress(-1.5), StressLevel::Mild);
        assert_eq!(classify_stress(-4.5), StressLevel::Moderate);
        assert_eq!(classify_stress(-9.0), StressLevel::Severe);
        assert_eq!(classify_stress(-6.01), StressLevel::Severe);
    }

    #[test]
    fn stress_ties_resolve_to_less_severe_band() {
        assert_eq!(classify_stress(0.0), StressLevel::NoStress);
        assert_eq!(classify_stress(-3.0), StressLevel::Mild);
        assert_eq!(classify_stress(-6.0), StressLevel::Moderate);
    }

    #[test]
    fn wastage_bands_cover_interior_points() {
        assert_eq!(classify_wastage(-2.0), WastageLevel::None);
        assert_eq!(classify_wastage(1.5), WastageLevel::Low);
        assert_eq!(classify_wastage(4.5), WastageLevel::Medium);
        assert_eq!(classify_wastage(6.01), WastageLevel::High);
        assert_eq!(classify_wastage(25.0), WastageLevel::High);
    }

    #[test]
    fn wastage_ties_resolve_to_lower_band() {
        assert_eq!(classify_wastage(0.0), WastageLevel::None);
        assert_eq!(classify_wastage(3.0), WastageLevel::Low);
        assert_eq!(classify_wastage(6.0), WastageLevel::Medium);
    }

    #[test]
    fn every_balance_gets_exactly_one_band_of_each_kind() {
        // Sweep across all band edges; the tables must partition the line.
        let mut balance = -10.0;
        while balance <= 10.0 {
            let stress_hits = STRESS_BANDS
                .iter()
                .filter(|&&(lo, hi, _)| balance >= lo && (hi.is_infinite() || balance < hi))
                .count();
            let wastage_hits = WASTAGE_BANDS
                .iter()
                .filter(|&&(lo, hi, _)| balance <= hi && (lo.is_infinite() || balance > lo))
                .count();
            assert_eq!(stress_hits, 1, "balance {balance}");
            assert_eq!(wastage_hits, 1, "balance {balance}");
            balance += 0.25;
        }
    }

    #[test]
    fn uniformity_requires_exact_match_and_dry_weather() {
        assert_eq!(classify_irrigation_type(12.0, 12.0, 0.0), IrrigationType::Uniform);
        assert_eq!(classify_irrigation_type(12.0, 12.0, 1.0), IrrigationType::NonUniform);
        assert_eq!(classify_irrigation_type(12.0, 10.0, 0.0), IrrigationType::NonUniform);
        // Exact equality, no tolerance: a hair of difference flips the flag.
        assert_eq!(
            classify_irrigation_type(12.0 + 1e-9, 12.0, 0.0),
            IrrigationType::NonUniform
        );
    }

    #[test]
    fn labels_match_the_display_strings() {
        assert_eq!(StressLevel::Severe.to_string(), "Severe Stress");
        assert_eq!(WastageLevel::None.to_string(), "No Wastage");
        assert_eq!(IrrigationType::NonUniform.to_string(), "Non-Uniform Irrigation");
    }

    #[test]
    fn band_labels_serialize_as_human_strings() {
        let json = serde_json::to_string(&StressLevel::Mild).expect("serialize");
        assert_eq!(json, "\"Mild Stress\"");
    }
}

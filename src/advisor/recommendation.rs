//! Recommendation synthesis
//!
//! Builds the ordered advisory sequence from the three classifications and
//! the predicted loss. Lines are appended in a fixed order (stress, then
//! wastage, then uniformity, then loss risk); the all-clear message appears
//! only when nothing else fired, so the sequence is never empty.

use super::classification::{IrrigationType, StressLevel, WastageLevel};

/// Yield loss above this (strict) triggers the income-risk advisory.
pub const HIGH_LOSS_THRESHOLD: f64 = 10.0;

pub const ADVICE_MILD_STRESS: &str = "Increase irrigation slightly and monitor crop daily.";
pub const ADVICE_MODERATE_STRESS: &str =
    "Apply irrigation in split cycles and avoid midday watering.";
pub const ADVICE_SEVERE_STRESS: &str = "Immediate irrigation required to prevent crop damage.";
pub const ADVICE_REDUCE_QUANTITY: &str = "Reduce irrigation quantity by 20–30%.";
pub const ADVICE_SKIP_BEFORE_RAIN: &str = "Avoid irrigation when rainfall is expected.";
pub const ADVICE_ADJUST_BY_STAGE: &str =
    "Adjust irrigation based on crop stage and soil condition.";
pub const ADVICE_HIGH_LOSS_RISK: &str =
    "High income loss risk detected. Correct irrigation immediately.";
pub const ADVICE_OPTIMAL: &str = "Current irrigation practice is optimal.";

/// Compose the ordered advisory sequence.
///
/// Guaranteed non-empty: if none of the four conditions fired, the single
/// all-clear message is returned instead.
pub fn recommend(
    stress: StressLevel,
    wastage: WastageLevel,
    irrigation_type: IrrigationType,
    loss: f64,
) -> Vec<String> {
    let mut advice = Vec::new();

    match stress {
        StressLevel::NoStress => {}
        StressLevel::Mild => advice.push(ADVICE_MILD_STRESS.to_string()),
        StressLevel::Moderate => advice.push(ADVICE_MODERATE_STRESS.to_string()),
        StressLevel::Severe => advice.push(ADVICE_SEVERE_STRESS.to_string()),
    }

    if wastage >= WastageLevel::Medium {
        advice.push(ADVICE_REDUCE_QUANTITY.to_string());
        advice.push(ADVICE_SKIP_BEFORE_RAIN.to_string());
    }

    if irrigation_type == IrrigationType::NonUniform {
        advice.push(ADVICE_ADJUST_BY_STAGE.to_string());
    }

    if loss > HIGH_LOSS_THRESHOLD {
        advice.push(ADVICE_HIGH_LOSS_RISK.to_string());
    }

    if advice.is_empty() {
        advice.push(ADVICE_OPTIMAL.to_string());
    }

    advice
}

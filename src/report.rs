//! Assessment coordinator and advisory report
//!
//! Single entry point the boundary layer calls per request: derives the
//! water balance, classifies it, runs the fitted model, and assembles one
//! serializable report. Total function, no error path; the model reference
//! is injected by the caller rather than read from global state.

use crate::advisor::{
    classify_irrigation_type, classify_stress, classify_wastage, recommend, IrrigationType,
    StressLevel, WastageLevel,
};
use crate::data::FieldConditions;
use crate::predictor::YieldLossModel;
use serde::{Deserialize, Serialize};

/// Currency-unit conversion: income loss per unit of predicted yield loss.
pub const CURRENCY_PER_LOSS_UNIT: f64 = 200.0;

/// Complete advisory for one set of field conditions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisoryReport {
    /// Echo of the request inputs
    pub conditions: FieldConditions,
    /// irrigation + rainfall - crop_need
    pub water_balance: f64,
    pub stress: StressLevel,
    pub wastage: WastageLevel,
    pub irrigation_type: IrrigationType,
    /// Raw model output, unclamped (may extrapolate below zero)
    pub predicted_yield_loss: f64,
    /// `max(predicted_yield_loss, 0) × 200`, rounded to 2 decimals
    pub estimated_income_loss: f64,
    /// Ordered advisory lines, never empty
    pub recommendations: Vec<String>,
}

/// Assess one set of field conditions against the fitted model.
pub fn assess(model: &YieldLossModel, conditions: &FieldConditions) -> AdvisoryReport {
    let balance = conditions.water_balance();
    let stress = classify_stress(balance);
    let wastage = classify_wastage(balance);
    let irrigation_type = classify_irrigation_type(
        conditions.irrigation,
        conditions.crop_need,
        conditions.rainfall,
    );

    let predicted_yield_loss = model.predict(&conditions.features());
    // Currency figure clamps at zero; the raw prediction stays as-is.
    let estimated_income_loss =
        round_2dp(predicted_yield_loss.max(0.0) * CURRENCY_PER_LOSS_UNIT);

    let recommendations = recommend(stress, wastage, irrigation_type, predicted_yield_loss);

    AdvisoryReport {
        conditions: *conditions,
        water_balance: balance,
        stress,
        wastage,
        irrigation_type,
        predicted_yield_loss,
        estimated_income_loss,
        recommendations,
    }
}

fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TRAINING_DATA;
    use crate::predictor::ForestConfig;
    use approx::assert_relative_eq;

    fn fitted() -> YieldLossModel {
        YieldLossModel::fit(&TRAINING_DATA, ForestConfig::default())
            .expect("embedded dataset fits")
    }

    #[test]
    fn income_estimate_is_rounded_loss_times_rate() {
        let model = fitted();
        let conditions = FieldConditions {
            temperature: 34.0,
            rainfall: 0.0,
            humidity: 55.0,
            irrigation: 18.0,
            crop_need: 14.0,
        };
        let report = assess(&model, &conditions);
        let expected = (report.predicted_yield_loss.max(0.0) * 200.0 * 100.0).round() / 100.0;
        assert_relative_eq!(report.estimated_income_loss, expected);
        assert!(report.estimated_income_loss >= 0.0);
    }

    #[test]
    fn report_recommendations_are_never_empty() {
        let model = fitted();
        let conditions = FieldConditions {
            temperature: 28.0,
            rainfall: 0.0,
            humidity: 75.0,
            irrigation: 10.0,
            crop_need: 10.0,
        };
        assert!(!assess(&model, &conditions).recommendations.is_empty());
    }

    #[test]
    fn round_2dp_truncates_to_cents() {
        assert_relative_eq!(round_2dp(1234.5678), 1234.57);
        assert_relative_eq!(round_2dp(0.004), 0.0);
    }
}

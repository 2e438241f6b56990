//! Irrigation Risk & Income Loss Advisor
//!
//! Predicts irrigation-related crop yield loss with a small random-forest
//! regressor fitted once over a fixed six-row sample table, classifies the
//! derived water balance into stress/wastage bands plus a uniformity flag,
//! and synthesizes an ordered list of advisory strings per request.
//!
//! - `data`: embedded training table and the per-request query type
//! - `predictor`: the yield-loss model (train once, predict many)
//! - `advisor`: pure classification and recommendation logic
//! - `report`: the assessment entry point and serializable result

pub mod advisor;
pub mod data;
pub mod predictor;
pub mod report;

// Re-export commonly used types
pub use advisor::{
    classify_irrigation_type, classify_stress, classify_wastage, recommend, IrrigationType,
    StressLevel, WastageLevel,
};
pub use data::{FieldConditions, TrainingSample, N_FEATURES, TRAINING_DATA};
pub use predictor::{ForestConfig, TrainError, YieldLossModel};
pub use report::{assess, AdvisoryReport, CURRENCY_PER_LOSS_UNIT};

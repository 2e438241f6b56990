//! Embedded training data and query types
//!
//! Holds the fixed six-row sample table the yield-loss model is fitted on,
//! plus the per-request field conditions supplied by the boundary layer.
//! The sample table is defined once as constants and never mutated.

use serde::{Deserialize, Serialize};

/// Number of predictor features (temperature, rainfall, humidity,
/// irrigation, crop_need).
pub const N_FEATURES: usize = 5;

/// One row of the embedded training dataset.
#[derive(Debug, Clone, Copy)]
pub struct TrainingSample {
    /// Air temperature (°C)
    pub temperature: f64,
    /// Rainfall (mm)
    pub rainfall: f64,
    /// Relative humidity (%)
    pub humidity: f64,
    /// Irrigation amount applied (mm)
    pub irrigation: f64,
    /// Crop water requirement (mm)
    pub crop_need: f64,
    /// Observed yield loss (target)
    pub yield_loss: f64,
}

impl TrainingSample {
    /// Feature vector in model order.
    pub fn features(&self) -> [f64; N_FEATURES] {
        [
            self.temperature,
            self.rainfall,
            self.humidity,
            self.irrigation,
            self.crop_need,
        ]
    }
}

/// The fixed sample dataset the model is trained on at startup.
pub const TRAINING_DATA: [TrainingSample; 6] = [
    TrainingSample { temperature: 30.0, rainfall: 5.0, humidity: 65.0, irrigation: 12.0, crop_need: 12.0, yield_loss: 2.0 },
    TrainingSample { temperature: 34.0, rainfall: 0.0, humidity: 55.0, irrigation: 18.0, crop_need: 14.0, yield_loss: 10.0 },
    TrainingSample { temperature: 28.0, rainfall: 12.0, humidity: 75.0, irrigation: 10.0, crop_need: 10.0, yield_loss: 1.0 },
    TrainingSample { temperature: 36.0, rainfall: 0.0, humidity: 50.0, irrigation: 20.0, crop_need: 15.0, yield_loss: 18.0 },
    TrainingSample { temperature: 32.0, rainfall: 6.0, humidity: 60.0, irrigation: 14.0, crop_need: 13.0, yield_loss: 5.0 },
    TrainingSample { temperature: 38.0, rainfall: 0.0, humidity: 48.0, irrigation: 22.0, crop_need: 16.0, yield_loss: 22.0 },
];

/// Per-request field conditions supplied by the boundary layer.
///
/// Range validation (temperature 10-50 °C, rainfall/irrigation/crop_need
/// 0-50 mm, humidity 10-100 %) is the boundary's job; every function in the
/// core is total over these fields.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FieldConditions {
    /// Air temperature (°C)
    pub temperature: f64,
    /// Rainfall (mm)
    pub rainfall: f64,
    /// Relative humidity (%)
    pub humidity: f64,
    /// Irrigation amount applied (mm)
    pub irrigation: f64,
    /// Crop water requirement (mm)
    pub crop_need: f64,
}

impl FieldConditions {
    /// Feature vector in model order (same ordering as `TrainingSample`).
    pub fn features(&self) -> [f64; N_FEATURES] {
        [
            self.temperature,
            self.rainfall,
            self.humidity,
            self.irrigation,
            self.crop_need,
        ]
    }

    /// Water balance: irrigation + rainfall - crop water requirement.
    ///
    /// Positive = surplus, negative = deficit.
    pub fn water_balance(&self) -> f64 {
        self.irrigation + self.rainfall - self.crop_need
    }
}

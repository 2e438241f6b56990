//! Advisory logic: water-balance classification and recommendation synthesis
//!
//! Pure, total functions; every real-valued balance maps to exactly one
//! stress band and one wastage band, and the recommendation sequence is
//! never empty.

pub mod classification;
pub mod recommendation;

pub use classification::{
    classify_irrigation_type, classify_stress, classify_wastage, IrrigationType, StressLevel,
    WastageLevel,
};
pub use recommendation::recommend;

pub mod barrowman;
pub mod fairing;
pub mod stability;

pub use barrowman::{Component, ComponentContribution, CopCalculator, NOSE_CN};
pub use fairing::fairing_contribution;
pub use stability::{Stability, StabilityAssessment};

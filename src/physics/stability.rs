use std::fmt;

use serde::Serialize;

use crate::error::{CopError, Result};

/// Minimum margin, in calibers, for a rocket to count as stable.
pub const ONE_CALIBER: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Stability {
    /// COP at least one caliber behind the CG.
    Stable,
    /// COP behind the CG, but by less than one caliber.
    Marginal,
    /// COP at or ahead of the CG.
    Unstable,
}

impl Stability {
    pub fn from_margin(calibers: f64) -> Self {
        if calibers >= ONE_CALIBER {
            Stability::Stable
        } else if calibers > 0.0 {
            Stability::Marginal
        } else {
            Stability::Unstable
        }
    }
}

impl fmt::Display for Stability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stability::Stable => write!(f, "STABLE"),
            Stability::Marginal => write!(f, "MARGINAL"),
            Stability::Unstable => write!(f, "UNSTABLE"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilityAssessment {
    pub cop: f64,
    pub cg: f64,
    pub margin_calibers: f64,
    pub verdict: Stability,
}

/// Static margin `(cop - cg) / d`, positive when the COP is aft of the CG.
pub fn static_margin(cop: f64, cg: f64, d: f64) -> Result<f64> {
    if !(d.is_finite() && d > 0.0) {
        return Err(CopError::invalid(format!(
            "reference diameter d must be > 0, got {}",
            d
        )));
    }
    if !cg.is_finite() {
        return Err(CopError::invalid(format!("CG location must be finite, got {}", cg)));
    }
    Ok((cop - cg) / d)
}

pub fn assess(cop: f64, cg: f64, d: f64) -> Result<StabilityAssessment> {
    let margin_calibers = static_margin(cop, cg, d)?;
    Ok(StabilityAssessment {
        cop,
        cg,
        margin_calibers,
        verdict: Stability::from_margin(margin_calibers),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn margin_in_calibers() {
        assert_abs_diff_eq!(static_margin(30.0, 24.0, 4.0).unwrap(), 1.5, epsilon = 1e-12);
        assert_abs_diff_eq!(static_margin(20.0, 24.0, 4.0).unwrap(), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn verdict_thresholds() {
        assert_eq!(Stability::from_margin(1.0), Stability::Stable);
        assert_eq!(Stability::from_margin(0.4), Stability::Marginal);
        assert_eq!(Stability::from_margin(0.0), Stability::Unstable);
        assert_eq!(Stability::from_margin(-2.0), Stability::Unstable);
    }

    #[test]
    fn zero_diameter_is_invalid() {
        assert!(matches!(
            static_margin(30.0, 24.0, 0.0),
            Err(CopError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn assess_bundles_inputs() {
        let a = assess(25.0, 19.0, 5.54).unwrap();
        assert_eq!(a.verdict, Stability::Stable);
        assert_eq!(a.cop, 25.0);
        assert_eq!(a.cg, 19.0);
    }
}

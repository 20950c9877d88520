use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::diagnostics::TransitionSkip;
use crate::error::CopError;

// ---------------------------------------------------------------------------
// Nose cone shape
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum NoseType {
    Ogive,
    Cone,
}

impl NoseType {
    /// Fraction of the nose length at which the nose CP sits.
    pub fn cp_fraction(self) -> f64 {
        match self {
            NoseType::Ogive => 0.466,
            NoseType::Cone => 0.666,
        }
    }
}

impl FromStr for NoseType {
    type Err = CopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ogive" => Ok(NoseType::Ogive),
            "cone" | "conical" => Ok(NoseType::Cone),
            other => Err(CopError::invalid(format!(
                "invalid nose_type '{}', must be 'ogive' or 'cone'",
                other
            ))),
        }
    }
}

impl TryFrom<String> for NoseType {
    type Error = CopError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for NoseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoseType::Ogive => write!(f, "ogive"),
            NoseType::Cone => write!(f, "cone"),
        }
    }
}

// ---------------------------------------------------------------------------
// Rocket geometry (immutable input record)
// ---------------------------------------------------------------------------

/// Barrowman input geometry. Any length unit works as long as every field
/// uses the same one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RocketGeometry {
    pub nose_type: NoseType,
    #[serde(alias = "Ln")]
    pub ln: f64,            // nose cone length
    pub d: f64,             // nose base / reference diameter
    #[serde(alias = "dF")]
    pub d_f: f64,           // transition front diameter
    #[serde(alias = "dR")]
    pub d_r: f64,           // transition rear diameter
    #[serde(alias = "Lt")]
    pub lt: f64,            // transition length (0 = none)
    #[serde(alias = "Xp")]
    pub xp: f64,            // nose tip to transition front
    #[serde(alias = "CR")]
    pub cr: f64,            // fin root chord
    #[serde(alias = "CT")]
    pub ct: f64,            // fin tip chord
    #[serde(alias = "S")]
    pub s: f64,             // fin semispan
    #[serde(alias = "LF")]
    pub lf: f64,            // fin mid-chord line length
    #[serde(alias = "R")]
    pub r: f64,             // aft body radius
    #[serde(alias = "XR")]
    pub xr: f64,            // fin sweep distance
    #[serde(alias = "XB")]
    pub xb: f64,            // nose tip to fin root leading edge
    #[serde(alias = "N")]
    pub n: u32,             // fin count
}

impl RocketGeometry {
    /// Reasons the transition section carries no normal force. Empty when the
    /// transition is valid.
    pub fn transition_skip_reasons(&self) -> Vec<TransitionSkip> {
        let mut reasons = Vec::new();
        if self.lt == 0.0 {
            reasons.push(TransitionSkip::ZeroLength);
        }
        if self.d_f == self.d_r {
            reasons.push(TransitionSkip::NoDiameterChange);
        }
        reasons
    }

    pub fn has_transition(&self) -> bool {
        self.transition_skip_reasons().is_empty()
    }

    pub fn has_fins(&self) -> bool {
        self.n > 0
    }

    /// Mid-chord length implied by the semispan and sweep, `sqrt(S² + XR²)`.
    pub fn nominal_mid_chord(&self) -> f64 {
        nominal_mid_chord(self.s, self.xr)
    }

    /// Difference between the supplied `LF` and its nominal value. The
    /// calculator trusts `LF`; this is for callers that want to cross-check.
    pub fn mid_chord_mismatch(&self) -> f64 {
        self.lf - self.nominal_mid_chord()
    }

    /// Aft end of the airframe, taken as the fin root trailing edge.
    pub fn body_end(&self) -> f64 {
        if self.has_fins() {
            self.xb + self.cr
        } else {
            (self.xp + self.lt).max(self.ln)
        }
    }
}

pub fn nominal_mid_chord(s: f64, xr: f64) -> f64 {
    s.hypot(xr)
}

// ---------------------------------------------------------------------------
// Geometry builder
// ---------------------------------------------------------------------------

/// Starts from a bare nose + body; transition and fins are opt-in.
pub struct RocketGeometryBuilder {
    nose_type: NoseType,
    ln: f64,
    d: f64,
    d_f: Option<f64>,
    d_r: Option<f64>,
    lt: f64,
    xp: f64,
    cr: f64,
    ct: f64,
    s: f64,
    lf: Option<f64>,
    r: Option<f64>,
    xr: f64,
    xb: f64,
    n: u32,
}

impl RocketGeometryBuilder {
    pub fn new(nose_type: NoseType, ln: f64, d: f64) -> Self {
        Self {
            nose_type,
            ln,
            d,
            d_f: None,
            d_r: None,
            lt: 0.0,
            xp: 0.0,
            cr: 0.0,
            ct: 0.0,
            s: 0.0,
            lf: None,
            r: None,
            xr: 0.0,
            xb: 0.0,
            n: 0,
        }
    }

    pub fn transition(mut self, d_f: f64, d_r: f64, lt: f64, xp: f64) -> Self {
        self.d_f = Some(d_f);
        self.d_r = Some(d_r);
        self.lt = lt;
        self.xp = xp;
        self
    }

    pub fn fins(mut self, n: u32, cr: f64, ct: f64, s: f64, xr: f64, xb: f64) -> Self {
        self.n = n;
        self.cr = cr;
        self.ct = ct;
        self.s = s;
        self.xr = xr;
        self.xb = xb;
        self
    }

    pub fn mid_chord(mut self, lf: f64) -> Self { self.lf = Some(lf); self }
    pub fn aft_radius(mut self, r: f64) -> Self { self.r = Some(r); self }

    pub fn build(self) -> RocketGeometry {
        let d_f = self.d_f.unwrap_or(self.d);
        let d_r = self.d_r.unwrap_or(self.d);
        RocketGeometry {
            nose_type: self.nose_type,
            ln: self.ln,
            d: self.d,
            d_f,
            d_r,
            lt: self.lt,
            xp: self.xp,
            cr: self.cr,
            ct: self.ct,
            s: self.s,
            lf: self.lf.unwrap_or_else(|| nominal_mid_chord(self.s, self.xr)),
            r: self.r.unwrap_or(d_r / 2.0),
            xr: self.xr,
            xb: self.xb,
            n: self.n,
        }
    }
}

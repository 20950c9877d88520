//! Barrowman center-of-pressure equations for subsonic, slender rockets.
//!
//! Every function here is a pure function of a [`RocketGeometry`]. Locations
//! are measured from the nose tip in the geometry's length unit; normal force
//! coefficient derivatives are dimensionless and normalized by the reference
//! diameter `d`.

use std::fmt;

use crate::debug;
use crate::diagnostics::{Diagnostic, DiagnosticSink, LogSink};
use crate::error::{CopError, Result};
use crate::physics::stability::{self, StabilityAssessment};
use crate::vehicle::RocketGeometry;

/// Slender-body normal force coefficient derivative of any nose cone.
pub const NOSE_CN: f64 = 2.0;

static LOG_SINK: LogSink = LogSink;

// ---------------------------------------------------------------------------
// Per-component contributions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Nose,
    Transition,
    Fins,
    Fairing,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Nose => f.pad("nose"),
            Component::Transition => f.pad("transition"),
            Component::Fins => f.pad("fins"),
            Component::Fairing => f.pad("fairing"),
        }
    }
}

/// Weight (`cn`) and CP location (`x`) of one component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentContribution {
    pub component: Component,
    pub cn: f64,
    pub x: f64,
}

fn require(cond: bool, msg: impl FnOnce() -> String) -> Result<()> {
    if cond {
        Ok(())
    } else {
        Err(CopError::InvalidConfiguration(msg()))
    }
}

fn require_reference_diameter(g: &RocketGeometry) -> Result<()> {
    require(g.d.is_finite() && g.d > 0.0, || {
        format!("reference diameter d must be > 0, got {}", g.d)
    })
}

/// CP of the nose cone alone.
pub fn nose_cp(g: &RocketGeometry) -> Result<f64> {
    require(g.ln.is_finite() && g.ln > 0.0, || {
        format!("nose length Ln must be > 0, got {}", g.ln)
    })?;
    Ok(g.nose_type.cp_fraction() * g.ln)
}

/// `Cnt = 2 * ((dR/d)² - (dF/d)²)`, or zero when there is no transition.
pub fn transition_cn(g: &RocketGeometry) -> Result<f64> {
    if !g.has_transition() {
        return Ok(0.0);
    }
    require_reference_diameter(g)?;
    require_transition(g)?;
    Ok(2.0 * ((g.d_r / g.d).powi(2) - (g.d_f / g.d).powi(2)))
}

/// Checks shared by the transition weight and CP, so both reject the same
/// geometries.
fn require_transition(g: &RocketGeometry) -> Result<()> {
    require(g.lt.is_finite() && g.lt > 0.0, || {
        format!("transition length Lt must be > 0, got {}", g.lt)
    })?;
    require(g.xp.is_finite() && g.xp >= 0.0, || {
        format!("transition position Xp must be >= 0, got {}", g.xp)
    })?;
    require(g.d_f.is_finite() && g.d_f >= 0.0, || {
        format!("transition front diameter dF must be >= 0, got {}", g.d_f)
    })?;
    require(g.d_r.is_finite() && g.d_r > 0.0, || {
        format!("transition rear diameter dR must be > 0, got {}", g.d_r)
    })?;
    let ratio = g.d_f / g.d_r;
    require(1.0 - ratio * ratio != 0.0, || {
        "transition diameters make the CP undefined".to_string()
    })
}

/// CP of the transition section, or `0.0` plus a [`Diagnostic::NoTransition`]
/// when the geometry has none.
pub fn transition_cp(g: &RocketGeometry, sink: &dyn DiagnosticSink) -> Result<f64> {
    let reasons = g.transition_skip_reasons();
    if !reasons.is_empty() {
        sink.emit(Diagnostic::NoTransition { reasons });
        return Ok(0.0);
    }

    require_transition(g)?;

    let ratio = g.d_f / g.d_r;
    let denom = 1.0 - ratio * ratio;
    Ok(g.xp + (g.lt / 3.0) * (1.0 + (1.0 - ratio) / denom))
}

/// `Cnf` including the `(1 + R/(S+R))` fin-body interference factor. Zero
/// when the rocket has no fins.
pub fn fin_cn(g: &RocketGeometry) -> Result<f64> {
    if !g.has_fins() {
        return Ok(0.0);
    }
    require_reference_diameter(g)?;
    let chord_sum = fin_chord_sum(g)?;
    require(g.s.is_finite() && g.s > 0.0, || {
        format!("fin semispan S must be > 0 with {} fins, got {}", g.n, g.s)
    })?;
    require(g.r.is_finite() && g.r > 0.0, || {
        format!("aft body radius R must be > 0, got {}", g.r)
    })?;
    require(g.lf.is_finite() && g.lf >= 0.0, || {
        format!("fin mid-chord length LF must be >= 0, got {}", g.lf)
    })?;

    let interference = 1.0 + g.r / (g.s + g.r);
    let planform = 4.0 * f64::from(g.n) * (g.s / g.d).powi(2)
        / (1.0 + (1.0 + (2.0 * g.lf / chord_sum).powi(2)).sqrt());
    Ok(interference * planform)
}

/// CP of the fin set alone.
pub fn fin_cp(g: &RocketGeometry) -> Result<f64> {
    let chord_sum = fin_chord_sum(g)?;
    require(g.xr.is_finite() && g.xr >= 0.0, || {
        format!("fin sweep XR must be >= 0, got {}", g.xr)
    })?;
    require(g.xb.is_finite() && g.xb >= 0.0, || {
        format!("fin position XB must be >= 0, got {}", g.xb)
    })?;

    let (cr, ct) = (g.cr, g.ct);
    let sweep_term = g.xr * (cr + 2.0 * ct) / (3.0 * chord_sum);
    let chord_term = (chord_sum - cr * ct / chord_sum) / 6.0;
    Ok(g.xb + sweep_term + chord_term)
}

/// Weight and CP of a fin set on its own, for rockets carrying more than one.
pub fn fin_set_contribution(g: &RocketGeometry) -> Result<ComponentContribution> {
    Ok(ComponentContribution { component: Component::Fins, cn: fin_cn(g)?, x: fin_cp(g)? })
}

fn fin_chord_sum(g: &RocketGeometry) -> Result<f64> {
    require(g.cr.is_finite() && g.cr >= 0.0 && g.ct.is_finite() && g.ct >= 0.0, || {
        format!("fin chords must be >= 0, got CR={} CT={}", g.cr, g.ct)
    })?;
    let sum = g.cr + g.ct;
    require(sum > 0.0, || "fin root and tip chord are both zero".to_string())?;
    Ok(sum)
}

/// Weighted-average CP of a set of contributions. Zero-weight entries are
/// skipped.
pub fn combine(parts: &[ComponentContribution]) -> Result<f64> {
    let (moment, total) = parts
        .iter()
        .filter(|p| p.cn != 0.0)
        .fold((0.0, 0.0), |(m, t), p| (m + p.cn * p.x, t + p.cn));

    require(total != 0.0 && total.is_finite(), || {
        format!("sum of normal force coefficients is degenerate ({})", total)
    })?;
    let x = moment / total;
    require(x.is_finite(), || "combined center of pressure is not finite".to_string())?;
    Ok(x)
}

// ---------------------------------------------------------------------------
// Calculator
// ---------------------------------------------------------------------------

/// Barrowman calculator bound to one geometry. Holds no derived state: each
/// call recomputes from the geometry.
///
/// Components the geometry record cannot describe (extra fin sets, custom
/// fairings) are precomputed and attached with
/// [`with_extras`](Self::with_extras).
#[derive(Clone, Copy)]
pub struct CopCalculator<'a> {
    geometry: &'a RocketGeometry,
    sink: &'a dyn DiagnosticSink,
    extras: &'a [ComponentContribution],
}

impl<'a> CopCalculator<'a> {
    /// Calculator that reports diagnostics through the logger.
    pub fn new(geometry: &'a RocketGeometry) -> Self {
        Self { geometry, sink: &LOG_SINK, extras: &[] }
    }

    pub fn with_sink(geometry: &'a RocketGeometry, sink: &'a dyn DiagnosticSink) -> Self {
        Self { geometry, sink, extras: &[] }
    }

    pub fn with_extras(self, extras: &'a [ComponentContribution]) -> Self {
        Self { extras, ..self }
    }

    pub fn extras(&self) -> &'a [ComponentContribution] {
        self.extras
    }

    pub fn geometry(&self) -> &'a RocketGeometry {
        self.geometry
    }

    pub fn nose_contribution(&self) -> Result<f64> {
        nose_cp(self.geometry)
    }

    pub fn transition_contribution(&self) -> Result<f64> {
        transition_cp(self.geometry, self.sink)
    }

    pub fn fin_contribution(&self) -> Result<f64> {
        fin_cp(self.geometry)
    }

    /// `(Cnn, Cnt, Cnf)` as used by [`net_cop`](Self::net_cop).
    pub fn constant_calculations(&self) -> Result<(f64, f64, f64)> {
        Ok((NOSE_CN, transition_cn(self.geometry)?, fin_cn(self.geometry)?))
    }

    /// Nose, transition and fin contributions, each computed once, followed
    /// by any extras.
    ///
    /// A finless rocket gets a zero-weight fin entry with `x = 0.0`; its fin
    /// CP is never evaluated.
    pub fn contributions(&self) -> Result<Vec<ComponentContribution>> {
        let g = self.geometry;
        let nose = ComponentContribution {
            component: Component::Nose,
            cn: NOSE_CN,
            x: nose_cp(g)?,
        };
        let transition = ComponentContribution {
            component: Component::Transition,
            cn: transition_cn(g)?,
            x: transition_cp(g, self.sink)?,
        };
        let fins = if g.has_fins() {
            fin_set_contribution(g)?
        } else {
            ComponentContribution { component: Component::Fins, cn: 0.0, x: 0.0 }
        };
        let mut parts = vec![nose, transition, fins];
        parts.extend_from_slice(self.extras);
        Ok(parts)
    }

    /// Whole-rocket CP from the nose tip.
    pub fn net_cop(&self) -> Result<f64> {
        let parts = self.contributions()?;
        for p in &parts {
            debug!("{:<10} Cn = {:>8.4}  x = {:>10.4}", p.component, p.cn, p.x);
        }
        combine(&parts)
    }

    /// Static margin of the rocket against a measured CG.
    pub fn stability(&self, cg: f64) -> Result<StabilityAssessment> {
        stability::assess(self.net_cop()?, cg, self.geometry.d)
    }
}

//! Rocket configuration files.
//!
//! Two JSON layouts are accepted:
//!
//! * a component list (`name`, `reference_diameter_mm`, `components`) with
//!   every length in millimeters, converted to meters on load. The first fin
//!   set goes into the geometry record; further fin sets and custom-profile
//!   payload fairings become extra contributions;
//! * a flat object carrying the Barrowman parameters directly (`nose_type`,
//!   `Ln`, `d`, `dF`, ...), in whatever unit the file uses.

use std::fs;
use std::path::Path;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CopError, Result};
use crate::physics::barrowman::{fin_set_contribution, ComponentContribution};
use crate::physics::fairing::fairing_contribution;
use crate::vehicle::geometry::nominal_mid_chord;
use crate::vehicle::{NoseType, RocketGeometry};
use crate::{debug, warn};

pub fn mm_to_m(value: f64) -> f64 {
    value / 1000.0
}

// ---------------------------------------------------------------------------
// Component-list layout
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "part", rename_all = "snake_case")]
pub enum ComponentConfig {
    Nosecone {
        #[serde(rename = "type")]
        nose_type: String,
        length_mm: f64,
        base_diameter_mm: f64,
    },
    BodyTube {
        name: String,
        length_mm: f64,
        diameter_mm: f64,
    },
    IrregularBody {
        name: String,
        length_mm: f64,
        front_diameter_mm: f64,
        rear_diameter_mm: f64,
        position_from_nose_tip_mm: f64,
    },
    PayloadFairing {
        name: String,
        length_mm: f64,
        base_diameter_mm: f64,
        shape_type: String,
        #[serde(default)]
        custom_parameters: Option<Value>,
    },
    FinSet {
        count: u32,
        root_chord_mm: f64,
        tip_chord_mm: f64,
        span_mm: f64,
        sweep_mm: f64,
        thickness_mm: f64,
        position_from_nose_tip_mm: f64,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RocketConfig {
    pub name: String,
    pub reference_diameter_mm: f64,
    pub components: Vec<ComponentConfig>,
}

/// `custom_parameters` of a fairing with `shape_type: "custom"`.
#[derive(Debug, Clone, Deserialize)]
struct CustomFairing {
    /// `[x_mm, radius_mm]`, `x` from the nose tip.
    profile_points: Vec<[f64; 2]>,
}

/// A geometry together with the name it was loaded under.
#[derive(Debug, Clone)]
pub struct LoadedRocket {
    pub name: String,
    pub geometry: RocketGeometry,
    /// Contributions outside the geometry record, for
    /// [`CopCalculator::with_extras`](crate::CopCalculator::with_extras).
    pub extras: Vec<ComponentContribution>,
}

impl RocketConfig {
    /// Collapse the component list into a single Barrowman geometry, in meters.
    /// Only the first fin set is kept; see
    /// [`extra_contributions`](Self::extra_contributions) for the rest.
    pub fn to_geometry(&self) -> Result<RocketGeometry> {
        let mut nose: Option<(NoseType, f64, f64)> = None;
        let mut transition: Option<(f64, f64, f64, f64)> = None;
        let mut fins: Option<(u32, f64, f64, f64, f64, f64)> = None;
        let mut aft_tube: Option<f64> = None;

        for component in &self.components {
            match component {
                ComponentConfig::Nosecone { nose_type, length_mm, base_diameter_mm } => {
                    if nose.is_some() {
                        return Err(CopError::invalid("more than one nosecone"));
                    }
                    nose = Some((
                        nose_type.parse::<NoseType>()?,
                        mm_to_m(*length_mm),
                        mm_to_m(*base_diameter_mm),
                    ));
                }
                ComponentConfig::BodyTube { diameter_mm, .. } => {
                    aft_tube = Some(mm_to_m(*diameter_mm));
                }
                ComponentConfig::IrregularBody {
                    name,
                    length_mm,
                    front_diameter_mm,
                    rear_diameter_mm,
                    position_from_nose_tip_mm,
                } => {
                    if transition.is_some() {
                        return Err(CopError::invalid(format!(
                            "only one transition is supported, found another in '{}'",
                            name
                        )));
                    }
                    transition = Some((
                        mm_to_m(*front_diameter_mm),
                        mm_to_m(*rear_diameter_mm),
                        mm_to_m(*length_mm),
                        mm_to_m(*position_from_nose_tip_mm),
                    ));
                }
                ComponentConfig::PayloadFairing { .. } => {}
                ComponentConfig::FinSet {
                    count,
                    root_chord_mm,
                    tip_chord_mm,
                    span_mm,
                    sweep_mm,
                    thickness_mm,
                    position_from_nose_tip_mm,
                } => {
                    if fins.is_some() {
                        continue;
                    }
                    debug!("Fin thickness {} mm is not used by the Barrowman model", thickness_mm);
                    fins = Some((
                        *count,
                        mm_to_m(*root_chord_mm),
                        mm_to_m(*tip_chord_mm),
                        mm_to_m(*span_mm),
                        mm_to_m(*sweep_mm),
                        mm_to_m(*position_from_nose_tip_mm),
                    ));
                }
            }
        }

        let (nose_type, ln, base) =
            nose.ok_or_else(|| CopError::invalid(format!("rocket '{}' has no nosecone", self.name)))?;
        let d = if base > 0.0 { base } else { mm_to_m(self.reference_diameter_mm) };
        let (d_f, d_r, lt, xp) = transition.unwrap_or((d, d, 0.0, 0.0));
        let (n, cr, ct, s, xr, xb) = fins.unwrap_or((0, 0.0, 0.0, 0.0, 0.0, 0.0));
        let r = match (aft_tube, transition) {
            (Some(tube), _) => tube / 2.0,
            (None, Some(_)) => d_r / 2.0,
            (None, None) => d / 2.0,
        };

        Ok(RocketGeometry {
            nose_type,
            ln,
            d,
            d_f,
            d_r,
            lt,
            xp,
            cr,
            ct,
            s,
            lf: nominal_mid_chord(s, xr),
            r,
            xr,
            xb,
            n,
        })
    }

    /// Fin sets after the first and custom-profile fairings, evaluated
    /// against `geometry` (its reference diameter and aft radius).
    /// Fairings of any other shape are skipped with a warning.
    pub fn extra_contributions(&self, geometry: &RocketGeometry) -> Result<Vec<ComponentContribution>> {
        let mut extras = Vec::new();
        let mut fin_sets = 0;

        for component in &self.components {
            match component {
                ComponentConfig::FinSet {
                    count,
                    root_chord_mm,
                    tip_chord_mm,
                    span_mm,
                    sweep_mm,
                    position_from_nose_tip_mm,
                    ..
                } => {
                    fin_sets += 1;
                    if fin_sets == 1 {
                        continue;
                    }
                    let (s, xr) = (mm_to_m(*span_mm), mm_to_m(*sweep_mm));
                    let set = RocketGeometry {
                        n: *count,
                        cr: mm_to_m(*root_chord_mm),
                        ct: mm_to_m(*tip_chord_mm),
                        s,
                        xr,
                        lf: nominal_mid_chord(s, xr),
                        xb: mm_to_m(*position_from_nose_tip_mm),
                        ..*geometry
                    };
                    extras.push(fin_set_contribution(&set)?);
                }
                ComponentConfig::PayloadFairing { name, shape_type, custom_parameters, .. } => {
                    if !shape_type.eq_ignore_ascii_case("custom") {
                        warn!(
                            "Payload fairing '{}' ({}) contributes no normal force and is ignored",
                            name, shape_type
                        );
                        continue;
                    }
                    let params = custom_parameters.clone().ok_or_else(|| {
                        CopError::invalid(format!("custom fairing '{}' has no custom_parameters", name))
                    })?;
                    let custom: CustomFairing = serde_json::from_value(params)?;
                    let outline: Vec<Point2<f64>> = custom
                        .profile_points
                        .iter()
                        .map(|[x, r]| Point2::new(mm_to_m(*x), mm_to_m(*r)))
                        .collect();
                    let contribution = fairing_contribution(&outline, geometry.d)?;
                    debug!(
                        "Fairing '{}': Cn = {:.4}, x = {:.4} m",
                        name, contribution.cn, contribution.x
                    );
                    extras.push(contribution);
                }
                _ => {}
            }
        }
        Ok(extras)
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Parse either layout from a JSON string.
pub fn parse_geometry(json: &str) -> Result<LoadedRocket> {
    let value: Value = serde_json::from_str(json)?;

    if value.get("components").is_some() {
        let config: RocketConfig = serde_json::from_value(value)?;
        let geometry = config.to_geometry()?;
        let extras = config.extra_contributions(&geometry)?;
        return Ok(LoadedRocket { name: config.name, geometry, extras });
    }

    // Surface a bad nose type as a configuration error rather than a
    // generic deserialization failure.
    if let Some(nose) = value.get("nose_type").and_then(Value::as_str) {
        nose.parse::<NoseType>()?;
    }
    let name = value
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("unnamed")
        .to_string();
    let geometry: RocketGeometry = serde_json::from_value(value)?;
    Ok(LoadedRocket { name, geometry, extras: Vec::new() })
}

pub fn load_geometry_file(path: impl AsRef<Path>) -> Result<LoadedRocket> {
    let path = path.as_ref();
    debug!("Loading rocket configuration from {}", path.display());
    let text = fs::read_to_string(path)?;
    parse_geometry(&text)
}

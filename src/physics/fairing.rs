//! Payload fairings described by a measured outline.
//!
//! The outline is a list of `(x, radius)` points, `x` from the nose tip. It is
//! resampled on a uniform grid, and the CP is the centroid of `(dS/dx)²`
//! along the fairing, where `S = πr²`. The weight is the slender-body
//! `2 (S_aft - S_fore) / S_ref`, so it combines with the other Barrowman
//! terms on the same reference area.

use std::f64::consts::PI;

use nalgebra::{DVector, Point2};

use crate::error::{CopError, Result};
use crate::physics::barrowman::{Component, ComponentContribution};

/// Uniform samples used for the integrals. Odd, so Simpson's rule applies
/// to the whole grid.
pub const FAIRING_SAMPLES: usize = 501;

/// Contribution of a fairing with the given outline to a rocket of
/// reference diameter `d`.
pub fn fairing_contribution(outline: &[Point2<f64>], d: f64) -> Result<ComponentContribution> {
    if !(d.is_finite() && d > 0.0) {
        return Err(CopError::invalid(format!("reference diameter d must be > 0, got {}", d)));
    }
    let (xs, areas) = resample_areas(outline)?;
    let h = xs[1] - xs[0];
    let slope = gradient(&areas, h);

    let slope_sq = slope.map(|v| v * v);
    let denominator = simpson(&slope_sq, h);
    let numerator = simpson(&slope_sq.component_mul(&xs), h);

    // A cylinder has no area change to weight by; fall back to the midpoint.
    let x = if denominator > 0.0 { numerator / denominator } else { xs.mean() };

    let reference_area = PI * d * d / 4.0;
    let cn = 2.0 * (areas[areas.len() - 1] - areas[0]) / reference_area;
    Ok(ComponentContribution { component: Component::Fairing, cn, x })
}

/// Sort the outline by `x`, interpolate it linearly onto
/// [`FAIRING_SAMPLES`] evenly spaced stations and return the stations with
/// their cross-section areas.
fn resample_areas(outline: &[Point2<f64>]) -> Result<(DVector<f64>, DVector<f64>)> {
    if outline.len() < 2 {
        return Err(CopError::invalid(format!(
            "fairing outline needs at least 2 points, got {}",
            outline.len()
        )));
    }
    if let Some(p) = outline.iter().find(|p| !(p.x.is_finite() && p.y.is_finite() && p.y >= 0.0)) {
        return Err(CopError::invalid(format!(
            "fairing outline point ({}, {}) must be finite with radius >= 0",
            p.x, p.y
        )));
    }

    let mut points = outline.to_vec();
    points.sort_by(|a, b| a.x.total_cmp(&b.x));
    let (start, end) = (points[0].x, points[points.len() - 1].x);
    if end <= start {
        return Err(CopError::invalid("fairing outline has zero length"));
    }

    let step = (end - start) / (FAIRING_SAMPLES - 1) as f64;
    let xs = DVector::from_fn(FAIRING_SAMPLES, |i, _| start + step * i as f64);
    let areas = xs.map(|x| {
        let r = radius_at(&points, x);
        PI * r * r
    });
    Ok((xs, areas))
}

fn radius_at(points: &[Point2<f64>], x: f64) -> f64 {
    let segment = points
        .windows(2)
        .find(|w| x <= w[1].x && w[1].x > w[0].x)
        .unwrap_or(&points[points.len() - 2..]);
    let (a, b) = (segment[0], segment[1]);
    if b.x == a.x {
        return b.y;
    }
    let t = ((x - a.x) / (b.x - a.x)).clamp(0.0, 1.0);
    a.y + t * (b.y - a.y)
}

/// Central differences inside, one-sided at the ends.
fn gradient(v: &DVector<f64>, h: f64) -> DVector<f64> {
    let n = v.len();
    DVector::from_fn(n, |i, _| match i {
        0 => (v[1] - v[0]) / h,
        i if i == n - 1 => (v[n - 1] - v[n - 2]) / h,
        i => (v[i + 1] - v[i - 1]) / (2.0 * h),
    })
}

/// Composite Simpson's rule over an odd number of evenly spaced samples.
fn simpson(v: &DVector<f64>, h: f64) -> f64 {
    let n = v.len();
    let interior: f64 = (1..n - 1).map(|i| if i % 2 == 1 { 4.0 * v[i] } else { 2.0 * v[i] }).sum();
    (v[0] + v[n - 1] + interior) * h / 3.0
}

use nalgebra::Point2;

use super::geometry::{NoseType, RocketGeometry};

/// Side outline of the rocket in the x (axial, from nose tip) / y (radial)
/// plane. Only the upper half of the body is stored.
#[derive(Debug, Clone)]
pub struct Profile {
    pub body: Vec<Point2<f64>>,
    /// Closed polygon of one fin, root on the body surface. Empty when the
    /// rocket has no fins.
    pub fin: Vec<Point2<f64>>,
}

impl Profile {
    /// Lower half of the body, mirrored about the axis.
    pub fn mirrored_body(&self) -> Vec<Point2<f64>> {
        self.body.iter().map(|p| Point2::new(p.x, -p.y)).collect()
    }

    pub fn mirrored_fin(&self) -> Vec<Point2<f64>> {
        self.fin.iter().map(|p| Point2::new(p.x, -p.y)).collect()
    }

    pub fn length(&self) -> f64 {
        self.body.last().map_or(0.0, |p| p.x)
    }
}

/// Radius of the nose at axial station `x` (`0 <= x <= ln`).
pub fn nose_radius(nose_type: NoseType, ln: f64, d: f64, x: f64) -> f64 {
    let base = d / 2.0;
    match nose_type {
        NoseType::Cone => base * (x / ln),
        NoseType::Ogive => {
            // Tangent ogive
            let rho = (ln * ln + base * base) / d;
            let dx = ln - x;
            ((rho * rho - dx * dx).max(0.0).sqrt() + base - rho).max(0.0)
        }
    }
}

/// Build the outline with `nose_samples` points along the nose.
pub fn side_profile(g: &RocketGeometry, nose_samples: usize) -> Profile {
    let samples = nose_samples.max(2);
    let mut body: Vec<Point2<f64>> = (0..samples)
        .map(|i| {
            let x = g.ln * i as f64 / (samples - 1) as f64;
            Point2::new(x, nose_radius(g.nose_type, g.ln, g.d, x))
        })
        .collect();

    let mut x = g.ln;
    if g.has_transition() {
        if g.xp > x {
            body.push(Point2::new(x, g.d / 2.0));
            body.push(Point2::new(g.xp, g.d / 2.0));
        }
        body.push(Point2::new(g.xp, g.d_f / 2.0));
        x = g.xp + g.lt;
        body.push(Point2::new(x, g.d_r / 2.0));
    }

    let end = g.body_end().max(x);
    body.push(Point2::new(x, g.r));
    body.push(Point2::new(end, g.r));

    let fin = if g.has_fins() {
        let root = g.r;
        let tip = g.r + g.s;
        vec![
            Point2::new(g.xb, root),
            Point2::new(g.xb + g.xr, tip),
            Point2::new(g.xb + g.xr + g.ct, tip),
            Point2::new(g.xb + g.cr, root),
            Point2::new(g.xb, root),
        ]
    } else {
        Vec::new()
    };

    Profile { body, fin }
}

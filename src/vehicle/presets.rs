//! Kit rockets with manufacturer-published COP locations (inches from the
//! nose tip). All lengths are in inches.

use super::geometry::{NoseType, RocketGeometry, RocketGeometryBuilder};

#[derive(Debug, Clone)]
pub struct Preset {
    pub name: &'static str,
    pub geometry: RocketGeometry,
    /// Reference COP, inches from the nose tip.
    pub published_cop: f64,
}

/// LOC Precision Mini-Magg.
pub fn mini_magg() -> Preset {
    Preset {
        name: "LOC Mini-Magg",
        geometry: RocketGeometryBuilder::new(NoseType::Ogive, 12.5, 5.54)
            .fins(3, 10.0, 0.0, 5.25, 9.0, 27.0)
            .mid_chord(6.5)
            .aft_radius(2.77)
            .build(),
        published_cop: 24.65,
    }
}

/// LOC Precision Hi-Tech H45.
pub fn hi_tech_h45() -> Preset {
    Preset {
        name: "LOC Hi-Tech H45",
        geometry: RocketGeometryBuilder::new(NoseType::Ogive, 9.0, 2.6)
            .fins(3, 4.527, 2.55, 3.93, 0.511, 44.488)
            .mid_chord(4.21)
            .aft_radius(1.3)
            .build(),
        published_cop: 41.71,
    }
}

/// LOC Precision Expediter, the one kit here with a transition. Reference
/// COP comes from OpenRocket.
pub fn expediter() -> Preset {
    Preset {
        name: "LOC Expediter",
        geometry: RocketGeometryBuilder::new(NoseType::Ogive, 11.25, 3.0)
            .transition(3.0, 4.0, 2.5, 11.259)
            .fins(3, 10.5, 2.559, 4.25, 7.87, 106.299)
            .mid_chord(7.0)
            .aft_radius(1.5)
            .build(),
        published_cop: 91.3386,
    }
}

pub fn all() -> Vec<Preset> {
    vec![mini_magg(), hi_tech_h45(), expediter()]
}

/// Look up a preset by its CLI name (`mini-magg`, `hi-tech-h45`, `expediter`).
pub fn by_name(name: &str) -> Option<Preset> {
    match name.to_ascii_lowercase().as_str() {
        "mini-magg" | "minimagg" => Some(mini_magg()),
        "hi-tech-h45" | "hi-tech" | "h45" => Some(hi_tech_h45()),
        "expediter" => Some(expediter()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_name() {
        assert_eq!(by_name("Expediter").unwrap().name, "LOC Expediter");
        assert_eq!(by_name("h45").unwrap().name, "LOC Hi-Tech H45");
        assert!(by_name("saturn-v").is_none());
    }

    #[test]
    fn only_expediter_has_transition() {
        let with: Vec<_> = all().into_iter().filter(|p| p.geometry.has_transition()).collect();
        assert_eq!(with.len(), 1);
        assert_eq!(with[0].name, "LOC Expediter");
    }
}

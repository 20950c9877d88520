use std::path::Path;

use approx::assert_relative_eq;
use rocket_cop::diagnostics::{CollectingSink, Diagnostic, SilentSink};
use rocket_cop::io::load_geometry_file;
use rocket_cop::presets;
use rocket_cop::{CopCalculator, CopError, NoseType, RocketGeometryBuilder, Stability};

const TOLERANCE: f64 = 0.05;

fn data(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("data").join(name)
}

// Published kit COPs; the Barrowman estimate should land within 5%.
#[test]
fn kit_rockets_match_published_cop() {
    for preset in presets::all() {
        let calc = CopCalculator::with_sink(&preset.geometry, &SilentSink);
        let cop = calc.net_cop().unwrap();
        let lo = preset.published_cop * (1.0 - TOLERANCE);
        let hi = preset.published_cop * (1.0 + TOLERANCE);
        assert!(
            lo <= cop && cop <= hi,
            "{}: COP {} not within 5% of {}",
            preset.name,
            cop,
            preset.published_cop
        );
    }
}

#[test]
fn component_list_file_loads_in_meters() {
    let loaded = load_geometry_file(data("hi_tech.json")).unwrap();
    assert_eq!(loaded.name, "LOC Hi-Tech H45");

    let cop_m = CopCalculator::with_sink(&loaded.geometry, &SilentSink).net_cop().unwrap();
    let published_m = presets::hi_tech_h45().published_cop * 0.0254;
    assert_relative_eq!(cop_m, published_m, max_relative = TOLERANCE);
}

#[test]
fn flat_file_matches_preset() {
    let loaded = load_geometry_file(data("mini_magg_flat.json")).unwrap();
    assert_eq!(loaded.geometry, presets::mini_magg().geometry);
}

#[test]
fn missing_file_is_io_error() {
    let err = load_geometry_file(data("does_not_exist.json")).unwrap_err();
    assert!(matches!(err, CopError::Io(_)));
}

#[test]
fn expediter_uses_all_three_components() {
    let g = presets::expediter().geometry;
    let sink = CollectingSink::new();
    let calc = CopCalculator::with_sink(&g, &sink);

    let (cnn, cnt, cnf) = calc.constant_calculations().unwrap();
    assert!(cnn > 0.0 && cnt > 0.0 && cnf > 0.0);
    calc.net_cop().unwrap();
    assert!(sink.is_empty(), "transition should be valid");
}

#[test]
fn simple_rocket_reports_no_transition() {
    let g = presets::mini_magg().geometry;
    let sink = CollectingSink::new();
    let calc = CopCalculator::with_sink(&g, &sink);

    assert_eq!(calc.transition_contribution().unwrap(), 0.0);
    let seen = sink.take();
    assert_eq!(seen.len(), 1);
    assert!(matches!(seen[0], Diagnostic::NoTransition { .. }));
}

#[test]
fn unknown_nose_type_fails_before_any_computation() {
    let err = "parachute".parse::<NoseType>().unwrap_err();
    assert!(matches!(err, CopError::InvalidConfiguration(_)));
}

#[test]
fn stability_against_measured_cg() {
    let g = presets::mini_magg().geometry;
    let calc = CopCalculator::with_sink(&g, &SilentSink);
    let cop = calc.net_cop().unwrap();

    let stable = calc.stability(cop - 1.5 * g.d).unwrap();
    assert_eq!(stable.verdict, Stability::Stable);
    assert_relative_eq!(stable.margin_calibers, 1.5, epsilon = 1e-9);

    let marginal = calc.stability(cop - 0.5 * g.d).unwrap();
    assert_eq!(marginal.verdict, Stability::Marginal);

    let unstable = calc.stability(cop + 1.0).unwrap();
    assert_eq!(unstable.verdict, Stability::Unstable);
}

#[test]
fn calculator_is_shareable_across_threads() {
    let g = RocketGeometryBuilder::new(NoseType::Cone, 10.0, 4.0)
        .fins(4, 8.0, 4.0, 4.0, 3.0, 40.0)
        .build();
    let expected = CopCalculator::with_sink(&g, &SilentSink).net_cop().unwrap();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| CopCalculator::with_sink(&g, &SilentSink).net_cop().unwrap()))
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap().to_bits(), expected.to_bits());
        }
    });
}

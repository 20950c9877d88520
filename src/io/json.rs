use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::physics::barrowman::{combine, ComponentContribution};
use crate::physics::stability::{assess, Stability};
use crate::physics::CopCalculator;
use crate::vehicle::RocketGeometry;

#[derive(Debug, Clone, Serialize)]
pub struct ComponentEntry {
    pub component: String,
    pub cn: f64,
    pub x: f64,
}

impl From<&ComponentContribution> for ComponentEntry {
    fn from(c: &ComponentContribution) -> Self {
        Self { component: c.component.to_string(), cn: c.cn, x: c.x }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StabilityEntry {
    pub cg: f64,
    pub margin_calibers: f64,
    pub verdict: Stability,
}

/// Everything the calculator knows about one rocket.
#[derive(Debug, Clone, Serialize)]
pub struct CopReport {
    pub name: String,
    pub geometry: RocketGeometry,
    pub components: Vec<ComponentEntry>,
    pub net_cop: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stability: Option<StabilityEntry>,
}

impl CopReport {
    pub fn build(name: &str, calc: &CopCalculator<'_>, cg: Option<f64>) -> Result<Self> {
        let parts = calc.contributions()?;
        let net_cop = combine(&parts)?;
        let stability = match cg {
            Some(cg) => {
                let a = assess(net_cop, cg, calc.geometry().d)?;
                Some(StabilityEntry {
                    cg,
                    margin_calibers: a.margin_calibers,
                    verdict: a.verdict,
                })
            }
            None => None,
        };
        Ok(Self {
            name: name.to_string(),
            geometry: *calc.geometry(),
            components: parts.iter().map(ComponentEntry::from).collect(),
            net_cop,
            stability,
        })
    }

    pub fn is_stable(&self) -> Option<bool> {
        self.stability
            .as_ref()
            .map(|s| s.verdict == Stability::Stable)
    }
}

/// Write the report as pretty-printed JSON.
pub fn write_report<W: Write>(writer: &mut W, report: &CopReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, report)?;
    writeln!(writer)?;
    Ok(())
}

pub fn write_report_file(path: impl AsRef<Path>, report: &CopReport) -> Result<()> {
    let mut file = File::create(path)?;
    write_report(&mut file, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::SilentSink;
    use crate::vehicle::presets;

    #[test]
    fn report_without_cg_omits_stability() {
        let g = presets::mini_magg().geometry;
        let calc = CopCalculator::with_sink(&g, &SilentSink);
        let report = CopReport::build("Mini-Magg", &calc, None).unwrap();
        assert!(report.stability.is_none());
        assert_eq!(report.components.len(), 3);
        assert_eq!(report.net_cop, calc.net_cop().unwrap());

        let mut buf = Vec::new();
        write_report(&mut buf, &report).unwrap();
        let json = String::from_utf8(buf).unwrap();
        assert!(json.contains("\"net_cop\""));
        assert!(json.contains("\"Mini-Magg\""));
        assert!(!json.contains("\"stability\""));
    }

    #[test]
    fn report_with_cg_is_parseable() {
        let g = presets::mini_magg().geometry;
        let calc = CopCalculator::with_sink(&g, &SilentSink);
        let report = CopReport::build("Mini-Magg", &calc, Some(18.0)).unwrap();
        assert_eq!(report.is_stable(), Some(true));

        let mut buf = Vec::new();
        write_report(&mut buf, &report).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(v["stability"]["verdict"], "STABLE");
        assert_eq!(v["geometry"]["nose_type"], "ogive");
    }

    #[test]
    fn report_file_round_trips_through_disk() {
        let g = presets::expediter().geometry;
        let calc = CopCalculator::with_sink(&g, &SilentSink);
        let report = CopReport::build("Expediter", &calc, Some(80.0)).unwrap();

        let path = std::env::temp_dir().join(format!("rocket-cop-report-{}.json", std::process::id()));
        write_report_file(&path, &report).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let v: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(v["name"], "Expediter");
        assert_eq!(v["components"].as_array().map(Vec::len), Some(3));
        assert_eq!(v["net_cop"].as_f64(), Some(report.net_cop));
    }

    #[test]
    fn extras_are_listed_in_the_report() {
        let g = presets::mini_magg().geometry;
        let extras = [ComponentContribution {
            component: crate::physics::Component::Fairing,
            cn: 0.5,
            x: 8.0,
        }];
        let calc = CopCalculator::with_sink(&g, &SilentSink).with_extras(&extras);
        let report = CopReport::build("Mini-Magg", &calc, None).unwrap();
        assert_eq!(report.components.len(), 4);
        assert_eq!(report.components[3].component, "fairing");
        assert_eq!(report.net_cop, calc.net_cop().unwrap());
    }
}

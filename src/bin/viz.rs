use eframe::egui;
use egui_plot::{Line, Plot, Points, VLine};

use rocket_cop::io::load_geometry_file;
use rocket_cop::vehicle::{presets, side_profile, Profile, RocketGeometry};
use rocket_cop::{error, CopCalculator};

// Usage: rocket-viz [preset-name | config.json] [cg]
fn main() -> eframe::Result {
    let mut args = std::env::args().skip(1);
    let source = args.next().unwrap_or_else(|| "mini-magg".to_string());
    let cg = args.next().and_then(|s| s.parse::<f64>().ok());

    let (name, geometry, extras) = match presets::by_name(&source) {
        Some(p) => (p.name.to_string(), p.geometry, Vec::new()),
        None => match load_geometry_file(&source) {
            Ok(loaded) => (loaded.name, loaded.geometry, loaded.extras),
            Err(e) => {
                error!("Cannot load '{}': {}", source, e);
                std::process::exit(1);
            }
        },
    };

    let cop = match CopCalculator::new(&geometry).with_extras(&extras).net_cop() {
        Ok(x) => x,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let app = CopViz { name, profile: side_profile(&geometry, 80), geometry, cop, cg };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 500.0]),
        ..Default::default()
    };
    eframe::run_native("Rocket Center of Pressure", options, Box::new(|_| Ok(Box::new(app))))
}

struct CopViz {
    name: String,
    geometry: RocketGeometry,
    profile: Profile,
    cop: f64,
    cg: Option<f64>,
}

fn to_plot(points: &[nalgebra::Point2<f64>]) -> Vec<[f64; 2]> {
    points.iter().map(|p| [p.x, p.y]).collect()
}

impl eframe::App for CopViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading(format!("Rocket: {}", self.name));
            let mut line = format!(
                "COP: {:.3} from nose tip  |  Length: {:.3}  |  Diameter: {:.3}",
                self.cop,
                self.profile.length(),
                self.geometry.d,
            );
            if let Some(cg) = self.cg {
                line.push_str(&format!(
                    "  |  CG: {:.3}  |  Margin: {:.2} cal",
                    cg,
                    (self.cop - cg) / self.geometry.d
                ));
            }
            ui.label(line);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            Plot::new("profile")
                .x_axis_label("Distance from nose tip")
                .data_aspect(1.0)
                .show(ui, |plot_ui| {
                    plot_ui.line(Line::new("Body", to_plot(&self.profile.body)));
                    plot_ui.line(Line::new("Body (lower)", to_plot(&self.profile.mirrored_body())));
                    if !self.profile.fin.is_empty() {
                        plot_ui.line(Line::new("Fin", to_plot(&self.profile.fin)));
                        plot_ui.line(Line::new("Fin (lower)", to_plot(&self.profile.mirrored_fin())));
                    }
                    plot_ui.vline(VLine::new("COP", self.cop));
                    plot_ui.points(Points::new("COP marker", vec![[self.cop, 0.0]]).radius(6.0));
                    if let Some(cg) = self.cg {
                        plot_ui.vline(VLine::new("CG", cg));
                    }
                });
        });
    }
}

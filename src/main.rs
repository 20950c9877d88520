use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use rocket_cop::io::{csv, json, load_geometry_file, CopReport};
use rocket_cop::physics::barrowman::NOSE_CN;
use rocket_cop::vehicle::{presets, side_profile, RocketGeometry};
use rocket_cop::{error, info, CopCalculator, CopError};

#[derive(Parser)]
#[command(name = "rocket-cop")]
#[command(version)]
#[command(about = "Barrowman center-of-pressure calculator for subsonic model rockets", long_about = None)]
struct Cli {
    /// Rocket configuration file (JSON component list or flat parameters)
    #[arg(short = 'c', long, conflicts_with = "preset")]
    config: Option<String>,

    /// Built-in kit rocket (mini-magg, hi-tech-h45, expediter)
    #[arg(short = 'p', long, default_value = "mini-magg")]
    preset: String,

    /// Measured center of gravity, from the nose tip, in the geometry's unit
    #[arg(long)]
    cg: Option<f64>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Write the side outline as CSV to this path
    #[arg(long)]
    profile_csv: Option<String>,

    /// Also write the JSON report to this path
    #[arg(long)]
    report: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), CopError> {
    let (name, geometry, extras, published) = match &cli.config {
        Some(path) => {
            let loaded = load_geometry_file(path)?;
            (loaded.name, loaded.geometry, loaded.extras, None)
        }
        None => {
            let preset = presets::by_name(&cli.preset).ok_or_else(|| {
                CopError::invalid(format!("unknown preset '{}'", cli.preset))
            })?;
            (preset.name.to_string(), preset.geometry, Vec::new(), Some(preset.published_cop))
        }
    };

    let calc = CopCalculator::new(&geometry).with_extras(&extras);
    let report = CopReport::build(&name, &calc, cli.cg)?;

    match cli.format {
        OutputFormat::Json => json::write_report(&mut std::io::stdout().lock(), &report)?,
        OutputFormat::Table => print_table(&geometry, &report, published),
    }

    if let Some(path) = &cli.report {
        json::write_report_file(path, &report)?;
        info!("Exported report: {}", path);
    }

    if let Some(path) = &cli.profile_csv {
        csv::write_profile_file(path, &side_profile(&geometry, 50))?;
        info!("Exported profile: {}", path);
    }

    Ok(())
}

fn print_table(g: &RocketGeometry, report: &CopReport, published: Option<f64>) {
    println!();
    println!("====================================================================");
    println!("  CENTER OF PRESSURE — {}", report.name);
    println!("====================================================================");
    println!();
    println!("  Geometry");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Nose:        {:>8}      Ln: {:>9.3}     d:  {:>9.3}",
        g.nose_type.to_string(), g.ln, g.d
    );
    if g.has_transition() {
        println!(
            "  Transition:  dF: {:>7.3}   dR: {:>9.3}     Lt: {:>9.3}   Xp: {:>8.3}",
            g.d_f, g.d_r, g.lt, g.xp
        );
    } else {
        println!("  Transition:  none");
    }
    if g.has_fins() {
        println!(
            "  Fins:        N:  {:>7}   CR: {:>9.3}     CT: {:>9.3}   S:  {:>8.3}",
            g.n, g.cr, g.ct, g.s
        );
        println!(
            "               XR: {:>7.3}   XB: {:>9.3}     LF: {:>9.3}   R:  {:>8.3}",
            g.xr, g.xb, g.lf, g.r
        );
    } else {
        println!("  Fins:        none");
    }
    println!();

    println!("  Component Contributions");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!("  {:<12} {:>12} {:>12}", "component", "Cn_alpha", "x_cp");
    println!("  {}", "─".repeat(38));
    for c in &report.components {
        if c.cn == 0.0 {
            println!("  {:<12} {:>12} {:>12}", c.component, "—", "—");
        } else {
            println!("  {:<12} {:>12.4} {:>12.4}", c.component, c.cn, c.x);
        }
    }
    let total: f64 = report.components.iter().map(|c| c.cn).sum();
    println!("  {}", "─".repeat(38));
    println!("  {:<12} {:>12.4}   (nose fixed at {:.1})", "total", total, NOSE_CN);
    println!();

    println!("  Result");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!("  Net COP:       {:>10.4} from nose tip", report.net_cop);
    if let Some(reference) = published {
        let err = (report.net_cop - reference) / reference * 100.0;
        println!("  Published COP: {:>10.4}   ({:+.2}%)", reference, err);
    }
    if let Some(s) = &report.stability {
        println!("  CG:            {:>10.4}", s.cg);
        println!(
            "  Margin:        {:>10.2} cal   {}",
            s.margin_calibers, s.verdict
        );
    }
    println!("====================================================================");
    println!();
}

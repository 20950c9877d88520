pub mod config;
pub mod csv;
pub mod json;

pub use config::{load_geometry_file, mm_to_m, RocketConfig};
pub use json::CopReport;

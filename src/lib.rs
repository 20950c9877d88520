pub mod logger;
pub mod error;
pub mod diagnostics;
pub mod physics;
pub mod vehicle;
pub mod io;

pub use error::{CopError, Result};
pub use physics::{CopCalculator, Stability};
pub use vehicle::{NoseType, RocketGeometry, RocketGeometryBuilder};

// Shorter paths for the calculator entry points
pub mod barrowman {
    pub use crate::physics::barrowman::*;
}

pub mod presets {
    pub use crate::vehicle::presets::*;
}

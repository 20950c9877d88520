pub mod geometry;
pub mod presets;
pub mod profile;

pub use geometry::{NoseType, RocketGeometry, RocketGeometryBuilder};
pub use presets::Preset;
pub use profile::{side_profile, Profile};

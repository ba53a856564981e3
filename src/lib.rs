pub mod catalog;
pub mod constants;
pub mod kepler;
pub mod orbit_type;
pub mod orbital_plane;
pub mod orrery;
pub mod orrery_errors;
pub mod propagator;
pub mod ref_system;
pub mod time;

pub use catalog::{BodyCatalog, BodyId};
pub use orbit_type::OrbitalElementSet;
pub use orrery::Orrery;
pub use orrery_errors::OrreryError;
pub use propagator::{compute_position, try_compute_position, PositionVector};

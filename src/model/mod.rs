pub mod focus;
pub mod lighting;
pub mod orrery;
pub mod rings;
pub mod run_loop;
pub mod satellite;
pub mod state;
pub mod visual;

pub use focus::{FocusState, FollowStyle};
pub use lighting::{LightRig, LightSource, LightingMode, DEFAULT_STUDIO_FROM};
pub use orrery::{Body, BodyInfo, Orrery, OrreryError};
pub use rings::RingSet;
pub use run_loop::{CancelToken, RunLoop};
pub use satellite::{SatelliteInfo, SATELLITE_SCALE};
pub use state::{CameraCommand, Command, Reaction, SimulationState, ViewMode};
pub use visual::Visual;

pub mod config;
pub mod constants;
pub mod error;
pub mod focus;
pub mod foliage;
pub mod integrator;
pub mod layout;
pub mod mode;
pub mod profile;
pub mod repulsion;
pub mod scene;
pub mod state;
pub static FOLIAGE_WGSL: &str = include_str!("../shaders/foliage.wgsl");

pub use config::*;
pub use error::*;
pub use focus::*;
pub use foliage::{FoliagePoint, FoliageUniforms, FoliageVertex, PointerSmoother};
pub use integrator::*;
pub use layout::*;
pub use mode::*;
pub use profile::*;
pub use repulsion::*;
pub use scene::*;
pub use state::*;

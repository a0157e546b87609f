pub mod camera;
pub mod config;
pub mod constants;
pub mod error;
pub mod materials;
pub mod math;
pub mod orbit;
pub mod pulse;
pub mod scene;
pub mod session;
pub mod transition;
pub mod views;

pub use camera::*;
pub use config::*;
pub use constants::*;
pub use error::*;
pub use materials::*;
pub use math::*;
pub use orbit::*;
pub use pulse::*;
pub use scene::*;
pub use session::*;
pub use transition::*;
pub use views::*;

pub mod scene;
pub mod seed;

pub use scene::Scene;

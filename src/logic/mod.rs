pub mod date_cursor;
pub mod recommendation;
pub mod simulation;
pub mod weather;

pub use recommendation::RecommendationEngine;
pub use simulation::SimulationRun;
pub use weather::{JitterSource, UniformJitter};

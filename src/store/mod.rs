pub mod format;
pub mod log;

pub use format::{write_blocks, DateLine};
pub use log::SimulationLog;

pub mod plant;
pub mod record;
pub mod reference;
pub mod time_slot;

pub use plant::*;
pub use record::*;
pub use reference::*;
pub use time_slot::*;

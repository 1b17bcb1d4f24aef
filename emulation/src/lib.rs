mod emulation;
mod pool;
mod replan;

pub use emulation::{Emulation, EmulationError, EmulationState};
pub use pool::EmulationPool;
pub use replan::{ReplanDriver, StepPolicy};

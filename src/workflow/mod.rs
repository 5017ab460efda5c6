pub mod allocation_ctx;
pub mod by_difficulty;
pub mod global_cross;
pub mod strategy;

pub use allocation_ctx::{AllocationCtx, AllocationWarning, WarningScope};
pub use strategy::Strategy;

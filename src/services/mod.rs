pub mod bin_filler;
pub mod cost;
pub mod pool_filter;
pub mod ratio;
pub mod stats;

pub use cost::{total_cost, Pick};
pub use pool_filter::PoolFilter;
pub use ratio::distribute;
pub use stats::{summarize, PoolStats};

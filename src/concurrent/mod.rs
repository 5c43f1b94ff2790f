//! Concurrency primitives: guarded cells, a lazily-populated cell map, and
//! the fixed-size worker pool the search fans out over.

pub mod cell_map;
pub mod guarded;
pub mod worker_pool;


pub use cell_map::CellMap;
pub use guarded::Guarded;
pub use worker_pool::{PoolError, TaskHandle, WorkerPool};

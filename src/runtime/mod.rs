//! Runtime adapters.

pub mod tokio_spawner;

pub use crate::core::Spawn;
pub use tokio_spawner::TokioSpawner;

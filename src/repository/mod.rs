//! Persistence for per-actor combat state.
//!
//! [`CombatRepository`] is the seam to the host's document store. Two
//! implementations ship with the crate:
//!
//! - [`InMemoryRepository`]: bincode snapshots in a `RwLock`ed map
//! - [`JsonDirRepository`]: one JSON file per actor

mod error;
mod json_dir;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use json_dir::JsonDirRepository;
pub use memory::InMemoryRepository;
pub use traits::CombatRepository;

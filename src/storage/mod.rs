//! Storage boundary: repository traits and the in-memory backend.

pub mod memory;
pub mod traits;

pub use memory::{
    MemoryInfractionStore, MemoryPlayerDirectory, MemoryServerDirectory, MemoryUserDirectory,
};
pub use traits::InfractionRepository;

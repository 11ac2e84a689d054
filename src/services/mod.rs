// Service exports
pub mod memory;
pub mod registry;
pub mod seed;

pub use memory::InMemoryRegistry;
pub use registry::{Registry, RegistryError, RegistryResult};
pub use seed::{SeedData, SeedError};

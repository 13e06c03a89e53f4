mod in_memory;
mod repository;

pub use in_memory::InMemoryRepository;
pub use repository::{Change, Entity, Repository, RepositoryError};

use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

/// A change applied to a stored entity in place.
pub type Change<T> = Box<dyn FnOnce(&mut T) + Send>;

/// A stored record with a stable identifier.
pub trait Entity: Clone + Debug + Send + Sync + 'static {
    fn id(&self) -> &str;
}

/// Storage for one kind of entity. Handlers only ever see this trait so the backing store can be
/// swapped without touching them.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    async fn get(&self, id: &str) -> Option<T>;

    /// Returns all entities in insertion order.
    async fn list(&self) -> Vec<T>;

    async fn insert(&self, entity: T) -> Result<(), RepositoryError>;

    /// Applies `change` to the stored entity with `id` and returns the result. No other write can
    /// interleave with the change, so concurrent updates of different fields never undo each other.
    async fn update(&self, id: &str, change: Change<T>) -> Result<T, RepositoryError>;
}

#[derive(Error, Debug, PartialEq)]
pub enum RepositoryError {
    #[error("an entity with id '{0}' already exists")]
    DuplicateId(String),
    #[error("no entity with id '{0}'")]
    NotFound(String),
}

use crate::repository::{Change, Entity, Repository, RepositoryError};
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// A [`Repository`] that keeps its entities in memory, in insertion order.
#[derive(Debug)]
pub struct InMemoryRepository<T> {
    entities: RwLock<Vec<T>>,
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> InMemoryRepository<T> {
    pub fn new() -> Self {
        InMemoryRepository {
            entities: RwLock::new(Vec::new()),
        }
    }

    /// Creates a repository from `entities`, keeping the first entity for any duplicate id.
    pub fn with_entities(entities: Vec<T>) -> Self {
        let mut unique: Vec<T> = Vec::with_capacity(entities.len());
        for entity in entities {
            if unique.iter().any(|e| e.id() == entity.id()) {
                debug!("🔵 Skipping duplicate entity '{}'", entity.id());
                continue;
            }
            unique.push(entity);
        }

        InMemoryRepository {
            entities: RwLock::new(unique),
        }
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    async fn get(&self, id: &str) -> Option<T> {
        let read_guard = self.entities.read().await;
        read_guard.iter().find(|e| e.id() == id).cloned()
    }

    async fn list(&self) -> Vec<T> {
        self.entities.read().await.clone()
    }

    #[instrument(skip_all, fields(id = entity.id()))]
    async fn insert(&self, entity: T) -> Result<(), RepositoryError> {
        let mut write_guard = self.entities.write().await;

        if write_guard.iter().any(|e| e.id() == entity.id()) {
            return Err(RepositoryError::DuplicateId(entity.id().to_owned()));
        }

        debug!("🔵 Inserted entity '{}'", entity.id());
        write_guard.push(entity);
        Ok(())
    }

    #[instrument(skip(self, change))]
    async fn update(&self, id: &str, change: Change<T>) -> Result<T, RepositoryError> {
        let mut write_guard = self.entities.write().await;

        let Some(existing) = write_guard.iter_mut().find(|e| e.id() == id) else {
            return Err(RepositoryError::NotFound(id.to_owned()));
        };

        change(existing);
        debug!("🔵 Updated entity '{}'", id);
        Ok(existing.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    #[derive(Clone, PartialEq, Debug)]
    struct Note {
        id: String,
        text: String,
    }

    impl Entity for Note {
        fn id(&self) -> &str {
            &self.id
        }
    }

    fn note(id: &str, text: &str) -> Note {
        Note {
            id: id.to_string(),
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn list_returns_entities_in_insertion_order() -> Result<(), RepositoryError> {
        let repository = InMemoryRepository::new();
        repository.insert(note("b", "second letter")).await?;
        repository.insert(note("a", "first letter")).await?;

        let ids = repository.list().await.into_iter().map(|n| n.id).collect::<Vec<_>>();

        assert_eq!(ids, vec!["b", "a"]);
        Ok(())
    }

    #[tokio::test]
    async fn get_returns_the_entity_with_the_given_id() {
        let repository = InMemoryRepository::with_entities(vec![note("a", "one"), note("b", "two")]);

        assert_eq!(repository.get("b").await, Some(note("b", "two")));
        assert_eq!(repository.get("c").await, None);
    }

    #[tokio::test]
    async fn insert_rejects_a_duplicate_id() -> Result<(), RepositoryError> {
        let repository = InMemoryRepository::new();
        repository.insert(note("a", "one")).await?;

        let result = repository.insert(note("a", "other")).await;

        assert_eq!(result, Err(RepositoryError::DuplicateId("a".to_string())));
        assert_eq!(repository.get("a").await, Some(note("a", "one")));
        Ok(())
    }

    fn set_text(text: &str) -> Change<Note> {
        let text = text.to_string();
        Box::new(move |note: &mut Note| note.text = text)
    }

    #[tokio::test]
    async fn update_changes_the_stored_entity_in_place() -> Result<(), RepositoryError> {
        let repository = InMemoryRepository::with_entities(vec![note("a", "one"), note("b", "two")]);

        let updated = repository.update("a", set_text("changed")).await?;

        assert_eq!(updated, note("a", "changed"));
        assert_eq!(repository.list().await, vec![note("a", "changed"), note("b", "two")]);
        Ok(())
    }

    #[tokio::test]
    async fn update_fails_for_an_unknown_id() {
        let repository = InMemoryRepository::<Note>::new();

        let result = repository.update("x", set_text("missing")).await;

        assert_eq!(result, Err(RepositoryError::NotFound("x".to_string())));
    }

    #[test_log::test(tokio::test(flavor = "multi_thread", worker_threads = 4))]
    async fn concurrent_updates_never_overwrite_each_other() -> Result<(), RepositoryError> {
        let repository: Arc<dyn Repository<Note>> = Arc::new(InMemoryRepository::with_entities(vec![note("a", "")]));

        let handles = (0..64)
            .map(|_| {
                let repository = repository.clone();
                tokio::spawn(async move { repository.update("a", Box::new(|note: &mut Note| note.text.push('x'))).await })
            })
            .collect::<Vec<_>>();
        for handle in handles {
            handle.await.expect("update task panicked")?;
        }

        let stored = repository.get("a").await.expect("note 'a' is missing");
        assert_eq!(stored.text.len(), 64);
        Ok(())
    }

    #[test]
    fn with_entities_keeps_the_first_of_duplicate_ids() {
        let repository = InMemoryRepository::with_entities(vec![note("a", "first"), note("a", "second")]);

        assert_eq!(repository.entities.into_inner(), vec![note("a", "first")]);
    }

    #[tokio::test]
    async fn works_behind_a_shared_trait_object() -> Result<(), RepositoryError> {
        let repository: Arc<dyn Repository<Note>> = Arc::new(InMemoryRepository::new());

        let handles = (0..8)
            .map(|i| {
                let repository = repository.clone();
                tokio::spawn(async move { repository.insert(note(&i.to_string(), "concurrent")).await })
            })
            .collect::<Vec<_>>();
        for handle in handles {
            handle.await.expect("insert task panicked")?;
        }

        assert_eq!(repository.list().await.len(), 8);
        Ok(())
    }
}

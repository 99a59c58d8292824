//! In-memory post repository.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use posts_core::domain::{NewPost, Post, PostId};
use posts_core::error::RepoError;
use posts_core::ports::{BaseRepository, PostRepository};

#[derive(Default)]
struct Table {
    rows: BTreeMap<PostId, Post>,
    last_id: PostId,
}

impl Table {
    fn insert(&mut self, post: NewPost) -> Post {
        self.last_id += 1;
        let post = post.with_id(self.last_id);
        self.rows.insert(post.id, post.clone());
        post
    }
}

/// Post repository backed by a `BTreeMap` behind an async RwLock.
///
/// Ids are assigned from a counter starting at 1 and never reused.
/// Note: Data is lost on process restart.
#[derive(Default)]
pub struct InMemoryPostRepository {
    table: RwLock<Table>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<Post, PostId> for InMemoryPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn exists_by_id(&self, id: PostId) -> Result<bool, RepoError> {
        let table = self.table.read().await;
        Ok(table.rows.contains_key(&id))
    }

    async fn save(&self, entity: Post) -> Result<Post, RepoError> {
        let mut table = self.table.write().await;
        let slot = table.rows.get_mut(&entity.id).ok_or(RepoError::NotFound)?;
        *slot = entity.clone();
        Ok(entity)
    }

    async fn delete_by_id(&self, id: PostId) -> Result<(), RepoError> {
        let mut table = self.table.write().await;
        table.rows.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError> {
        let mut table = self.table.write().await;
        Ok(table.insert(post))
    }

    async fn save_all(&self, posts: Vec<NewPost>) -> Result<Vec<Post>, RepoError> {
        // One write lock for the whole batch keeps it atomic.
        let mut table = self.table.write().await;
        Ok(posts.into_iter().map(|post| table.insert(post)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_post(content: &str) -> NewPost {
        NewPost::new(content.to_string(), None, "bob".to_string())
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = InMemoryPostRepository::new();
        let post = repo.insert(new_post("hi")).await.unwrap();

        assert_eq!(post.id, 1);
        assert_eq!(repo.find_by_id(1).await.unwrap(), Some(post));
        assert!(repo.exists_by_id(1).await.unwrap());
        assert_eq!(repo.find_by_id(2).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_replaces_existing() {
        let repo = InMemoryPostRepository::new();
        let mut post = repo.insert(new_post("hi")).await.unwrap();
        post.content = "bye".to_string();

        repo.save(post).await.unwrap();

        let stored = repo.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(stored.content, "bye");
    }

    #[tokio::test]
    async fn test_save_missing_is_not_found() {
        let repo = InMemoryPostRepository::new();
        let ghost = new_post("ghost").with_id(9);

        let err = repo.save(ghost).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound));
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_all_assigns_distinct_ids() {
        let repo = InMemoryPostRepository::new();
        let posts = repo
            .save_all(vec![new_post("a"), new_post("b"), new_post("c")])
            .await
            .unwrap();

        let ids: Vec<PostId> = posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(repo.find_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_delete_then_ids_are_not_reused() {
        let repo = InMemoryPostRepository::new();
        repo.insert(new_post("a")).await.unwrap();

        repo.delete_by_id(1).await.unwrap();
        assert!(matches!(
            repo.delete_by_id(1).await.unwrap_err(),
            RepoError::NotFound
        ));

        let next = repo.insert(new_post("b")).await.unwrap();
        assert_eq!(next.id, 2);
    }
}

use async_trait::async_trait;

use crate::domain::{NewPost, Post, PostId};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Fetch every stored entity.
    async fn find_all(&self) -> Result<Vec<T>, RepoError>;

    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Check whether an entity with this ID exists.
    async fn exists_by_id(&self, id: ID) -> Result<bool, RepoError>;

    /// Replace an existing entity. Fails with `NotFound` if it is not stored.
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Fails with `NotFound` if nothing was removed.
    async fn delete_by_id(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, PostId> {
    /// Insert a new post and return it with its assigned id.
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Insert a batch of posts. Either every post is stored or none is.
    async fn save_all(&self, posts: Vec<NewPost>) -> Result<Vec<Post>, RepoError>;
}

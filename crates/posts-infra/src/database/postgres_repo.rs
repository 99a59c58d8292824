//! PostgreSQL post repository.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, TransactionTrait};

use posts_core::domain::{NewPost, Post};
use posts_core::error::RepoError;
use posts_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError> {
        let active_model: post::ActiveModel = post.into();
        let model = active_model.insert(&self.db).await.map_err(map_db_err)?;

        tracing::debug!(post_id = model.id, "Post inserted");
        Ok(model.into())
    }

    async fn save_all(&self, posts: Vec<NewPost>) -> Result<Vec<Post>, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let mut saved = Vec::with_capacity(posts.len());
        for post in posts {
            let active_model: post::ActiveModel = post.into();
            // Dropping the transaction on error rolls it back.
            let model = active_model.insert(&txn).await.map_err(map_db_err)?;
            saved.push(model.into());
        }

        txn.commit().await.map_err(map_db_err)?;

        tracing::debug!(count = saved.len(), "Post batch inserted");
        Ok(saved)
    }
}

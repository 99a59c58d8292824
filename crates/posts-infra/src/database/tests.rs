use chrono::Utc;
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};

use crate::database::entity::post;
use crate::database::postgres_repo::PostgresPostRepository;
use posts_core::domain::{NewPost, Post};
use posts_core::error::RepoError;
use posts_core::ports::{BaseRepository, PostRepository};

fn model(id: i64, content: &str) -> post::Model {
    let now = Utc::now();
    post::Model {
        id,
        content: content.to_owned(),
        image_url: None,
        author: "bob".to_owned(),
        created_at: now.into(),
        updated_at: now.into(),
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model(7, "Content")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(7).await.unwrap();

    let post = result.expect("post should be found");
    assert_eq!(post.id, 7);
    assert_eq!(post.content, "Content");
    assert_eq!(post.created_at, post.updated_at);
}

#[tokio::test]
async fn test_find_all_returns_every_row() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model(1, "first"), model(2, "second")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let posts: Vec<Post> = repo.find_all().await.unwrap();

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].content, "first");
    assert_eq!(posts[1].id, 2);
}

#[tokio::test]
async fn test_exists_by_id_false_for_missing_row() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let exists = BaseRepository::<Post, i64>::exists_by_id(&repo, 999)
        .await
        .unwrap();
    assert!(!exists);
}

#[tokio::test]
async fn test_insert_returns_assigned_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model(1, "hi")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let post = repo
        .insert(NewPost::new("hi".to_string(), None, "bob".to_string()))
        .await
        .unwrap();

    assert_eq!(post.id, 1);
    assert_eq!(post.content, "hi");
    assert_eq!(post.image_url, None);
}

#[tokio::test]
async fn test_save_all_inserts_inside_transaction() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model(1, "a")], vec![model(2, "b")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let posts = repo
        .save_all(vec![
            NewPost::new("a".to_string(), None, "bob".to_string()),
            NewPost::new("b".to_string(), None, "bob".to_string()),
        ])
        .await
        .unwrap();

    assert_eq!(posts.len(), 2);
    assert_ne!(posts[0].id, posts[1].id);
}

#[tokio::test]
async fn test_save_all_failure_rolls_back_batch() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model(1, "a")]])
        .append_query_errors([DbErr::Custom("value too long".to_owned())])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let result = repo
        .save_all(vec![
            NewPost::new("a".to_string(), None, "bob".to_string()),
            NewPost::new("b".to_string(), None, "bob".to_string()),
        ])
        .await;

    assert!(matches!(result, Err(RepoError::Query(_))));

    let log = format!("{:?}", repo.db.into_transaction_log());
    assert!(!log.contains("COMMIT"));
}

#[tokio::test]
async fn test_save_missing_row_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let ghost: Post = model(42, "ghost").into();

    let err = repo.save(ghost).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound));
}

#[tokio::test]
async fn test_delete_missing_row_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let err = BaseRepository::<Post, i64>::delete_by_id(&repo, 999)
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound));
}

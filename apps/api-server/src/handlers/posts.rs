//! Post CRUD handlers.

use actix_web::{HttpResponse, web};

use posts_core::DomainError;
use posts_core::domain::{NewPost, Post, PostChanges, PostId};
use posts_core::ports::{BaseRepository, PostRepository};
use posts_shared::dto::{CreatePostRequest, PostResponse, UpdatePostRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::observability::RequestId;
use crate::state::AppState;

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        content: post.content,
        image_url: post.image_url,
        author: post.author,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

fn to_new_post(req: CreatePostRequest) -> NewPost {
    NewPost::new(req.content, req.image_url, req.author)
}

/// GET /api/posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.find_all().await?;
    let body: Vec<PostResponse> = posts.into_iter().map(to_response).collect();

    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<PostId>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::post_not_found(id))?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let post = state.posts.insert(to_new_post(body.into_inner())).await?;
    tracing::info!(post_id = post.id, "Post created");

    Ok(HttpResponse::Created().json(to_response(post)))
}

/// POST /api/posts/bulk
///
/// The batch is stored all-or-nothing. Store failures are reported as a
/// generic 500 without saying which post failed.
pub async fn bulk_create_posts(
    state: web::Data<AppState>,
    request_id: RequestId,
    body: web::Json<Option<Vec<CreatePostRequest>>>,
) -> AppResult<HttpResponse> {
    let requests = body.into_inner().unwrap_or_default();
    if requests.is_empty() {
        return Err(DomainError::Validation("Post list must not be empty".to_string()).into());
    }

    let new_posts: Vec<NewPost> = requests.into_iter().map(to_new_post).collect();
    let posts = state.posts.save_all(new_posts).await.map_err(|e| {
        tracing::error!(request_id = %request_id.as_str(), error = %e, "Bulk create failed");
        AppError::Internal("Failed to create posts".to_string())
    })?;
    tracing::info!(count = posts.len(), "Posts created in bulk");

    let body: Vec<PostResponse> = posts.into_iter().map(to_response).collect();
    Ok(HttpResponse::Created().json(body))
}

/// PUT /api/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<PostId>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let mut post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::post_not_found(id))?;

    let req = body.into_inner();
    post.apply(PostChanges {
        content: req.content,
        image_url: req.image_url,
        author: req.author,
    });

    let updated = state.posts.save(post).await?;
    tracing::info!(post_id = id, "Post updated");

    Ok(HttpResponse::Ok().json(to_response(updated)))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<PostId>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    if !state.posts.exists_by_id(id).await? {
        return Err(DomainError::post_not_found(id).into());
    }

    state.posts.delete_by_id(id).await?;
    tracing::info!(post_id = id, "Post deleted");

    Ok(HttpResponse::NoContent().finish())
}

//! Post handlers.

use actix_web::{HttpResponse, web};

use quill_core::domain::Post;
use quill_shared::MessageResponse;
use quill_shared::dto::{CreatePostRequest, PostResponse};

use crate::middleware::api_key::AdminAccess;
use crate::middleware::error::AppResult;
use crate::state::AppState;

const PUBLISHED_MESSAGE: &str = "Post published and site rebuilding!";

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        content: post.content,
    }
}

/// GET /api/posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list().await?;
    let body: Vec<PostResponse> = posts.into_iter().map(to_response).collect();

    Ok(HttpResponse::Ok().json(body))
}

/// POST /api/posts - Protected by `X-API-Key`
///
/// Responds once the post is stored and the rebuild webhook has been attempted.
/// The webhook outcome does not change the response.
pub async fn create_post(
    state: web::Data<AppState>,
    _admin: AdminAccess,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let published = state.posts.publish(req.title, req.content).await?;
    tracing::info!(
        post_id = published.post.id,
        notify = ?published.notify,
        "Post published"
    );

    Ok(HttpResponse::Ok().json(MessageResponse::new(PUBLISHED_MESSAGE)))
}

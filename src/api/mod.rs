// HTTP facade - the call surface the presentation layer consumes. Route
// parameters are parsed into typed ids here, once, at the system edge;
// everything below this layer is typed.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    app_state::AppState,
    core::{CommentId, PostId, UserId},
    error::AppResult,
    models::{
        Comment, CommentPatch, FollowEdge, NewComment, NewPost, NewUser, Post, PostPatch, User,
        UserPatch,
    },
    repo::Repository,
};

#[derive(Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FollowRequest {
    follower_id: UserId,
    following_id: UserId,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LikeRequest {
    viewer_id: UserId,
}

// User handlers

async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    Ok(Json(state.users.list().await?))
}

async fn current_user(State(state): State<AppState>) -> AppResult<Json<User>> {
    Ok(Json(state.users.current_user().await?))
}

async fn search_users(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<User>>> {
    Ok(Json(state.users.search(&query.q).await?))
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> AppResult<Json<User>> {
    Ok(Json(state.users.get_by_id(id).await?))
}

async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<NewUser>,
) -> AppResult<Json<User>> {
    Ok(Json(state.users.create(payload).await?))
}

async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    Json(patch): Json<UserPatch>,
) -> AppResult<Json<User>> {
    Ok(Json(state.users.update(id, patch).await?))
}

async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> AppResult<Json<User>> {
    Ok(Json(state.users.delete(id).await?))
}

async fn user_posts(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> AppResult<Json<Vec<Post>>> {
    Ok(Json(state.posts.by_user(id).await?))
}

/// The viewer's home feed: posts from followed users, newest first.
async fn user_feed(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> AppResult<Json<Vec<Post>>> {
    let following = state.relationships.following_ids(id).await?;
    Ok(Json(state.posts.feed(&following).await?))
}

async fn user_followers(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> AppResult<Json<Vec<FollowEdge>>> {
    Ok(Json(state.relationships.followers(id).await?))
}

async fn user_following(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> AppResult<Json<Vec<FollowEdge>>> {
    Ok(Json(state.relationships.following(id).await?))
}

// Follow handlers

async fn create_follow(
    State(state): State<AppState>,
    Json(req): Json<FollowRequest>,
) -> AppResult<Json<FollowEdge>> {
    Ok(Json(
        state
            .relationships
            .follow(req.follower_id, req.following_id)
            .await?,
    ))
}

async fn delete_follow(
    State(state): State<AppState>,
    Path((follower_id, following_id)): Path<(UserId, UserId)>,
) -> AppResult<Json<FollowEdge>> {
    Ok(Json(
        state
            .relationships
            .unfollow(follower_id, following_id)
            .await?,
    ))
}

async fn check_follow(
    State(state): State<AppState>,
    Path((follower_id, following_id)): Path<(UserId, UserId)>,
) -> AppResult<Json<Value>> {
    let following = state
        .relationships
        .is_following(follower_id, following_id)
        .await?;
    Ok(Json(json!({ "following": following })))
}

// Post handlers

async fn list_posts(State(state): State<AppState>) -> AppResult<Json<Vec<Post>>> {
    Ok(Json(state.posts.list().await?))
}

async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<PostId>,
) -> AppResult<Json<Post>> {
    Ok(Json(state.posts.get_by_id(id).await?))
}

async fn create_post(
    State(state): State<AppState>,
    Json(payload): Json<NewPost>,
) -> AppResult<Json<Post>> {
    Ok(Json(state.posts.create(payload).await?))
}

async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<PostId>,
    Json(patch): Json<PostPatch>,
) -> AppResult<Json<Post>> {
    Ok(Json(state.posts.update(id, patch).await?))
}

async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<PostId>,
) -> AppResult<Json<Post>> {
    Ok(Json(state.posts.delete(id).await?))
}

async fn toggle_post_like(
    State(state): State<AppState>,
    Path(id): Path<PostId>,
    Json(req): Json<LikeRequest>,
) -> AppResult<Json<Post>> {
    Ok(Json(state.engagement.toggle_like(id, req.viewer_id).await?))
}

async fn post_comments(
    State(state): State<AppState>,
    Path(id): Path<PostId>,
) -> AppResult<Json<Vec<Comment>>> {
    Ok(Json(state.comments.by_post(id).await?))
}

// Comment handlers

async fn create_comment(
    State(state): State<AppState>,
    Json(payload): Json<NewComment>,
) -> AppResult<Json<Comment>> {
    Ok(Json(state.comments.create(payload).await?))
}

async fn get_comment(
    State(state): State<AppState>,
    Path(id): Path<CommentId>,
) -> AppResult<Json<Comment>> {
    Ok(Json(state.comments.get_by_id(id).await?))
}

async fn update_comment(
    State(state): State<AppState>,
    Path(id): Path<CommentId>,
    Json(patch): Json<CommentPatch>,
) -> AppResult<Json<Comment>> {
    Ok(Json(state.comments.update(id, patch).await?))
}

async fn delete_comment(
    State(state): State<AppState>,
    Path(id): Path<CommentId>,
) -> AppResult<Json<Comment>> {
    Ok(Json(state.comments.delete(id).await?))
}

async fn like_comment(
    State(state): State<AppState>,
    Path(id): Path<CommentId>,
) -> AppResult<Json<Comment>> {
    Ok(Json(state.engagement.like_comment(id).await?))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/me", get(current_user))
        .route("/users", get(list_users).post(create_user))
        .route("/users/search", get(search_users))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/users/{id}/posts", get(user_posts))
        .route("/users/{id}/feed", get(user_feed))
        .route("/users/{id}/followers", get(user_followers))
        .route("/users/{id}/following", get(user_following))
        .route("/follows", post(create_follow))
        .route(
            "/follows/{follower_id}/{following_id}",
            get(check_follow).delete(delete_follow),
        )
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/{id}",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route("/posts/{id}/like", post(toggle_post_like))
        .route("/posts/{id}/comments", get(post_comments))
        .route("/comments", post(create_comment))
        .route(
            "/comments/{id}",
            get(get_comment).put(update_comment).delete(delete_comment),
        )
        .route("/comments/{id}/like", post(like_comment))
        .with_state(state)
}

use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form,
};
use tracing::info;

pub mod request;
pub mod response;

use crate::response::{ApiResponse, IntoApiResponse};
use crate::{ApiError, ApiState};

use self::request::PostForm;
use self::response::{GetPostResponse, GetPostsResponse, Post};

/// List all posts
pub async fn get_posts(
    State(state): State<ApiState>,
) -> ApiResponse<Html<String>> {
    let posts = state
        .repo
        .post
        .find_all()
        .await
        .into_response("find all posts")?;

    state.views.render(
        "index.html",
        &GetPostsResponse {
            posts: posts.into_iter().map(Post::from).collect(),
        },
    )
}

/// Form for a new post
pub async fn new_post(
    State(state): State<ApiState>,
) -> ApiResponse<Html<String>> {
    state.views.render_page("new.html")
}

pub async fn create_post(
    State(state): State<ApiState>,
    Form(form): Form<PostForm>,
) -> ApiResponse<Redirect> {
    let post = state
        .repo
        .post
        .create(form.title, form.content)
        .await
        .into_response("create post")?;

    info!(task = "create post", id = %post.id);

    Ok(Redirect::to("/"))
}

/// Show a post
pub async fn get_post(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResponse<Html<String>> {
    let post = find_post(&state, &id).await?;

    state.views.render("show.html", &GetPostResponse { post })
}

/// Form for editing a post
pub async fn edit_post(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResponse<Html<String>> {
    let post = find_post(&state, &id).await?;

    state.views.render("edit.html", &GetPostResponse { post })
}

pub async fn update_post(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Form(form): Form<PostForm>,
) -> ApiResponse<Redirect> {
    let post = state
        .repo
        .post
        .update_by_id(&id, form.title, form.content)
        .await
        .into_response("update post")?;

    let Some(post) = post else {
        return Err(ApiError::NotFound);
    };

    info!(task = "update post", id = %post.id);

    Ok(Redirect::to("/"))
}

pub async fn delete_post(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResponse<Redirect> {
    let post = state
        .repo
        .post
        .delete_by_id(&id)
        .await
        .into_response("delete post")?;

    let Some(post) = post else {
        return Err(ApiError::NotFound);
    };

    info!(task = "delete post", id = %post.id);

    Ok(Redirect::to("/"))
}

async fn find_post(state: &ApiState, id: &str) -> ApiResponse<Post> {
    let post = state
        .repo
        .post
        .find_by_id(id)
        .await
        .into_response("find post")?;

    post.map(Post::from).ok_or(ApiError::NotFound)
}

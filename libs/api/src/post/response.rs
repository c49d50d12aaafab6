use entity::prelude::*;
use serde::Serialize;

#[derive(Serialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: String,
}

impl From<PostEntity> for Post {
    fn from(value: PostEntity) -> Self {
        Self {
            id: value.id.to_string(),
            title: value.title,
            content: value.content,
            created_at: value.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

#[derive(Serialize)]
pub struct GetPostsResponse {
    pub posts: Vec<Post>,
}

#[derive(Serialize)]
pub struct GetPostResponse {
    pub post: Post,
}

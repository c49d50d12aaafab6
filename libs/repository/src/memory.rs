use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::post::{parse_id, PostStore};
use crate::response::Response;
use entity::prelude::*;

/// Post store kept in process memory. Posts are held in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<PostEntity>>,
}

#[async_trait]
impl PostStore for InMemoryPostRepository {
    async fn find_all(&self) -> Response<Vec<PostEntity>> {
        let posts = self.posts.read().await;

        Ok(posts.iter().rev().cloned().collect())
    }

    async fn find_by_id(&self, id: &str) -> Response<Option<PostEntity>> {
        let id = parse_id(id)?;
        let posts = self.posts.read().await;

        Ok(posts.iter().find(|post| post.id == id).cloned())
    }

    async fn create(
        &self,
        title: String,
        content: String,
    ) -> Response<PostEntity> {
        let post = PostEntity::new(title, content);
        self.posts.write().await.push(post.clone());

        Ok(post)
    }

    async fn update_by_id(
        &self,
        id: &str,
        title: String,
        content: String,
    ) -> Response<Option<PostEntity>> {
        let id = parse_id(id)?;
        let mut posts = self.posts.write().await;

        let Some(post) = posts.iter_mut().find(|post| post.id == id) else {
            return Ok(None);
        };
        post.title = title;
        post.content = content;

        Ok(Some(post.clone()))
    }

    async fn delete_by_id(&self, id: &str) -> Response<Option<PostEntity>> {
        let id = parse_id(id)?;
        let mut posts = self.posts.write().await;

        let position = posts.iter().position(|post| post.id == id);

        Ok(position.map(|index| posts.remove(index)))
    }
}

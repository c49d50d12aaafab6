use std::fmt;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait,
    QueryOrder,
};

use crate::active_models::{prelude::*, *};
use crate::response::{IntoResponse, Response};
use crate::RepositoryError;
use entity::prelude::*;

/// Storage operations on posts.
///
/// Ids arrive as raw text and are validated here; text that is not a post id
/// fails with [`RepositoryError::MalformedId`]. A missing post is `Ok(None)`,
/// never an error.
#[async_trait]
pub trait PostStore: Send + Sync + fmt::Debug {
    /// All posts, newest first.
    async fn find_all(&self) -> Response<Vec<PostEntity>>;

    async fn find_by_id(&self, id: &str) -> Response<Option<PostEntity>>;

    async fn create(
        &self,
        title: String,
        content: String,
    ) -> Response<PostEntity>;

    /// Replaces title and content, keeping id and creation time.
    async fn update_by_id(
        &self,
        id: &str,
        title: String,
        content: String,
    ) -> Response<Option<PostEntity>>;

    /// Returns the removed post.
    async fn delete_by_id(&self, id: &str) -> Response<Option<PostEntity>>;
}

pub(crate) fn parse_id(id: &str) -> Response<PostId> {
    id.parse().map_err(|source| RepositoryError::MalformedId {
        id: id.to_string(),
        source,
    })
}

#[derive(Clone, Debug)]
pub struct PostRepository {
    db: DatabaseConnection,
}

impl PostRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl TryFrom<post::Model> for PostEntity {
    type Error = RepositoryError;

    fn try_from(value: post::Model) -> Response<Self> {
        Ok(Self {
            id: parse_id(&value.id)?,
            title: value.title,
            content: value.content,
            created_at: value.created_at.and_utc(),
        })
    }
}

impl From<PostEntity> for post::ActiveModel {
    fn from(value: PostEntity) -> Self {
        Self {
            id: ActiveValue::set(value.id.to_string()),
            title: ActiveValue::set(value.title),
            content: ActiveValue::set(value.content),
            created_at: ActiveValue::set(value.created_at.naive_utc()),
        }
    }
}

impl PostRepository {
    async fn find_model(&self, id: PostId) -> Response<Option<post::Model>> {
        Post::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .into_response("in find post by id")
    }
}

#[async_trait]
impl PostStore for PostRepository {
    async fn find_all(&self) -> Response<Vec<PostEntity>> {
        let posts = Post::find()
            .order_by_desc(post::Column::CreatedAt)
            .all(&self.db)
            .await
            .into_response("in find all posts")?;

        posts.into_iter().map(PostEntity::try_from).collect()
    }

    async fn find_by_id(&self, id: &str) -> Response<Option<PostEntity>> {
        let id = parse_id(id)?;
        let post = self.find_model(id).await?;

        post.map(PostEntity::try_from).transpose()
    }

    async fn create(
        &self,
        title: String,
        content: String,
    ) -> Response<PostEntity> {
        let post = post::ActiveModel::from(PostEntity::new(title, content))
            .insert(&self.db)
            .await
            .into_response("in insert post")?;

        PostEntity::try_from(post)
    }

    async fn update_by_id(
        &self,
        id: &str,
        title: String,
        content: String,
    ) -> Response<Option<PostEntity>> {
        let id = parse_id(id)?;
        let Some(post) = self.find_model(id).await? else {
            return Ok(None);
        };

        let mut post: post::ActiveModel = post.into();
        post.title = ActiveValue::set(title);
        post.content = ActiveValue::set(content);

        // the row can disappear between the read and the write
        let post = match post.update(&self.db).await {
            Ok(post) => post,
            Err(DbErr::RecordNotUpdated) => return Ok(None),
            Err(e) => return Err(e).into_response("in update post"),
        };

        PostEntity::try_from(post).map(Some)
    }

    async fn delete_by_id(&self, id: &str) -> Response<Option<PostEntity>> {
        let id = parse_id(id)?;
        let Some(post) = self.find_model(id).await? else {
            return Ok(None);
        };

        let result = Post::delete_by_id(post.id.clone())
            .exec(&self.db)
            .await
            .into_response("in delete post")?;
        if result.rows_affected == 0 {
            return Ok(None);
        }

        PostEntity::try_from(post).map(Some)
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use sea_orm::ConnectOptions;

    use super::*;
    use crate::init_db;

    async fn repository() -> PostRepository {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1);
        let db = init_db(opt).await.unwrap();

        PostRepository::new(db)
    }

    #[tokio::test]
    async fn test_create_then_find_by_id() {
        // Arrange
        let repo = repository().await;

        // Act
        let created =
            repo.create("T".to_string(), "C".to_string()).await.unwrap();
        let found = repo.find_by_id(&created.id.to_string()).await.unwrap();

        // Assert
        let found = found.unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.title, "T");
        assert_eq!(found.content, "C");
    }

    #[tokio::test]
    async fn test_find_all_lists_created_post_once() {
        let repo = repository().await;
        assert!(repo.find_all().await.unwrap().is_empty());

        let created = repo
            .create("Hello".to_string(), "World".to_string())
            .await
            .unwrap();
        let posts = repo.find_all().await.unwrap();

        assert_eq!(posts.iter().filter(|p| p.id == created.id).count(), 1);
        assert_eq!(posts.len(), 1);
    }

    #[tokio::test]
    async fn test_find_all_is_newest_first() {
        // Arrange
        let repo = repository().await;
        let mut created = vec![];
        for i in 0..5 {
            let post =
                repo.create(i.to_string(), String::new()).await.unwrap();
            created.push(post.id);
            tokio::time::sleep(Duration::from_millis(2)).await;
        }

        // Act
        let posts = repo.find_all().await.unwrap();

        // Assert
        let ids: Vec<_> = posts.iter().map(|p| p.id).collect();
        created.reverse();
        assert_eq!(ids, created);
    }

    #[tokio::test]
    async fn test_find_missing_id_is_none() {
        let repo = repository().await;

        let found = repo.find_by_id(&PostId::generate().to_string()).await;

        assert!(matches!(found, Ok(None)));
    }

    #[tokio::test]
    async fn test_malformed_id_is_an_error() {
        let repo = repository().await;

        let found = repo.find_by_id("42").await;
        let deleted = repo.delete_by_id("42").await;

        assert!(matches!(found, Err(RepositoryError::MalformedId { .. })));
        assert!(matches!(deleted, Err(RepositoryError::MalformedId { .. })));
    }

    #[tokio::test]
    async fn test_update_keeps_id() {
        // Arrange
        let repo = repository().await;
        let created =
            repo.create("T".to_string(), "C".to_string()).await.unwrap();
        let id = created.id.to_string();

        // Act
        let updated = repo
            .update_by_id(&id, "T2".to_string(), "C2".to_string())
            .await
            .unwrap()
            .unwrap();
        let found = repo.find_by_id(&id).await.unwrap().unwrap();

        // Assert
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(found.title, "T2");
        assert_eq!(found.content, "C2");
    }

    #[tokio::test]
    async fn test_update_missing_id_is_none() {
        let repo = repository().await;

        let updated = repo
            .update_by_id(
                &PostId::generate().to_string(),
                "T".to_string(),
                "C".to_string(),
            )
            .await
            .unwrap();

        assert!(updated.is_none());
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_twice() {
        // Arrange
        let repo = repository().await;
        let created =
            repo.create("T".to_string(), "C".to_string()).await.unwrap();
        let id = created.id.to_string();

        // Act
        let first = repo.delete_by_id(&id).await.unwrap();
        let second = repo.delete_by_id(&id).await.unwrap();

        // Assert
        assert_eq!(first.map(|p| p.id), Some(created.id));
        assert!(second.is_none());
        assert!(repo.find_by_id(&id).await.unwrap().is_none());
        assert!(repo.find_all().await.unwrap().is_empty());
    }
}

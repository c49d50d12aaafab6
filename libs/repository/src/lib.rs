use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

mod active_models;
pub mod memory;
pub mod post;
mod response;

pub use memory::InMemoryPostRepository;
pub use post::{PostRepository, PostStore};
pub use response::Response;

use response::IntoResponse;

/// Handle to the post store, cloned into every request handler.
#[derive(Clone, Debug)]
pub struct Repository {
    pub post: Arc<dyn PostStore>,
}

impl Repository {
    pub fn new<S: PostStore + 'static>(store: S) -> Self {
        Self {
            post: Arc::new(store),
        }
    }

    /// A repository backed by process memory, used in place of a database.
    pub fn in_memory() -> Self {
        Self::new(InMemoryPostRepository::default())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error(
        "in sea-orm crate from unsuccessful database operations: {}: {}",
        message,
        source
    )]
    InSeaOrmDbErr {
        message: String,
        source: sea_orm::DbErr,
    },

    #[error("malformed post id {id:?}: {source}")]
    MalformedId { id: String, source: uuid::Error },
}

pub async fn init_repository(
    db_url: &str,
    max_connections: u32,
) -> Response<Repository> {
    let mut opt = ConnectOptions::new(db_url);
    opt.max_connections(max_connections)
        .min_connections(1)
        .sqlx_logging(true)
        .sqlx_logging_level(log::LevelFilter::Debug);

    let db = init_db(opt).await?;

    Ok(Repository::new(PostRepository::new(db)))
}

pub async fn init_db(opt: ConnectOptions) -> Response<DatabaseConnection> {
    let db = Database::connect(opt)
        .await
        .into_response("in database connect")?;

    Migrator::up(&db, None)
        .await
        .into_response("in migrator up")?;

    info!(task = "database ready");

    Ok(db)
}

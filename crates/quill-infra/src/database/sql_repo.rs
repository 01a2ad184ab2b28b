//! SQL post repository on top of SeaORM.

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveValue::{NotSet, Set},
    ConnectionTrait, DbBackend, DbConn, DbErr, EntityTrait, QueryTrait,
};

use quill_core::domain::{NewPost, Post, seed_post};
use quill_core::error::RepoError;
use quill_core::ports::PostRepository;

use super::connections::{DatabaseConfig, connect};
use super::decode::DecodePolicy;
use super::entity::post::{self, Entity as PostEntity};

const SQLITE_SCHEMA: &str =
    "CREATE TABLE IF NOT EXISTS Posts (Id INTEGER PRIMARY KEY, Title TEXT, Content TEXT)";

const POSTGRES_SCHEMA: &str = r#"CREATE TABLE IF NOT EXISTS "Posts" ("Id" BIGSERIAL PRIMARY KEY, "Title" TEXT, "Content" TEXT)"#;

// An explicitly inserted seed id does not advance the serial sequence.
const POSTGRES_ALIGN_SEQUENCE: &str = r#"SELECT setval(pg_get_serial_sequence('"Posts"', 'Id'), COALESCE((SELECT MAX("Id") FROM "Posts"), 1))"#;

fn map_db_err(err: DbErr) -> RepoError {
    match err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(err.to_string()),
        other => RepoError::Query(other.to_string()),
    }
}

/// Post repository backed by a pooled SeaORM connection.
///
/// The pool is safe to share; concurrent inserts interleave freely and the
/// database assigns ids.
pub struct SqlPostRepository {
    db: DbConn,
    decode: DecodePolicy,
}

impl SqlPostRepository {
    pub fn new(db: DbConn, decode: DecodePolicy) -> Self {
        Self { db, decode }
    }

    /// Connect using `config`.
    pub async fn connect(config: &DatabaseConfig, decode: DecodePolicy) -> Result<Self, RepoError> {
        config.ensure_driver()?;
        let db = connect(config)
            .await
            .map_err(|err| match map_db_err(err) {
                RepoError::Connection(msg) => RepoError::Connection(config.redact(&msg)),
                RepoError::Query(msg) => RepoError::Query(config.redact(&msg)),
                other => other,
            })?;
        Ok(Self::new(db, decode))
    }

    fn backend(&self) -> DbBackend {
        self.db.get_database_backend()
    }

    async fn insert_seed(&self) -> Result<(), RepoError> {
        let seed = seed_post();
        let model = post::ActiveModel {
            id: Set(seed.id),
            title: Set(Some(seed.title)),
            content: Set(Some(seed.content)),
        };

        let inserted = PostEntity::insert(model)
            .on_conflict(OnConflict::column(post::Column::Id).do_nothing().to_owned())
            .exec_without_returning(&self.db)
            .await
            .map_err(map_db_err)?;

        if inserted > 0 {
            tracing::info!(post_id = seed.id, "Seed post inserted");
        }
        Ok(())
    }
}

#[async_trait]
impl PostRepository for SqlPostRepository {
    async fn init_schema(&self) -> Result<(), RepoError> {
        let backend = self.backend();
        let schema = match backend {
            DbBackend::Sqlite => SQLITE_SCHEMA,
            DbBackend::Postgres => POSTGRES_SCHEMA,
            other => return Err(RepoError::Unsupported(format!("{other:?}"))),
        };

        self.db
            .execute_unprepared(schema)
            .await
            .map_err(map_db_err)?;

        self.insert_seed().await?;

        if backend == DbBackend::Postgres {
            self.db
                .execute_unprepared(POSTGRES_ALIGN_SEQUENCE)
                .await
                .map_err(map_db_err)?;
        }

        tracing::debug!("Post schema ready");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Post>, RepoError> {
        let rows = self
            .db
            .query_all(PostEntity::find().build(self.backend()))
            .await
            .map_err(map_db_err)?;

        rows.iter().map(|row| self.decode.decode_post(row)).collect()
    }

    async fn insert(&self, post: &NewPost) -> Result<i64, RepoError> {
        let model = post::ActiveModel {
            id: NotSet,
            title: Set(Some(post.title().to_owned())),
            content: Set(Some(post.content().to_owned())),
        };

        let result = PostEntity::insert(model)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.last_insert_id)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        let row = self
            .db
            .query_one(PostEntity::find_by_id(id).build(self.backend()))
            .await
            .map_err(map_db_err)?;

        row.map(|row| self.decode.decode_post(&row)).transpose()
    }

    async fn ping(&self) -> Result<(), RepoError> {
        self.db.ping().await.map_err(map_db_err)
    }
}

use async_trait::async_trait;
use sqlx::query_as;
use tracing::{debug, info};

use crate::{
    application::{
        dto::like_video_dto::LikeVideoDTO,
        error::ApplicationError,
        repositories::video_repository::{ensure_storable, VideoRepository},
    },
    domain::models::like_video::{LikeVideo, MAX_STORED_VALUE},
};

pub struct PgVideoRepository {
    pool: sqlx::PgPool,
}

impl PgVideoRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }

    /// Creates the `application.videos` table when it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), ApplicationError> {
        sqlx::query("CREATE SCHEMA IF NOT EXISTS application")
            .execute(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;

        let query = r#"
            CREATE TABLE IF NOT EXISTS application.videos (
                id BIGSERIAL PRIMARY KEY,
                name TEXT NOT NULL,
                duration BIGINT NOT NULL,
                liked_by TEXT[] NOT NULL DEFAULT '{}'
            )
        "#;
        sqlx::query(query)
            .execute(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;

        info!("Table application.videos is ready");
        Ok(())
    }

    async fn insert(&self, video: LikeVideoDTO) -> Result<LikeVideo, ApplicationError> {
        let query = r#"
            INSERT INTO application.videos (name, duration, liked_by)
            VALUES ($1, $2, $3)
            RETURNING *
        "#;

        let created: LikeVideoDTO = query_as::<_, LikeVideoDTO>(query)
            .bind(video.name.unwrap_or_default())
            .bind(video.duration.unwrap_or(0) as i64)
            .bind(video.liked_by.unwrap_or_default())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;

        Ok(created.into())
    }

    async fn upsert(&self, id: u64, video: LikeVideoDTO) -> Result<LikeVideo, ApplicationError> {
        let query = r#"
            INSERT INTO application.videos (id, name, duration, liked_by)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE
            SET name = EXCLUDED.name,
                duration = EXCLUDED.duration,
                liked_by = EXCLUDED.liked_by
            RETURNING *
        "#;

        let saved: LikeVideoDTO = query_as::<_, LikeVideoDTO>(query)
            .bind(id as i64)
            .bind(video.name.unwrap_or_default())
            .bind(video.duration.unwrap_or(0) as i64)
            .bind(video.liked_by.unwrap_or_default())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;

        // explicit ids bypass the sequence; keep it ahead of them
        let sync_sequence = r#"
            SELECT setval(
                pg_get_serial_sequence('application.videos', 'id'),
                GREATEST((SELECT MAX(id) FROM application.videos), 1)
            )
        "#;
        sqlx::query(sync_sequence)
            .execute(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;

        Ok(saved.into())
    }
}

#[async_trait]
impl VideoRepository for PgVideoRepository {
    async fn find_all(&self) -> Result<Vec<LikeVideo>, ApplicationError> {
        let query = "SELECT * FROM application.videos ORDER BY id";

        let rows: Vec<LikeVideoDTO> = query_as::<_, LikeVideoDTO>(query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(|dto| dto.into()).collect())
    }

    async fn find_one(&self, id: u64) -> Result<Option<LikeVideo>, ApplicationError> {
        if id > MAX_STORED_VALUE {
            return Ok(None);
        }

        let query = "SELECT * FROM application.videos WHERE id = $1";

        let fetched: Option<LikeVideoDTO> = query_as::<_, LikeVideoDTO>(query)
            .bind(id as i64)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;

        Ok(fetched.map(|dto| dto.into()))
    }

    async fn save(&self, video: LikeVideo) -> Result<LikeVideo, ApplicationError> {
        ensure_storable(&video)?;

        let id = video.id;
        let mut dto = LikeVideoDTO::from(video);
        dto.sanitize();

        debug!("Saving video {} ({:?})", id, dto.name);
        if id == 0 {
            self.insert(dto).await
        } else {
            self.upsert(id, dto).await
        }
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<LikeVideo>, ApplicationError> {
        let query = "SELECT * FROM application.videos WHERE name = $1 ORDER BY id";

        let rows: Vec<LikeVideoDTO> = query_as::<_, LikeVideoDTO>(query)
            .bind(name)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(|dto| dto.into()).collect())
    }

    async fn find_by_duration_less_than(
        &self,
        duration: u64,
    ) -> Result<Vec<LikeVideo>, ApplicationError> {
        // every stored duration fits in a BIGINT, so larger bounds match all rows
        if duration > MAX_STORED_VALUE {
            return self.find_all().await;
        }

        let query = "SELECT * FROM application.videos WHERE duration < $1 ORDER BY id";

        let rows: Vec<LikeVideoDTO> = query_as::<_, LikeVideoDTO>(query)
            .bind(duration as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(|dto| dto.into()).collect())
    }
}

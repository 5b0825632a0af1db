use super::util::is_dup_key;
use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use sqlx::{MySqlPool, Row};

/// Likes backed by the `liked_podcast` table (see `schema/liked_podcast.sql`).
/// The `(user_id, resource_id)` primary key is what keeps concurrent toggles
/// from storing duplicates.
pub struct MySqlLikeRepo {
    pool: MySqlPool,
}

impl MySqlLikeRepo {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl LikeRepo for MySqlLikeRepo {
    async fn exists(&self, user_id: &UserId, resource_id: &ResourceId) -> Result<bool, LikeError> {
        let row = sqlx::query(
            "SELECT 1 FROM liked_podcast WHERE user_id = ? AND resource_id = ? LIMIT 1",
        )
        .bind(&user_id.0)
        .bind(&resource_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| LikeError::StoreUnavailable(format!("select like: {e}")))?;

        Ok(row.is_some())
    }

    async fn insert(
        &self,
        user_id: &UserId,
        resource_id: &ResourceId,
    ) -> Result<LikeInsert, LikeError> {
        let res = sqlx::query(
            r#"
INSERT INTO liked_podcast (user_id, resource_id)
VALUES (?, ?)
"#,
        )
        .bind(&user_id.0)
        .bind(&resource_id.0)
        .execute(&self.pool)
        .await;

        match res {
            Ok(_) => Ok(LikeInsert::Inserted),
            Err(e) if is_dup_key(&e) => Ok(LikeInsert::AlreadyPresent),
            Err(e) => Err(LikeError::StoreUnavailable(format!("insert like: {e}"))),
        }
    }

    async fn delete(&self, user_id: &UserId, resource_id: &ResourceId) -> Result<bool, LikeError> {
        let res = sqlx::query("DELETE FROM liked_podcast WHERE user_id = ? AND resource_id = ?")
            .bind(&user_id.0)
            .bind(&resource_id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| LikeError::StoreUnavailable(format!("delete like: {e}")))?;

        Ok(res.rows_affected() > 0)
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<ResourceId>, LikeError> {
        let rows = sqlx::query(
            r#"
SELECT resource_id
FROM liked_podcast
WHERE user_id = ?
ORDER BY created_at ASC, resource_id ASC
"#,
        )
        .bind(&user_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| LikeError::StoreUnavailable(format!("list likes: {e}")))?;

        rows.into_iter()
            .map(|row| {
                row.try_get::<String, _>("resource_id")
                    .map(ResourceId)
                    .map_err(|e| LikeError::StoreUnavailable(format!("decode resource_id: {e}")))
            })
            .collect()
    }

    async fn count_by_resource(&self, resource_id: &ResourceId) -> Result<u64, LikeError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM liked_podcast WHERE resource_id = ?")
            .bind(&resource_id.0)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| LikeError::StoreUnavailable(format!("count likes: {e}")))?;

        let total = row
            .try_get::<i64, _>("total")
            .map_err(|e| LikeError::StoreUnavailable(format!("decode count: {e}")))?;

        Ok(total.max(0) as u64)
    }
}

use crate::domain_model::*;

#[derive(Debug, thiserror::Error)]
pub enum LikeError {
    #[error("invalid resource id: {0}")]
    InvalidResource(String),
    #[error("like store unavailable: {0}")]
    StoreUnavailable(String),
}

#[async_trait::async_trait]
pub trait LikeService: Send + Sync {
    async fn toggle_like(
        &self,
        user_id: &UserId,
        resource_id: &ResourceId,
    ) -> Result<LikeToggle, LikeError>;
    async fn list_liked(&self, user_id: &UserId) -> Result<Vec<LikedResource>, LikeError>;
    async fn count_likes(&self, resource_id: &ResourceId) -> Result<LikeCount, LikeError>;
}

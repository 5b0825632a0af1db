use crate::application_port::*;
use crate::domain_model::*;

/// Outcome of an insert against the `(user_id, resource_id)` uniqueness constraint.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum LikeInsert {
    Inserted,
    /// A concurrent insert won the race. Not an error.
    AlreadyPresent,
}

#[async_trait::async_trait]
pub trait LikeRepo: Send + Sync {
    async fn exists(&self, user_id: &UserId, resource_id: &ResourceId) -> Result<bool, LikeError>;
    async fn insert(
        &self,
        user_id: &UserId,
        resource_id: &ResourceId,
    ) -> Result<LikeInsert, LikeError>;
    /// Returns whether a record was deleted.
    async fn delete(&self, user_id: &UserId, resource_id: &ResourceId) -> Result<bool, LikeError>;
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<ResourceId>, LikeError>;
    async fn count_by_resource(&self, resource_id: &ResourceId) -> Result<u64, LikeError>;
}

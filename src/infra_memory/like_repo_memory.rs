use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use dashmap::DashSet;

/// In-memory like set. `DashSet::insert` gives the same uniqueness guarantee
/// as the primary key of the MySQL table.
#[derive(Default)]
pub struct MemoryLikeRepo {
    likes: DashSet<(UserId, ResourceId)>,
}

impl MemoryLikeRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.likes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.likes.is_empty()
    }
}

#[async_trait::async_trait]
impl LikeRepo for MemoryLikeRepo {
    async fn exists(&self, user_id: &UserId, resource_id: &ResourceId) -> Result<bool, LikeError> {
        Ok(self
            .likes
            .contains(&(user_id.clone(), resource_id.clone())))
    }

    async fn insert(
        &self,
        user_id: &UserId,
        resource_id: &ResourceId,
    ) -> Result<LikeInsert, LikeError> {
        if self.likes.insert((user_id.clone(), resource_id.clone())) {
            Ok(LikeInsert::Inserted)
        } else {
            Ok(LikeInsert::AlreadyPresent)
        }
    }

    async fn delete(&self, user_id: &UserId, resource_id: &ResourceId) -> Result<bool, LikeError> {
        Ok(self
            .likes
            .remove(&(user_id.clone(), resource_id.clone()))
            .is_some())
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<ResourceId>, LikeError> {
        let mut out: Vec<ResourceId> = self
            .likes
            .iter()
            .filter(|entry| entry.key().0 == *user_id)
            .map(|entry| entry.key().1.clone())
            .collect();
        out.sort();
        Ok(out)
    }

    async fn count_by_resource(&self, resource_id: &ResourceId) -> Result<u64, LikeError> {
        Ok(self
            .likes
            .iter()
            .filter(|entry| entry.key().1 == *resource_id)
            .count() as u64)
    }
}

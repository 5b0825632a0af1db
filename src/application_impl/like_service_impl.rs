use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use crate::logger::*;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

const MAX_RESOURCE_ID_LEN: usize = 128;

pub struct RealLikeService {
    like_repo: Arc<dyn LikeRepo>,
    store_timeout: Duration,
}

impl RealLikeService {
    pub fn new(like_repo: Arc<dyn LikeRepo>, store_timeout: Duration) -> Self {
        Self {
            like_repo,
            store_timeout,
        }
    }

    fn normalize(resource_id: &ResourceId) -> Result<ResourceId, LikeError> {
        let trimmed = resource_id.0.trim();
        if trimmed.is_empty() {
            return Err(LikeError::InvalidResource("empty".to_string()));
        }
        if trimmed.len() > MAX_RESOURCE_ID_LEN {
            return Err(LikeError::InvalidResource(format!(
                "longer than {MAX_RESOURCE_ID_LEN} bytes"
            )));
        }
        Ok(ResourceId(trimmed.to_string()))
    }

    async fn bounded<T>(
        &self,
        op: &'static str,
        call: impl Future<Output = Result<T, LikeError>>,
    ) -> Result<T, LikeError> {
        match tokio::time::timeout(self.store_timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                warn!(op, "like store call failed: {}", e);
                Err(e)
            }
            Err(_) => {
                warn!(op, "like store call timed out after {:?}", self.store_timeout);
                Err(LikeError::StoreUnavailable(format!("{op} timed out")))
            }
        }
    }
}

#[async_trait::async_trait]
impl LikeService for RealLikeService {
    async fn toggle_like(
        &self,
        user_id: &UserId,
        resource_id: &ResourceId,
    ) -> Result<LikeToggle, LikeError> {
        let resource_id = Self::normalize(resource_id)?;

        let existing = self
            .bounded("exists", self.like_repo.exists(user_id, &resource_id))
            .await?;

        if existing {
            let deleted = self
                .bounded("delete", self.like_repo.delete(user_id, &resource_id))
                .await?;
            if !deleted {
                debug!(%user_id, %resource_id, "like already removed by a concurrent toggle");
            }
            return Ok(LikeToggle { liked: false });
        }

        match self
            .bounded("insert", self.like_repo.insert(user_id, &resource_id))
            .await?
        {
            LikeInsert::Inserted => {}
            LikeInsert::AlreadyPresent => {
                debug!(%user_id, %resource_id, "like already stored by a concurrent toggle");
            }
        }
        Ok(LikeToggle { liked: true })
    }

    async fn list_liked(&self, user_id: &UserId) -> Result<Vec<LikedResource>, LikeError> {
        let resources = self
            .bounded("list_by_user", self.like_repo.list_by_user(user_id))
            .await?;
        Ok(resources
            .into_iter()
            .map(|resource_id| LikedResource { resource_id })
            .collect())
    }

    async fn count_likes(&self, resource_id: &ResourceId) -> Result<LikeCount, LikeError> {
        let resource_id = Self::normalize(resource_id)?;
        let count = self
            .bounded("count_by_resource", self.like_repo.count_by_resource(&resource_id))
            .await?;
        Ok(LikeCount { resource_id, count })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra_memory::MemoryLikeRepo;

    const TIMEOUT: Duration = Duration::from_millis(200);

    fn service() -> (Arc<MemoryLikeRepo>, RealLikeService) {
        let repo = Arc::new(MemoryLikeRepo::new());
        let service = RealLikeService::new(repo.clone(), TIMEOUT);
        (repo, service)
    }

    fn ids(user: &str, resource: &str) -> (UserId, ResourceId) {
        (UserId::from(user), ResourceId::from(resource))
    }

    #[tokio::test]
    async fn like_count_list_unlike_scenario() {
        let (_, service) = service();
        let (u1, p42) = ids("u1", "p42");

        assert!(service.toggle_like(&u1, &p42).await.unwrap().liked);
        assert_eq!(
            service.count_likes(&p42).await.unwrap(),
            LikeCount {
                resource_id: p42.clone(),
                count: 1
            }
        );
        assert_eq!(
            service.list_liked(&u1).await.unwrap(),
            vec![LikedResource {
                resource_id: p42.clone()
            }]
        );

        assert!(!service.toggle_like(&u1, &p42).await.unwrap().liked);
        assert_eq!(service.count_likes(&p42).await.unwrap().count, 0);
        assert!(service.list_liked(&u1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn toggling_twice_restores_prior_state() {
        let (repo, service) = service();
        let (u1, p1) = ids("u1", "p1");
        let (u2, p2) = ids("u2", "p2");
        service.toggle_like(&u2, &p2).await.unwrap();
        let before = repo.len();

        assert!(service.toggle_like(&u1, &p1).await.unwrap().liked);
        assert!(!service.toggle_like(&u1, &p1).await.unwrap().liked);

        assert_eq!(repo.len(), before);
        assert!(!repo.exists(&u1, &p1).await.unwrap());
        assert!(repo.exists(&u2, &p2).await.unwrap());
    }

    #[tokio::test]
    async fn count_is_number_of_distinct_likers() {
        let (_, service) = service();
        let p1 = ResourceId::from("p1");
        for user in ["a", "b", "c"] {
            service.toggle_like(&UserId::from(user), &p1).await.unwrap();
        }
        service
            .toggle_like(&UserId::from("a"), &ResourceId::from("p2"))
            .await
            .unwrap();

        assert_eq!(service.count_likes(&p1).await.unwrap().count, 3);
        assert_eq!(
            service
                .count_likes(&ResourceId::from("nobody-liked-this"))
                .await
                .unwrap()
                .count,
            0
        );
    }

    #[tokio::test]
    async fn resource_id_is_trimmed_and_bounded() {
        let (repo, service) = service();
        let u1 = UserId::from("u1");

        service
            .toggle_like(&u1, &ResourceId::from("  p9 "))
            .await
            .unwrap();
        assert!(repo.exists(&u1, &ResourceId::from("p9")).await.unwrap());

        let empty = service.toggle_like(&u1, &ResourceId::from("   ")).await;
        assert!(matches!(empty, Err(LikeError::InvalidResource(_))));

        let long = ResourceId("x".repeat(MAX_RESOURCE_ID_LEN + 1));
        let result = service.toggle_like(&u1, &long).await;
        assert!(matches!(result, Err(LikeError::InvalidResource(_))));
    }

    #[tokio::test]
    async fn count_uses_the_same_key_as_toggle() {
        let (_, service) = service();
        let u1 = UserId::from("u1");
        service
            .toggle_like(&u1, &ResourceId::from(" p x "))
            .await
            .unwrap();

        let counted = service.count_likes(&ResourceId::from("p x  ")).await.unwrap();
        assert_eq!(
            counted,
            LikeCount {
                resource_id: ResourceId::from("p x"),
                count: 1
            }
        );

        let blank = service.count_likes(&ResourceId::from(" ")).await;
        assert!(matches!(blank, Err(LikeError::InvalidResource(_))));
    }

    /// Answers `exists` with a fixed value, simulating a toggle that raced
    /// another toggle between its check and its write.
    struct RacingLikeRepo {
        inner: MemoryLikeRepo,
        reports_present: bool,
    }

    impl RacingLikeRepo {
        fn new(reports_present: bool) -> Self {
            Self {
                inner: MemoryLikeRepo::new(),
                reports_present,
            }
        }
    }

    #[async_trait::async_trait]
    impl LikeRepo for RacingLikeRepo {
        async fn exists(&self, _: &UserId, _: &ResourceId) -> Result<bool, LikeError> {
            tokio::task::yield_now().await;
            Ok(self.reports_present)
        }
        async fn insert(&self, u: &UserId, r: &ResourceId) -> Result<LikeInsert, LikeError> {
            self.inner.insert(u, r).await
        }
        async fn delete(&self, u: &UserId, r: &ResourceId) -> Result<bool, LikeError> {
            self.inner.delete(u, r).await
        }
        async fn list_by_user(&self, u: &UserId) -> Result<Vec<ResourceId>, LikeError> {
            self.inner.list_by_user(u).await
        }
        async fn count_by_resource(&self, r: &ResourceId) -> Result<u64, LikeError> {
            self.inner.count_by_resource(r).await
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_first_likes_store_one_record() {
        let repo = Arc::new(RacingLikeRepo::new(false));
        let service = Arc::new(RealLikeService::new(repo.clone(), TIMEOUT));
        let (u1, p42) = ids("u1", "p42");

        let a = tokio::spawn({
            let (service, u1, p42) = (service.clone(), u1.clone(), p42.clone());
            async move { service.toggle_like(&u1, &p42).await }
        });
        let b = tokio::spawn({
            let (service, u1, p42) = (service.clone(), u1.clone(), p42.clone());
            async move { service.toggle_like(&u1, &p42).await }
        });

        let a = a.await.unwrap().unwrap();
        let b = b.await.unwrap().unwrap();

        assert!(a.liked && b.liked);
        assert_eq!(repo.inner.len(), 1);
        assert_eq!(service.count_likes(&p42).await.unwrap().count, 1);
    }

    #[tokio::test]
    async fn lost_delete_race_still_reports_unliked() {
        let repo = Arc::new(RacingLikeRepo::new(true));
        let service = RealLikeService::new(repo.clone(), TIMEOUT);
        let (u1, p1) = ids("u1", "p1");

        // The check saw a record that a concurrent toggle has already deleted.
        let toggled = service.toggle_like(&u1, &p1).await.unwrap();

        assert!(!toggled.liked);
        assert!(repo.inner.is_empty());
    }

    struct StalledLikeRepo;

    #[async_trait::async_trait]
    impl LikeRepo for StalledLikeRepo {
        async fn exists(&self, _: &UserId, _: &ResourceId) -> Result<bool, LikeError> {
            std::future::pending().await
        }
        async fn insert(&self, _: &UserId, _: &ResourceId) -> Result<LikeInsert, LikeError> {
            std::future::pending().await
        }
        async fn delete(&self, _: &UserId, _: &ResourceId) -> Result<bool, LikeError> {
            std::future::pending().await
        }
        async fn list_by_user(&self, _: &UserId) -> Result<Vec<ResourceId>, LikeError> {
            std::future::pending().await
        }
        async fn count_by_resource(&self, _: &ResourceId) -> Result<u64, LikeError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn stalled_store_surfaces_as_unavailable() {
        let service = RealLikeService::new(Arc::new(StalledLikeRepo), Duration::from_millis(20));
        let (u1, p1) = ids("u1", "p1");

        assert!(matches!(
            service.toggle_like(&u1, &p1).await,
            Err(LikeError::StoreUnavailable(_))
        ));
        assert!(matches!(
            service.list_liked(&u1).await,
            Err(LikeError::StoreUnavailable(_))
        ));
        assert!(matches!(
            service.count_likes(&p1).await,
            Err(LikeError::StoreUnavailable(_))
        ));
    }
}

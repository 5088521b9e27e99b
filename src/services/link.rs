// src/services/link.rs - Shortening business logic
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::info;
use validator::Validate;

use crate::errors::ServiceError;
use crate::models::{CreateLinkDto, Link, LinkRow, LinkStatsDto};
use crate::repositories::LinkRepositoryTrait;
use crate::utils::id_generator;
use uuid::Uuid;

type Result<T> = std::result::Result<T, ServiceError>;

const SHORT_ID_LENGTH: usize = 8;

#[async_trait]
pub trait LinkServiceTrait {
    /// Shortens a URL on behalf of a user. Every submission creates a new
    /// record; the same URL shortened twice yields two distinct short ids.
    async fn create(&self, owner: &Uuid, dto: CreateLinkDto) -> Result<Link>;

    /// All links owned by the given user, with fully-qualified short URLs
    async fn list_for_owner(&self, owner: &Uuid) -> Result<Vec<LinkRow>>;

    /// Every link in the system, annotated with its owning user id
    async fn list_all(&self) -> Result<Vec<LinkRow>>;

    /// Records a visit and returns the link to redirect to. Fails with
    /// `NotFound` for an unknown short id.
    async fn record_visit(&self, short_id: &str) -> Result<Link>;

    /// Click statistics for a link. Fails with `NotFound` for an unknown
    /// short id.
    async fn stats(&self, short_id: &str) -> Result<LinkStatsDto>;
}

pub struct LinkService<T: LinkRepositoryTrait> {
    repository: Arc<T>,
    base_url: String,
}

impl<T: LinkRepositoryTrait> LinkService<T> {
    pub fn new(repository: Arc<T>, base_url: String) -> Self {
        Self {
            repository,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn short_url(&self, short_id: &str) -> String {
        format!("{}/{}", self.base_url, short_id)
    }
}

#[async_trait]
impl<T: LinkRepositoryTrait + Send + Sync> LinkServiceTrait for LinkService<T> {
    async fn create(&self, owner: &Uuid, dto: CreateLinkDto) -> Result<Link> {
        if let Err(e) = dto.validate() {
            return Err(ServiceError::ValidationError(e.to_string()));
        }

        // One generated id, no collision retry: uniqueness is guaranteed by
        // the store's constraint and a collision surfaces as a conflict.
        let short_id = id_generator::generate_short_id(SHORT_ID_LENGTH);

        let link = self
            .repository
            .save(&short_id, &dto.original_url, owner)
            .await?;

        info!("Created short id '{}' for user {}", link.short_id, owner);
        Ok(link)
    }

    async fn list_for_owner(&self, owner: &Uuid) -> Result<Vec<LinkRow>> {
        let links = self.repository.find_by_owner(owner).await?;

        Ok(links
            .into_iter()
            .map(|link| LinkRow {
                short_url: self.short_url(&link.short_id),
                original_url: link.original_url,
                created_by: String::new(),
            })
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<LinkRow>> {
        let links = self.repository.find_all().await?;

        Ok(links
            .into_iter()
            .map(|link| LinkRow {
                short_url: self.short_url(&link.short_id),
                original_url: link.original_url,
                created_by: link.created_by.to_string(),
            })
            .collect())
    }

    async fn record_visit(&self, short_id: &str) -> Result<Link> {
        match self.repository.record_visit(short_id, Utc::now()).await? {
            Some(link) => Ok(link),
            None => Err(ServiceError::NotFound("Short URL not found".to_string())),
        }
    }

    async fn stats(&self, short_id: &str) -> Result<LinkStatsDto> {
        let link = match self.repository.find_by_short_id(short_id).await? {
            Some(link) => link,
            None => return Err(ServiceError::NotFound("Short URL not found".to_string())),
        };

        Ok(LinkStatsDto {
            original_url: link.original_url.clone(),
            short_url: self.short_url(&link.short_id),
            total_clicks: link.total_clicks(),
            visit_history: link.visit_history,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{DateTime, Utc};

    use crate::repositories::MockLinkRepositoryTrait;

    fn link(short_id: &str, original_url: &str, owner: Uuid) -> Link {
        Link {
            id: Uuid::new_v4(),
            short_id: short_id.to_string(),
            original_url: original_url.to_string(),
            created_by: owner,
            visit_history: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn service(repo: MockLinkRepositoryTrait) -> LinkService<MockLinkRepositoryTrait> {
        LinkService::new(Arc::new(repo), "http://localhost:8001".to_string())
    }

    #[tokio::test]
    async fn create_generates_url_safe_short_id() {
        let owner = Uuid::new_v4();
        let mut repo = MockLinkRepositoryTrait::new();
        repo.expect_save()
            .withf(|short_id, url, _| {
                short_id.len() == 8
                    && short_id
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
                    && url == "http://example.com"
            })
            .returning(move |short_id, url, owner| Ok(link(short_id, url, *owner)));

        let created = service(repo)
            .create(
                &owner,
                CreateLinkDto {
                    original_url: "http://example.com".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(created.created_by, owner);
    }

    #[tokio::test]
    async fn create_rejects_empty_url() {
        let repo = MockLinkRepositoryTrait::new();
        let result = service(repo)
            .create(
                &Uuid::new_v4(),
                CreateLinkDto {
                    original_url: "".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(ServiceError::ValidationError(_))));
    }

    #[tokio::test]
    async fn list_for_owner_builds_full_short_urls() {
        let owner = Uuid::new_v4();
        let mut repo = MockLinkRepositoryTrait::new();
        repo.expect_find_by_owner()
            .returning(move |owner| Ok(vec![link("abc12345", "http://example.com", *owner)]));

        let rows = service(repo).list_for_owner(&owner).await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].short_url, "http://localhost:8001/abc12345");
        assert_eq!(rows[0].original_url, "http://example.com");
        assert!(rows[0].created_by.is_empty());
    }

    #[tokio::test]
    async fn list_all_annotates_owner() {
        let owner = Uuid::new_v4();
        let mut repo = MockLinkRepositoryTrait::new();
        repo.expect_find_all()
            .returning(move || Ok(vec![link("abc12345", "http://example.com", owner)]));

        let rows = service(repo).list_all().await.unwrap();

        assert_eq!(rows[0].created_by, owner.to_string());
    }

    #[tokio::test]
    async fn record_visit_returns_post_append_record() {
        let owner = Uuid::new_v4();
        let mut repo = MockLinkRepositoryTrait::new();
        repo.expect_record_visit()
            .withf(|short_id, _| short_id == "abc12345")
            .returning(move |short_id, visited_at| {
                let mut l = link(short_id, "http://example.com", owner);
                l.visit_history.push(visited_at);
                Ok(Some(l))
            });

        let visited = service(repo).record_visit("abc12345").await.unwrap();

        assert_eq!(visited.total_clicks(), 1);
        assert_eq!(visited.original_url, "http://example.com");
    }

    #[tokio::test]
    async fn record_visit_unknown_id_is_not_found() {
        let mut repo = MockLinkRepositoryTrait::new();
        repo.expect_record_visit().returning(|_, _| Ok(None));

        let result = service(repo).record_visit("missing1").await;

        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn stats_reports_click_count_and_history_in_order() {
        let owner = Uuid::new_v4();
        let visits: Vec<DateTime<Utc>> = (0..3)
            .map(|i| Utc::now() + chrono::Duration::seconds(i))
            .collect();
        let history = visits.clone();

        let mut repo = MockLinkRepositoryTrait::new();
        repo.expect_find_by_short_id().returning(move |short_id| {
            let mut l = link(short_id, "http://example.com", owner);
            l.visit_history = history.clone();
            Ok(Some(l))
        });

        let stats = service(repo).stats("abc12345").await.unwrap();

        assert_eq!(stats.total_clicks, 3);
        assert_eq!(stats.visit_history, visits);
        assert_eq!(stats.short_url, "http://localhost:8001/abc12345");
    }

    #[tokio::test]
    async fn stats_unknown_id_is_not_found() {
        let mut repo = MockLinkRepositoryTrait::new();
        repo.expect_find_by_short_id().returning(|_| Ok(None));

        let result = service(repo).stats("missing1").await;

        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }
}

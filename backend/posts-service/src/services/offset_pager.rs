//! Offset pagination for the admin listing
//!
//! Pages are numbered from 1 and addressed by `skip = (page - 1) * limit`.
//! Unlike the cursor feed this offers no stability under concurrent writes:
//! an insert ahead of the current offset shifts every later page by one, so
//! items can repeat or be skipped between requests.

use std::sync::Arc;

use error_types::validation::rules::validate_range;
use error_types::ServiceResult;
use tracing::debug;

use super::storage_error;
use crate::config::FeedConfig;
use crate::db::{PostFilter, PostStore, SortOrder};
use crate::models::{OffsetPage, Post};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminLimits {
    pub default_limit: u32,
    pub max_limit: u32,
}

impl From<&FeedConfig> for AdminLimits {
    fn from(config: &FeedConfig) -> Self {
        Self {
            default_limit: config.admin_default_limit,
            max_limit: config.admin_max_limit,
        }
    }
}

impl Default for AdminLimits {
    fn default() -> Self {
        Self::from(&FeedConfig::default())
    }
}

#[derive(Clone)]
pub struct OffsetPager {
    posts: Arc<dyn PostStore>,
    limits: AdminLimits,
}

impl OffsetPager {
    pub fn new(posts: Arc<dyn PostStore>, limits: AdminLimits) -> Self {
        Self { posts, limits }
    }

    pub fn limits(&self) -> AdminLimits {
        self.limits
    }

    /// One numbered page; the total is counted with the same filter.
    pub async fn list(
        &self,
        page: u32,
        limit: u32,
        filter: &PostFilter,
    ) -> ServiceResult<OffsetPage<Post>> {
        validate_range("page", page, Some(1), None)?;
        validate_range("limit", limit, Some(1), None)?;

        let limit = limit.min(self.limits.max_limit);
        let skip = u64::from(page - 1) * u64::from(limit);

        let (items, total) = tokio::try_join!(
            self.posts.find(filter, SortOrder::NewestFirst, skip, u64::from(limit)),
            self.posts.count(filter),
        )
        .map_err(storage_error)?;

        debug!(page, limit, total, "Admin listing page assembled");

        Ok(OffsetPage {
            items,
            page,
            page_size: limit,
            total,
            total_page: total.div_ceil(u64::from(limit)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FixedCount(u64);

    #[async_trait]
    impl PostStore for FixedCount {
        async fn find(
            &self,
            _filter: &PostFilter,
            _order: SortOrder,
            _skip: u64,
            _limit: u64,
        ) -> anyhow::Result<Vec<Post>> {
            Ok(Vec::new())
        }

        async fn count(&self, _filter: &PostFilter) -> anyhow::Result<u64> {
            Ok(self.0)
        }

        async fn find_one(&self, _filter: &PostFilter) -> anyhow::Result<Option<Post>> {
            Ok(None)
        }
    }

    fn pager(total: u64) -> OffsetPager {
        OffsetPager::new(Arc::new(FixedCount(total)), AdminLimits::default())
    }

    #[tokio::test]
    async fn test_total_page_rounds_up() {
        let page = pager(21).list(1, 10, &PostFilter::default()).await.unwrap();
        assert_eq!(page.total_page, 3);

        let page = pager(20).list(1, 10, &PostFilter::default()).await.unwrap();
        assert_eq!(page.total_page, 2);

        let page = pager(0).list(1, 10, &PostFilter::default()).await.unwrap();
        assert_eq!(page.total_page, 0);
    }

    #[tokio::test]
    async fn test_zero_page_or_limit_is_rejected() {
        let err = pager(5).list(0, 10, &PostFilter::default()).await.unwrap_err();
        assert_eq!(err.kind(), error_types::ErrorKind::ValidationFailure);

        let err = pager(5).list(1, 0, &PostFilter::default()).await.unwrap_err();
        assert_eq!(err.kind(), error_types::ErrorKind::ValidationFailure);
    }

    #[tokio::test]
    async fn test_limit_is_clamped() {
        let page = pager(1_000).list(2, 5_000, &PostFilter::default()).await.unwrap();
        assert_eq!(page.page_size, 100);
        assert_eq!(page.total_page, 10);
    }
}

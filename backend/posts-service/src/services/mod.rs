/// Business logic layer for posts-service
///
/// This module provides high-level operations:
/// - Feed query: parsing and validation of feed parameters
/// - Feed paginator: cursor-paginated feed with new-post detection
/// - Offset pager: numbered pages for the admin listing
/// - Post service: single post retrieval
use error_types::{DatabaseError, ServiceError};

pub mod feed_paginator;
pub mod feed_query;
pub mod offset_pager;
pub mod posts;

// Re-export commonly used services
pub use feed_paginator::FeedPaginator;
pub use feed_query::{FeedQuery, PageLimits, RawFeedParams};
pub use offset_pager::{AdminLimits, OffsetPager};
pub use posts::PostService;

/// Classify a store failure, keeping typed errors that crossed the trait
/// boundary inside `anyhow`.
pub(crate) fn storage_error(err: anyhow::Error) -> ServiceError {
    let err = match err.downcast::<ServiceError>() {
        Ok(service_error) => return service_error,
        Err(err) => err,
    };
    match err.downcast::<DatabaseError>() {
        Ok(db_error) => db_error.into(),
        Err(err) => ServiceError::internal(err),
    }
}

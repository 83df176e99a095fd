//! Feed query parsing
//!
//! Turns loosely-typed query-string values into a validated [`FeedQuery`].
//! Parsing is pure and happens before any storage access.

use chrono::{DateTime, TimeZone, Utc};
use error_types::validation::rules::validate_positive_int;
use error_types::{ServiceError, ServiceResult, ValidationError};
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use std::fmt;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::config::FeedConfig;
use crate::db::{Keyset, PostFilter};

/// Raw feed parameters as they arrive from a query string or event payload.
///
/// Event payloads may carry numbers where a query string carries text, so
/// numeric values are accepted and kept in textual form.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct RawFeedParams {
    /// Exclusive upper bound on creation time (RFC 3339 or epoch millis)
    #[serde(default, deserialize_with = "lenient_string")]
    pub last_post_time: Option<String>,
    /// Id of the post that produced `lastPostTime`
    #[serde(default)]
    pub last_post_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub page_size: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    /// Client's last refresh time, for new-post detection
    #[serde(default, deserialize_with = "lenient_string")]
    pub last_fetch_time: Option<String>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct LenientString;

    impl<'de> Visitor<'de> for LenientString {
        type Value = Option<String>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a string or a number")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(Some(v.to_owned()))
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2: Deserializer<'de>>(self, d: D2) -> Result<Self::Value, D2::Error> {
            d.deserialize_any(LenientString)
        }
    }

    deserializer.deserialize_option(LenientString)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl From<&FeedConfig> for PageLimits {
    fn from(config: &FeedConfig) -> Self {
        Self {
            default_page_size: config.default_page_size,
            max_page_size: config.max_page_size,
        }
    }
}

impl Default for PageLimits {
    fn default() -> Self {
        Self::from(&FeedConfig::default())
    }
}

/// Validated feed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedQuery {
    pub last_post_time: Option<DateTime<Utc>>,
    pub last_post_id: Option<Uuid>,
    pub last_fetch_time: Option<DateTime<Utc>>,
    pub topic: Option<Uuid>,
    pub author: Option<Uuid>,
    pub page_size: u32,
    pub user_id: Uuid,
}

impl FeedQuery {
    pub fn parse(raw: &RawFeedParams, user_id: Uuid, limits: &PageLimits) -> ServiceResult<Self> {
        let page_size = match present(&raw.page_size) {
            None => limits.default_page_size,
            Some(value) => {
                let requested = validate_positive_int("pageSize", value)?;
                requested.min(u64::from(limits.max_page_size)) as u32
            }
        };

        Ok(Self {
            last_post_time: parse_timestamp("lastPostTime", &raw.last_post_time)?,
            last_post_id: parse_uuid("lastPostId", &raw.last_post_id)?,
            last_fetch_time: parse_timestamp("lastFetchTime", &raw.last_fetch_time)?,
            topic: parse_uuid("topic", &raw.topic)?,
            author: parse_uuid("author", &raw.author)?,
            page_size,
            user_id,
        })
    }

    /// Filter for the page scan: topic, author and the backward bound.
    pub fn page_filter(&self) -> PostFilter {
        PostFilter {
            topic_id: self.topic,
            author_id: self.author,
            before: self.last_post_time.map(|created_at| Keyset {
                created_at,
                id: self.last_post_id,
            }),
            ..PostFilter::default()
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn invalid(field: &str, message: String) -> ServiceError {
    ValidationError::new(message)
        .add_field_error(field, "invalid_format", "Malformed value")
        .into()
}

/// Accepts RFC 3339 or integer epoch milliseconds.
fn parse_timestamp(field: &str, value: &Option<String>) -> ServiceResult<Option<DateTime<Utc>>> {
    let Some(value) = present(value) else {
        return Ok(None);
    };

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(Some(parsed.with_timezone(&Utc)));
    }

    value
        .parse::<i64>()
        .ok()
        .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
        .map(Some)
        .ok_or_else(|| {
            invalid(
                field,
                format!("{} must be an RFC 3339 timestamp or epoch milliseconds", field),
            )
        })
}

fn parse_uuid(field: &str, value: &Option<String>) -> ServiceResult<Option<Uuid>> {
    present(value)
        .map(|v| {
            Uuid::parse_str(v).map_err(|_| invalid(field, format!("{} must be a valid UUID", field)))
        })
        .transpose()
}

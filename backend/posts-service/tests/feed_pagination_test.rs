//! Feed pagination behaviour against the in-memory store
//!
//! Walks the feed the way a client does: each page's cursor is fed back as
//! the next request's `lastPostTime` / `lastPostId`.

mod common;

use common::*;
use error_types::{normalize, ClientError};
use posts_service::models::FeedPage;
use posts_service::services::{FeedPaginator, FeedQuery, PageLimits, RawFeedParams};
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

fn paginator(posts: &InMemoryPostStore, reactions: &CountingReactionStore) -> FeedPaginator {
    FeedPaginator::new(Arc::new(posts.clone()), Arc::new(reactions.clone()))
}

fn params(page_size: u32) -> RawFeedParams {
    RawFeedParams {
        page_size: Some(page_size.to_string()),
        ..RawFeedParams::default()
    }
}

fn next(raw: &RawFeedParams, page: &FeedPage) -> RawFeedParams {
    RawFeedParams {
        last_post_time: page.next_cursor.map(|t| t.to_rfc3339()),
        last_post_id: page.next_cursor_id.map(|id| id.to_string()),
        ..raw.clone()
    }
}

async fn fetch(paginator: &FeedPaginator, raw: &RawFeedParams) -> FeedPage {
    let query = FeedQuery::parse(raw, VIEWER, &PageLimits::default()).unwrap();
    paginator.fetch_page(&query).await.unwrap()
}

fn ids(page: &FeedPage) -> Vec<Uuid> {
    page.items.iter().map(|i| i.post.id).collect()
}

/// Follow cursors until a terminal page, returning every id in order.
async fn walk(paginator: &FeedPaginator, first: RawFeedParams) -> Vec<Uuid> {
    let mut raw = first;
    let mut seen = Vec::new();
    loop {
        let page = fetch(paginator, &raw).await;
        seen.extend(ids(&page));
        if page.is_terminal() {
            return seen;
        }
        raw = next(&raw, &page);
    }
}

#[tokio::test]
async fn equal_timestamps_split_across_pages_are_neither_lost_nor_repeated() {
    let posts = InMemoryPostStore::with_posts(vec![
        post(1, 10),
        post(2, 20),
        post(3, 20),
        post(4, 20),
        post(5, 20),
        post(6, 30),
    ]);
    let reactions = CountingReactionStore::default();
    let paginator = paginator(&posts, &reactions);

    let first = fetch(&paginator, &params(2)).await;
    assert_eq!(ids(&first), vec![Uuid::from_u128(6), Uuid::from_u128(5)]);
    assert_eq!(first.next_cursor, Some(at(20)));
    assert_eq!(first.next_cursor_id, Some(Uuid::from_u128(5)));

    let all = walk(&paginator, params(2)).await;
    let expected: Vec<Uuid> = [6u128, 5, 4, 3, 2, 1].into_iter().map(Uuid::from_u128).collect();
    assert_eq!(all, expected);
}

#[tokio::test]
async fn timestamp_only_cursor_is_a_strict_bound() {
    let posts = InMemoryPostStore::with_posts(vec![post(1, 10), post(2, 20), post(3, 30)]);
    let reactions = CountingReactionStore::default();
    let paginator = paginator(&posts, &reactions);

    let raw = RawFeedParams {
        last_post_time: Some(at(20).to_rfc3339()),
        ..params(10)
    };
    let page = fetch(&paginator, &raw).await;

    assert_eq!(ids(&page), vec![Uuid::from_u128(1)]);
    assert!(page.is_terminal());
}

#[tokio::test]
async fn concurrent_inserts_do_not_shift_older_pages() {
    let posts = InMemoryPostStore::with_posts((1..=7).map(|i| post(i, i as i64 * 10)).collect());
    let reactions = CountingReactionStore::default();
    let paginator = paginator(&posts, &reactions);

    let first = fetch(&paginator, &params(3)).await;
    posts.insert(post(100, 500));
    posts.insert(post(101, 500));

    let mut seen = ids(&first);
    let mut raw = next(&params(3), &first);
    loop {
        let page = fetch(&paginator, &raw).await;
        seen.extend(ids(&page));
        if page.is_terminal() {
            break;
        }
        raw = next(&raw, &page);
    }

    let expected: Vec<Uuid> = (1..=7).rev().map(Uuid::from_u128).collect();
    assert_eq!(seen, expected);
}

#[tokio::test]
async fn exactly_page_size_results_is_terminal() {
    let posts = InMemoryPostStore::with_posts(vec![post(1, 10), post(2, 20), post(3, 30)]);
    let reactions = CountingReactionStore::default();

    let page = fetch(&paginator(&posts, &reactions), &params(3)).await;
    assert_eq!(page.items.len(), 3);
    assert_eq!(page.next_cursor, None);
    assert_eq!(page.next_cursor_id, None);
}

#[tokio::test]
async fn one_more_than_page_size_yields_a_cursor_then_a_single_item() {
    let posts = InMemoryPostStore::with_posts((1..=4).map(|i| post(i, i as i64)).collect());
    let reactions = CountingReactionStore::default();
    let paginator = paginator(&posts, &reactions);

    let first = fetch(&paginator, &params(3)).await;
    assert_eq!(first.items.len(), 3);
    assert_eq!(first.next_cursor, Some(first.items[2].post.created_at));

    let second = fetch(&paginator, &next(&params(3), &first)).await;
    assert_eq!(ids(&second), vec![Uuid::from_u128(1)]);
    assert!(second.is_terminal());
}

#[tokio::test]
async fn empty_collection_is_an_empty_terminal_page() {
    let posts = InMemoryPostStore::default();
    let reactions = CountingReactionStore::default();

    let page = fetch(&paginator(&posts, &reactions), &params(10)).await;
    assert!(page.items.is_empty());
    assert!(page.is_terminal());
    assert!(!page.has_new);
    assert_eq!(reactions.call_count(), 0);
}

#[tokio::test]
async fn topic_and_author_filters_combine() {
    let posts = InMemoryPostStore::with_posts(vec![
        post_by(1, 10, AUTHOR_A, Some(TOPIC_X)),
        post_by(2, 20, AUTHOR_B, Some(TOPIC_X)),
        post_by(3, 30, AUTHOR_A, Some(TOPIC_Y)),
        post_by(4, 40, AUTHOR_A, None),
        post_by(5, 50, AUTHOR_A, Some(TOPIC_X)),
    ]);
    let reactions = CountingReactionStore::default();
    let paginator = paginator(&posts, &reactions);

    let by_topic = RawFeedParams {
        topic: Some(TOPIC_X.to_string()),
        ..params(10)
    };
    assert_eq!(
        ids(&fetch(&paginator, &by_topic).await),
        vec![Uuid::from_u128(5), Uuid::from_u128(2), Uuid::from_u128(1)]
    );

    let by_both = RawFeedParams {
        author: Some(AUTHOR_A.to_string()),
        ..by_topic.clone()
    };
    let all = walk(
        &paginator,
        RawFeedParams {
            page_size: Some("1".to_string()),
            ..by_both
        },
    )
    .await;
    assert_eq!(all, vec![Uuid::from_u128(5), Uuid::from_u128(1)]);
}

#[tokio::test]
async fn filter_matching_nothing_is_an_empty_terminal_page() {
    let posts = InMemoryPostStore::with_posts(vec![
        post_by(1, 10, AUTHOR_A, Some(TOPIC_X)),
        post_by(2, 20, AUTHOR_B, Some(TOPIC_X)),
    ]);
    let reactions = CountingReactionStore::default();
    let paginator = paginator(&posts, &reactions);

    let raw = RawFeedParams {
        topic: Some(TOPIC_Y.to_string()),
        ..params(10)
    };
    let page = fetch(&paginator, &raw).await;

    assert!(page.items.is_empty());
    assert!(page.is_terminal());
    assert_eq!(page.next_cursor, None);
    assert_eq!(reactions.call_count(), 0);
}

#[tokio::test]
async fn has_new_ignores_topic_and_author_scoping() {
    let posts = InMemoryPostStore::with_posts(vec![
        post_by(1, 10, AUTHOR_A, Some(TOPIC_X)),
        post_by(2, 20, AUTHOR_A, Some(TOPIC_X)),
    ]);
    let reactions = CountingReactionStore::default();
    let paginator = paginator(&posts, &reactions);

    let raw = RawFeedParams {
        topic: Some(TOPIC_X.to_string()),
        author: Some(AUTHOR_A.to_string()),
        last_fetch_time: Some(at(25).to_rfc3339()),
        ..params(10)
    };

    let before = fetch(&paginator, &raw).await;
    assert!(!before.has_new);

    posts.insert(post_by(3, 30, AUTHOR_B, Some(TOPIC_Y)));

    let after = fetch(&paginator, &raw).await;
    assert!(after.has_new);
    assert_eq!(ids(&after), ids(&before));
}

#[tokio::test]
async fn has_new_is_false_without_last_fetch_time() {
    let posts = InMemoryPostStore::with_posts(vec![post(1, 10)]);
    let reactions = CountingReactionStore::default();

    let page = fetch(&paginator(&posts, &reactions), &params(10)).await;
    assert!(!page.has_new);
}

#[tokio::test]
async fn oversized_page_is_clamped_to_ceiling() {
    let posts =
        InMemoryPostStore::with_posts((1..=150).map(|i| post(i, i as i64)).collect());
    let reactions = CountingReactionStore::default();

    let page = fetch(
        &paginator(&posts, &reactions),
        &RawFeedParams {
            page_size: Some("100000".to_string()),
            ..RawFeedParams::default()
        },
    )
    .await;

    assert_eq!(page.items.len(), 100);
    assert!(!page.is_terminal());
}

#[tokio::test]
async fn reactions_are_fetched_once_per_page() {
    let posts = InMemoryPostStore::with_posts((1..=5).map(|i| post(i, i as i64)).collect());
    let reactions = CountingReactionStore::default();
    reactions.react(VIEWER, Uuid::from_u128(4), "love");
    reactions.react(Uuid::from_u128(0xBEEF), Uuid::from_u128(5), "like");
    let paginator = paginator(&posts, &reactions);

    let page = fetch(&paginator, &params(3)).await;

    assert_eq!(reactions.call_count(), 1);
    assert_eq!(reactions.calls()[0], ids(&page));

    let reacted: HashSet<Uuid> = page
        .items
        .iter()
        .filter(|i| i.is_reacted)
        .map(|i| i.post.id)
        .collect();
    assert_eq!(reacted, HashSet::from([Uuid::from_u128(4)]));
    assert_eq!(page.items[1].my_reaction.as_deref(), Some("love"));
}

#[tokio::test]
async fn storage_failure_surfaces_as_unknown() {
    let posts = InMemoryPostStore::with_posts(vec![post(1, 10)]);
    posts.fail();
    let reactions = CountingReactionStore::default();
    let paginator = paginator(&posts, &reactions);

    let query = FeedQuery::parse(&params(5), VIEWER, &PageLimits::default()).unwrap();
    let err = paginator.fetch_page(&query).await.unwrap_err();

    assert_eq!(normalize(&err), ClientError::unknown());
    assert_eq!(reactions.call_count(), 0);
}

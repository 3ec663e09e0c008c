//! Incremental loader scenarios against the simulated article source.
//!
//! Drives `InfiniteLoader` through the public API only: tickets out,
//! results in, exactly as the event loop does.

use masonry_feed::integration::{fetch_and_resolve, load_all};
use masonry_feed::loader::{FetchKind, InfiniteLoader, LoaderOptions, Resolution};
use masonry_feed::model::{Article, FetchError, PageNumber};
use masonry_feed::source::{FailurePlan, MockArticleSource, PageSource, VecSource};
use proptest::prelude::*;

fn loader() -> InfiniteLoader<Article> {
    InfiniteLoader::new(LoaderOptions::default())
}

fn page(n: u32) -> PageNumber {
    PageNumber::new(n).unwrap()
}

// ===== Pagination =====

#[test]
fn fifty_items_arrive_in_pages_of_twelve() {
    let mut source = MockArticleSource::new(50, 12);
    let mut loader = loader();

    let ticket = loader.load_initial().unwrap();
    fetch_and_resolve(&mut loader, &mut source, ticket);

    let mut counts = vec![loader.items().len()];
    while let Some(ticket) = loader.set_sentinel_visible(true) {
        assert_eq!(ticket.kind(), FetchKind::More);
        assert!(loader.state().has_more());
        fetch_and_resolve(&mut loader, &mut source, ticket);
        counts.push(loader.items().len());
    }

    assert_eq!(counts, vec![12, 24, 36, 48, 50]);
    assert!(!loader.state().has_more());
}

#[test]
fn items_keep_catalogue_order() {
    let mut source = MockArticleSource::new(30, 7);
    let mut loader = loader();

    load_all(&mut loader, &mut source).unwrap();

    let ids: Vec<String> = loader.items().iter().map(|a| a.id.to_string()).collect();
    let expected: Vec<String> = (1..=30).map(|n| n.to_string()).collect();
    assert_eq!(ids, expected);
}

// ===== Concurrency guard =====

#[test]
fn repeated_visibility_while_busy_issues_one_fetch() {
    let mut source = MockArticleSource::new(50, 12);
    let mut loader = loader();
    let ticket = loader.load_initial().unwrap();
    fetch_and_resolve(&mut loader, &mut source, ticket);

    let first = loader.set_sentinel_visible(true);
    let second = loader.set_sentinel_visible(true);
    let third = loader.poll();

    assert!(first.is_some());
    assert_eq!(second, None);
    assert_eq!(third, None);
    assert_eq!(loader.in_flight(), first);
}

#[test]
fn initial_load_is_latched() {
    let mut loader = loader();
    assert!(loader.load_initial().is_some());
    assert_eq!(loader.load_initial(), None);
}

// ===== Retry =====

#[test]
fn failed_page_is_appended_once_after_retry() {
    let mut source = MockArticleSource::new(50, 12).with_failure(FailurePlan::new(page(2), 1));
    let mut loader = loader();
    let ticket = loader.load_initial().unwrap();
    fetch_and_resolve(&mut loader, &mut source, ticket);

    let ticket = loader.set_sentinel_visible(true).unwrap();
    assert_eq!(
        fetch_and_resolve(&mut loader, &mut source, ticket),
        Resolution::Failed
    );
    assert_eq!(loader.items().len(), 12);
    assert!(loader.state().error().is_some());
    // Visibility alone does not retry.
    assert_eq!(loader.poll(), None);

    let ticket = loader.retry().unwrap();
    assert_eq!(ticket.page(), page(2));
    fetch_and_resolve(&mut loader, &mut source, ticket);

    assert_eq!(loader.items().len(), 24);
    assert_eq!(loader.state().error(), None);
    let ids: Vec<String> = loader.items()[12..].iter().map(|a| a.id.to_string()).collect();
    assert_eq!(ids.first().map(String::as_str), Some("13"));
    assert_eq!(ids.last().map(String::as_str), Some("24"));
}

#[test]
fn failed_initial_load_retries_first_page() {
    let mut source =
        MockArticleSource::new(50, 12).with_failure(FailurePlan::new(PageNumber::FIRST, 2));
    let mut loader = loader();

    let ticket = loader.load_initial().unwrap();
    fetch_and_resolve(&mut loader, &mut source, ticket);
    assert!(loader.state().is_initial());

    let ticket = loader.retry().unwrap();
    assert_eq!(ticket.kind(), FetchKind::Initial);
    fetch_and_resolve(&mut loader, &mut source, ticket);
    assert!(loader.state().error().is_some());

    let ticket = loader.retry().unwrap();
    fetch_and_resolve(&mut loader, &mut source, ticket);
    assert_eq!(loader.items().len(), 12);
}

// ===== Reset =====

#[test]
fn reset_starts_over_with_one_initial_load() {
    let mut source = MockArticleSource::new(50, 12);
    let mut loader = loader();
    load_all(&mut loader, &mut source).unwrap();

    let ticket = loader.reset().unwrap();

    assert!(loader.items().is_empty());
    assert!(loader.state().has_more());
    assert_eq!(ticket.kind(), FetchKind::Initial);
    assert_eq!(ticket.page(), PageNumber::FIRST);
    assert_eq!(loader.load_initial(), None);
}

#[test]
fn completion_from_before_reset_is_discarded() {
    let mut source = MockArticleSource::new(50, 12);
    let mut loader = loader();
    let stale = loader.load_initial().unwrap();
    let stale_result = source.fetch_page(stale.page());

    let fresh = loader.reset().unwrap();

    assert_eq!(loader.resolve(stale, stale_result), Resolution::Stale);
    assert!(loader.items().is_empty());
    assert!(loader.state().is_loading());
    assert_eq!(
        fetch_and_resolve(&mut loader, &mut source, fresh),
        Resolution::Applied { added: 12 }
    );
}

#[test]
fn worker_loss_surfaces_as_error() {
    let mut loader: InfiniteLoader<u8> = InfiniteLoader::new(LoaderOptions::default());
    let ticket = loader.load_initial().unwrap();

    loader.resolve(ticket, Err(FetchError::WorkerDisconnected));

    assert_eq!(loader.state().error(), Some("Fetch worker disconnected"));
}

// ===== Properties =====

proptest! {
    #[test]
    fn load_all_fetches_each_page_once(total in 0usize..200, page_size in 1usize..30) {
        let mut source = VecSource::new((0..total).collect::<Vec<_>>(), page_size);
        let mut loader = InfiniteLoader::new(LoaderOptions::default());

        let fetches = load_all(&mut loader, &mut source).unwrap();

        let expected = total.div_ceil(page_size).max(1);
        prop_assert_eq!(fetches, expected);
        let all_items = (0..total).collect::<Vec<_>>();
        prop_assert_eq!(loader.items(), all_items.as_slice());
        prop_assert!(loader.state().is_exhausted());
    }
}

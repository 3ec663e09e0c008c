//! Pure core integration functions.
//!
//! Glue between the loader, the layout engine and a page source that the
//! event loop and the headless `--dump-layout` mode share. Nothing here
//! touches the terminal.

use crate::config::ResolvedConfig;
use crate::layout::{
    BreakpointColumns, ColumnMetrics, LayoutStrategy, MasonryEngine, MasonryLayout, Measure,
};
use crate::loader::{FetchTicket, InfiniteLoader, Resolution};
use crate::model::{Article, FetchError};
use crate::source::PageSource;
use crate::view::CardMeasurer;
use serde::Serialize;
use tracing::{debug, info};

/// Approximate pixel width of one terminal cell.
///
/// Converts the pixel breakpoint table into cell widths.
pub const CELL_WIDTH_PX: f32 = 8.0;

/// Layout engine configured for terminal cells.
pub fn terminal_engine(config: &ResolvedConfig) -> MasonryEngine {
    MasonryEngine::new(config.layout_params())
        .with_strategy(config.strategy)
        .with_breakpoints(BreakpointColumns::default().scaled(CELL_WIDTH_PX))
        .with_timings(config.engine_timings())
}

/// Fetch `ticket` from `source` synchronously and hand the result back.
pub fn fetch_and_resolve<T, S>(
    loader: &mut InfiniteLoader<T>,
    source: &mut S,
    ticket: FetchTicket,
) -> Resolution
where
    S: PageSource<T> + ?Sized,
{
    let result = source.fetch_page(ticket.page());
    loader.resolve(ticket, result)
}

/// Drive `loader` until the source is exhausted, as if the sentinel never
/// left the screen.
///
/// Issues the initial load, then marks the sentinel visible and follows
/// every ticket the loader hands out. Stops at the first failure, leaving
/// the error in the loader state. Returns the number of fetches performed.
///
/// # Errors
///
/// Returns the first `FetchError` the source reports.
pub fn load_all<T, S>(loader: &mut InfiniteLoader<T>, source: &mut S) -> Result<usize, FetchError>
where
    S: PageSource<T> + ?Sized,
{
    let mut fetches = 0;
    let mut next = loader.load_initial();

    while let Some(ticket) = next {
        fetches += 1;
        let result = source.fetch_page(ticket.page());
        let failure = result.as_ref().err().cloned();
        loader.resolve(ticket, result);
        if let Some(err) = failure {
            return Err(err);
        }
        next = loader.set_sentinel_visible(true);
    }

    debug!(fetches, items = loader.items().len(), "Loaded every page");
    Ok(fetches)
}

/// One placed card in a [`LayoutSnapshot`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotItem {
    /// Article id.
    pub id: String,
    /// Article title.
    pub title: String,
    /// Column the card landed in.
    pub column: usize,
    /// Left edge, in cells.
    pub x: f32,
    /// Top edge, in rows.
    pub y: f32,
    /// Card width, in cells.
    pub width: f32,
    /// Card height, in rows.
    pub height: f32,
}

/// Serializable view of a finished layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutSnapshot {
    /// Container width the layout was computed for.
    pub container_width: f32,
    /// Strategy used.
    pub strategy: LayoutStrategy,
    /// Column geometry.
    pub metrics: ColumnMetrics,
    /// Height of the tallest column.
    pub container_height: f32,
    /// Cards in item order.
    pub items: Vec<SnapshotItem>,
}

impl LayoutSnapshot {
    /// Pair a layout with the articles it placed.
    pub fn new(
        container_width: f32,
        strategy: LayoutStrategy,
        layout: &MasonryLayout,
        articles: &[Article],
    ) -> Self {
        let items = layout
            .positions
            .iter()
            .zip(&layout.columns)
            .zip(articles)
            .map(|((position, column), article)| SnapshotItem {
                id: article.id.to_string(),
                title: article.title.clone(),
                column: *column,
                x: position.x,
                y: position.y,
                width: position.width,
                height: position.height,
            })
            .collect();

        Self {
            container_width,
            strategy,
            metrics: layout.metrics,
            container_height: layout.container_height,
            items,
        }
    }
}

/// Load every page from `source` with a fresh loader.
///
/// # Errors
///
/// Returns the first `FetchError` the source reports.
pub fn load_articles<T, S>(config: &ResolvedConfig, source: &mut S) -> Result<Vec<T>, FetchError>
where
    T: Clone,
    S: PageSource<T> + ?Sized,
{
    let mut loader = InfiniteLoader::new(config.loader_options());
    load_all(&mut loader, source)?;
    Ok(loader.items().to_vec())
}

/// Lay `articles` out at `width` cells in a single immediate pass.
pub fn layout_snapshot<M>(
    config: &ResolvedConfig,
    articles: &[Article],
    width: u16,
    measurer: &mut M,
) -> LayoutSnapshot
where
    M: Measure + ?Sized,
{
    let mut engine = terminal_engine(config);
    let now = std::time::Instant::now();
    engine.set_container_width(Some(f32::from(width)), now);
    engine.set_item_count(articles.len(), now);
    engine.recompute(measurer);

    let layout = match engine.layout() {
        Some(layout) => layout.clone(),
        None => MasonryLayout::empty(ColumnMetrics {
            count: 1,
            width: f32::from(width),
        }),
    };
    info!(
        items = articles.len(),
        width,
        columns = layout.metrics.count,
        "Headless layout computed"
    );

    LayoutSnapshot::new(f32::from(width), engine.strategy(), &layout, articles)
}

/// Headless `--dump-layout`: load everything, measure real cards, lay out.
///
/// # Errors
///
/// Returns the first `FetchError` the source reports.
pub fn dump_layout<S>(
    config: &ResolvedConfig,
    source: &mut S,
    width: u16,
) -> Result<LayoutSnapshot, FetchError>
where
    S: PageSource<Article> + ?Sized,
{
    let articles = load_articles(config, source)?;
    let mut measurer = CardMeasurer::new(&articles);
    Ok(layout_snapshot(config, &articles, width, &mut measurer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::FixedHeights;
    use crate::loader::LoaderOptions;
    use crate::model::{Page, PageNumber};
    use crate::source::{FailurePlan, MockArticleSource, VecSource};

    fn config() -> ResolvedConfig {
        ResolvedConfig {
            latency_ms: 0,
            ..ResolvedConfig::default()
        }
    }

    /// Counts fetches per page.
    struct Counting<S> {
        inner: S,
        pages: Vec<u32>,
    }

    impl<T, S: PageSource<T>> PageSource<T> for Counting<S> {
        fn fetch_page(&mut self, page: PageNumber) -> Result<Page<T>, FetchError> {
            self.pages.push(page.get());
            self.inner.fetch_page(page)
        }
    }

    // ===== load_all =====

    #[test]
    fn load_all_fetches_each_page_once_in_order() {
        let mut source = Counting {
            inner: MockArticleSource::new(50, 12),
            pages: Vec::new(),
        };
        let mut loader = InfiniteLoader::new(LoaderOptions::default());

        let fetches = load_all(&mut loader, &mut source).unwrap();

        assert_eq!(fetches, 5);
        assert_eq!(source.pages, vec![1, 2, 3, 4, 5]);
        assert_eq!(loader.items().len(), 50);
        assert!(loader.state().is_exhausted());
    }

    #[test]
    fn load_all_stops_on_failure_and_keeps_items() {
        let mut source = MockArticleSource::new(50, 12)
            .with_failure(FailurePlan::new(PageNumber::new(3).unwrap(), 1));
        let mut loader = InfiniteLoader::new(LoaderOptions::default());

        let err = load_all(&mut loader, &mut source).unwrap_err();

        assert_eq!(err.page(), PageNumber::new(3).ok());
        assert_eq!(loader.items().len(), 24);
        assert_eq!(loader.state().error(), Some(err.to_string().as_str()));
    }

    #[test]
    fn load_all_with_empty_source_fetches_once() {
        let mut source: VecSource<u8> = VecSource::new(Vec::new(), 12);
        let mut loader = InfiniteLoader::new(LoaderOptions::default());

        assert_eq!(load_all(&mut loader, &mut source).unwrap(), 1);
        assert!(loader.items().is_empty());
        assert!(loader.state().is_exhausted());
    }

    #[test]
    fn fetch_and_resolve_applies_page() {
        let mut source = VecSource::new(vec![1u8, 2, 3], 2);
        let mut loader = InfiniteLoader::new(LoaderOptions::default());
        let ticket = loader.load_initial().unwrap();

        let resolution = fetch_and_resolve(&mut loader, &mut source, ticket);

        assert_eq!(resolution, Resolution::Applied { added: 2 });
        assert_eq!(loader.items(), &[1, 2]);
    }

    // ===== terminal_engine =====

    #[test]
    fn terminal_engine_uses_config() {
        let config = ResolvedConfig {
            strategy: LayoutStrategy::Breakpoints,
            ..config()
        };
        let engine = terminal_engine(&config);
        assert_eq!(engine.strategy(), LayoutStrategy::Breakpoints);
        assert_eq!(engine.params().min_column_width, 32.0);
    }

    // ===== layout_snapshot / dump_layout =====

    #[test]
    fn snapshot_places_every_article() {
        let mut source = MockArticleSource::new(20, 12);
        let articles: Vec<Article> = load_articles(&config(), &mut source).unwrap();
        let mut heights = FixedHeights(vec![5.0; articles.len()]);

        let snapshot = layout_snapshot(&config(), &articles, 100, &mut heights);

        // floor(100 / 32) = 3 columns of (100 - 2 * 2) / 3 cells
        assert_eq!(snapshot.metrics.count, 3);
        assert_eq!(snapshot.metrics.width, 32.0);
        assert_eq!(snapshot.items.len(), 20);
        assert_eq!(snapshot.items[0].id, "1");
        assert_eq!(snapshot.items[3].column, 0);
        assert_eq!(snapshot.items[3].y, 7.0);
    }

    #[test]
    fn snapshot_serializes_strategy_name() {
        let articles = crate::source::mock::generate_articles(2);
        let mut heights = FixedHeights(vec![3.0; 2]);

        let snapshot = layout_snapshot(&config(), &articles, 40, &mut heights);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["strategy"], "shortest");
        assert_eq!(json["items"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn dump_layout_measures_real_cards() {
        let mut source = MockArticleSource::new(30, 12);

        let snapshot = dump_layout(&config(), &mut source, 80).unwrap();

        assert_eq!(snapshot.items.len(), 30);
        let articles = crate::source::mock::generate_articles(30);
        for (item, article) in snapshot.items.iter().zip(&articles) {
            let expected = crate::view::card_height(article, item.width.floor() as u16);
            assert_eq!(item.height, f32::from(expected));
        }
    }

    #[test]
    fn dump_layout_propagates_fetch_error() {
        let mut source =
            MockArticleSource::new(20, 12).with_failure(FailurePlan::new(PageNumber::FIRST, 1));
        let result = dump_layout(&config(), &mut source, 80);
        assert!(matches!(result, Err(FetchError::Unavailable { .. })));
    }
}

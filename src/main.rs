//! Masonry Feed - Entry Point

use clap::Parser;
use masonry_feed::config::{CliOverrides, ResolvedConfig};
use masonry_feed::layout::LayoutStrategy;
use masonry_feed::model::{AppError, PageNumber};
use masonry_feed::source::{FailurePlan, MockArticleSource};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Masonry Feed - scrolling card gallery with incremental loading
#[derive(Parser, Debug)]
#[command(name = "masonry-feed")]
#[command(version)]
#[command(about = "Masonry card gallery that loads more articles as you scroll")]
pub struct Args {
    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Column assignment strategy
    #[arg(long, value_parser = ["shortest", "breakpoints"])]
    pub strategy: Option<String>,

    /// Gap between cards, in cells
    #[arg(long)]
    pub gap: Option<f32>,

    /// Minimum column width, in cells
    #[arg(long)]
    pub min_column_width: Option<f32>,

    /// Articles per page
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Articles in the simulated catalogue
    #[arg(long = "total")]
    pub total_items: Option<usize>,

    /// Simulated latency of the first page in milliseconds
    #[arg(long)]
    pub initial_latency_ms: Option<u64>,

    /// Simulated latency of every later page in milliseconds
    #[arg(long)]
    pub latency_ms: Option<u64>,

    /// Page that fails until retried (must be positive)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub fail_page: Option<u32>,

    /// How many attempts at --fail-page fail
    #[arg(long, default_value = "1")]
    pub fail_attempts: u32,

    /// Load every page, lay it out WIDTH cells wide and print JSON instead of
    /// starting the TUI
    #[arg(long, value_name = "WIDTH", value_parser = clap::value_parser!(u16).range(1..))]
    pub dump_layout: Option<u16>,
}

impl Args {
    /// Flags that override configuration.
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            strategy: self
                .strategy
                .as_deref()
                .and_then(|name| name.parse::<LayoutStrategy>().ok()),
            gap: self.gap,
            min_column_width: self.min_column_width,
            page_size: self.page_size,
            total_items: self.total_items,
            initial_latency_ms: self.initial_latency_ms,
            latency_ms: self.latency_ms,
        }
    }

    /// Failure injection requested on the command line.
    pub fn failure_plan(&self) -> Option<FailurePlan> {
        let page = PageNumber::new(self.fail_page?).ok()?;
        Some(FailurePlan::new(page, self.fail_attempts))
    }
}

fn build_source(config: &ResolvedConfig, args: &Args, latency: bool) -> MockArticleSource {
    let mut source = MockArticleSource::new(config.total_items, config.page_size);
    if latency {
        source = source.with_latency(config.initial_latency(), config.latency());
    }
    if let Some(plan) = args.failure_plan() {
        source = source.with_failure(plan);
    }
    source
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args, then validation
    let config = masonry_feed::config::resolve_config(args.config.clone(), &args.overrides())
        .map_err(AppError::from)?;

    masonry_feed::logging::init(&config.log_file_path).map_err(AppError::from)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    if let Some(width) = args.dump_layout {
        // Headless runs skip the simulated latency.
        let mut source = build_source(&config, &args, false);
        let snapshot = masonry_feed::integration::dump_layout(&config, &mut source, width)
            .map_err(AppError::from)?;

        let json = serde_json::to_string_pretty(&snapshot).map_err(AppError::from)?;
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{json}").map_err(AppError::from)?;
        return Ok(());
    }

    let source = build_source(&config, &args, true);
    masonry_feed::view::run_with_source(&config, source)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::time::Duration;

    #[test]
    fn test_help_does_not_error() {
        let result = Args::try_parse_from(["masonry-feed", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["masonry-feed", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_args_defaults() {
        let args = Args::parse_from(["masonry-feed"]);
        assert_eq!(args.config, None);
        assert_eq!(args.strategy, None);
        assert_eq!(args.dump_layout, None);
        assert_eq!(args.fail_attempts, 1);
        assert_eq!(args.overrides(), CliOverrides::default());
        assert!(args.failure_plan().is_none());
    }

    #[test]
    fn test_strategy_flag_maps_to_override() {
        let args = Args::parse_from(["masonry-feed", "--strategy", "breakpoints"]);
        assert_eq!(
            args.overrides().strategy,
            Some(LayoutStrategy::Breakpoints)
        );
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        let result = Args::try_parse_from(["masonry-feed", "--strategy", "random"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_numeric_overrides() {
        let args = Args::parse_from([
            "masonry-feed",
            "--gap",
            "1",
            "--min-column-width",
            "40",
            "--page-size",
            "6",
            "--total",
            "20",
            "--initial-latency-ms",
            "5",
            "--latency-ms",
            "0",
        ]);
        let overrides = args.overrides();
        assert_eq!(overrides.gap, Some(1.0));
        assert_eq!(overrides.min_column_width, Some(40.0));
        assert_eq!(overrides.page_size, Some(6));
        assert_eq!(overrides.total_items, Some(20));
        assert_eq!(overrides.initial_latency_ms, Some(5));
        assert_eq!(overrides.latency_ms, Some(0));
    }

    #[test]
    fn test_fail_page_builds_plan() {
        let args = Args::parse_from(["masonry-feed", "--fail-page", "2", "--fail-attempts", "3"]);
        let plan = args.failure_plan().unwrap();
        assert_eq!(plan.page.get(), 2);
        assert_eq!(plan.attempts, 3);
    }

    #[test]
    fn test_fail_page_zero_rejected() {
        let result = Args::try_parse_from(["masonry-feed", "--fail-page", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_dump_layout_takes_width() {
        let args = Args::parse_from(["masonry-feed", "--dump-layout", "120"]);
        assert_eq!(args.dump_layout, Some(120));
    }

    #[test]
    fn test_build_source_applies_config() {
        let args = Args::parse_from(["masonry-feed"]);
        let config = ResolvedConfig {
            total_items: 7,
            page_size: 3,
            ..ResolvedConfig::default()
        };
        let source = build_source(&config, &args, false);
        assert_eq!(source.total(), 7);
        assert_eq!(source.page_size(), 3);
        assert_eq!(source.latency_for(PageNumber::FIRST), Duration::ZERO);
    }

    #[test]
    fn test_build_source_slows_first_page_more() {
        let args = Args::parse_from(["masonry-feed"]);
        let config = ResolvedConfig {
            initial_latency_ms: 1000,
            latency_ms: 800,
            ..ResolvedConfig::default()
        };
        let source = build_source(&config, &args, true);
        let second = PageNumber::FIRST.next();
        assert_eq!(source.latency_for(PageNumber::FIRST), Duration::from_millis(1000));
        assert_eq!(source.latency_for(second), Duration::from_millis(800));
    }
}

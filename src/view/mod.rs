//! TUI rendering and terminal management (impure shell)
//!
//! The event loop owns the loader, the layout engine and the sentinel
//! observer. Fetches run on a [`FetchWorker`]; their completions are drained
//! on every tick and handed to the loader, which is the only thing that
//! mutates feed state.

pub mod card;
pub mod grid;
pub mod status;
mod styles;

pub use card::{card_height, wrap_text, CardMeasurer};
pub use grid::{FeedGeometry, GridView};
pub use status::{footer_lines, FeedScreen, HeaderInfo};

use crate::config::{KeyBindings, ResolvedConfig};
use crate::integration;
use crate::layout::MasonryEngine;
use crate::loader::{FetchTicket, InfiniteLoader, Resolution, SentinelObserver, Span};
use crate::model::{Article, KeyAction};
use crate::source::{Completion, FetchWorker, PageSource};
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Constraint, Layout};
use ratatui::widgets::{Paragraph, Widget};
use ratatui::{Frame, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Longest the loop sleeps waiting for input.
const TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Rows taken by the header and hint bars.
const CHROME_ROWS: u16 = 2;

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    loader: InfiniteLoader<Article>,
    engine: MasonryEngine,
    observer: SentinelObserver,
    worker: FetchWorker<Article>,
    key_bindings: KeyBindings,
    gap: f32,
    /// First content row shown at the top of the grid area.
    scroll: u16,
    /// Height of the grid area.
    viewport_rows: u16,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(config: &ResolvedConfig, worker: FetchWorker<Article>) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Self::with_terminal(terminal, config, worker)
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits.
    pub fn run(&mut self) -> Result<(), TuiError> {
        loop {
            let now = Instant::now();
            self.tick(now);
            self.draw()?;

            let timeout = self
                .engine
                .time_until_due(now)
                .map_or(TICK_INTERVAL, |due| due.min(TICK_INTERVAL));
            if !event::poll(timeout)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if self.handle_key(key, Instant::now()) {
                        return Ok(());
                    }
                }
                Event::Resize(width, height) => {
                    self.handle_resize(width, height, Instant::now());
                }
                _ => {}
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Wrap an already initialised terminal and issue the initial load.
    pub fn with_terminal(
        terminal: Terminal<B>,
        config: &ResolvedConfig,
        worker: FetchWorker<Article>,
    ) -> Result<Self, TuiError> {
        let loader = InfiniteLoader::new(config.loader_options());
        let observer = loader.options().observer();
        let size = terminal.size()?;

        let mut app = Self {
            terminal,
            loader,
            engine: integration::terminal_engine(config),
            observer,
            worker,
            key_bindings: KeyBindings::default(),
            gap: config.gap,
            scroll: 0,
            viewport_rows: 0,
        };

        app.handle_resize(size.width, size.height, Instant::now());
        let ticket = app.loader.load_initial();
        app.issue(ticket);
        Ok(app)
    }

    /// Loader driving the feed.
    pub fn loader(&self) -> &InfiniteLoader<Article> {
        &self.loader
    }

    /// Layout engine.
    pub fn engine(&self) -> &MasonryEngine {
        &self.engine
    }

    /// Current scroll offset, in rows.
    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Terminal, for inspecting what was drawn.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Advance the feed to `now`.
    ///
    /// Applies finished fetches, runs a due layout pass and re-checks the
    /// sentinel against the new geometry.
    pub fn tick(&mut self, now: Instant) {
        for completion in self.worker.drain() {
            self.apply_completion(completion, now);
        }

        let mut measurer = CardMeasurer::new(self.loader.items());
        let published = self.engine.tick(now, &mut measurer);
        if published {
            self.clamp_scroll();
        }

        self.observe_sentinel();
        if published {
            let ticket = self.loader.poll();
            self.issue(ticket);
        }
    }

    /// Block up to `timeout` for one fetch to finish and apply it.
    ///
    /// Returns `false` if nothing arrived.
    pub fn wait_for_completion(&mut self, timeout: Duration) -> bool {
        match self.worker.recv_timeout(timeout) {
            Ok(Some(completion)) => {
                self.apply_completion(completion, Instant::now());
                true
            }
            Ok(None) => false,
            Err(err) => {
                warn!(error = %err, "No completion available");
                false
            }
        }
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };
        debug!(?action, "Key action");

        match action {
            KeyAction::Quit => return true,
            KeyAction::ScrollDown => self.scroll_by(1),
            KeyAction::ScrollUp => self.scroll_by(-1),
            KeyAction::PageDown => self.scroll_by(i32::from(self.page_rows())),
            KeyAction::PageUp => self.scroll_by(-i32::from(self.page_rows())),
            KeyAction::ScrollToTop => self.scroll = 0,
            KeyAction::ScrollToBottom => self.scroll = self.max_scroll(),
            KeyAction::Retry => {
                let ticket = self.loader.retry();
                self.issue(ticket);
            }
            KeyAction::Reset => self.reset(now),
            KeyAction::ToggleStrategy => {
                let strategy = self.engine.strategy().toggled();
                info!(%strategy, "Switching layout strategy");
                self.engine.set_strategy(strategy, now);
            }
        }

        self.observe_sentinel();
        false
    }

    /// Handle a terminal resize.
    pub fn handle_resize(&mut self, width: u16, height: u16, now: Instant) {
        debug!(width, height, "Handling resize");
        self.viewport_rows = height.saturating_sub(CHROME_ROWS);
        let width = (width > 0).then(|| f32::from(width));
        self.engine.set_container_width(width, now);
        self.clamp_scroll();
    }

    /// Render the current frame
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let loader = &self.loader;
        let engine = &self.engine;
        let gap = self.gap;
        let scroll = self.scroll;
        self.terminal
            .draw(|frame| render_feed(frame, loader, engine, gap, scroll))?;
        Ok(())
    }

    fn apply_completion(&mut self, completion: Completion<Article>, now: Instant) {
        let Completion { ticket, result } = completion;
        let before = self.loader.items().len();
        if let Resolution::Applied { .. } = self.loader.resolve(ticket, result) {
            let count = self.loader.items().len();
            if count == before {
                // No relayout will follow, so re-check the trigger here.
                let ticket = self.loader.poll();
                self.issue(ticket);
            } else {
                self.engine.set_item_count(count, now);
            }
        }
    }

    /// Hand a ticket to the worker, failing it in place if the worker is gone.
    fn issue(&mut self, ticket: Option<FetchTicket>) {
        let Some(ticket) = ticket else {
            return;
        };
        if let Err(err) = self.worker.submit(ticket) {
            self.loader.resolve(ticket, Err(err));
        }
    }

    fn reset(&mut self, now: Instant) {
        if let Some(change) = self.observer.disconnect() {
            self.loader.set_sentinel_visible(change.is_visible());
        }
        self.scroll = 0;
        self.engine.set_item_count(0, now);
        let ticket = self.loader.reset();
        self.issue(ticket);
    }

    fn geometry(&self) -> Option<FeedGeometry> {
        let layout = self.engine.layout()?;
        if self.loader.items().is_empty() {
            return None;
        }
        let footer = footer_lines(self.loader.state()).len();
        Some(FeedGeometry::new(layout, self.gap, footer))
    }

    fn observe_sentinel(&mut self) {
        let sentinel = self
            .geometry()
            .filter(|_| self.loader.state().has_more())
            .map(|geometry| geometry.sentinel());

        let change = match sentinel {
            Some(sentinel) => {
                let viewport = Span::new(f32::from(self.scroll), f32::from(self.viewport_rows));
                self.observer.observe(sentinel, viewport)
            }
            None => self.observer.disconnect(),
        };

        if let Some(change) = change {
            debug!(?change, "Sentinel visibility changed");
            let ticket = self.loader.set_sentinel_visible(change.is_visible());
            self.issue(ticket);
        }
    }

    fn page_rows(&self) -> u16 {
        self.viewport_rows.saturating_sub(1).max(1)
    }

    fn max_scroll(&self) -> u16 {
        self.geometry()
            .map_or(0, |geometry| geometry.max_scroll(self.viewport_rows))
    }

    fn scroll_by(&mut self, delta: i32) {
        let target = (i32::from(self.scroll) + delta).clamp(0, i32::from(self.max_scroll()));
        self.scroll = u16::try_from(target).unwrap_or(0);
    }

    fn clamp_scroll(&mut self) {
        // Hold position while a relayout is pending.
        if self.engine.is_ready() {
            self.scroll = self.scroll.min(self.max_scroll());
        }
    }
}

/// Draw one frame: header, body, hint bar.
fn render_feed(
    frame: &mut Frame,
    loader: &InfiniteLoader<Article>,
    engine: &MasonryEngine,
    gap: f32,
    scroll: u16,
) {
    let [header_area, body_area, hint_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let header = HeaderInfo {
        loaded: loader.items().len(),
        strategy: engine.strategy(),
        columns: engine.column_metrics().map(|metrics| metrics.count),
        ready: engine.is_ready(),
    };
    let buf = frame.buffer_mut();
    Paragraph::new(header.line()).render(header_area, buf);
    Paragraph::new(status::hint_line()).render(hint_area, buf);

    let state = loader.state();
    match FeedScreen::for_state(state) {
        FeedScreen::Grid => {
            if let Some(layout) = engine.layout() {
                let footer = footer_lines(state);
                let geometry = FeedGeometry::new(layout, gap, footer.len());
                GridView::new(loader.items(), layout, geometry, footer, scroll)
                    .render(body_area, buf);
            }
        }
        screen => status::render_centered(screen.lines(), body_area, buf),
    }
}

/// Initialize and run the TUI application against `source`
///
/// This is the main entry point for the TUI. It handles terminal
/// setup, runs the event loop, and ensures cleanup on exit.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_source<S>(config: &ResolvedConfig, source: S) -> Result<(), TuiError>
where
    S: PageSource<Article> + Send + 'static,
{
    let worker = FetchWorker::spawn(source)?;
    let mut app = TuiApp::new(config, worker)?;

    // Run the app and ensure cleanup happens even on error
    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;

//! Rendering through the public TUI API with `TestBackend`.

use masonry_feed::config::ResolvedConfig;
use masonry_feed::source::{FetchWorker, MockArticleSource};
use masonry_feed::view::TuiApp;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::Terminal;
use std::time::{Duration, Instant};

const WAIT: Duration = Duration::from_secs(5);

/// Rows of the buffer with trailing whitespace trimmed.
fn buffer_rows(buffer: &Buffer) -> Vec<String> {
    let area = buffer.area;
    (area.top()..area.bottom())
        .map(|y| {
            (area.left()..area.right())
                .map(|x| buffer[(x, y)].symbol().to_string())
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect()
}

fn create_app(source: MockArticleSource, width: u16, height: u16) -> TuiApp<TestBackend> {
    let config = ResolvedConfig {
        latency_ms: 0,
        ..ResolvedConfig::default()
    };
    let terminal = Terminal::new(TestBackend::new(width, height)).expect("test terminal");
    let worker = FetchWorker::spawn(source).expect("spawn worker");
    TuiApp::with_terminal(terminal, &config, worker).expect("create app")
}

fn rows(app: &TuiApp<TestBackend>) -> Vec<String> {
    buffer_rows(app.terminal().backend().buffer())
}

#[test]
fn loading_message_is_centered_in_body() {
    let mut app = create_app(MockArticleSource::new(10, 5), 50, 6);
    app.draw().expect("draw");

    let rows = rows(&app);
    assert_eq!(rows[2], "               Loading articles...");
    assert!(rows[5].starts_with(" j/k scroll"));
}

#[test]
fn empty_catalogue_shows_empty_state() {
    let mut app = create_app(MockArticleSource::new(0, 5), 50, 6);
    assert!(app.wait_for_completion(WAIT));
    app.tick(Instant::now() + Duration::from_millis(500));
    app.draw().expect("draw");

    let rows = rows(&app);
    assert_eq!(rows[0], " Masonry Feed │ 0 loaded │ shortest │ 1 col");
    assert_eq!(rows[1], "");
    assert_eq!(rows[2], "                No articles found");
    assert_eq!(rows[3], "                Press R to reload");
    assert_eq!(rows[4], "");
}

#[test]
fn exhausted_feed_ends_with_summary() {
    // Three short pages in a tall terminal: everything fits on screen.
    let mut app = create_app(MockArticleSource::new(3, 1), 100, 200);
    for _ in 0..3 {
        assert!(app.wait_for_completion(WAIT));
        app.tick(Instant::now() + Duration::from_millis(500));
    }
    app.draw().expect("draw");

    assert!(app.loader().state().is_exhausted());
    let rows = rows(&app);
    let text = rows.join("\n");
    assert!(text.contains("You've reached the end!"));
    assert!(text.contains("3 articles loaded"));
    assert!(rows[0].contains("3 loaded"));
}

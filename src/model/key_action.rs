//! Domain-level keyboard actions independent of key bindings.

/// Actions the gallery responds to.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Scrolling
    /// Scroll the grid up one row. Default: k/↑
    ScrollUp,
    /// Scroll the grid down one row. Default: j/↓
    ScrollDown,
    /// Scroll up by one viewport height. Default: Ctrl+u/Page Up
    PageUp,
    /// Scroll down by one viewport height. Default: Ctrl+d/Page Down
    PageDown,
    /// Jump to the top of the grid. Default: g/Home
    ScrollToTop,
    /// Jump to the bottom of the grid. Default: G/End
    ScrollToBottom,

    // Loading
    /// Retry the failed fetch. Default: r
    Retry,
    /// Drop everything and reload from the first page. Default: R
    Reset,

    // Layout
    /// Switch between shortest-column and breakpoint layout. Default: s
    ToggleStrategy,

    // Application
    /// Exit. Default: q/Ctrl+c
    Quit,
}

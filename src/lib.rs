//! Masonry Feed
//!
//! Terminal card gallery with shortest-column masonry layout and
//! scroll-driven incremental loading.
//!
//! Follows the Pure Core / Impure Shell architecture: `loader` and `layout`
//! are pure state machines that never perform I/O; `source` and `view` own
//! threads, clocks and the terminal.

pub mod config;
pub mod layout;
pub mod loader;
pub mod logging;
pub mod model;
pub mod source;
pub mod view;

// Re-export main loop integration
pub mod integration;

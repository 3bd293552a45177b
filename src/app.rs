//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and wraps the mixer together with
//! the cursor and text-entry state of the terminal UI.

mod model;

pub use model::*;

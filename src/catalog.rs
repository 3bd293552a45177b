//! Sound catalog: the fixed list of tracks the user can pick from.
//!
//! The catalog is assembled once at startup from the built-in tracks, the
//! `[[catalog.tracks]]` config entries and a scan of the sounds directory.

mod builtin;
mod display;
mod model;
mod scan;

pub use model::{Catalog, SoundSource, Track};
pub use scan::build;

#[cfg(test)]
mod tests;

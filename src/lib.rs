//! Commit punch cards: per-author weekday × hour activity grids rendered to PNG.
//!
//! The engine is two passes. [`punch::aggregate()`] folds a commit stream into
//! per-author [`model::FrequencyTable`]s and a global maximum, and
//! [`render::render()`] lays those out as one stacked section per author.

pub mod cli;
pub mod error;
pub mod git;
pub mod model;
pub mod punch;
pub mod render;
pub mod util;

pub use error::{PunchError, Result};

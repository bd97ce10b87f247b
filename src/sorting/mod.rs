//! Sorting module - step scripts and animated playback

mod player;
mod steps;

pub use player::{BarState, SortBar, SortPlayer};
pub use steps::{apply_swaps, script, SortAlgorithm, SortStep};

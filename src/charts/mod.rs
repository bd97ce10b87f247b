//! Charts module - live bar plotting and static snapshots

mod plotter;
mod snapshot;

pub use plotter::BarPlotter;
pub use snapshot::SnapshotRenderer;

//! GUI module - User interface components

mod app;
mod control_panel;
mod roster_panel;

pub use app::GradebookApp;
pub use control_panel::{ControlPanel, ControlPanelAction, StudentForm};
pub use roster_panel::{RosterPanel, RosterPanelAction};

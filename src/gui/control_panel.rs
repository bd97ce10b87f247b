//! Control Panel Widget
//! Left side panel with the student form, sorting controls and roster I/O.

use egui::{Color32, RichText};

use crate::data::NewStudent;
use crate::sorting::SortAlgorithm;

/// Form state for the student being added or edited.
#[derive(Default, Clone)]
pub struct StudentForm {
    pub name: String,
    pub roll: String,
    pub marks: String,
}

impl StudentForm {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Fill the form from a selected roster row.
    pub fn set(&mut self, name: &str, roll: &str, marks: i64) {
        self.name = name.to_string();
        self.roll = roll.to_string();
        self.marks = marks.to_string();
    }

    /// Validate the fields into an insert payload.
    pub fn parse(&self) -> Result<NewStudent, String> {
        let name = self.name.trim();
        let roll = self.roll.trim();
        let marks = self.marks.trim();

        if name.is_empty() || roll.is_empty() || marks.is_empty() {
            return Err("Fill all fields".to_string());
        }

        let marks: i64 = marks
            .parse()
            .map_err(|_| "Marks must be an integer".to_string())?;
        if marks < 0 {
            return Err("Marks cannot be negative".to_string());
        }

        Ok(NewStudent {
            name: name.to_string(),
            roll: roll.to_string(),
            marks,
        })
    }
}

/// Left side control panel with the record form and visualizer controls.
pub struct ControlPanel {
    pub form: StudentForm,
    pub selected_id: Option<i64>,
    /// Animation speed, 1 (slow) to 100 (fast).
    pub speed: f32,
    pub progress: f32,
    pub status: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            form: StudentForm::default(),
            selected_id: None,
            speed: 40.0,
            progress: 0.0,
            status: "Ready".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Per-step delay in seconds derived from the speed slider.
    pub fn step_delay(&self) -> f64 {
        ((101.0 - self.speed as f64) / 700.0).max(0.001)
    }

    /// Set progress and status.
    pub fn set_progress(&mut self, progress: f32, status: &str) {
        self.progress = progress;
        self.status = status.to_string();
    }

    /// Draw the control panel.
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🎓 Gradebook")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Student Records & Sort Visualizer")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Student Form Section =====
        ui.label(RichText::new("📝 Student").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut self.form.name)
                        .hint_text("Name")
                        .desired_width(f32::INFINITY),
                );
                ui.add_space(4.0);
                ui.add(
                    egui::TextEdit::singleline(&mut self.form.roll)
                        .hint_text("Roll No")
                        .desired_width(f32::INFINITY),
                );
                ui.add_space(4.0);
                ui.add(
                    egui::TextEdit::singleline(&mut self.form.marks)
                        .hint_text("Marks (integer)")
                        .desired_width(f32::INFINITY),
                );
            });

        ui.add_space(8.0);

        ui.horizontal(|ui| {
            if ui.button("➕ Add").clicked() {
                action = ControlPanelAction::Add;
            }
            let has_selection = self.selected_id.is_some();
            ui.add_enabled_ui(has_selection, |ui| {
                if ui.button("✏ Update").clicked() {
                    action = ControlPanelAction::Update;
                }
                if ui.button("🗑 Delete").clicked() {
                    action = ControlPanelAction::Delete;
                }
            });
            if ui.button("Clear").clicked() {
                action = ControlPanelAction::ClearForm;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Sorting Visualizer Section =====
        ui.label(RichText::new("📊 Sorting Visualizer").size(14.0).strong());
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.label("Speed:");
            ui.add(egui::Slider::new(&mut self.speed, 1.0..=100.0).show_value(false));
        });

        ui.add_space(5.0);

        ui.vertical_centered_justified(|ui| {
            if ui.button("Insertion Sort").clicked() {
                action = ControlPanelAction::StartSort(SortAlgorithm::Insertion);
            }
            ui.add_space(4.0);
            if ui.button("Selection Sort").clicked() {
                action = ControlPanelAction::StartSort(SortAlgorithm::Selection);
            }
            ui.add_space(4.0);
            let stop = egui::Button::new(RichText::new("Stop Sorting").color(Color32::WHITE))
                .fill(Color32::from_rgb(178, 34, 34));
            if ui.add(stop).clicked() {
                action = ControlPanelAction::StopSort;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Roster I/O Section =====
        ui.label(RichText::new("📁 Roster").size(14.0).strong());
        ui.add_space(5.0);

        ui.vertical_centered_justified(|ui| {
            if ui.button("📂 Import CSV").clicked() {
                action = ControlPanelAction::ImportCsv;
            }
            ui.add_space(4.0);
            if ui.button("💾 Export CSV").clicked() {
                action = ControlPanelAction::ExportCsv;
            }
            ui.add_space(4.0);
            if ui.button("💾 Export JSON").clicked() {
                action = ControlPanelAction::ExportJson;
            }
            ui.add_space(4.0);
            if ui.button("🖼 Save Chart PNG").clicked() {
                action = ControlPanelAction::SaveChart;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Progress Section =====
        ui.add(
            egui::ProgressBar::new(self.progress / 100.0)
                .show_percentage()
                .animate(self.progress > 0.0 && self.progress < 100.0),
        );

        ui.add_space(5.0);

        let status_color = if self.status.contains("Error") || self.status.contains("failed") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("finished") || self.status.contains("Imported") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlPanelAction {
    None,
    Add,
    Update,
    Delete,
    ClearForm,
    StartSort(SortAlgorithm),
    StopSort,
    ImportCsv,
    ExportCsv,
    ExportJson,
    SaveChart,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, roll: &str, marks: &str) -> StudentForm {
        StudentForm {
            name: name.to_string(),
            roll: roll.to_string(),
            marks: marks.to_string(),
        }
    }

    #[test]
    fn test_parse_valid_form() {
        let parsed = form("Alice", "R-01", " 91 ").parse().unwrap();
        assert_eq!(parsed.name, "Alice");
        assert_eq!(parsed.roll, "R-01");
        assert_eq!(parsed.marks, 91);
    }

    #[test]
    fn test_parse_rejects_blank_fields() {
        assert_eq!(form("", "R-01", "91").parse().unwrap_err(), "Fill all fields");
        assert_eq!(form("Alice", "  ", "91").parse().unwrap_err(), "Fill all fields");
        assert_eq!(form("Alice", "R-01", "").parse().unwrap_err(), "Fill all fields");
    }

    #[test]
    fn test_parse_rejects_bad_marks() {
        assert_eq!(
            form("Alice", "R-01", "ninety").parse().unwrap_err(),
            "Marks must be an integer"
        );
        assert_eq!(
            form("Alice", "R-01", "-3").parse().unwrap_err(),
            "Marks cannot be negative"
        );
    }

    #[test]
    fn test_step_delay_mapping() {
        let mut panel = ControlPanel::new();

        panel.speed = 1.0;
        assert!((panel.step_delay() - 100.0 / 700.0).abs() < 1e-9);

        panel.speed = 100.0;
        assert!((panel.step_delay() - 1.0 / 700.0).abs() < 1e-9);

        // never reaches zero even past the slider range
        panel.speed = 101.0;
        assert_eq!(panel.step_delay(), 0.001);
    }
}

//! Roster Panel Widget
//! Central panel with the roster table, marks summary and sort visualizer.

use egui::{Color32, RichText, ScrollArea};

use crate::charts::BarPlotter;
use crate::data::Student;
use crate::sorting::SortPlayer;
use crate::stats::RosterStats;

const TABLE_HEIGHT: f32 = 220.0;
const CHART_HEIGHT: f32 = 300.0;

/// Actions bubbled up from the roster table.
#[derive(Debug, Clone, PartialEq)]
pub enum RosterPanelAction {
    None,
    /// A row was clicked; the form should be filled from it.
    RowSelected(Student),
}

/// Central display area. While a sort is playing the table mirrors the
/// player's current bar order instead of database order.
pub struct RosterPanel;

impl RosterPanel {
    pub fn show(
        ui: &mut egui::Ui,
        students: &[Student],
        stats: Option<&RosterStats>,
        player: Option<&SortPlayer>,
        selected_id: Option<i64>,
    ) -> RosterPanelAction {
        let mut action = RosterPanelAction::None;

        ui.label(RichText::new("Roster").size(16.0).strong());
        ui.add_space(5.0);

        // While a sort plays (or its result is still on screen) the table
        // mirrors the bar order; selection is disabled mid-animation only.
        let rows: Vec<Student> = match player {
            Some(p) => p
                .bars()
                .iter()
                .map(|b| Student {
                    id: b.id,
                    name: b.name.clone(),
                    roll: b.roll.clone(),
                    marks: b.marks,
                })
                .collect(),
            None => students.to_vec(),
        };
        let interactive = !player.is_some_and(|p| p.is_running());

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ScrollArea::vertical()
                    .id_salt("roster_table")
                    .max_height(TABLE_HEIGHT)
                    .auto_shrink([false, true])
                    .show(ui, |ui| {
                        if let Some(selected) =
                            Self::draw_rows(ui, &rows, selected_id, interactive)
                        {
                            action = RosterPanelAction::RowSelected(selected);
                        }
                    });
            });

        ui.add_space(10.0);

        if let Some(stats) = stats {
            Self::draw_stats_summary(ui, stats);
            ui.add_space(10.0);
        }

        // Visualizer
        if let Some(player) = player {
            BarPlotter::draw_sort_chart(ui, player, CHART_HEIGHT);
        } else if students.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
        } else {
            BarPlotter::draw_roster_chart(ui, students, CHART_HEIGHT);
        }

        action
    }

    fn table_header(ui: &mut egui::Ui) {
        ui.label(RichText::new("Id").strong().size(12.0));
        ui.label(RichText::new("Name").strong().size(12.0));
        ui.label(RichText::new("Roll").strong().size(12.0));
        ui.label(RichText::new("Marks").strong().size(12.0));
        ui.end_row();
    }

    /// Table rows; any cell click selects the row when interactive.
    fn draw_rows(
        ui: &mut egui::Ui,
        rows: &[Student],
        selected_id: Option<i64>,
        interactive: bool,
    ) -> Option<Student> {
        let mut selected = None;

        egui::Grid::new("roster_grid")
            .striped(true)
            .min_col_width(60.0)
            .spacing([12.0, 4.0])
            .show(ui, |ui| {
                Self::table_header(ui);

                for student in rows {
                    let is_selected = selected_id == Some(student.id);
                    let cells = [
                        student.id.to_string(),
                        student.name.clone(),
                        student.roll.clone(),
                        student.marks.to_string(),
                    ];
                    for cell in cells {
                        let label = RichText::new(cell).size(12.0);
                        if interactive {
                            if ui.selectable_label(is_selected, label).clicked() {
                                selected = Some(student.clone());
                            }
                        } else {
                            ui.label(label);
                        }
                    }
                    ui.end_row();
                }
            });

        selected
    }

    /// Marks summary table.
    fn draw_stats_summary(ui: &mut egui::Ui, stats: &RosterStats) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("stats_summary")
                    .striped(true)
                    .min_col_width(55.0)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        for header in ["N", "Mean", "Median", "Std", "Min", "Max", "P95", "P05"] {
                            ui.label(RichText::new(header).strong().size(11.0));
                        }
                        ui.label(RichText::new("Top").strong().size(11.0));
                        ui.label(RichText::new("Bottom").strong().size(11.0));
                        ui.end_row();

                        ui.label(RichText::new(stats.count.to_string()).size(11.0));
                        ui.label(RichText::new(format!("{:.1}", stats.mean)).size(11.0));
                        ui.label(RichText::new(format!("{:.1}", stats.median)).size(11.0));
                        ui.label(RichText::new(format!("{:.2}", stats.std)).size(11.0));
                        ui.label(RichText::new(stats.min.to_string()).size(11.0));
                        ui.label(RichText::new(stats.max.to_string()).size(11.0));
                        ui.label(RichText::new(format!("{:.1}", stats.p95)).size(11.0));
                        ui.label(RichText::new(format!("{:.1}", stats.p05)).size(11.0));
                        ui.label(
                            RichText::new(&stats.top)
                                .size(11.0)
                                .color(Color32::from_rgb(40, 167, 69)),
                        );
                        ui.label(
                            RichText::new(&stats.bottom)
                                .size(11.0)
                                .color(Color32::from_rgb(220, 53, 69)),
                        );
                        ui.end_row();
                    });
            });
    }
}

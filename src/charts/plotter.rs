//! Bar Plotter Module
//! Draws the sorting visualizer and the idle roster chart using egui_plot.

use egui::Color32;
use egui_plot::{Bar, BarChart, Plot};

use crate::data::Student;
use crate::sorting::{BarState, SortPlayer};

/// Resting bar color.
pub const BAR_BASE: Color32 = Color32::from_rgb(0x2b, 0x7a, 0x78); // Teal
/// Element whose final position is being decided.
pub const BAR_KEY: Color32 = Color32::from_rgb(0xfd, 0xd8, 0x35); // Yellow
/// Slots under comparison.
pub const BAR_COMPARE: Color32 = Color32::from_rgb(0xcc, 0x24, 0x1d); // Red
/// Settled prefix during a selection pass.
pub const BAR_SETTLED: Color32 = Color32::from_rgb(0x66, 0xbb, 0x6a); // Green
/// Fully sorted array.
pub const BAR_DONE: Color32 = Color32::from_rgb(0x38, 0x8e, 0x3c); // Dark green

/// Renders roster marks as labelled vertical bars.
pub struct BarPlotter;

impl BarPlotter {
    /// Fill color for a bar highlight state.
    pub fn state_color(state: BarState) -> Color32 {
        match state {
            BarState::Base => BAR_BASE,
            BarState::Key => BAR_KEY,
            BarState::Compare => BAR_COMPARE,
            BarState::Settled => BAR_SETTLED,
            BarState::Done => BAR_DONE,
        }
    }

    /// Draw the animated sorting bars. X positions come from the player, so
    /// bars glide between slots while a swap settles.
    pub fn draw_sort_chart(ui: &mut egui::Ui, player: &SortPlayer, height: f32) {
        let labels: Vec<String> = player
            .bars()
            .iter()
            .map(|b| Self::short_label(&b.name))
            .collect();

        let bars: Vec<Bar> = player
            .bars()
            .iter()
            .enumerate()
            .map(|(slot, bar)| {
                Bar::new(bar.x, bar.marks as f64)
                    .width(0.8)
                    .fill(Self::state_color(player.bar_state(slot)))
                    .name(format!("{} ({})", bar.name, bar.roll))
            })
            .collect();

        Self::show_bar_plot(ui, "sort_bars", labels, height, bars);
    }

    /// Draw the roster in database order with resting colors; shown while no
    /// sort is playing.
    pub fn draw_roster_chart(ui: &mut egui::Ui, students: &[Student], height: f32) {
        let labels: Vec<String> = students
            .iter()
            .map(|s| Self::short_label(&s.name))
            .collect();

        let bars: Vec<Bar> = students
            .iter()
            .enumerate()
            .map(|(i, s)| {
                Bar::new(i as f64, s.marks as f64)
                    .width(0.8)
                    .fill(BAR_BASE)
                    .name(format!("{} ({})", s.name, s.roll))
            })
            .collect();

        Self::show_bar_plot(ui, "roster_bars", labels, height, bars);
    }

    /// Common plot scaffolding: fixed view, marks on the y axis, student
    /// names as x-axis labels at their slots.
    fn show_bar_plot(
        ui: &mut egui::Ui,
        id: &str,
        labels: Vec<String>,
        height: f32,
        bars: Vec<Bar>,
    ) {
        Plot::new(id.to_string())
            .height(height)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .y_axis_label("Marks")
            .include_y(0.0)
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if (mark.value - idx as f64).abs() < 1e-6 && idx < labels.len() {
                    labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars));
            });
    }

    /// Keep x-axis labels from colliding on crowded rosters.
    fn short_label(name: &str) -> String {
        const MAX: usize = 10;
        if name.chars().count() > MAX {
            let mut label: String = name.chars().take(MAX - 1).collect();
            label.push('…');
            label
        } else {
            name.to_string()
        }
    }
}

//! Snapshot Renderer
//! Writes a static PNG of the roster marks chart with plotters, so a chart
//! can be saved to disk and opened outside the application.

use std::path::Path;

use anyhow::{anyhow, Result};
use plotters::prelude::*;

use crate::data::Student;

/// Bar fill, matching the live visualizer's resting teal.
const BAR_RGB: RGBColor = RGBColor(0x2b, 0x7a, 0x78);

pub struct SnapshotRenderer;

impl SnapshotRenderer {
    /// Render a marks-per-student bar chart to `path` as a PNG.
    pub fn render_marks_chart(
        students: &[Student],
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<()> {
        if students.is_empty() {
            return Err(anyhow!("Nothing to render: the roster is empty"));
        }

        let n = students.len();
        let max_marks = students.iter().map(|s| s.marks).max().unwrap_or(0).max(1) as f64;
        let names: Vec<String> = students.iter().map(|s| s.name.clone()).collect();

        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| anyhow!("{e}"))?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Marks by Student", ("sans-serif", 28))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(50)
            .build_cartesian_2d(0f64..n as f64, 0f64..max_marks * 1.15)
            .map_err(|e| anyhow!("{e}"))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n.min(20))
            .x_label_formatter(&|x| {
                // labels sit at bar centers
                let idx = x.floor() as usize;
                names.get(idx).cloned().unwrap_or_default()
            })
            .y_desc("Marks")
            .draw()
            .map_err(|e| anyhow!("{e}"))?;

        chart
            .draw_series(students.iter().enumerate().map(|(i, s)| {
                Rectangle::new(
                    [(i as f64 + 0.1, 0.0), (i as f64 + 0.9, s.marks as f64)],
                    BAR_RGB.filled(),
                )
            }))
            .map_err(|e| anyhow!("{e}"))?;

        root.present().map_err(|e| anyhow!("{e}"))?;
        Ok(())
    }
}

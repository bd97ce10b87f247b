//! Gradebook - Student Records Manager & Animated Sorting Visualizer
//!
//! A Rust desktop application for managing student records in a local SQLite
//! database and replaying insertion/selection sort over the roster as an
//! animated bar chart.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod charts;
mod data;
mod gui;
mod sorting;
mod stats;

use eframe::egui;
use gui::GradebookApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 700.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Gradebook"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Gradebook",
        options,
        Box::new(|cc| Ok(Box::new(GradebookApp::new(cc)))),
    )
}

//! Gradebook Main Application
//! Main window wiring the control panel, roster panel and sort playback.

use std::sync::mpsc::{channel, Receiver};
use std::thread;
use std::time::Duration;

use egui::{Color32, RichText, SidePanel};
use log::{error, info, warn};

use crate::charts::SnapshotRenderer;
use crate::data::{self, NewStudent, Student, StoreError, StudentStore};
use crate::gui::{ControlPanel, ControlPanelAction, RosterPanel, RosterPanelAction};
use crate::sorting::{SortAlgorithm, SortPlayer};
use crate::stats::RosterStats;

/// CSV import result from the background thread.
enum ImportResult {
    Progress(String),
    Complete(Vec<NewStudent>),
    Error(String),
}

/// Main application window.
pub struct GradebookApp {
    store: Option<StudentStore>,
    students: Vec<Student>,
    stats: Option<RosterStats>,
    control_panel: ControlPanel,
    player: Option<SortPlayer>,
    confirm_delete: Option<i64>,

    // Async CSV import
    import_rx: Option<Receiver<ImportResult>>,
    is_importing: bool,
}

impl GradebookApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let mut app = Self {
            store: None,
            students: Vec::new(),
            stats: None,
            control_panel: ControlPanel::new(),
            player: None,
            confirm_delete: None,
            import_rx: None,
            is_importing: false,
        };

        match StudentStore::open_default() {
            Ok(store) => {
                app.store = Some(store);
                app.refresh_roster();
                info!("database opened with {} students", app.students.len());
            }
            Err(err) => {
                error!("failed to open database: {err}");
                app.control_panel
                    .set_progress(0.0, &format!("Error: {err}"));
            }
        }

        app
    }

    /// Reload the roster and summary stats from the database.
    fn refresh_roster(&mut self) {
        let Some(store) = &self.store else { return };
        match store.fetch_all() {
            Ok(students) => {
                self.stats = RosterStats::compute(&students);
                self.students = students;
            }
            Err(err) => {
                error!("failed to load roster: {err}");
                self.control_panel
                    .set_progress(0.0, &format!("Error: {err}"));
            }
        }
    }

    fn sort_is_running(&self) -> bool {
        self.player.as_ref().is_some_and(|p| p.is_running())
    }

    fn handle_add(&mut self) {
        if self.sort_is_running() {
            self.control_panel.set_progress(0.0, "Stop the sort first");
            return;
        }
        let new = match self.control_panel.form.parse() {
            Ok(new) => new,
            Err(msg) => {
                self.control_panel.set_progress(0.0, &msg);
                return;
            }
        };
        let Some(store) = &self.store else { return };
        match store.add(&new) {
            Ok(student) => {
                info!("added student {} ({})", student.name, student.roll);
                self.control_panel.form.clear();
                self.control_panel.selected_id = None;
                self.player = None;
                self.refresh_roster();
                self.control_panel.set_progress(0.0, "Student added");
            }
            Err(err) => {
                warn!("add rejected: {err}");
                self.control_panel
                    .set_progress(0.0, &format!("Error: {err}"));
            }
        }
    }

    fn handle_update(&mut self) {
        let Some(id) = self.control_panel.selected_id else {
            self.control_panel
                .set_progress(0.0, "Select a student to update");
            return;
        };
        let new = match self.control_panel.form.parse() {
            Ok(new) => new,
            Err(msg) => {
                self.control_panel.set_progress(0.0, &msg);
                return;
            }
        };
        let Some(store) = &self.store else { return };
        match store.update(id, &new) {
            Ok(()) => {
                info!("updated student {id}");
                self.control_panel.form.clear();
                self.control_panel.selected_id = None;
                self.player = None;
                self.refresh_roster();
                self.control_panel.set_progress(0.0, "Student updated");
            }
            Err(err) => {
                warn!("update rejected: {err}");
                self.control_panel
                    .set_progress(0.0, &format!("Error: {err}"));
            }
        }
    }

    fn delete_confirmed(&mut self, id: i64) {
        let Some(store) = &self.store else { return };
        match store.delete(id) {
            Ok(()) => {
                info!("deleted student {id}");
                self.control_panel.form.clear();
                self.control_panel.selected_id = None;
                self.player = None;
                self.refresh_roster();
                self.control_panel.set_progress(0.0, "Student deleted");
            }
            Err(err) => {
                error!("delete failed: {err}");
                self.control_panel
                    .set_progress(0.0, &format!("Error: {err}"));
            }
        }
    }

    fn handle_start_sort(&mut self, algorithm: SortAlgorithm, now: f64) {
        if self.sort_is_running() {
            self.control_panel.set_progress(0.0, "Already running.");
            return;
        }
        // always animate the latest database state
        self.refresh_roster();
        if self.students.is_empty() {
            self.control_panel.set_progress(0.0, "No data.");
            return;
        }

        self.player = Some(SortPlayer::new(algorithm, &self.students, now));
        self.control_panel.selected_id = None;
        self.control_panel
            .set_progress(0.0, &format!("{} running...", algorithm.label()));
    }

    fn handle_stop_sort(&mut self) {
        if let Some(player) = &mut self.player {
            if player.is_running() {
                player.stop();
                self.control_panel.set_progress(0.0, "Stopped.");
            }
        }
    }

    /// Pick a CSV file and parse it on a background thread.
    fn handle_import_csv(&mut self) {
        if self.is_importing {
            return;
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.control_panel.set_progress(10.0, "Reading CSV file...");
            self.is_importing = true;

            let (tx, rx) = channel();
            self.import_rx = Some(rx);

            thread::spawn(move || {
                let _ = tx.send(ImportResult::Progress("Parsing rows...".to_string()));
                match data::read_csv(&path) {
                    Ok(rows) => {
                        let _ = tx.send(ImportResult::Complete(rows));
                    }
                    Err(e) => {
                        let _ = tx.send(ImportResult::Error(e.to_string()));
                    }
                }
            });
        }
    }

    /// Check for CSV import results. Inserts happen here so the database
    /// connection never leaves the GUI thread.
    fn check_import_results(&mut self) {
        let rx = self.import_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    ImportResult::Progress(status) => {
                        self.control_panel.set_progress(25.0, &status);
                    }
                    ImportResult::Complete(rows) => {
                        let (added, skipped) = self.insert_imported(&rows);
                        info!("imported {added} students, skipped {skipped}");
                        self.player = None;
                        self.refresh_roster();
                        self.control_panel.set_progress(
                            100.0,
                            &format!("Imported {added} students ({skipped} skipped)"),
                        );
                        self.is_importing = false;
                        should_keep_receiver = false;
                    }
                    ImportResult::Error(error) => {
                        error!("CSV import failed: {error}");
                        self.control_panel
                            .set_progress(0.0, &format!("Error: {error}"));
                        self.is_importing = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.import_rx = Some(rx);
            }
        }
    }

    fn insert_imported(&mut self, rows: &[NewStudent]) -> (usize, usize) {
        let Some(store) = &self.store else {
            return (0, rows.len());
        };

        let mut added = 0;
        let mut skipped = 0;
        for row in rows {
            match store.add(row) {
                Ok(_) => added += 1,
                Err(StoreError::DuplicateRoll { roll }) => {
                    warn!("skipping duplicate roll {roll}");
                    skipped += 1;
                }
                Err(err) => {
                    error!("import insert failed: {err}");
                    skipped += 1;
                }
            }
        }
        (added, skipped)
    }

    fn handle_export_csv(&mut self) {
        if self.students.is_empty() {
            self.control_panel.set_progress(0.0, "No data.");
            return;
        }
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name("roster.csv")
            .save_file()
        else {
            return;
        };

        match data::write_csv(&self.students, &path) {
            Ok(()) => {
                info!("exported roster CSV to {}", path.display());
                self.control_panel.set_progress(100.0, "Roster exported");
                let _ = open::that(&path);
            }
            Err(err) => {
                error!("CSV export failed: {err}");
                self.control_panel
                    .set_progress(0.0, &format!("Error: {err}"));
            }
        }
    }

    fn handle_export_json(&mut self) {
        if self.students.is_empty() {
            self.control_panel.set_progress(0.0, "No data.");
            return;
        }
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON Files", &["json"])
            .set_file_name("roster.json")
            .save_file()
        else {
            return;
        };

        match data::write_json(&self.students, &path) {
            Ok(()) => {
                info!("exported roster JSON to {}", path.display());
                self.control_panel.set_progress(100.0, "Roster exported");
                let _ = open::that(&path);
            }
            Err(err) => {
                error!("JSON export failed: {err}");
                self.control_panel
                    .set_progress(0.0, &format!("Error: {err}"));
            }
        }
    }

    fn handle_save_chart(&mut self) {
        if self.students.is_empty() {
            self.control_panel.set_progress(0.0, "No data.");
            return;
        }
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name("marks.png")
            .save_file()
        else {
            return;
        };

        match SnapshotRenderer::render_marks_chart(&self.students, &path, 1200, 700) {
            Ok(()) => {
                info!("saved marks chart to {}", path.display());
                self.control_panel.set_progress(100.0, "Chart saved");
                let _ = open::that(&path);
            }
            Err(err) => {
                error!("chart render failed: {err}");
                self.control_panel
                    .set_progress(0.0, &format!("Error: {err}"));
            }
        }
    }
}

impl eframe::App for GradebookApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_import_results();
        if self.is_importing {
            ctx.request_repaint();
        }

        // Drive sort playback
        let now = ctx.input(|i| i.time);
        let dt = ctx.input(|i| i.stable_dt) as f64;
        let step_delay = self.control_panel.step_delay();

        if let Some(player) = &mut self.player {
            let was_running = player.is_running();
            player.advance(now, step_delay);
            let gliding = player.animate(dt);

            if was_running && player.is_done() {
                self.control_panel.set_progress(
                    100.0,
                    &format!("{} finished", player.algorithm().label()),
                );
            }

            if player.is_running() {
                // repaint at least fast enough for the glides
                ctx.request_repaint_after(Duration::from_secs_f64(step_delay.min(1.0 / 30.0)));
            } else if gliding {
                ctx.request_repaint();
            }
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::Add => self.handle_add(),
                        ControlPanelAction::Update => self.handle_update(),
                        ControlPanelAction::Delete => {
                            if let Some(id) = self.control_panel.selected_id {
                                self.confirm_delete = Some(id);
                            } else {
                                self.control_panel
                                    .set_progress(0.0, "Select a student to delete");
                            }
                        }
                        ControlPanelAction::ClearForm => {
                            self.control_panel.form.clear();
                            self.control_panel.selected_id = None;
                        }
                        ControlPanelAction::StartSort(algorithm) => {
                            self.handle_start_sort(algorithm, now)
                        }
                        ControlPanelAction::StopSort => self.handle_stop_sort(),
                        ControlPanelAction::ImportCsv => self.handle_import_csv(),
                        ControlPanelAction::ExportCsv => self.handle_export_csv(),
                        ControlPanelAction::ExportJson => self.handle_export_json(),
                        ControlPanelAction::SaveChart => self.handle_save_chart(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - roster table, stats and visualizer
        egui::CentralPanel::default().show(ctx, |ui| {
            let action = RosterPanel::show(
                ui,
                &self.students,
                self.stats.as_ref(),
                self.player.as_ref(),
                self.control_panel.selected_id,
            );

            if let RosterPanelAction::RowSelected(student) = action {
                self.control_panel
                    .form
                    .set(&student.name, &student.roll, student.marks);
                self.control_panel.selected_id = Some(student.id);
            }
        });

        // Confirm-delete dialog
        if let Some(id) = self.confirm_delete {
            let mut close = false;
            egui::Window::new("Confirm")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label("Delete selected student?");
                    ui.add_space(8.0);
                    ui.horizontal(|ui| {
                        if ui.button("Cancel").clicked() {
                            close = true;
                        }
                        let delete =
                            egui::Button::new(RichText::new("Delete").color(Color32::WHITE))
                                .fill(Color32::from_rgb(178, 34, 34));
                        if ui.add(delete).clicked() {
                            self.delete_confirmed(id);
                            close = true;
                        }
                    });
                });
            if close {
                self.confirm_delete = None;
            }
        }
    }
}

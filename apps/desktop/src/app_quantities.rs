use super::{AlertKind, App};
use crate::quantities::format_quantities;
use egui::{RichText, ScrollArea};
use std::time::Duration;

pub(super) fn quantities_workspace(app: &mut App, ctx: &egui::Context) {
    egui::SidePanel::right("quantities_actions")
        .resizable(false)
        .default_width(160.0)
        .show(ctx, |ui| {
            ui.add_space(4.0);
            if ui.button("Refresh").clicked() {
                app.refresh_quantities();
            }
            if ui.button("Load CSV").clicked() {
                app.load_quantities_csv();
            }
            if ui.button("Export Quantities").clicked() {
                app.export_quantities();
            }
        });

    egui::CentralPanel::default().show(ctx, |ui| {
        ScrollArea::both()
            .id_salt("quantities_scroll")
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                if app.quantities_text.is_empty() {
                    ui.weak("Refresh or load a CSV to view quantities. Click a line to append it to the current prompt.");
                    return;
                }
                let mut clicked_line: Option<String> = None;
                for line in app.quantities_text.lines() {
                    let label =
                        egui::Label::new(RichText::new(line).monospace()).sense(egui::Sense::click());
                    if ui.add(label).clicked() && !line.trim().is_empty() {
                        clicked_line = Some(line.trim_end().to_string());
                    }
                }
                if let Some(line) = clicked_line {
                    app.controller.append_prompt_line(&line);
                }
            });
    });
}

pub(super) fn refresh_quantities(app: &mut App) {
    let path = storage::quantities_path();
    app.quantities_text.clear();

    if !path.exists() {
        app.push_alert(
            format!("The file was not found at: {}", path.display()),
            AlertKind::Warning,
            Duration::from_secs(6),
        );
        return;
    }
    match std::fs::read_to_string(&path) {
        Ok(raw) => app.quantities_text = format_quantities(&raw),
        Err(err) => {
            app.push_alert(
                format!("An error occurred while reading the file: {err}"),
                AlertKind::Warning,
                Duration::from_secs(6),
            );
        }
    }
}

pub(super) fn load_quantities_csv(app: &mut App) {
    let Some(path) = rfd::FileDialog::new()
        .set_title("Load Quantities from CSV")
        .add_filter("CSV files", &["csv"])
        .add_filter("All files", &["*"])
        .pick_file()
    else {
        return;
    };

    match std::fs::read_to_string(&path) {
        Ok(raw) => app.quantities_text = format_quantities(&raw),
        Err(err) => {
            app.push_alert(
                format!("Error reading CSV file: {err}"),
                AlertKind::Warning,
                Duration::from_secs(6),
            );
        }
    }
}

pub(super) fn export_quantities(app: &mut App) {
    if app.quantities_text.trim().is_empty() {
        app.push_alert("Nothing to export.", AlertKind::Info, Duration::from_secs(4));
        return;
    }

    let Some(path) = rfd::FileDialog::new()
        .set_title("Export Quantities")
        .set_file_name("quantities.txt")
        .add_filter("Text Files", &["txt"])
        .add_filter("All files", &["*"])
        .save_file()
    else {
        return;
    };

    match std::fs::write(&path, &app.quantities_text) {
        Ok(()) => {
            app.push_alert(
                "Quantities exported successfully!",
                AlertKind::Success,
                Duration::from_secs(5),
            );
        }
        Err(err) => {
            app.push_alert(
                format!("Could not export quantities: {err}"),
                AlertKind::Warning,
                Duration::from_secs(6),
            );
        }
    }
}

// Thin App method wrappers to keep app.rs small
impl App {
    pub(crate) fn refresh_quantities(&mut self) {
        self::refresh_quantities(self)
    }

    pub(crate) fn load_quantities_csv(&mut self) {
        self::load_quantities_csv(self)
    }

    pub(crate) fn export_quantities(&mut self) {
        self::export_quantities(self)
    }
}

use super::{AlertKind, App};
use std::time::Duration;

pub(super) fn save_project(app: &mut App) {
    app.controller.commit_drafts();
    let name = app.project_name.trim().to_string();
    if name.is_empty() {
        app.open_save_name_prompt();
        return;
    }
    perform_save(app, &name);
}

pub(super) fn perform_save(app: &mut App, name: &str) {
    let project_dir = storage::scanner_root().join(name);
    match storage::save_project(app.controller.project_mut(), &project_dir) {
        Ok(report) => {
            tracing::info!(
                dir = %report.project_dir.display(),
                copied = report.copied,
                skipped = report.skipped.len(),
                "project saved"
            );
            for skipped in &report.skipped {
                app.push_alert(
                    format!(
                        "Could not copy {}: {}",
                        skipped.source_path.display(),
                        skipped.reason
                    ),
                    AlertKind::Warning,
                    Duration::from_secs(6),
                );
            }
            app.push_alert(
                format!("Project saved to {}", report.project_dir.display()),
                AlertKind::Success,
                Duration::from_secs(5),
            );
        }
        Err(storage::StorageError::ProjectExists(_)) => {
            app.push_alert(
                "Project already exists. Please use another name.",
                AlertKind::Warning,
                Duration::from_secs(6),
            );
        }
        Err(err) => {
            app.push_alert(
                format!("Could not save project: {err}"),
                AlertKind::Warning,
                Duration::from_secs(6),
            );
        }
    }
}

pub(super) fn load_project(app: &mut App) {
    let root = storage::scanner_root();
    if let Err(err) = std::fs::create_dir_all(&root) {
        app.push_alert(
            format!("Could not open {}: {err}", root.display()),
            AlertKind::Warning,
            Duration::from_secs(6),
        );
        return;
    }

    let Some(manifest_path) = rfd::FileDialog::new()
        .set_title("Load Project")
        .set_directory(&root)
        .add_filter("Project files", &["json"])
        .add_filter("All files", &["*"])
        .pick_file()
    else {
        return;
    };

    if let Some(dir_name) = manifest_path
        .parent()
        .and_then(|dir| dir.file_name())
        .and_then(|name| name.to_str())
    {
        app.project_name = dir_name.to_string();
    }

    match storage::load_project(&manifest_path) {
        Ok(project) => {
            tracing::info!(path = %manifest_path.display(), "project loaded");
            app.controller.replace_project(project);
            app.clear_project_caches();
        }
        Err(err) => {
            app.push_alert(
                format!("Could not read project file: {err}"),
                AlertKind::Warning,
                Duration::from_secs(6),
            );
        }
    }
}

// Thin App method wrappers to keep app.rs small
impl App {
    pub(crate) fn save_project(&mut self) {
        self::save_project(self)
    }

    pub(crate) fn perform_save(&mut self, name: &str) {
        self::perform_save(self, name)
    }

    pub(crate) fn load_project(&mut self) {
        self::load_project(self)
    }
}

use super::{AlertKind, App};
use std::time::Duration;

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum NamePromptPurpose {
    AddBranch,
    SaveProject,
}

/// State behind the single-field name dialog used for Add Branch and for
/// naming an unnamed project at save time.
pub(crate) struct NamePrompt {
    pub(crate) title: &'static str,
    pub(crate) label: &'static str,
    pub(crate) value: String,
    pub(crate) purpose: NamePromptPurpose,
}

pub(super) fn open_add_branch_prompt(app: &mut App) {
    let default_name = app.controller.project().next_branch_name();
    app.name_prompt = Some(NamePrompt {
        title: "Add Branch",
        label: "Enter branch name:",
        value: default_name,
        purpose: NamePromptPurpose::AddBranch,
    });
}

pub(super) fn open_save_name_prompt(app: &mut App) {
    app.name_prompt = Some(NamePrompt {
        title: "Save Project",
        label: "Enter project name:",
        value: "MyProject".to_string(),
        purpose: NamePromptPurpose::SaveProject,
    });
}

pub(super) fn name_prompt_window(app: &mut App, ctx: &egui::Context) {
    let Some(mut prompt) = app.name_prompt.take() else {
        return;
    };

    let mut confirmed = false;
    let mut cancelled = false;
    egui::Window::new(prompt.title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            ui.label(prompt.label);
            let response = ui.text_edit_singleline(&mut prompt.value);
            if !response.has_focus() {
                response.request_focus();
            }
            let valid = !prompt.value.trim().is_empty();
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) && valid {
                confirmed = true;
            }
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                if ui.add_enabled(valid, egui::Button::new("OK")).clicked() {
                    confirmed = true;
                }
                if ui.button("Cancel").clicked() {
                    cancelled = true;
                }
            });
        });

    if confirmed {
        apply_name_prompt(app, ctx, prompt);
    } else if !cancelled {
        app.name_prompt = Some(prompt);
    }
}

fn apply_name_prompt(app: &mut App, ctx: &egui::Context, prompt: NamePrompt) {
    match prompt.purpose {
        NamePromptPurpose::AddBranch => match app.controller.add_branch(&prompt.value) {
            Ok((_, effect)) => app.apply_select_effect(ctx, effect),
            Err(err) => {
                app.push_alert(err.to_string(), AlertKind::Warning, Duration::from_secs(6));
            }
        },
        NamePromptPurpose::SaveProject => {
            let name = prompt.value.trim().to_string();
            app.project_name = name.clone();
            app.perform_save(&name);
        }
    }
}

// Thin App method wrappers to keep app.rs small
impl App {
    pub(crate) fn open_add_branch_prompt(&mut self) {
        self::open_add_branch_prompt(self)
    }

    pub(crate) fn open_save_name_prompt(&mut self) {
        self::open_save_name_prompt(self)
    }
}

use super::{AlertKind, App};
use crate::selection::NodeRef;
use egui::{load::SizedTexture, RichText, ScrollArea};
use std::time::Duration;
use story::{BranchId, StoryError};

pub(super) fn project_workspace(app: &mut App, ctx: &egui::Context) {
    egui::SidePanel::left("branch_tree")
        .resizable(true)
        .default_width(260.0)
        .show(ctx, |ui| {
            ui.add_space(4.0);
            ui.heading("Branches & Images");
            ui.horizontal(|ui| {
                if ui.button("Add Branch").clicked() {
                    app.open_add_branch_prompt();
                }
                if ui.button("Upload Image(s)").clicked() {
                    upload_images(app);
                }
            });
            ui.separator();
            ScrollArea::vertical()
                .id_salt("branch_tree_scroll")
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    branch_tree(app, ctx, ui);
                });
        });

    egui::TopBottomPanel::bottom("project_actions").show(ctx, |ui| {
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.label("Project name:");
            ui.add(egui::TextEdit::singleline(&mut app.project_name).desired_width(220.0));
            if ui.button("Save Project").clicked() {
                app.save_project();
            }
            if ui.button("Load Project").clicked() {
                app.load_project();
            }
        });
        ui.add_space(4.0);
    });

    egui::CentralPanel::default().show(ctx, |ui| {
        ScrollArea::vertical()
            .id_salt("project_editors")
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                ui.label("Story:");
                ui.add(
                    egui::TextEdit::multiline(&mut app.controller.story_draft)
                        .desired_rows(6)
                        .desired_width(f32::INFINITY)
                        .hint_text("Free-form story text"),
                );
                ui.add_space(8.0);
                ui.label("Prompt for selected branch:");
                ui.add(
                    egui::TextEdit::multiline(&mut app.controller.prompt_draft)
                        .desired_rows(6)
                        .desired_width(f32::INFINITY),
                );
                ui.add_space(8.0);
                ui.label("Selected image preview:");
                if let Some(tex) = &app.preview_texture {
                    let sized = SizedTexture::from_handle(tex);
                    ui.add(egui::Image::from_texture(sized).max_size(egui::vec2(400.0, 300.0)));
                } else {
                    ui.weak("Select an image in the tree to preview it.");
                }
            });
    });
}

fn branch_tree(app: &mut App, ctx: &egui::Context, ui: &mut egui::Ui) {
    let rows: Vec<(BranchId, String, usize)> = app
        .controller
        .project()
        .branches
        .iter()
        .map(|b| (b.id, b.name.clone(), b.images.len()))
        .collect();
    if rows.is_empty() {
        ui.weak("No branches yet.");
        return;
    }

    let mut clicked: Option<NodeRef> = None;
    for (branch_id, name, image_count) in rows {
        let node = NodeRef::Branch(branch_id);
        let selected = app.controller.selection().is_selected(node);
        if ui
            .selectable_label(selected, RichText::new(name).strong())
            .clicked()
        {
            clicked = Some(node);
        }
        ui.indent(("branch_images", branch_id), |ui| {
            for index in 0..image_count {
                let node = NodeRef::Image {
                    branch: branch_id,
                    index,
                };
                let selected = app.controller.selection().is_selected(node);
                ui.horizontal(|ui| {
                    if let Some(tex) = app.thumb_texture(ctx, branch_id, index) {
                        let sized = SizedTexture::from_handle(&tex);
                        ui.add(
                            egui::Image::from_texture(sized).max_size(egui::vec2(24.0, 24.0)),
                        );
                    }
                    if ui
                        .selectable_label(selected, format!("Image {}", index + 1))
                        .clicked()
                    {
                        clicked = Some(node);
                    }
                });
            }
        });
    }

    if let Some(node) = clicked {
        let effect = app.controller.select(Some(node));
        app.apply_select_effect(ctx, effect);
    }
}

pub(super) fn upload_images(app: &mut App) {
    let Some(branch) = app.controller.selection().active_branch else {
        app.push_alert(
            "Please select a branch to upload images to.",
            AlertKind::Info,
            Duration::from_secs(4),
        );
        return;
    };

    let Some(picked) = rfd::FileDialog::new()
        .set_title("Select Images")
        .add_filter("Image files", &["jpg", "jpeg", "png", "gif", "bmp"])
        .add_filter("All files", &["*"])
        .pick_files()
    else {
        return;
    };
    if picked.is_empty() {
        return;
    }

    match app.controller.upload_images(branch, picked) {
        Ok(outcome) => {
            for (path, reason) in &outcome.failures {
                app.push_alert(
                    format!("Could not read image {}: {}", path.display(), reason),
                    AlertKind::Warning,
                    Duration::from_secs(6),
                );
            }
        }
        Err(StoryError::ImageLimit) => {
            app.push_alert(
                "You can only add up to two images per branch.",
                AlertKind::Warning,
                Duration::from_secs(6),
            );
        }
        Err(err) => {
            app.push_alert(err.to_string(), AlertKind::Warning, Duration::from_secs(6));
        }
    }
}

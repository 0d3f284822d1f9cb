use super::{AlertKind, App, WorkspaceView};
use egui::RichText;

pub(super) fn top_toolbar(app: &mut App, ctx: &egui::Context, _frame: &mut eframe::Frame) {
    egui::TopBottomPanel::top("top").show(ctx, |ui| {
        app.prune_alerts();
        let mut dismiss_alert = false;
        if let Some((message, kind)) = app
            .alerts
            .front()
            .map(|alert| (alert.message.clone(), alert.kind))
        {
            let (bg, fg) = match kind {
                AlertKind::Info => (
                    egui::Color32::from_rgb(32, 70, 130),
                    egui::Color32::from_rgb(220, 235, 255),
                ),
                AlertKind::Success => (
                    egui::Color32::from_rgb(24, 90, 48),
                    egui::Color32::from_rgb(220, 246, 224),
                ),
                AlertKind::Warning => (
                    egui::Color32::from_rgb(120, 32, 32),
                    egui::Color32::from_rgb(255, 228, 228),
                ),
            };
            egui::Frame::none()
                .fill(bg)
                .stroke(egui::Stroke::new(1.0, fg))
                .rounding(egui::Rounding::same(6.0))
                .inner_margin(egui::Margin::symmetric(10.0, 6.0))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(message).color(fg).strong());
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.small_button("Dismiss").clicked() {
                                dismiss_alert = true;
                            }
                        });
                    });
                });
        }
        if dismiss_alert {
            app.alerts.pop_front();
        }
        ui.horizontal(|ui| {
            ui.label("Workspace:");
            let mut workspace = app.workspace_view;
            ui.selectable_value(&mut workspace, WorkspaceView::Project, "Project");
            ui.selectable_value(&mut workspace, WorkspaceView::Quantities, "Quantities");
            if workspace != app.workspace_view {
                app.switch_workspace(workspace);
            }
        });
    });
}

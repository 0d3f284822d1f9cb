use super::{app_modal, app_quantities, app_tree, app_ui};
use crate::controller::{ProjectController, SelectEffect};
use crate::preview;
use egui::TextureHandle;
use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};
use story::BranchId;

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum WorkspaceView {
    Project,
    Quantities,
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum AlertKind {
    Info,
    Success,
    Warning,
}

pub(crate) struct Alert {
    pub(crate) message: String,
    pub(crate) kind: AlertKind,
    pub(crate) expires_at: Instant,
}

pub struct App {
    pub(crate) controller: ProjectController,
    pub(crate) workspace_view: WorkspaceView,
    pub(crate) project_name: String,
    pub(crate) quantities_text: String,
    pub(crate) alerts: VecDeque<Alert>,
    pub(crate) name_prompt: Option<app_modal::NamePrompt>,
    pub(crate) preview_texture: Option<TextureHandle>,
    // None caches a failed decode so it is not retried every frame.
    pub(crate) thumb_textures: HashMap<(BranchId, usize), Option<TextureHandle>>,
}

impl App {
    pub fn new() -> Self {
        Self {
            controller: ProjectController::new(),
            workspace_view: WorkspaceView::Project,
            project_name: String::new(),
            quantities_text: String::new(),
            alerts: VecDeque::new(),
            name_prompt: None,
            preview_texture: None,
            thumb_textures: HashMap::new(),
        }
    }

    pub(crate) fn push_alert(
        &mut self,
        message: impl Into<String>,
        kind: AlertKind,
        duration: Duration,
    ) {
        let alert = Alert {
            message: message.into(),
            kind,
            expires_at: Instant::now() + duration,
        };
        self.alerts.push_back(alert);
        if self.alerts.len() > 8 {
            self.alerts.pop_front();
        }
    }

    pub(crate) fn prune_alerts(&mut self) {
        let now = Instant::now();
        while let Some(alert) = self.alerts.front() {
            if alert.expires_at <= now {
                self.alerts.pop_front();
            } else {
                break;
            }
        }
    }

    pub(crate) fn switch_workspace(&mut self, view: WorkspaceView) {
        self.workspace_view = view;
    }

    pub(crate) fn apply_select_effect(&mut self, ctx: &egui::Context, effect: SelectEffect) {
        match effect {
            SelectEffect::ShowImage { branch, index } => self.load_preview(ctx, branch, index),
            SelectEffect::ClearPreview => self.preview_texture = None,
        }
    }

    pub(crate) fn load_preview(&mut self, ctx: &egui::Context, branch: BranchId, index: usize) {
        self.preview_texture = None;
        let Some(image) = self.controller.project().image(branch, index) else {
            return;
        };
        match preview::color_image_from_bytes(
            &image.bytes,
            preview::PREVIEW_MAX[0],
            preview::PREVIEW_MAX[1],
        ) {
            Ok(color_image) => {
                let tex = ctx.load_texture(
                    format!("preview-{}-{}", branch, index),
                    color_image,
                    egui::TextureOptions::LINEAR,
                );
                self.preview_texture = Some(tex);
            }
            Err(err) => {
                self.push_alert(
                    format!("Could not display image: {err}"),
                    AlertKind::Warning,
                    Duration::from_secs(6),
                );
            }
        }
    }

    pub(crate) fn thumb_texture(
        &mut self,
        ctx: &egui::Context,
        branch: BranchId,
        index: usize,
    ) -> Option<TextureHandle> {
        if let Some(cached) = self.thumb_textures.get(&(branch, index)) {
            return cached.clone();
        }
        let decoded = self.controller.project().image(branch, index).and_then(|image| {
            preview::color_image_from_bytes(&image.bytes, preview::THUMB_MAX, preview::THUMB_MAX)
                .ok()
        });
        let tex = decoded.map(|color_image| {
            ctx.load_texture(
                format!("thumb-{}-{}", branch, index),
                color_image,
                egui::TextureOptions::LINEAR,
            )
        });
        self.thumb_textures.insert((branch, index), tex.clone());
        tex
    }

    pub(crate) fn clear_project_caches(&mut self) {
        self.preview_texture = None;
        self.thumb_textures.clear();
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        app_ui::top_toolbar(self, ctx, frame);
        app_modal::name_prompt_window(self, ctx);
        match self.workspace_view {
            WorkspaceView::Project => app_tree::project_workspace(self, ctx),
            WorkspaceView::Quantities => app_quantities::quantities_workspace(self, ctx),
        }
    }
}

pub mod controller;
pub mod quantities;
pub mod selection;

mod app;
mod app_modal;
mod app_project;
mod app_quantities;
mod app_tree;
mod app_ui;
mod preview;

pub use app::App;
pub(crate) use app::{AlertKind, WorkspaceView};

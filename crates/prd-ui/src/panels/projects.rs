//! Project sidebar: list, select, create, delete.

use egui::{self, RichText, ScrollArea};
use prd_types::project::{Project, ProjectId};

use crate::state::UiState;
use crate::theme::*;

/// What the caller should do after rendering the sidebar
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectAction {
    None,
    Select(ProjectId),
    Create(String),
    Delete(ProjectId),
    Reload,
}

pub fn projects_panel(
    ui: &mut egui::Ui,
    state: &mut UiState,
    projects: &[Project],
    active: Option<&ProjectId>,
) -> ProjectAction {
    let mut action = ProjectAction::None;

    egui::Frame::default()
        .fill(BG_SECONDARY)
        .inner_margin(PANEL_PADDING)
        .corner_radius(PANEL_ROUNDING)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.heading(RichText::new("Projects").color(TEXT_PRIMARY));
                if ui.small_button("⟳").on_hover_text("Reload projects").clicked() {
                    action = ProjectAction::Reload;
                }
            });
            ui.separator();

            // ── New project ──────────────────────────────────
            ui.horizontal(|ui| {
                let field = egui::TextEdit::singleline(&mut state.new_project_name)
                    .hint_text("New project name")
                    .desired_width(ui.available_width() - 40.0);
                let response = ui.add(field);
                let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button("+").clicked() || enter {
                    if let Some(name) = state.take_project_name() {
                        action = ProjectAction::Create(name);
                    }
                }
            });

            ui.add_space(6.0);

            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    if projects.is_empty() {
                        ui.label(RichText::new("No projects yet").color(TEXT_SECONDARY).italics());
                    }
                    for project in projects {
                        let selected = active == Some(&project.id);
                        ui.horizontal(|ui| {
                            let mut label = RichText::new(&project.name);
                            if state.is_busy_for(&project.id) {
                                label = label.color(WARNING);
                            }
                            if ui.selectable_label(selected, label).clicked() && !selected {
                                action = ProjectAction::Select(project.id.clone());
                            }
                            let delete = ui
                                .small_button(RichText::new("✕").color(TEXT_SECONDARY))
                                .on_hover_text("Delete project");
                            if delete.clicked() {
                                action = ProjectAction::Delete(project.id.clone());
                            }
                        });
                        ui.label(
                            RichText::new(project.created_at.format("%Y-%m-%d").to_string())
                                .color(TEXT_SECONDARY)
                                .small(),
                        );
                    }
                });
        });

    action
}

//! PRD preview: the active project's document as plain text.

use egui::{self, RichText, ScrollArea};
use prd_types::project::Project;

use crate::theme::*;

pub fn prd_preview(ui: &mut egui::Ui, project: Option<&Project>) {
    egui::Frame::default()
        .fill(PREVIEW_BG)
        .inner_margin(PANEL_PADDING)
        .corner_radius(PANEL_ROUNDING)
        .show(ui, |ui| {
            ui.label(RichText::new("PRD").color(ACCENT).strong());
            if let Some(updated) = project.and_then(|p| p.updated_at) {
                ui.label(
                    RichText::new(format!("Updated {}", updated.format("%Y-%m-%d %H:%M")))
                        .color(TEXT_SECONDARY)
                        .small(),
                );
            }
            ui.separator();

            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| match project.and_then(|p| p.prd.as_deref()) {
                    Some(doc) if !doc.trim().is_empty() => {
                        ui.label(RichText::new(doc).color(TEXT_PRIMARY).monospace());
                    }
                    _ => {
                        ui.label(
                            RichText::new("Nothing generated yet.")
                                .color(TEXT_SECONDARY)
                                .italics(),
                        );
                    }
                });
        });
}

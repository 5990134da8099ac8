//! Chat panel: the active project's conversation and the input row.

use egui::{self, Align, Layout, RichText, ScrollArea, Vec2};
use prd_core::controller::ConversationView;
use prd_types::message::{Message, Role};

use crate::state::UiState;
use crate::theme::*;

/// What the user asked for this frame
#[derive(Debug, Clone, PartialEq)]
pub enum ChatAction {
    None,
    Send(String),
    Cancel,
    Reset,
}

/// Render the chat panel for `view`.
pub fn chat_panel(ui: &mut egui::Ui, state: &mut UiState, view: &ConversationView) -> ChatAction {
    let mut action = ChatAction::None;
    let has_project = view.project.is_some();
    let busy = view.is_streaming || view.is_resetting;

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                ui.horizontal(|ui| {
                    ui.heading(RichText::new("PRD Chat").color(TEXT_PRIMARY).strong());
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        let reset = ui.add_enabled(
                            has_project && !busy,
                            egui::Button::new(RichText::new("Reset").color(TEXT_SECONDARY)),
                        );
                        if reset.clicked() {
                            action = ChatAction::Reset;
                        }
                        let status_color = if busy { WARNING } else { SUCCESS };
                        ui.label(RichText::new(&state.status_text).color(status_color).small());
                    });
                });

                ui.separator();

                if let Some(error) = &view.error {
                    egui::Frame::default()
                        .fill(BG_ERROR)
                        .corner_radius(PANEL_ROUNDING)
                        .inner_margin(6.0)
                        .show(ui, |ui| {
                            ui.label(RichText::new(&error.detail).color(ERROR));
                        });
                    ui.add_space(4.0);
                }

                let available_height = ui.available_height() - 60.0;
                ScrollArea::vertical()
                    .max_height(available_height)
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        if !has_project {
                            ui.label(
                                RichText::new("Create or select a project to start.")
                                    .color(TEXT_SECONDARY)
                                    .italics(),
                            );
                        }
                        let last = view.messages.len().saturating_sub(1);
                        for (index, message) in view.messages.iter().enumerate() {
                            render_message(ui, message, view.is_streaming && index == last);
                            ui.add_space(4.0);
                        }
                    });

                ui.add_space(8.0);

                let limit = state.max_message_chars();
                ui.horizontal(|ui| {
                    let input = egui::TextEdit::singleline(&mut state.input_text)
                        .hint_text("Describe your product...")
                        .char_limit(limit)
                        .desired_width(ui.available_width() - 70.0)
                        .font(egui::FontId::proportional(14.0));
                    let response = ui.add_enabled(has_project, input);

                    if view.is_streaming {
                        let stop = ui.add(
                            egui::Button::new(RichText::new("Stop").color(TEXT_PRIMARY))
                                .fill(ERROR)
                                .corner_radius(PANEL_ROUNDING)
                                .min_size(Vec2::new(60.0, 0.0)),
                        );
                        if stop.clicked() {
                            action = ChatAction::Cancel;
                        }
                        return;
                    }

                    let send_enabled = has_project && !busy && !state.input_text.trim().is_empty();
                    let send = ui.add_enabled(
                        send_enabled,
                        egui::Button::new(RichText::new("Send").color(TEXT_PRIMARY))
                            .fill(if send_enabled { ACCENT } else { BG_SURFACE })
                            .corner_radius(PANEL_ROUNDING)
                            .min_size(Vec2::new(60.0, 0.0)),
                    );

                    let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if send_enabled && (enter || send.clicked()) {
                        if let Some(text) = state.take_input() {
                            action = ChatAction::Send(text);
                        }
                        response.request_focus();
                    }
                });
            });
        });

    action
}

/// Text shown for a message; an empty assistant message mid-stream shows a cursor.
pub fn display_text(message: &Message, streaming: bool) -> String {
    match (message.role, streaming) {
        (Role::Assistant, true) => format!("{}▌", message.content),
        _ => message.content.clone(),
    }
}

fn render_message(ui: &mut egui::Ui, message: &Message, streaming: bool) {
    let (label_color, bg) = match message.role {
        Role::User => (ACCENT, BG_USER),
        Role::Assistant => (SUCCESS, BG_SECONDARY),
    };

    egui::Frame::default()
        .fill(bg)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(message.role.label()).color(label_color).strong().small());
                ui.label(
                    RichText::new(message.timestamp.format("%H:%M").to_string())
                        .color(TEXT_SECONDARY)
                        .small(),
                );
            });
            ui.label(RichText::new(display_text(message, streaming)).color(TEXT_PRIMARY));
        });
}

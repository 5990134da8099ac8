//! UI theme constants

use egui::{Color32, CornerRadius, Stroke, Vec2};

pub const BG_PRIMARY: Color32 = Color32::from_rgb(22, 24, 29);
pub const BG_SECONDARY: Color32 = Color32::from_rgb(34, 37, 44);
pub const BG_SURFACE: Color32 = Color32::from_rgb(48, 52, 61);
pub const BG_USER: Color32 = Color32::from_rgb(36, 44, 70);
pub const BG_ERROR: Color32 = Color32::from_rgb(58, 24, 26);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(230, 231, 235);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(150, 155, 168);
pub const ACCENT: Color32 = Color32::from_rgb(79, 124, 255);
pub const SUCCESS: Color32 = Color32::from_rgb(52, 199, 120);
pub const ERROR: Color32 = Color32::from_rgb(240, 82, 82);
pub const WARNING: Color32 = Color32::from_rgb(240, 180, 40);
pub const PREVIEW_BG: Color32 = Color32::from_rgb(16, 17, 21);

pub const PANEL_ROUNDING: CornerRadius = CornerRadius::same(6);
pub const PANEL_PADDING: Vec2 = Vec2::new(12.0, 8.0);
pub const SIDEBAR_WIDTH: f32 = 240.0;

/// Dark theme for the whole client
pub fn apply_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    style.visuals.dark_mode = true;
    style.visuals.panel_fill = BG_PRIMARY;
    style.visuals.window_fill = BG_SECONDARY;
    style.visuals.extreme_bg_color = PREVIEW_BG;

    for widget in [
        &mut style.visuals.widgets.inactive,
        &mut style.visuals.widgets.hovered,
    ] {
        widget.bg_fill = BG_SURFACE;
        widget.weak_bg_fill = BG_SURFACE;
    }
    style.visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, TEXT_SECONDARY);
    style.visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    style.visuals.widgets.active.bg_fill = ACCENT;
    style.visuals.widgets.active.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);

    style.visuals.selection.bg_fill = ACCENT.linear_multiply(0.35);
    style.visuals.selection.stroke = Stroke::new(1.0, ACCENT);

    style.spacing.item_spacing = Vec2::new(8.0, 6.0);

    ctx.set_style(style);
}

//! Shared UI components

use eframe::egui::{self, CornerRadius, Margin, RichText, Stroke};

use crate::app::TodolistApp;
use crate::forms::validate_title;
use crate::state::{EditTarget, Editing, TitleDraft};
use crate::store::app_status::set_error;
use crate::ui::theme::Theme;

/// Title that turns into a text field on double-click.
///
/// Returns the new title once an edit is committed with Enter or by leaving
/// the field. Escape cancels. Unchanged or invalid titles commit nothing.
pub fn editable_title(
    ui: &mut egui::Ui,
    editing: &mut Option<Editing>,
    target: EditTarget,
    current: &str,
    text: RichText,
    enabled: bool,
) -> Option<String> {
    let Some(edit) = editing.as_mut().filter(|e| e.target == target) else {
        let response = ui.add(egui::Label::new(text).sense(egui::Sense::click()));
        if enabled && response.double_clicked() {
            *editing = Some(Editing::new(target, current));
        }
        response.on_hover_text("Double-click to edit");
        return None;
    };

    let response = ui.add(egui::TextEdit::singleline(&mut edit.text).desired_width(180.0));
    if !edit.focused {
        response.request_focus();
        edit.focused = true;
    }

    if !response.lost_focus() {
        return None;
    }

    let cancelled = ui.input(|i| i.key_pressed(egui::Key::Escape));
    let committed = validate_title(&edit.text).ok();
    *editing = None;

    match committed {
        Some(title) if !cancelled && title != current => Some(title),
        _ => None,
    }
}

/// Single-line "add item" form. Returns the validated title on submit.
pub fn add_item_form(
    ui: &mut egui::Ui,
    draft: &mut TitleDraft,
    hint: &str,
    enabled: bool,
    theme: &Theme,
) -> Option<String> {
    let mut submitted = None;

    ui.horizontal(|ui| {
        let response = ui.add_enabled(
            enabled,
            egui::TextEdit::singleline(&mut draft.text)
                .hint_text(hint)
                .desired_width(220.0),
        );
        if response.changed() {
            draft.error = None;
        }

        let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        let clicked = ui
            .add_enabled(enabled, egui::Button::new("+"))
            .on_hover_text(hint)
            .clicked();

        if enter || clicked {
            submitted = draft.take_valid();
        }
    });

    if let Some(error) = &draft.error {
        ui.label(RichText::new(error).color(theme.error).size(11.0));
    }

    submitted
}

/// Bordered card used for each list and for the login box
pub fn card_frame(theme: &Theme) -> egui::Frame {
    egui::Frame::new()
        .fill(theme.surface)
        .corner_radius(CornerRadius::same(8))
        .inner_margin(Margin::same(16))
        .stroke(Stroke::new(1.0, theme.border))
}

/// Show the global error until the user dismisses it
pub fn render_error_snackbar(app: &mut TodolistApp, ctx: &egui::Context) {
    let Some(error) = app.store.app.error.clone() else {
        return;
    };
    let theme = app.ui.current_theme.clone();

    egui::TopBottomPanel::bottom("error_snackbar")
        .frame(
            egui::Frame::new()
                .fill(theme.error.gamma_multiply(0.25))
                .inner_margin(Margin::symmetric(16, 10))
                .stroke(Stroke::new(1.0, theme.error)),
        )
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(format!("⚠ {}", error)).color(theme.text_primary));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("✕").on_hover_text("Dismiss").clicked() {
                        app.dispatch(set_error(None));
                    }
                });
            });
        });
}

//! Top bar: title, theme picker, logout and the global progress line

use eframe::egui::{self, RichText};

use crate::app::TodolistApp;
use crate::ui::theme::ThemePreset;

pub fn render_header(app: &mut TodolistApp, ctx: &egui::Context) {
    let theme = app.ui.current_theme.clone();
    let loading = app.store.is_loading();

    egui::TopBottomPanel::top("header").show(ctx, |ui| {
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.label(RichText::new("Todolist").size(22.0).strong().color(theme.accent));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if app.store.auth.is_logged_in {
                    if ui.add_enabled(!loading, egui::Button::new("Log out")).clicked() {
                        app.logout();
                    }
                    if let Some(user) = &app.store.auth.user {
                        ui.label(RichText::new(&user.email).color(theme.text_muted));
                    }
                    ui.add_space(12.0);
                }

                let current = app.config.ui.theme;
                egui::ComboBox::from_id_salt("theme_select")
                    .selected_text(current.name())
                    .show_ui(ui, |ui| {
                        for preset in ThemePreset::all() {
                            if ui.selectable_label(current == *preset, preset.name()).clicked() {
                                app.set_theme(*preset);
                            }
                        }
                    });
            });
        });
        ui.add_space(4.0);

        // Thin indeterminate bar while anything is in flight
        if loading {
            ui.add(egui::ProgressBar::new(0.0).animate(true).desired_height(3.0));
        } else {
            ui.add_space(3.0);
        }
    });
}

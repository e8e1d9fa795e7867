//! Login screen

use eframe::egui::{self, RichText, Vec2};

use crate::api::REGISTER_URL;
use crate::app::TodolistApp;
use crate::features::auth;
use crate::forms::{EMAIL, PASSWORD};
use crate::store::thunk::RequestId;
use crate::ui::components::card_frame;

const FIELD_WIDTH: f32 = 280.0;

pub fn render_login(app: &mut TodolistApp, ui: &mut egui::Ui) {
    let theme = app.ui.current_theme.clone();
    let pending = app.ui.login_request.is_some();

    ui.vertical_centered(|ui| {
        ui.add_space(40.0);

        card_frame(&theme).show(ui, |ui| {
            ui.set_width(FIELD_WIDTH + 16.0);

            ui.label(RichText::new("Login").size(24.0).strong().color(theme.text_primary));
            ui.add_space(8.0);

            ui.label(RichText::new("To log in get registered").color(theme.text_secondary));
            if ui.link("here").clicked() {
                if let Err(e) = open::that(REGISTER_URL) {
                    tracing::warn!("Failed to open browser: {}", e);
                }
            }
            ui.label(
                RichText::new("or use common test account credentials:")
                    .color(theme.text_secondary),
            );
            ui.label(RichText::new("Email: free@samuraijs.com").color(theme.text_muted));
            ui.label(RichText::new("Password: free").color(theme.text_muted));

            ui.add_space(16.0);

            let form = &mut app.ui.login_form;

            let email = ui.add_enabled(
                !pending,
                egui::TextEdit::singleline(&mut form.values.email)
                    .hint_text("Email")
                    .desired_width(FIELD_WIDTH),
            );
            if email.changed() {
                form.changed();
            }
            if email.lost_focus() {
                form.touch(EMAIL);
            }
            if let Some(error) = form.error(EMAIL) {
                ui.label(RichText::new(error).color(theme.error).size(11.0));
            }

            ui.add_space(8.0);

            let password = ui.add_enabled(
                !pending,
                egui::TextEdit::singleline(&mut form.values.password)
                    .password(true)
                    .hint_text("Password")
                    .desired_width(FIELD_WIDTH),
            );
            if password.changed() {
                form.changed();
            }
            if password.lost_focus() {
                form.touch(PASSWORD);
            }
            if let Some(error) = form.error(PASSWORD) {
                ui.label(RichText::new(error).color(theme.error).size(11.0));
            }

            ui.add_space(8.0);

            if ui
                .add_enabled(!pending, egui::Checkbox::new(&mut form.values.remember_me, "Remember me"))
                .changed()
            {
                form.changed();
            }

            ui.add_space(12.0);

            let enter = password.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            let clicked = ui
                .add_enabled(
                    form.can_submit() && !pending,
                    egui::Button::new("Login").min_size(Vec2::new(FIELD_WIDTH, 32.0)),
                )
                .clicked();

            if clicked || enter {
                submit_login(app);
            }

            if pending {
                ui.add_space(8.0);
                ui.spinner();
            }
        });
    });
}

/// Validate the form and start a login. Nothing is dispatched when the form is invalid.
pub fn submit_login(app: &mut TodolistApp) -> Option<RequestId> {
    if app.ui.login_request.is_some() {
        return None;
    }

    let params = app.ui.login_form.submit()?;
    let id = app.spawn(auth::login(&app.api, params));
    app.ui.login_request = Some(id);
    Some(id)
}

//! A single task row

use eframe::egui::{self, RichText};

use crate::api::{Task, TaskStatus};
use crate::app::TodolistApp;
use crate::features::tasks::{self, UpdateDomainTaskModel};
use crate::state::EditTarget;
use crate::ui::components::editable_title;
use crate::ui::theme::Theme;

pub fn render_task(app: &mut TodolistApp, ui: &mut egui::Ui, todolist_id: &str, task: &Task, theme: &Theme) {
    // The checkbox stays live during other requests; title edits and deletes do not
    let busy = app.store.is_loading();
    let done = task.is_completed();

    ui.horizontal(|ui| {
        let mut checked = done;
        if ui.checkbox(&mut checked, "").changed() {
            let status = if checked { TaskStatus::Completed } else { TaskStatus::New };
            app.update_task(todolist_id, &task.id, UpdateDomainTaskModel::status(status));
        }

        let mut text = RichText::new(&task.title);
        text = if done {
            text.strikethrough().color(theme.text_muted)
        } else {
            text.color(theme.text_primary)
        };

        let target = EditTarget::Task {
            todolist_id: todolist_id.to_string(),
            task_id: task.id.clone(),
        };
        if let Some(title) = editable_title(ui, &mut app.ui.editing, target, &task.title, text, !busy) {
            app.update_task(todolist_id, &task.id, UpdateDomainTaskModel::title(title));
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .add_enabled(!busy, egui::Button::new("✕").small())
                .on_hover_text("Delete task")
                .clicked()
            {
                app.spawn(tasks::remove_task(&app.api, todolist_id, &task.id));
            }
        });
    });
}

//! Todolist board: the "new list" form followed by one card per list

use eframe::egui::{self, RichText};

use crate::api::Task;
use crate::app::TodolistApp;
use crate::features::todolists::{self, FilterValue, TodolistDomain};
use crate::features::tasks;
use crate::state::EditTarget;
use crate::ui::components::{add_item_form, card_frame, editable_title};
use crate::ui::task::render_task;
use crate::ui::theme::Theme;

const CARD_WIDTH: f32 = 300.0;

pub fn render_todolists(app: &mut TodolistApp, ui: &mut egui::Ui) {
    let theme = app.ui.current_theme.clone();
    let loading = app.store.is_loading();

    ui.add_space(8.0);
    if let Some(title) = add_item_form(ui, &mut app.ui.new_todolist, "New list title", !loading, &theme) {
        app.spawn(todolists::add_todolist(&app.api, &title));
    }
    ui.add_space(12.0);

    let lists = app.store.todolists.lists.clone();
    if lists.is_empty() {
        ui.label(RichText::new("No lists yet").color(theme.text_muted));
        return;
    }

    egui::ScrollArea::vertical()
        .id_salt("todolists_scroll")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                for list in &lists {
                    render_todolist(app, ui, list, &theme);
                }
            });
        });
}

fn render_todolist(app: &mut TodolistApp, ui: &mut egui::Ui, list: &TodolistDomain, theme: &Theme) {
    let id = list.todolist.id.clone();
    let deleting = list.entity_status.is_loading();

    card_frame(theme).show(ui, |ui| {
        ui.set_width(CARD_WIDTH);

        ui.horizontal(|ui| {
            let title = RichText::new(&list.todolist.title)
                .size(18.0)
                .strong()
                .color(theme.text_primary);
            let target = EditTarget::Todolist { todolist_id: id.clone() };
            if let Some(title) =
                editable_title(ui, &mut app.ui.editing, target, &list.todolist.title, title, !deleting)
            {
                app.spawn(todolists::change_todolist_title(&app.api, &id, &title));
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .add_enabled(!deleting, egui::Button::new("🗑"))
                    .on_hover_text("Delete list")
                    .clicked()
                {
                    app.spawn(todolists::remove_todolist(&app.api, &id));
                }
            });
        });

        ui.add_space(8.0);

        let draft = app.ui.new_tasks.entry(id.clone()).or_default();
        if let Some(title) = add_item_form(ui, draft, "New task", !deleting, theme) {
            app.spawn(tasks::add_task(&app.api, &id, &title));
        }

        ui.add_space(8.0);

        let visible: Vec<Task> = app
            .store
            .tasks
            .filtered(&id, list.filter)
            .into_iter()
            .cloned()
            .collect();

        if !app.store.tasks.is_loaded(&id) {
            ui.spinner();
        } else if visible.is_empty() {
            ui.label(RichText::new("No tasks").color(theme.text_muted).size(12.0));
        }
        for task in &visible {
            render_task(app, ui, &id, task, theme);
        }

        ui.add_space(8.0);

        ui.horizontal(|ui| {
            for filter in FilterValue::all() {
                let label = RichText::new(filter.name()).color(if list.filter == *filter {
                    theme.accent
                } else {
                    theme.text_secondary
                });
                if ui.selectable_label(list.filter == *filter, label).clicked() {
                    app.dispatch(todolists::change_filter(&id, *filter));
                }
            }

            let all = app.store.tasks.for_list(&id);
            if !all.is_empty() {
                let done = all.iter().filter(|t| t.is_completed()).count();
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        RichText::new(format!("{}/{} done", done, all.len()))
                            .color(theme.success)
                            .size(11.0),
                    );
                });
            }
        });
    });

    ui.add_space(12.0);
}

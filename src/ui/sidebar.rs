//! Sidebar listing every stored file

use eframe::egui;

use crate::app::CodeShareApp;
use crate::core::record::FileId;

/// What the user asked for while the list was drawn
enum SidebarAction {
    Select(FileId),
    Download(FileId),
    Delete(FileId),
}

/// Sidebar with the file list
pub struct Sidebar;

impl Sidebar {
    /// Show the sidebar
    pub fn show(ui: &mut egui::Ui, app: &mut CodeShareApp) {
        let mut action = None;

        ui.vertical(|ui| {
            ui.heading(format!("Files ({})", app.store.len()));
            ui.separator();

            if app.store.is_empty() {
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.label("No files yet");
                    ui.small("Create or upload a file to get started");
                });
                return;
            }

            egui::ScrollArea::vertical()
                .id_salt("file_list_scroll")
                .show(ui, |ui| {
                    let active = app.store.active_id();
                    for file in app.store.files() {
                        let is_active = active == Some(file.id);
                        let frame = egui::Frame::group(ui.style()).fill(if is_active {
                            ui.visuals().selection.bg_fill
                        } else {
                            ui.visuals().faint_bg_color
                        });

                        frame.show(ui, |ui| {
                            ui.set_min_width(ui.available_width());
                            ui.horizontal(|ui| {
                                let details = ui.vertical(|ui| {
                                    ui.strong(&file.name);
                                    ui.small(format!(
                                        "{} \u{2022} {}",
                                        file.language,
                                        file.modified.format("%Y-%m-%d")
                                    ));
                                });

                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::Center),
                                    |ui| {
                                        if ui.small_button("\u{1F5D1}").on_hover_text("Delete").clicked() {
                                            action = Some(SidebarAction::Delete(file.id));
                                        }
                                        if ui.small_button("\u{2B07}").on_hover_text("Download").clicked() {
                                            action = Some(SidebarAction::Download(file.id));
                                        }
                                    },
                                );

                                let click = ui.interact(
                                    details.response.rect,
                                    ui.id().with(file.id),
                                    egui::Sense::click(),
                                );
                                if click.clicked() && action.is_none() {
                                    action = Some(SidebarAction::Select(file.id));
                                }
                            });
                        });
                    }
                });
        });

        match action {
            Some(SidebarAction::Select(id)) => app.select_file(id),
            Some(SidebarAction::Download(id)) => app.download_file(id),
            Some(SidebarAction::Delete(id)) => app.delete_file(id),
            None => {}
        }
    }
}

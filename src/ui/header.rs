//! Header above the active file with its actions

use eframe::egui;

use crate::app::CodeShareApp;

pub struct FileHeader;

impl FileHeader {
    pub fn show(ui: &mut egui::Ui, app: &mut CodeShareApp) {
        let Some(record) = app.displayed() else {
            return;
        };
        let name = record.name.clone();
        let summary = format!(
            "{} \u{2022} {} chars",
            record.language.display_name(),
            record.char_count()
        );

        ui.horizontal(|ui| {
            ui.heading(name);
            ui.label(egui::RichText::new(summary).weak());

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if app.is_editing() && ui.button("\u{1F4BE} Save").clicked() {
                    app.save_active();
                }
                if ui.button("\u{1F4CB} Copy").clicked() {
                    app.copy_active();
                }

                let edit_label = if app.is_editing() { "Editing" } else { "Edit" };
                if ui.selectable_label(app.is_editing(), edit_label).clicked() {
                    app.toggle_editing();
                }

                let view_label = if app.show_preview { "Preview" } else { "Code" };
                if ui.selectable_label(app.show_preview, view_label).clicked() {
                    app.show_preview = !app.show_preview;
                }
            });
        });
    }
}

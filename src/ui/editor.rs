//! Code editor panel

use eframe::egui;

use crate::app::CodeShareApp;

/// Editor panel over the active file's draft
pub struct EditorPanel;

impl EditorPanel {
    /// Show the editor panel
    pub fn show(ui: &mut egui::Ui, app: &mut CodeShareApp) {
        let font_size = app.config.editor.font_size;
        let Some(draft) = app.draft.as_mut() else {
            return;
        };

        egui::ScrollArea::vertical()
            .id_salt("editor_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                egui::TextEdit::multiline(&mut draft.code)
                    .code_editor()
                    .font(egui::FontId::monospace(font_size))
                    .hint_text("Paste your code here...")
                    .desired_width(f32::INFINITY)
                    .desired_rows(30)
                    .show(ui);
            });
    }

    /// Shown when no file is selected
    pub fn show_welcome(ui: &mut egui::Ui, has_files: bool) {
        ui.vertical_centered(|ui| {
            ui.add_space(100.0);

            ui.heading("No file selected");
            ui.add_space(10.0);

            if has_files {
                ui.label("Select a file from the sidebar or create a new one");
            } else {
                ui.label("Create or upload a file to get started");
            }
            ui.add_space(20.0);

            ui.label("Keyboard shortcuts:");
            ui.label("  Ctrl+N - New file");
            ui.label("  Ctrl+S - Save");
            ui.label("  Ctrl+B - Toggle sidebar");
        });
    }
}

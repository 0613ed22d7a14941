//! Modal dialogs

use eframe::egui;

/// Dialog for creating a new file
#[derive(Debug, Default)]
pub struct NewFileDialog {
    pub visible: bool,
    pub file_name: String,
    focus_pending: bool,
}

impl NewFileDialog {
    pub fn open(&mut self) {
        self.visible = true;
        self.file_name.clear();
        self.focus_pending = true;
    }

    pub fn close(&mut self) {
        self.visible = false;
        self.file_name.clear();
    }

    /// Show the dialog; returns the entered name when the user submits
    pub fn show(&mut self, ctx: &egui::Context) -> Option<String> {
        if !self.visible {
            return None;
        }

        let mut submitted = false;
        let mut cancelled = false;

        egui::Window::new("Create New File")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.file_name)
                        .hint_text("Enter file name (e.g., main.py, app.js)")
                        .desired_width(320.0),
                );
                if std::mem::take(&mut self.focus_pending) {
                    response.request_focus();
                }
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    submitted = true;
                }
                if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                    cancelled = true;
                }

                ui.add_space(8.0);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Create").clicked() {
                        submitted = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancelled = true;
                    }
                });
            });

        if cancelled {
            self.close();
            return None;
        }
        if submitted {
            return Some(self.file_name.clone());
        }
        None
    }
}

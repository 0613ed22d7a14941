//! Main application state and UI coordination

use std::time::Duration;

use eframe::egui;

use crate::core::config::AppConfig;
use crate::core::highlight;
use crate::core::language::UPLOAD_EXTENSIONS;
use crate::core::record::{FileId, FileRecord};
use crate::core::storage::{DirectoryStore, KeyValueStore, MemoryStore};
use crate::core::store::FileStore;
use crate::core::transfer::{self, ClipboardSink, ExportPayload, SystemClipboard};
use crate::ui::{
    dialogs::NewFileDialog,
    editor::EditorPanel,
    header::FileHeader,
    notification::{NoticeLevel, Notifications},
    preview::PreviewPanel,
    sidebar::Sidebar,
};

/// The store as the application uses it
pub type Store = FileStore<Box<dyn KeyValueStore>>;

/// Main application state
pub struct CodeShareApp {
    /// All files and the active selection
    pub store: Store,
    /// In-progress copy of the active file, present while editing
    pub draft: Option<FileRecord>,
    /// Highlighted preview instead of raw code
    pub show_preview: bool,
    /// Whether sidebar is visible
    pub sidebar_visible: bool,
    /// Application configuration
    pub config: AppConfig,
    pub new_file_dialog: NewFileDialog,
    pub notifications: Notifications,
    pub clipboard: SystemClipboard,
    /// Commonmark cache for markdown preview
    pub commonmark_cache: egui_commonmark::CommonMarkCache,
}

/// Pick the durable slot for saved files
fn open_storage(config: &AppConfig) -> Box<dyn KeyValueStore> {
    match config.data_dir() {
        Some(dir) => {
            tracing::info!("Storing files in: {}", dir.display());
            Box::new(DirectoryStore::new(dir))
        }
        None => {
            tracing::warn!("No data directory available, files will not persist");
            Box::new(MemoryStore::new())
        }
    }
}

impl CodeShareApp {
    /// Create a new application instance
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Load config or use defaults
        let config = AppConfig::load().unwrap_or_else(|e| {
            tracing::warn!("Using default config: {:#}", e);
            AppConfig::default()
        });
        Self::apply_theme(&cc.egui_ctx, &config);

        let store = FileStore::open(open_storage(&config));
        Self::with_store(config, store)
    }

    /// Build the application around an already opened store
    pub fn with_store(config: AppConfig, store: Store) -> Self {
        Self {
            store,
            draft: None,
            show_preview: config.ui.show_preview,
            sidebar_visible: true,
            config,
            new_file_dialog: NewFileDialog::default(),
            notifications: Notifications::default(),
            clipboard: SystemClipboard::new(),
            commonmark_cache: egui_commonmark::CommonMarkCache::default(),
        }
    }

    fn apply_theme(ctx: &egui::Context, config: &AppConfig) {
        if config.is_dark() {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }
    }

    fn notify(&mut self, level: NoticeLevel, text: impl Into<String>) {
        let secs = self.config.ui.notification_secs;
        let secs = if secs.is_finite() { secs.clamp(0.5, 60.0) } else { 2.0 };
        let duration = Duration::from_secs_f32(secs);
        self.notifications.push(level, text, duration);
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    /// The record being shown: the draft while editing, otherwise the stored one
    pub fn displayed(&self) -> Option<&FileRecord> {
        self.draft.as_ref().or_else(|| self.store.active())
    }

    /// Keep the draft pointed at the active record, discarding unsaved edits
    fn sync_draft(&mut self) {
        if self.draft.is_some() {
            self.draft = self.store.active().cloned();
        }
    }

    /// Select a file from the list
    pub fn select_file(&mut self, id: FileId) {
        if self.store.active_id() == Some(id) {
            return;
        }
        self.store.set_active(Some(id));
        self.sync_draft();
    }

    /// Enter or leave edit mode. Leaving drops unsaved edits.
    pub fn toggle_editing(&mut self) {
        self.draft = match self.draft {
            Some(_) => None,
            None => self.store.active().cloned(),
        };
    }

    /// Create an empty file and start editing it
    pub fn create_file(&mut self, name: &str) -> bool {
        match self.store.create(name) {
            Ok(Some(record)) => {
                self.draft = Some(record);
                true
            }
            Ok(None) => false,
            Err(e) => {
                self.notify(NoticeLevel::Error, format!("Could not create file: {e}"));
                false
            }
        }
    }

    /// Pick a file from disk and add it to the store
    pub fn upload_file(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Code", UPLOAD_EXTENSIONS)
            .add_filter("All files", &["*"])
            .pick_file()
        else {
            return;
        };

        let (name, content) = match transfer::import_file(&path) {
            Ok(picked) => picked,
            Err(e) => {
                tracing::error!("Failed to import file: {}", e);
                self.notify(NoticeLevel::Error, format!("Upload failed: {e}"));
                return;
            }
        };

        self.add_upload(&name, &content);
    }

    /// Add imported content as a new active file
    pub fn add_upload(&mut self, name: &str, content: &str) {
        match self.store.upload(name, content) {
            Ok(Some(record)) => {
                self.sync_draft();
                self.notify(NoticeLevel::Success, format!("Uploaded {}", record.name));
            }
            Ok(None) => {}
            Err(e) => self.notify(NoticeLevel::Error, format!("Upload failed: {e}")),
        }
    }

    /// Offer a file through a "save as" dialog
    pub fn download_file(&mut self, id: FileId) {
        let Some(record) = self.store.get(id) else {
            return;
        };
        let payload = ExportPayload::from_record(record);

        let Some(path) = rfd::FileDialog::new()
            .set_file_name(&payload.file_name)
            .save_file()
        else {
            return;
        };

        if let Err(e) = payload.write_to(&path) {
            tracing::error!("Failed to export file: {}", e);
            self.notify(NoticeLevel::Error, format!("Download failed: {e}"));
        }
    }

    pub fn delete_file(&mut self, id: FileId) {
        match self.store.delete(id) {
            Ok(Some(_)) => {
                if self.draft.as_ref().is_some_and(|d| d.id == id) {
                    self.sync_draft();
                }
            }
            Ok(None) => {}
            Err(e) => self.notify(NoticeLevel::Error, format!("Could not delete file: {e}")),
        }
    }

    /// Save the draft and leave edit mode
    pub fn save_active(&mut self) {
        let Some(draft) = self.draft.as_ref() else {
            return;
        };

        match self.store.save(draft) {
            Ok(Some(_)) => {
                self.draft = None;
                self.notify(NoticeLevel::Success, "File saved!");
            }
            Ok(None) => {}
            Err(e) => self.notify(NoticeLevel::Error, format!("Save failed: {e}")),
        }
    }

    /// Copy the shown content to the clipboard
    pub fn copy_active(&mut self) {
        let Some(code) = self.displayed().map(|r| r.code.clone()) else {
            return;
        };
        self.copy_text(&code);
    }

    /// Copy the shown content as highlighted markup
    pub fn copy_active_markup(&mut self) {
        let Some(markup) = self.displayed().map(|r| {
            highlight::highlight_with(&r.code, r.language, self.config.highlight.options())
                .to_markup()
        }) else {
            return;
        };
        self.copy_text(&markup);
    }

    fn copy_text(&mut self, text: &str) {
        match self.clipboard.set_text(text) {
            Ok(()) => self.notify(NoticeLevel::Success, "Copied to clipboard!"),
            Err(e) => {
                tracing::warn!("Clipboard write failed: {}", e);
                self.notify(NoticeLevel::Error, "Failed to copy");
            }
        }
    }

    fn toggle_theme(&mut self, ctx: &egui::Context) {
        self.config.ui.theme = if self.config.is_dark() { "light" } else { "dark" }.to_string();
        Self::apply_theme(ctx, &self.config);
        if let Err(e) = self.config.save() {
            tracing::error!("Failed to save config: {:#}", e);
        }
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("New File...").clicked() {
                        self.new_file_dialog.open();
                        ui.close();
                    }
                    if ui.button("Upload...").clicked() {
                        ui.close();
                        self.upload_file();
                    }
                    ui.separator();
                    let active = self.store.active_id();
                    if ui
                        .add_enabled(active.is_some(), egui::Button::new("Download..."))
                        .clicked()
                    {
                        ui.close();
                        if let Some(id) = active {
                            self.download_file(id);
                        }
                    }
                    if ui
                        .add_enabled(active.is_some(), egui::Button::new("Copy"))
                        .clicked()
                    {
                        self.copy_active();
                        ui.close();
                    }
                    if ui
                        .add_enabled(active.is_some(), egui::Button::new("Copy as Markup"))
                        .clicked()
                    {
                        self.copy_active_markup();
                        ui.close();
                    }
                    if ui
                        .add_enabled(self.is_editing(), egui::Button::new("Save"))
                        .clicked()
                    {
                        self.save_active();
                        ui.close();
                    }
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("View", |ui| {
                    if ui.button("Toggle Sidebar").clicked() {
                        self.sidebar_visible = !self.sidebar_visible;
                        ui.close();
                    }
                    if ui.selectable_label(self.show_preview, "Preview").clicked() {
                        self.show_preview = true;
                        ui.close();
                    }
                    if ui.selectable_label(!self.show_preview, "Code").clicked() {
                        self.show_preview = false;
                        ui.close();
                    }
                    ui.separator();
                    if ui.button("Toggle Theme").clicked() {
                        self.toggle_theme(ctx);
                        ui.close();
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("+ New File").clicked() {
                        self.new_file_dialog.open();
                    }
                    if ui.button("\u{2B06} Upload").clicked() {
                        self.upload_file();
                    }
                });
            });
        });
    }
}

impl eframe::App for CodeShareApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Handle keyboard shortcuts
        let (save, new_file, toggle_sidebar) = ctx.input(|i| {
            (
                i.modifiers.command && i.key_pressed(egui::Key::S),
                i.modifiers.command && i.key_pressed(egui::Key::N),
                i.modifiers.command && i.key_pressed(egui::Key::B),
            )
        });
        if save {
            self.save_active();
        }
        if new_file {
            self.new_file_dialog.open();
        }
        if toggle_sidebar {
            self.sidebar_visible = !self.sidebar_visible;
        }

        // Render menu bar
        self.render_menu_bar(ctx);

        // Render sidebar with file list
        if self.sidebar_visible {
            egui::SidePanel::left("sidebar")
                .resizable(true)
                .default_width(self.config.ui.sidebar_width)
                .min_width(180.0)
                .show(ctx, |ui| {
                    Sidebar::show(ui, self);
                });
        }

        // Render main content area
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.displayed().is_none() {
                EditorPanel::show_welcome(ui, !self.store.is_empty());
                return;
            }

            FileHeader::show(ui, self);
            ui.separator();

            if self.is_editing() {
                EditorPanel::show(ui, self);
            } else {
                PreviewPanel::show(ui, self);
            }
        });

        if let Some(name) = self.new_file_dialog.show(ctx) {
            if self.create_file(&name) {
                self.new_file_dialog.close();
            }
        }

        self.notifications.show(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_with(names: &[&str]) -> CodeShareApp {
        let storage: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        let mut app = CodeShareApp::with_store(AppConfig::default(), FileStore::open(storage));
        for name in names {
            app.store.create(name).unwrap();
        }
        app
    }

    fn id_of(app: &CodeShareApp, name: &str) -> FileId {
        app.store.files().iter().find(|f| f.name == name).unwrap().id
    }

    fn edit_draft(app: &mut CodeShareApp, code: &str) {
        app.draft.as_mut().unwrap().code = code.to_string();
    }

    #[test]
    fn test_select_while_editing_discards_edits() {
        let mut app = app_with(&["a.txt", "b.txt"]);
        let a = id_of(&app, "a.txt");
        let b = id_of(&app, "b.txt");

        app.toggle_editing();
        edit_draft(&mut app, "unsaved");

        app.select_file(a);
        assert_eq!(app.draft.as_ref().map(|d| d.id), Some(a));
        assert_eq!(app.displayed().unwrap().code, "");

        app.select_file(b);
        assert_eq!(app.draft.as_ref().map(|d| d.id), Some(b));
        assert_eq!(app.store.get(b).unwrap().code, "");
        assert_eq!(app.displayed().unwrap().code, "");
    }

    #[test]
    fn test_select_while_viewing_stays_in_view_mode() {
        let mut app = app_with(&["a.txt", "b.txt"]);
        let a = id_of(&app, "a.txt");
        app.select_file(a);
        assert!(!app.is_editing());
        assert_eq!(app.displayed().map(|r| r.id), Some(a));
    }

    #[test]
    fn test_toggle_editing_twice_drops_edits() {
        let mut app = app_with(&["a.txt"]);
        app.toggle_editing();
        assert!(app.is_editing());
        edit_draft(&mut app, "unsaved");

        app.toggle_editing();
        assert!(!app.is_editing());
        app.toggle_editing();
        assert_eq!(app.draft.as_ref().unwrap().code, "");
    }

    #[test]
    fn test_upload_while_editing_moves_draft_to_upload() {
        let mut app = app_with(&["a.txt"]);
        app.toggle_editing();
        edit_draft(&mut app, "unsaved");

        app.add_upload("main.py", "def f():\n    pass\n");
        let draft = app.draft.as_ref().unwrap();
        assert_eq!(draft.name, "main.py");
        assert_eq!(draft.code, "def f():\n    pass\n");
        assert_eq!(app.store.active_id(), Some(draft.id));
        assert_eq!(app.notifications.text(), Some("Uploaded main.py"));
    }

    #[test]
    fn test_upload_while_viewing_does_not_start_editing() {
        let mut app = app_with(&[]);
        app.add_upload("notes.md", "# hi");
        assert!(!app.is_editing());
        assert_eq!(app.displayed().unwrap().name, "notes.md");
    }

    #[test]
    fn test_deleting_edited_file_follows_new_active() {
        let mut app = app_with(&["a.txt", "b.txt"]);
        let a = id_of(&app, "a.txt");
        let b = id_of(&app, "b.txt");
        app.toggle_editing();
        edit_draft(&mut app, "unsaved");

        app.delete_file(b);
        assert_eq!(app.draft.as_ref().map(|d| d.id), Some(a));

        app.delete_file(a);
        assert!(app.draft.is_none());
        assert!(app.displayed().is_none());
    }

    #[test]
    fn test_deleting_other_file_keeps_edits() {
        let mut app = app_with(&["a.txt", "b.txt"]);
        let a = id_of(&app, "a.txt");
        app.toggle_editing();
        edit_draft(&mut app, "unsaved");

        app.delete_file(a);
        assert_eq!(app.draft.as_ref().unwrap().code, "unsaved");
    }

    #[test]
    fn test_save_stores_draft_and_leaves_edit_mode() {
        let mut app = app_with(&["a.txt"]);
        let a = id_of(&app, "a.txt");
        app.toggle_editing();
        edit_draft(&mut app, "saved");

        app.save_active();
        assert!(!app.is_editing());
        assert_eq!(app.store.get(a).unwrap().code, "saved");
        assert_eq!(app.notifications.text(), Some("File saved!"));
    }

    #[test]
    fn test_create_file_starts_editing() {
        let mut app = app_with(&["a.txt"]);
        assert!(app.create_file("b.rs"));
        assert_eq!(app.draft.as_ref().unwrap().name, "b.rs");
        assert!(!app.create_file("   "));
        assert_eq!(app.store.len(), 2);
    }
}

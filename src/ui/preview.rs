//! Read-only view of the active file: highlighted preview or raw code

use eframe::egui;
use eframe::egui::text::LayoutJob;
use egui_commonmark::CommonMarkViewer;

use crate::app::CodeShareApp;
use crate::core::highlight::{self, Highlighted, SpanKind};
use crate::core::language::LanguageTag;

const KEYWORD_COLOR: egui::Color32 = egui::Color32::from_rgb(0x60, 0xA5, 0xFA);
const STRING_COLOR: egui::Color32 = egui::Color32::from_rgb(0x4A, 0xDE, 0x80);
const COMMENT_COLOR: egui::Color32 = egui::Color32::from_rgb(0x6B, 0x72, 0x80);

/// Preview panel
pub struct PreviewPanel;

impl PreviewPanel {
    /// Show the preview panel
    pub fn show(ui: &mut egui::Ui, app: &mut CodeShareApp) {
        // Clone first to avoid borrow conflicts with the commonmark cache
        let Some(record) = app.displayed().cloned() else {
            return;
        };
        let font_size = app.config.editor.font_size;
        let wrap = app.config.editor.word_wrap;
        let dark = app.config.is_dark();

        egui::ScrollArea::both()
            .id_salt("preview_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_min_width(ui.available_width());
                    if !app.show_preview {
                        let job = plain_job(&record.code, font_size, wrap, dark);
                        ui.add(code_label(job, wrap));
                    } else if record.language == LanguageTag::Markdown {
                        CommonMarkViewer::new().show(ui, &mut app.commonmark_cache, &record.code);
                    } else {
                        let highlighted = highlight::highlight_with(
                            &record.code,
                            record.language,
                            app.config.highlight.options(),
                        );
                        let job = highlighted_job(&highlighted, font_size, wrap, dark);
                        ui.add(code_label(job, wrap));
                    }
                });
            });
    }
}

fn text_color(dark: bool) -> egui::Color32 {
    if dark {
        egui::Color32::from_rgb(0xD1, 0xD5, 0xDB)
    } else {
        egui::Color32::from_rgb(0x1F, 0x29, 0x37)
    }
}

fn code_label(job: LayoutJob, wrap: bool) -> egui::Label {
    let mode = if wrap {
        egui::TextWrapMode::Wrap
    } else {
        egui::TextWrapMode::Extend
    };
    egui::Label::new(job).selectable(true).wrap_mode(mode)
}

fn new_job(wrap: bool) -> LayoutJob {
    let mut job = LayoutJob::default();
    if !wrap {
        job.wrap.max_width = f32::INFINITY;
    }
    job
}

/// Raw code in a single monospace run
fn plain_job(code: &str, font_size: f32, wrap: bool, dark: bool) -> LayoutJob {
    let mut job = new_job(wrap);
    job.append(
        code,
        0.0,
        egui::TextFormat {
            font_id: egui::FontId::monospace(font_size),
            color: text_color(dark),
            ..Default::default()
        },
    );
    job
}

/// Highlighted segments as colored monospace runs
fn highlighted_job(highlighted: &Highlighted<'_>, font_size: f32, wrap: bool, dark: bool) -> LayoutJob {
    let mut job = new_job(wrap);
    for segment in highlighted.segments() {
        let color = if segment.keyword {
            KEYWORD_COLOR
        } else {
            match segment.region {
                Some(SpanKind::String) => STRING_COLOR,
                Some(SpanKind::Comment) => COMMENT_COLOR,
                _ => text_color(dark),
            }
        };
        job.append(
            segment.text,
            0.0,
            egui::TextFormat {
                font_id: egui::FontId::monospace(font_size),
                color,
                italics: segment.region == Some(SpanKind::Comment),
                ..Default::default()
            },
        );
    }
    job
}

//! Transient, auto-dismissing status notifications

use std::time::{Duration, Instant};

use eframe::egui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone)]
struct Notice {
    text: String,
    level: NoticeLevel,
    expires_at: Instant,
}

/// The single notification currently on screen
#[derive(Debug, Default)]
pub struct Notifications {
    current: Option<Notice>,
}

impl Notifications {
    /// Replace the current notification
    pub fn push(&mut self, level: NoticeLevel, text: impl Into<String>, duration: Duration) {
        let text = text.into();
        match level {
            NoticeLevel::Success => tracing::info!("Notice: {}", text),
            NoticeLevel::Error => tracing::warn!("Notice: {}", text),
        }
        self.current = Some(Notice {
            text,
            level,
            expires_at: Instant::now() + duration,
        });
    }

    /// Text of the visible notification, if any
    #[cfg(test)]
    pub fn text(&self) -> Option<&str> {
        self.current.as_ref().map(|n| n.text.as_str())
    }

    /// Drop the notification once expired
    pub fn expire(&mut self, now: Instant) {
        if self.current.as_ref().is_some_and(|n| now >= n.expires_at) {
            self.current = None;
        }
    }

    /// Draw in the top-right corner and schedule the repaint that dismisses it
    pub fn show(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        self.expire(now);
        let Some(notice) = &self.current else {
            return;
        };

        ctx.request_repaint_after(notice.expires_at.saturating_duration_since(now));

        let fill = match notice.level {
            NoticeLevel::Success => egui::Color32::from_rgb(0x16, 0xA3, 0x4A),
            NoticeLevel::Error => egui::Color32::from_rgb(0xDC, 0x26, 0x26),
        };

        egui::Area::new(egui::Id::new("notification"))
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-16.0, 40.0))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(fill)
                    .corner_radius(6.0)
                    .inner_margin(egui::Margin::symmetric(16, 8))
                    .show(ui, |ui| {
                        ui.label(egui::RichText::new(&notice.text).color(egui::Color32::WHITE));
                    });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_expires() {
        let mut notifications = Notifications::default();
        notifications.push(NoticeLevel::Success, "File saved!", Duration::from_secs(2));
        assert_eq!(notifications.text(), Some("File saved!"));

        notifications.expire(Instant::now());
        assert_eq!(notifications.text(), Some("File saved!"));

        notifications.expire(Instant::now() + Duration::from_secs(3));
        assert_eq!(notifications.text(), None);
    }

    #[test]
    fn test_push_replaces_current() {
        let mut notifications = Notifications::default();
        notifications.push(NoticeLevel::Success, "Copied to clipboard!", Duration::from_secs(2));
        notifications.push(NoticeLevel::Error, "Failed to copy", Duration::from_secs(2));
        assert_eq!(notifications.text(), Some("Failed to copy"));
    }
}

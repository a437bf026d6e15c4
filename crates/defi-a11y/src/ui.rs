//! UI helper components

use eframe::egui;

use defi_a11y_core::{
    AddressDisplay, AddressValidation, Announcement, Politeness, RiskWarning, Severity,
    SummaryRow,
};

const WARNING_YELLOW: egui::Color32 = egui::Color32::from_rgb(220, 180, 50);

pub fn severity_color(severity: Severity) -> egui::Color32 {
    match severity {
        Severity::Medium => WARNING_YELLOW,
        Severity::High => egui::Color32::from_rgb(220, 120, 50),
        Severity::Critical => egui::Color32::from_rgb(220, 50, 50),
    }
}

/// Styled heading with accent color
pub fn styled_heading(ui: &mut egui::Ui, text: &str) {
    ui.heading(egui::RichText::new(text).color(egui::Color32::from_rgb(0, 212, 170)));
}

/// Section header with separator
pub fn section_header(ui: &mut egui::Ui, text: &str) {
    ui.add_space(10.0);
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(text).strong().size(14.0));
    });
    ui.separator();
}

/// Copy to clipboard
pub fn copy_to_clipboard(text: &str) {
    match arboard::Clipboard::new() {
        Ok(mut clipboard) => {
            if let Err(e) = clipboard.set_text(text) {
                tracing::warn!(error = %e, "clipboard write failed");
            }
        }
        Err(e) => tracing::warn!(error = %e, "clipboard unavailable"),
    }
}

/// Shortened address with the full checksummed value on hover and a copy
/// button. Returns true when the address was copied.
pub fn address_display(ui: &mut egui::Ui, display: &AddressDisplay) -> bool {
    let mut copied = false;
    ui.horizontal(|ui| {
        let color = if display.validation == AddressValidation::ChecksumMismatch {
            WARNING_YELLOW
        } else {
            ui.visuals().text_color()
        };
        ui.label(egui::RichText::new(&display.short).monospace().color(color))
            .on_hover_text(display.checksummed.as_str());

        if ui
            .small_button("📋")
            .on_hover_text("Copy full address")
            .clicked()
        {
            copy_to_clipboard(&display.checksummed);
            copied = true;
        }

        if display.validation == AddressValidation::ChecksumMismatch {
            ui.label(egui::RichText::new("⚠️").color(WARNING_YELLOW))
                .on_hover_text("Address has an invalid EIP-55 checksum");
        }
    });
    copied
}

/// Two-column summary grid
pub fn summary_grid(ui: &mut egui::Ui, id: &str, rows: &[SummaryRow]) {
    egui::Grid::new(id)
        .num_columns(2)
        .spacing([16.0, 6.0])
        .striped(true)
        .show(ui, |ui| {
            for row in rows {
                ui.label(egui::RichText::new(format!("{}:", row.label)).strong());
                ui.label(egui::RichText::new(&row.value).monospace())
                    .on_hover_text(row.aria_label.as_str());
                ui.end_row();
            }
        });
}

/// Risk warning list, most severe first
pub fn risk_warnings(ui: &mut egui::Ui, warnings: &[RiskWarning]) {
    if warnings.is_empty() {
        success_message(ui, "No risks detected");
        return;
    }
    for warning in warnings {
        let severity = warning.severity();
        warning_message(
            ui,
            &format!("{}: {}", severity.label(), warning.message()),
            severity_color(severity),
        );
    }
}

/// Visible mirror of the screen-reader live region
pub fn live_region_bar(ui: &mut egui::Ui, current: Option<&Announcement>) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("🔊").size(14.0))
            .on_hover_text("Screen-reader announcements");
        match current {
            Some(announcement) => {
                let mut text = egui::RichText::new(&announcement.text);
                if announcement.politeness == Politeness::Assertive {
                    text = text.strong();
                }
                ui.label(text);
                ui.label(
                    egui::RichText::new(format!("({})", announcement.politeness.aria_live()))
                        .weak()
                        .small(),
                );
            }
            None => {
                ui.label(egui::RichText::new("Nothing announced yet").weak());
            }
        }
    });
}

/// Error message display
pub fn error_message(ui: &mut egui::Ui, message: &str) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("❌").size(16.0));
        ui.label(egui::RichText::new(message).color(egui::Color32::from_rgb(220, 80, 80)));
    });
}

/// Success message display
pub fn success_message(ui: &mut egui::Ui, message: &str) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("✅").size(16.0));
        ui.label(egui::RichText::new(message).color(egui::Color32::from_rgb(80, 200, 120)));
    });
}

/// Warning message display
pub fn warning_message(ui: &mut egui::Ui, message: &str, color: egui::Color32) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("⚠️").size(14.0));
        ui.label(egui::RichText::new(message).color(color));
    });
}

/// Primary action button - teal/accent colored, prominent
pub fn primary_button(ui: &mut egui::Ui, text: &str, enabled: bool) -> egui::Response {
    let accent = egui::Color32::from_rgb(0, 180, 150);
    let btn = egui::Button::new(egui::RichText::new(text).size(14.0).color(egui::Color32::WHITE))
        .min_size(egui::vec2(130.0, 34.0))
        .fill(accent);
    ui.add_enabled(enabled, btn)
}

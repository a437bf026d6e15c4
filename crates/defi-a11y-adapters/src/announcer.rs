use tracing::info;

use defi_a11y_core::{Announcement, AnnouncementSink};

/// Mirrors live-region updates into the log so narration can be audited
/// without a screen reader.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAnnouncer;

impl AnnouncementSink for TracingAnnouncer {
    fn publish(&mut self, announcement: &Announcement) {
        info!(
            target: "defi_a11y::live_region",
            aria_live = announcement.politeness.aria_live(),
            seq = announcement.seq,
            "{}",
            announcement.text
        );
    }
}

use crate::domain::{Announcement, FocusTarget, OptionId};

/// Error raised by a caller-supplied dialog callback.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Access to whatever owns real keyboard focus (a DOM, an egui context, a test
/// double).
pub trait FocusPort {
    fn active_element(&self) -> Option<FocusTarget>;
    fn focus(&mut self, target: &FocusTarget);
    /// Drop focus entirely, as when nothing was focused before the dialog
    /// opened.
    fn blur(&mut self);
}

/// The select and close callbacks of the modal dialog.
pub trait DialogHandler {
    fn on_select(&mut self, id: &OptionId) -> Result<(), CallbackError>;
    fn on_close(&mut self) -> Result<(), CallbackError>;
}

/// Receives a copy of every announcement the live region publishes.
pub trait AnnouncementSink {
    fn publish(&mut self, announcement: &Announcement);
}

impl<F> AnnouncementSink for F
where
    F: FnMut(&Announcement),
{
    fn publish(&mut self, announcement: &Announcement) {
        self(announcement)
    }
}

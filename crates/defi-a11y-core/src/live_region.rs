//! Screen-reader live region.
//!
//! One value at a time. A newer announcement replaces the current one, except
//! that an assertive announcement nobody has read yet is kept when a polite one
//! arrives. Consumers read each announcement once through [`LiveRegion::take`].

use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use tracing::trace;

use crate::domain::{Announcement, Politeness};
use crate::ports::AnnouncementSink;

#[derive(Debug, Default)]
struct RegionState {
    current: Option<Announcement>,
    unread: bool,
    next_seq: u64,
}

#[derive(Default)]
pub struct LiveRegion {
    state: Mutex<RegionState>,
    sinks: Mutex<Vec<Box<dyn AnnouncementSink + Send>>>,
}

impl std::fmt::Debug for LiveRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveRegion")
            .field("state", &*self.lock())
            .finish_non_exhaustive()
    }
}

static GLOBAL: OnceLock<Arc<LiveRegion>> = OnceLock::new();

impl LiveRegion {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide region shared by every component of the shell.
    pub fn global() -> Arc<LiveRegion> {
        GLOBAL.get_or_init(|| Arc::new(LiveRegion::new())).clone()
    }

    fn lock(&self) -> MutexGuard<'_, RegionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Mirror every published announcement into `sink`.
    pub fn add_sink(&self, sink: Box<dyn AnnouncementSink + Send>) {
        self.sinks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(sink);
    }

    /// Publish `announcement`. Returns the assigned sequence number, or `None`
    /// when it was dropped in favour of an unread assertive announcement.
    pub fn announce(&self, mut announcement: Announcement) -> Option<u64> {
        let published = {
            let mut state = self.lock();
            let blocked = state.unread
                && announcement.politeness == Politeness::Polite
                && state
                    .current
                    .as_ref()
                    .is_some_and(|c| c.politeness == Politeness::Assertive);
            if blocked {
                trace!(text = %announcement.text, "polite announcement dropped");
                return None;
            }

            state.next_seq += 1;
            announcement.seq = state.next_seq;
            state.current = Some(announcement.clone());
            state.unread = true;
            announcement
        };

        let seq = published.seq;
        for sink in self
            .sinks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter_mut()
        {
            sink.publish(&published);
        }
        Some(seq)
    }

    pub fn clear(&self) {
        let mut state = self.lock();
        state.current = None;
        state.unread = false;
    }

    /// Latest announcement, read or not.
    pub fn current(&self) -> Option<Announcement> {
        self.lock().current.clone()
    }

    /// Hands out the current announcement once; later calls return `None`
    /// until something new is announced.
    pub fn take(&self) -> Option<Announcement> {
        let mut state = self.lock();
        if !state.unread {
            return None;
        }
        state.unread = false;
        state.current.clone()
    }
}

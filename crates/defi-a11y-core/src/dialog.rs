use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{
    Announcement, CloseReason, ConnectionStatus, DialogFocus, DialogState, FocusTarget, OptionId,
    WalletOption,
};
use crate::live_region::LiveRegion;
use crate::ports::{CallbackError, DialogHandler, FocusPort};
use crate::state_machine::{
    dialog_transition, DialogAction, DialogPhase, StateTransition, TransitionError,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogConfig {
    pub title: String,
    /// Id of the heading the dialog is labelled by.
    pub title_id: String,
    pub has_close_button: bool,
    pub close_on_backdrop: bool,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            title: "Connect a wallet".to_owned(),
            title_id: "wallet-dialog-title".to_owned(),
            has_close_button: true,
            close_on_backdrop: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Home,
    End,
    Enter,
    Space,
    Escape,
    Tab,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub shift: bool,
}

impl KeyInput {
    pub fn new(key: Key) -> Self {
        Self { key, shift: false }
    }

    pub fn shifted(key: Key) -> Self {
        Self { key, shift: true }
    }
}

impl From<Key> for KeyInput {
    fn from(key: Key) -> Self {
        Self::new(key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome {
    Ignored,
    Opened,
    FocusMoved(DialogFocus),
    Selected(OptionId),
    Rejected(OptionId),
    Closed(CloseReason),
}

#[derive(Debug, Error)]
pub enum DialogError {
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error("option index {index} out of range ({len} options)")]
    OptionOutOfRange { index: usize, len: usize },
    #[error("{hook} callback failed: {source}")]
    Callback {
        hook: &'static str,
        #[source]
        source: CallbackError,
    },
}

/// Accessibility tree for one option row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSemantics {
    pub id: OptionId,
    pub dom_id: String,
    pub label: String,
    pub role: &'static str,
    pub selected: bool,
    pub disabled: bool,
    pub description: Option<String>,
}

/// Accessibility tree for the whole dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogSemantics {
    pub role: &'static str,
    pub aria_modal: bool,
    pub hidden: bool,
    pub title: String,
    pub labelled_by: String,
    pub active_descendant: Option<String>,
    pub close_button_label: Option<String>,
    pub items: Vec<ItemSemantics>,
}

/// Wallet selection dialog with a closed focus loop and screen-reader
/// narration.
///
/// The dialog never performs asynchronous work itself: the handler is told
/// which wallet was chosen and the caller reports progress back through
/// [`AccessibleModalDialog::report_connection`].
pub struct AccessibleModalDialog<F, H>
where
    F: FocusPort,
    H: DialogHandler,
{
    config: DialogConfig,
    options: Vec<WalletOption>,
    focus_port: F,
    handler: H,
    live_region: Arc<LiveRegion>,
    phase: DialogPhase,
    focus: Option<DialogFocus>,
    trigger: Option<FocusTarget>,
    pending_selection: Option<WalletOption>,
    last_transition: Option<StateTransition>,
}

impl<F, H> AccessibleModalDialog<F, H>
where
    F: FocusPort,
    H: DialogHandler,
{
    pub fn new(
        config: DialogConfig,
        options: Vec<WalletOption>,
        focus_port: F,
        handler: H,
        live_region: Arc<LiveRegion>,
    ) -> Self {
        Self {
            config,
            options,
            focus_port,
            handler,
            live_region,
            phase: DialogPhase::Closed,
            focus: None,
            trigger: None,
            pending_selection: None,
            last_transition: None,
        }
    }

    pub fn config(&self) -> &DialogConfig {
        &self.config
    }

    pub fn options(&self) -> &[WalletOption] {
        &self.options
    }

    pub fn phase(&self) -> DialogPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase.is_visible()
    }

    pub fn focused(&self) -> Option<DialogFocus> {
        self.focus
    }

    pub fn trigger(&self) -> Option<&FocusTarget> {
        self.trigger.as_ref()
    }

    pub fn pending_selection(&self) -> Option<&WalletOption> {
        self.pending_selection.as_ref()
    }

    pub fn last_transition(&self) -> Option<&StateTransition> {
        self.last_transition.as_ref()
    }

    pub fn live_region(&self) -> &Arc<LiveRegion> {
        &self.live_region
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    pub fn focus_port(&self) -> &F {
        &self.focus_port
    }

    pub fn focus_port_mut(&mut self) -> &mut F {
        &mut self.focus_port
    }

    pub fn state(&self) -> DialogState {
        DialogState {
            is_open: self.is_open(),
            focused_index: self.focus.and_then(DialogFocus::option_index),
            pending_selection: self.pending_selection.clone(),
        }
    }

    /// Focusable elements inside the dialog in tab order.
    pub fn focus_ring(&self) -> Vec<DialogFocus> {
        let mut ring: Vec<DialogFocus> = (0..self.options.len()).map(DialogFocus::Option).collect();
        if self.config.has_close_button {
            ring.push(DialogFocus::CloseButton);
        }
        ring
    }

    /// Replace the option list. While open, focus is kept on a valid element.
    pub fn set_options(&mut self, options: Vec<WalletOption>) {
        self.options = options;
        if !self.phase.captures_input() {
            return;
        }
        let stale = match self.focus {
            Some(DialogFocus::Option(index)) => index >= self.options.len(),
            Some(DialogFocus::Container) => !self.focus_ring().is_empty(),
            _ => false,
        };
        if stale {
            let next = match self.options.len() {
                0 => self.initial_focus(),
                len => DialogFocus::Option(len - 1),
            };
            self.move_focus(next);
        }
    }

    /// Caller-driven open flag. Closing this way is not a dismissal, so the
    /// close callback is not invoked.
    pub fn set_open(&mut self, open: bool) -> Result<DialogOutcome, DialogError> {
        match (open, self.phase) {
            (true, DialogPhase::Closed) => self.open(),
            (false, DialogPhase::Open) => self.dismiss(CloseReason::Programmatic),
            _ => Ok(DialogOutcome::Ignored),
        }
    }

    pub fn open(&mut self) -> Result<DialogOutcome, DialogError> {
        if self.phase != DialogPhase::Closed {
            return Ok(DialogOutcome::Ignored);
        }
        self.transition(DialogAction::Open)?;
        self.trigger = self
            .focus_port
            .active_element()
            .filter(|target| !target.is_inside_dialog());

        let initial = self.initial_focus();
        self.focus = Some(initial);
        self.focus_port.focus(&initial.into());

        let text = if self.options.is_empty() {
            format!(
                "{}, dialog. No wallets available. Press Escape to close.",
                self.config.title
            )
        } else {
            format!(
                "{}, dialog. {}",
                self.config.title,
                self.describe(initial)
            )
        };
        self.announce(Announcement::polite(text));
        Ok(DialogOutcome::Opened)
    }

    pub fn handle_key(&mut self, input: KeyInput) -> Result<DialogOutcome, DialogError> {
        if !self.phase.captures_input() {
            return Ok(DialogOutcome::Ignored);
        }
        match input.key {
            Key::Escape => self.dismiss(CloseReason::Escape),
            Key::ArrowDown => Ok(self.step_option(1)),
            Key::ArrowUp => Ok(self.step_option(-1)),
            Key::Home if !self.options.is_empty() => Ok(self.move_focus(DialogFocus::Option(0))),
            Key::End if !self.options.is_empty() => {
                Ok(self.move_focus(DialogFocus::Option(self.options.len() - 1)))
            }
            Key::Tab => Ok(self.step_ring(if input.shift { -1 } else { 1 })),
            Key::Enter | Key::Space => match self.focus {
                Some(DialogFocus::Option(index)) => self.select_index(index),
                Some(DialogFocus::CloseButton) => self.dismiss(CloseReason::Explicit),
                _ => Ok(DialogOutcome::Ignored),
            },
            Key::Home | Key::End | Key::Other => Ok(DialogOutcome::Ignored),
        }
    }

    pub fn click_option(&mut self, index: usize) -> Result<DialogOutcome, DialogError> {
        if !self.phase.captures_input() {
            return Ok(DialogOutcome::Ignored);
        }
        if index >= self.options.len() {
            return Err(DialogError::OptionOutOfRange {
                index,
                len: self.options.len(),
            });
        }
        if self.focus != Some(DialogFocus::Option(index)) {
            self.move_focus(DialogFocus::Option(index));
        }
        self.select_index(index)
    }

    pub fn click_close(&mut self) -> Result<DialogOutcome, DialogError> {
        if !self.phase.captures_input() {
            return Ok(DialogOutcome::Ignored);
        }
        self.dismiss(CloseReason::Explicit)
    }

    pub fn click_backdrop(&mut self) -> Result<DialogOutcome, DialogError> {
        if !self.phase.captures_input() || !self.config.close_on_backdrop {
            return Ok(DialogOutcome::Ignored);
        }
        self.dismiss(CloseReason::Backdrop)
    }

    /// Called when the host reports that focus landed on `target`. Focus that
    /// leaves the dialog while it is open is pulled back in.
    pub fn focus_entered(&mut self, target: &FocusTarget) -> DialogOutcome {
        if !self.phase.captures_input() {
            return DialogOutcome::Ignored;
        }
        let requested = match target {
            FocusTarget::DialogOption(index) if *index < self.options.len() => {
                Some(DialogFocus::Option(*index))
            }
            FocusTarget::CloseButton if self.config.has_close_button => {
                Some(DialogFocus::CloseButton)
            }
            _ => None,
        };
        match requested {
            Some(next) if Some(next) == self.focus => DialogOutcome::Ignored,
            Some(next) => self.move_focus(next),
            None => {
                let current = self.focus.unwrap_or_else(|| self.initial_focus());
                debug!(?target, ?current, "focus left dialog, restoring");
                self.focus = Some(current);
                self.focus_port.focus(&current.into());
                DialogOutcome::FocusMoved(current)
            }
        }
    }

    /// Reflect a caller-owned connection attempt into the live region.
    pub fn report_connection(&self, status: &ConnectionStatus) {
        let announcement = match status {
            ConnectionStatus::Connecting { wallet } => {
                Announcement::polite(format!("Connecting to {wallet}…"))
            }
            ConnectionStatus::Connected { wallet } => {
                Announcement::assertive(format!("Connected to {wallet}."))
            }
            ConnectionStatus::Failed { wallet, reason } => {
                Announcement::assertive(format!("Could not connect to {wallet}: {reason}"))
            }
            ConnectionStatus::Cancelled { wallet } => {
                Announcement::polite(format!("Connection to {wallet} cancelled."))
            }
        };
        self.announce(announcement);
    }

    pub fn semantics(&self) -> DialogSemantics {
        let items = self
            .options
            .iter()
            .enumerate()
            .map(|(index, option)| ItemSemantics {
                id: option.id.clone(),
                dom_id: self.option_dom_id(option),
                label: option.label.clone(),
                role: "option",
                selected: self.focus == Some(DialogFocus::Option(index)),
                disabled: !option.installed,
                description: (!option.installed).then(|| "Not installed".to_owned()),
            })
            .collect();

        DialogSemantics {
            role: "dialog",
            aria_modal: true,
            hidden: !self.is_open(),
            title: self.config.title.clone(),
            labelled_by: self.config.title_id.clone(),
            active_descendant: self
                .focus
                .and_then(DialogFocus::option_index)
                .and_then(|index| self.options.get(index))
                .map(|option| self.option_dom_id(option)),
            close_button_label: self
                .config
                .has_close_button
                .then(|| format!("Close {}", self.config.title.to_lowercase())),
            items,
        }
    }

    fn option_dom_id(&self, option: &WalletOption) -> String {
        format!("{}-option-{}", self.config.title_id, option.id)
    }

    fn initial_focus(&self) -> DialogFocus {
        if !self.options.is_empty() {
            DialogFocus::Option(0)
        } else if self.config.has_close_button {
            DialogFocus::CloseButton
        } else {
            DialogFocus::Container
        }
    }

    fn transition(&mut self, action: DialogAction) -> Result<(), DialogError> {
        let (next, transition) = dialog_transition(self.phase, action)?;
        debug!(
            from = ?transition.from,
            to = ?transition.to,
            reason = transition.reason,
            "dialog transition"
        );
        self.phase = next;
        self.last_transition = Some(transition);
        Ok(())
    }

    fn announce(&self, announcement: Announcement) {
        self.live_region.announce(announcement);
    }

    fn describe(&self, focus: DialogFocus) -> String {
        match focus {
            DialogFocus::Option(index) => match self.options.get(index) {
                Some(option) => {
                    let mut text = format!(
                        "{}, {} of {}",
                        option.label,
                        index + 1,
                        self.options.len()
                    );
                    if !option.installed {
                        text.push_str(", not installed");
                    }
                    text
                }
                None => String::new(),
            },
            DialogFocus::CloseButton => "Close, button".to_owned(),
            DialogFocus::Container => self.config.title.clone(),
        }
    }

    fn move_focus(&mut self, next: DialogFocus) -> DialogOutcome {
        self.focus = Some(next);
        self.focus_port.focus(&next.into());
        self.announce(Announcement::polite(self.describe(next)));
        DialogOutcome::FocusMoved(next)
    }

    fn step_option(&mut self, delta: isize) -> DialogOutcome {
        let len = self.options.len();
        if len == 0 {
            return DialogOutcome::Ignored;
        }
        let next = match self.focus {
            Some(DialogFocus::Option(index)) => (index as isize + delta).rem_euclid(len as isize) as usize,
            _ if delta > 0 => 0,
            _ => len - 1,
        };
        self.move_focus(DialogFocus::Option(next))
    }

    fn step_ring(&mut self, delta: isize) -> DialogOutcome {
        let ring = self.focus_ring();
        if ring.is_empty() {
            self.focus = Some(DialogFocus::Container);
            self.focus_port.focus(&FocusTarget::DialogContainer);
            return DialogOutcome::FocusMoved(DialogFocus::Container);
        }
        let len = ring.len() as isize;
        let next = match self
            .focus
            .and_then(|current| ring.iter().position(|f| *f == current))
        {
            Some(position) => ring[(position as isize + delta).rem_euclid(len) as usize],
            None if delta > 0 => ring[0],
            None => ring[ring.len() - 1],
        };
        self.move_focus(next)
    }

    fn select_index(&mut self, index: usize) -> Result<DialogOutcome, DialogError> {
        let option = self
            .options
            .get(index)
            .cloned()
            .ok_or(DialogError::OptionOutOfRange {
                index,
                len: self.options.len(),
            })?;

        if !option.installed {
            warn!(option = %option.id, "rejected selection of unavailable wallet");
            self.announce(Announcement::assertive(format!(
                "{} is not installed. Install it to connect, or choose another wallet.",
                option.label
            )));
            return Ok(DialogOutcome::Rejected(option.id));
        }

        self.transition(DialogAction::Select)?;
        self.pending_selection = Some(option.clone());
        if let Err(source) = self.handler.on_select(&option.id) {
            warn!(option = %option.id, error = %source, "select callback failed");
            self.pending_selection = None;
            self.transition(DialogAction::Abort)?;
            return Err(DialogError::Callback {
                hook: "select",
                source,
            });
        }

        self.announce(Announcement::assertive(format!("{} selected.", option.label)));
        self.finish_close()?;
        Ok(DialogOutcome::Selected(option.id))
    }

    fn dismiss(&mut self, reason: CloseReason) -> Result<DialogOutcome, DialogError> {
        self.transition(DialogAction::Dismiss(reason))?;
        if reason != CloseReason::Programmatic {
            if let Err(source) = self.handler.on_close() {
                warn!(?reason, error = %source, "close callback failed");
                self.transition(DialogAction::Abort)?;
                return Err(DialogError::Callback {
                    hook: "close",
                    source,
                });
            }
        }
        self.announce(Announcement::polite(format!("{} closed.", self.config.title)));
        self.finish_close()?;
        Ok(DialogOutcome::Closed(reason))
    }

    fn finish_close(&mut self) -> Result<(), DialogError> {
        self.transition(DialogAction::Finish)?;
        self.focus = None;
        self.pending_selection = None;
        match self.trigger.take() {
            Some(trigger) => self.focus_port.focus(&trigger),
            None => self.focus_port.blur(),
        }
        Ok(())
    }
}

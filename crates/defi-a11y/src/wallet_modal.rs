//! egui rendering of the wallet selection dialog.
//!
//! The dialog logic lives in `defi_a11y_core`; this module only maps egui
//! widgets and key events onto it.

use std::collections::HashMap;

use eframe::egui;

use defi_a11y_core::{
    AccessibleModalDialog, CallbackError, DialogHandler, DialogSemantics, ElementId, FocusPort,
    FocusTarget, Key, KeyInput, OptionId,
};

/// Page element that opens the dialog.
pub const CONNECT_BUTTON: &str = "connect-wallet";

pub type WalletDialog = AccessibleModalDialog<EguiFocus, ShellHandler>;

/// Bridges the dialog's focus requests to egui widget ids.
#[derive(Debug, Default)]
pub struct EguiFocus {
    targets: HashMap<egui::Id, FocusTarget>,
    active: Option<FocusTarget>,
    pending: Option<FocusTarget>,
    pending_frames: u8,
    release: bool,
}

/// Frames a focus request may wait for its widget before it is dropped.
const PENDING_FRAME_LIMIT: u8 = 2;

impl EguiFocus {
    /// Record the widget rendered for `target`, applying any focus request
    /// waiting for it.
    pub fn register(&mut self, response: &egui::Response, target: FocusTarget) {
        if self.pending.as_ref() == Some(&target) {
            response.request_focus();
            self.pending = None;
        }
        self.targets.insert(response.id, target);
    }

    /// Pointer interaction moved focus without a key press.
    pub fn mark_active(&mut self, target: FocusTarget) {
        self.active = Some(target);
    }

    /// Picks up focus changes egui made on its own. Returns the new target
    /// when it differs from what the dialog last asked for.
    pub fn sync(&mut self, ctx: &egui::Context) -> Option<FocusTarget> {
        if std::mem::take(&mut self.release) {
            ctx.memory_mut(|m| {
                if let Some(id) = m.focused() {
                    m.surrender_focus(id);
                }
            });
            return None;
        }
        if self.pending.is_some() {
            self.pending_frames += 1;
            if self.pending_frames <= PENDING_FRAME_LIMIT {
                return None;
            }
            // Target was never rendered, e.g. the trigger is hidden after connecting
            self.pending = None;
        }
        let focused = ctx.memory(|m| m.focused())?;
        let target = self
            .targets
            .get(&focused)
            .cloned()
            .unwrap_or_else(|| FocusTarget::Page(ElementId::new(format!("{focused:?}"))));
        if self.active.as_ref() == Some(&target) {
            return None;
        }
        self.active = Some(target.clone());
        Some(target)
    }
}

impl FocusPort for EguiFocus {
    fn active_element(&self) -> Option<FocusTarget> {
        self.active.clone()
    }

    fn focus(&mut self, target: &FocusTarget) {
        self.active = Some(target.clone());
        self.pending = Some(target.clone());
        self.pending_frames = 0;
        self.release = false;
    }

    fn blur(&mut self) {
        self.active = None;
        self.pending = None;
        self.release = true;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEvent {
    Selected(OptionId),
    Dismissed,
}

/// Queues dialog callbacks for the app to act on after the frame's input
/// has been handled.
#[derive(Debug, Default)]
pub struct ShellHandler {
    events: Vec<ShellEvent>,
}

impl ShellHandler {
    pub fn drain(&mut self) -> Vec<ShellEvent> {
        std::mem::take(&mut self.events)
    }
}

impl DialogHandler for ShellHandler {
    fn on_select(&mut self, id: &OptionId) -> Result<(), CallbackError> {
        self.events.push(ShellEvent::Selected(id.clone()));
        Ok(())
    }

    fn on_close(&mut self) -> Result<(), CallbackError> {
        self.events.push(ShellEvent::Dismissed);
        Ok(())
    }
}

/// Keys the dialog captures while open.
pub fn dialog_key(key: egui::Key, modifiers: egui::Modifiers) -> Option<KeyInput> {
    let key = match key {
        egui::Key::ArrowDown => Key::ArrowDown,
        egui::Key::ArrowUp => Key::ArrowUp,
        egui::Key::Home => Key::Home,
        egui::Key::End => Key::End,
        egui::Key::Enter => Key::Enter,
        egui::Key::Space => Key::Space,
        egui::Key::Escape => Key::Escape,
        egui::Key::Tab => Key::Tab,
        _ => return None,
    };
    Some(KeyInput {
        key,
        shift: modifiers.shift,
    })
}

/// Removes captured key events from `raw_input` before egui sees them, so
/// egui neither moves focus on Tab nor clicks buttons on Enter.
pub fn capture_keys(raw_input: &mut egui::RawInput, queue: &mut Vec<KeyInput>) {
    raw_input.events.retain(|event| match event {
        egui::Event::Key {
            key,
            pressed,
            modifiers,
            ..
        } => match dialog_key(*key, *modifiers) {
            Some(input) => {
                if *pressed {
                    queue.push(input);
                }
                false
            }
            None => true,
        },
        _ => true,
    });
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    ClickOption(usize),
    ClickClose,
    ClickBackdrop,
}

/// Draws the backdrop and dialog window. Returns the pointer action taken
/// this frame, if any.
pub fn render(ctx: &egui::Context, dialog: &mut WalletDialog) -> Option<ModalAction> {
    let tree: DialogSemantics = dialog.semantics();
    if tree.hidden {
        return None;
    }
    let focus = dialog.focus_port_mut();
    let mut action = None;

    let screen = ctx.screen_rect();
    egui::Area::new(egui::Id::new("wallet_modal_backdrop"))
        .order(egui::Order::Middle)
        .fixed_pos(screen.min)
        .show(ctx, |ui| {
            ui.painter()
                .rect_filled(screen, 0.0, egui::Color32::from_black_alpha(160));
            if ui.allocate_rect(screen, egui::Sense::click()).clicked() {
                action = Some(ModalAction::ClickBackdrop);
            }
        });

    egui::Window::new(egui::RichText::new(&tree.title).strong())
        .id(egui::Id::new(&tree.labelled_by))
        .collapsible(false)
        .resizable(false)
        .order(egui::Order::Foreground)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.set_min_width(280.0);
            if tree.items.is_empty() {
                ui.label(egui::RichText::new("No wallets detected.").weak());
            }

            for (index, item) in tree.items.iter().enumerate() {
                let text = if item.disabled {
                    egui::RichText::new(format!("{}  (not installed)", item.label)).weak()
                } else {
                    egui::RichText::new(&item.label)
                };
                let response = ui.add_sized(
                    [ui.available_width(), 32.0],
                    egui::Button::new(text).selected(item.selected),
                );
                focus.register(&response, FocusTarget::DialogOption(index));
                if item.selected && !response.has_focus() {
                    response.request_focus();
                }
                if response.clicked() {
                    action = Some(ModalAction::ClickOption(index));
                }
                if let Some(description) = &item.description {
                    response.on_hover_text(description.as_str());
                }
            }

            if let Some(label) = &tree.close_button_label {
                ui.add_space(8.0);
                ui.separator();
                let response = ui.button("Close").on_hover_text(label.as_str());
                focus.register(&response, FocusTarget::CloseButton);
                let close_focused = focus.active_element() == Some(FocusTarget::CloseButton);
                if close_focused && !response.has_focus() {
                    response.request_focus();
                }
                if response.clicked() {
                    action = Some(ModalAction::ClickClose);
                }
            }

            ui.add_space(4.0);
            ui.label(
                egui::RichText::new("↑/↓ move · Enter select · Esc close")
                    .weak()
                    .small(),
            );
        });

    action
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_navigation_keys() {
        assert_eq!(
            dialog_key(egui::Key::ArrowDown, egui::Modifiers::NONE),
            Some(KeyInput::new(Key::ArrowDown))
        );
        assert_eq!(
            dialog_key(egui::Key::Tab, egui::Modifiers::SHIFT),
            Some(KeyInput::shifted(Key::Tab))
        );
        assert_eq!(dialog_key(egui::Key::A, egui::Modifiers::NONE), None);
    }

    #[test]
    fn captured_keys_are_removed_from_input() {
        let mut raw = egui::RawInput::default();
        raw.events.push(egui::Event::Key {
            key: egui::Key::Tab,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: egui::Modifiers::NONE,
        });
        raw.events.push(egui::Event::Key {
            key: egui::Key::Tab,
            physical_key: None,
            pressed: false,
            repeat: false,
            modifiers: egui::Modifiers::NONE,
        });
        raw.events.push(egui::Event::Text("x".to_owned()));

        let mut queue = Vec::new();
        capture_keys(&mut raw, &mut queue);
        assert_eq!(queue, vec![KeyInput::new(Key::Tab)]);
        assert_eq!(raw.events.len(), 1);
    }

    #[test]
    fn handler_queues_events_in_order() {
        let mut handler = ShellHandler::default();
        handler.on_select(&OptionId::from("mm")).expect("select");
        handler.on_close().expect("close");
        assert_eq!(
            handler.drain(),
            vec![
                ShellEvent::Selected(OptionId::from("mm")),
                ShellEvent::Dismissed
            ]
        );
        assert!(handler.drain().is_empty());
    }

    #[test]
    fn focus_requests_wait_for_the_widget() {
        let mut focus = EguiFocus::default();
        focus.focus(&FocusTarget::DialogOption(1));
        assert_eq!(focus.active_element(), Some(FocusTarget::DialogOption(1)));
        assert!(focus.pending.is_some());
    }

    #[test]
    fn blur_drops_pending_request() {
        let mut focus = EguiFocus::default();
        focus.focus(&FocusTarget::DialogOption(0));
        focus.blur();
        assert_eq!(focus.active_element(), None);
        assert!(focus.pending.is_none());
        assert!(focus.release);
    }

    #[test]
    fn unrendered_focus_request_expires() {
        let ctx = egui::Context::default();
        let mut focus = EguiFocus::default();
        focus.focus(&FocusTarget::page(CONNECT_BUTTON));
        for _ in 0..PENDING_FRAME_LIMIT {
            assert_eq!(focus.sync(&ctx), None);
            assert!(focus.pending.is_some());
        }
        // Nothing focused in egui, so no change is reported
        assert_eq!(focus.sync(&ctx), None);
        assert!(focus.pending.is_none());
    }
}

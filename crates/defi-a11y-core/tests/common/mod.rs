#![allow(dead_code)]

use std::sync::Arc;

use defi_a11y_core::{
    AccessibleModalDialog, CallbackError, DialogConfig, DialogHandler, FocusPort, FocusTarget,
    LiveRegion, OptionId, WalletOption,
};

/// Focus host that remembers every focus move.
#[derive(Debug, Default)]
pub struct RecordingFocus {
    pub active: Option<FocusTarget>,
    pub history: Vec<FocusTarget>,
}

impl RecordingFocus {
    pub fn on(target: FocusTarget) -> Self {
        Self {
            active: Some(target),
            history: Vec::new(),
        }
    }
}

impl FocusPort for RecordingFocus {
    fn active_element(&self) -> Option<FocusTarget> {
        self.active.clone()
    }

    fn focus(&mut self, target: &FocusTarget) {
        self.active = Some(target.clone());
        self.history.push(target.clone());
    }

    fn blur(&mut self) {
        self.active = None;
    }
}

#[derive(Debug, Default)]
pub struct RecordingHandler {
    pub selected: Vec<OptionId>,
    pub closes: usize,
    pub fail_select: bool,
    pub fail_close: bool,
}

impl DialogHandler for RecordingHandler {
    fn on_select(&mut self, id: &OptionId) -> Result<(), CallbackError> {
        if self.fail_select {
            return Err("connector exploded".into());
        }
        self.selected.push(id.clone());
        Ok(())
    }

    fn on_close(&mut self) -> Result<(), CallbackError> {
        if self.fail_close {
            return Err("close handler exploded".into());
        }
        self.closes += 1;
        Ok(())
    }
}

pub type TestDialog = AccessibleModalDialog<RecordingFocus, RecordingHandler>;

pub fn trigger() -> FocusTarget {
    FocusTarget::page("connect-button")
}

pub fn wallets() -> Vec<WalletOption> {
    vec![
        WalletOption::new("mm", "MetaMask", true),
        WalletOption::new("wc", "WalletConnect", true),
    ]
}

pub fn numbered_wallets(count: usize) -> Vec<WalletOption> {
    (0..count)
        .map(|i| WalletOption::new(format!("w{i}"), format!("Wallet {i}"), true))
        .collect()
}

pub fn new_dialog(options: Vec<WalletOption>) -> TestDialog {
    AccessibleModalDialog::new(
        DialogConfig::default(),
        options,
        RecordingFocus::on(trigger()),
        RecordingHandler::default(),
        Arc::new(LiveRegion::new()),
    )
}

pub fn open_dialog(options: Vec<WalletOption>) -> TestDialog {
    let mut dialog = new_dialog(options);
    dialog.open().expect("open dialog");
    dialog
}

pub fn dialog_with(config: DialogConfig, options: Vec<WalletOption>) -> TestDialog {
    AccessibleModalDialog::new(
        config,
        options,
        RecordingFocus::on(trigger()),
        RecordingHandler::default(),
        Arc::new(LiveRegion::new()),
    )
}

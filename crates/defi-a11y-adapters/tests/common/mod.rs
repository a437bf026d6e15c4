#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use defi_a11y_adapters::{
    wallet_options, A11yConfig, InMemoryFocus, SimulatedConnector, StaticProbe,
};
use defi_a11y_core::{
    AccessibleModalDialog, CallbackError, DialogHandler, FocusTarget, LiveRegion, OptionId,
    WalletOption,
};

/// Connects through the simulated connector as soon as a wallet is chosen,
/// the way a shell would hand the choice to its wallet library.
#[derive(Debug, Clone)]
pub struct ConnectingHandler {
    pub connector: SimulatedConnector,
    pub options: Vec<WalletOption>,
    pub log: Arc<Mutex<Vec<String>>>,
}

impl DialogHandler for ConnectingHandler {
    fn on_select(&mut self, id: &OptionId) -> Result<(), CallbackError> {
        let option = self
            .options
            .iter()
            .find(|o| &o.id == id)
            .ok_or_else(|| format!("unknown wallet {id}"))?;
        let connection = self.connector.connect(option)?;
        self.log
            .lock()
            .expect("log lock")
            .push(format!("connected {}", connection.wallet));
        Ok(())
    }

    fn on_close(&mut self) -> Result<(), CallbackError> {
        self.log.lock().expect("log lock").push("closed".to_owned());
        Ok(())
    }
}

pub type ShellDialog = AccessibleModalDialog<InMemoryFocus, ConnectingHandler>;

pub fn trigger() -> FocusTarget {
    FocusTarget::page("connect-wallet")
}

pub fn options_with_installed(installed: &[&str]) -> Vec<WalletOption> {
    let config = A11yConfig::default();
    wallet_options(&config.wallets, &StaticProbe::new(installed.iter().copied()))
}

pub fn shell_dialog(installed: &[&str], connector: SimulatedConnector) -> ShellDialog {
    let config = A11yConfig::default();
    let options = options_with_installed(installed);
    AccessibleModalDialog::new(
        config.dialog_config(),
        options.clone(),
        InMemoryFocus::focused_on(trigger()),
        ConnectingHandler {
            connector,
            options,
            log: Arc::new(Mutex::new(Vec::new())),
        },
        Arc::new(LiveRegion::new()),
    )
}

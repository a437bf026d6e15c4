//! Main application state and update loop

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use alloy::primitives::utils::parse_ether;
use alloy::primitives::U256;
use eframe::egui;
use tracing::{debug, warn};

use defi_a11y_adapters::{
    connection_status, wallet_options, A11yConfig, Connection, ConnectorError, EnvProbe,
    SimulatedConnector,
};
use defi_a11y_core::risk::announcement_for;
use defi_a11y_core::{
    assess, AddressDisplay, BalanceAnnouncer, ConnectionStatus, FocusTarget, KeyInput,
    LiveRegion, OptionId, WalletOption,
};

use crate::state::{AddressInspectState, ConnectState, TxFormState};
use crate::ui;
use crate::wallet_modal::{
    self, EguiFocus, ModalAction, ShellEvent, ShellHandler, WalletDialog, CONNECT_BUTTON,
};

/// Chain the "switch network" button moves the wallet to.
const ALTERNATE_CHAIN_ID: u64 = 10;

/// Result from async wallet connection
struct ConnectResult {
    option: WalletOption,
    result: Result<Connection, ConnectorError>,
}

/// The main application state
pub struct App {
    config: A11yConfig,
    dialog: WalletDialog,
    connector: SimulatedConnector,
    live_region: Arc<LiveRegion>,
    connect_state: ConnectState,
    /// Async connection result receiver
    connect_result: Arc<Mutex<Option<ConnectResult>>>,
    tx_form: TxFormState,
    address_state: AddressInspectState,
    balance: BalanceAnnouncer,
    /// Keys captured from raw input while the dialog is open
    pending_keys: Vec<KeyInput>,
}

impl App {
    /// Create a new App instance
    pub fn new(_cc: &eframe::CreationContext<'_>, config: A11yConfig) -> Self {
        let options = wallet_options(&config.wallets, &EnvProbe::from_env());
        let live_region = LiveRegion::global();
        let dialog = WalletDialog::new(
            config.dialog_config(),
            options,
            EguiFocus::default(),
            ShellHandler::default(),
            Arc::clone(&live_region),
        );
        let starting_balance = parse_ether("1").unwrap_or(U256::ZERO);

        Self {
            connector: SimulatedConnector::new(config.chain_id, starting_balance),
            balance: BalanceAnnouncer::new(config.native_symbol.clone()),
            config,
            dialog,
            live_region,
            connect_state: ConnectState::default(),
            connect_result: Arc::new(Mutex::new(None)),
            tx_form: TxFormState::default(),
            address_state: AddressInspectState::default(),
            pending_keys: Vec::new(),
        }
    }
}

impl eframe::App for App {
    fn raw_input_hook(&mut self, _ctx: &egui::Context, raw_input: &mut egui::RawInput) {
        if self.dialog.phase().captures_input() {
            wallet_modal::capture_keys(raw_input, &mut self.pending_keys);
        }
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::dark());

        // Check for async connection results
        self.check_connect_result();
        self.poll_balance();
        self.process_dialog_input(ctx);

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(8.0);
            ui.heading(
                egui::RichText::new("♿ defi-a11y")
                    .size(22.0)
                    .color(egui::Color32::from_rgb(0, 212, 170)),
            );
            ui.add_space(4.0);
        });

        // The bar is the region's reader; once shown, an assertive message
        // may be replaced by polite ones again.
        self.live_region.take();
        let current = self.live_region.current();
        egui::TopBottomPanel::bottom("live_region").show(ctx, |ui| {
            ui.add_space(4.0);
            ui::live_region_bar(ui, current.as_ref());
            ui.add_space(2.0);
            ui.label(
                egui::RichText::new(format!(
                    "{} · built {}",
                    env!("GIT_HASH"),
                    env!("BUILD_TIME")
                ))
                .weak()
                .small(),
            );
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(10.0);
                self.render_wallet_section(ui, ctx);
                self.render_address_section(ui);
                self.render_transaction_section(ui);
                ui.add_space(20.0);
            });
        });

        if self.dialog.is_open() {
            if let Some(action) = wallet_modal::render(ctx, &mut self.dialog) {
                self.apply_modal_action(action);
            }
        }

        self.drain_dialog_events(ctx);
    }
}

impl App {
    fn process_dialog_input(&mut self, ctx: &egui::Context) {
        for key in std::mem::take(&mut self.pending_keys) {
            match self.dialog.handle_key(key) {
                Ok(outcome) => debug!(?key, ?outcome, "dialog key handled"),
                Err(e) => {
                    warn!(error = %e, "dialog key failed");
                    self.connect_state.set_error(e.to_string());
                }
            }
        }

        if let Some(target) = self.dialog.focus_port_mut().sync(ctx) {
            if self.dialog.is_open() {
                let outcome = self.dialog.focus_entered(&target);
                debug!(?target, ?outcome, "focus moved while dialog open");
            }
        }
    }

    fn apply_modal_action(&mut self, action: ModalAction) {
        let result = match action {
            ModalAction::ClickOption(index) => self.dialog.click_option(index),
            ModalAction::ClickClose => self.dialog.click_close(),
            ModalAction::ClickBackdrop => self.dialog.click_backdrop(),
        };
        match result {
            Ok(outcome) => debug!(?action, ?outcome, "dialog pointer action"),
            Err(e) => self.connect_state.set_error(e.to_string()),
        }
    }

    fn drain_dialog_events(&mut self, ctx: &egui::Context) {
        for event in self.dialog.handler_mut().drain() {
            match event {
                ShellEvent::Selected(id) => self.start_connect(&id, ctx),
                ShellEvent::Dismissed => debug!("wallet dialog dismissed"),
            }
        }
    }

    fn open_dialog(&mut self) {
        // Refresh install state; extensions may have been added since startup
        let options = wallet_options(&self.config.wallets, &EnvProbe::from_env());
        self.dialog.set_options(options);
        if let Err(e) = self.dialog.open() {
            self.connect_state.set_error(e.to_string());
        }
    }

    fn start_connect(&mut self, id: &OptionId, ctx: &egui::Context) {
        let Some(option) = self.dialog.options().iter().find(|o| &o.id == id).cloned() else {
            warn!(wallet = %id, "selected wallet vanished from catalog");
            return;
        };

        self.dialog.report_connection(&ConnectionStatus::Connecting {
            wallet: option.label.clone(),
        });
        self.connect_state.connecting = Some(option.clone());

        let connector = self.connector.clone();
        let result = Arc::clone(&self.connect_result);
        let delay = Duration::from_millis(self.config.simulated_connect_delay_ms);
        let ctx = ctx.clone();

        std::thread::spawn(move || {
            let outcome = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt.block_on(async {
                    tokio::time::sleep(delay).await;
                    connector.connect(&option)
                }),
                Err(e) => Err(ConnectorError::Rejected {
                    wallet: option.label.clone(),
                    reason: format!("runtime unavailable: {e}"),
                }),
            };
            let mut guard = result.lock().unwrap_or_else(PoisonError::into_inner);
            *guard = Some(ConnectResult {
                option,
                result: outcome,
            });
            ctx.request_repaint();
        });
    }

    fn check_connect_result(&mut self) {
        let result = {
            let mut guard = self
                .connect_result
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            guard.take()
        };
        let Some(ConnectResult { option, result }) = result else {
            return;
        };

        self.connect_state.connecting = None;
        self.dialog
            .report_connection(&connection_status(&option, &result));

        match result {
            Ok(connection) => {
                self.connect_state
                    .set_info(format!("Connected to {}", connection.label));
                self.connect_state.connection = Some(connection);
                self.balance.reset();
            }
            Err(e) => self.connect_state.set_error(e.to_string()),
        }
    }

    fn poll_balance(&mut self) {
        if self.connect_state.connection.is_none() {
            return;
        }
        match self.connector.balance() {
            Ok(balance) => {
                if let Some(announcement) = self.balance.observe(balance) {
                    self.live_region.announce(announcement);
                }
            }
            Err(e) => warn!(error = %e, "balance unavailable"),
        }
    }

    fn disconnect(&mut self) {
        if let Err(e) = self.connector.disconnect() {
            self.connect_state.set_error(e.to_string());
            return;
        }
        if let Some(connection) = self.connect_state.connection.take() {
            self.live_region
                .announce(defi_a11y_core::Announcement::polite(format!(
                    "Disconnected from {}.",
                    connection.label
                )));
        }
        self.connect_state.set_info("Disconnected");
        self.tx_form.announced_warnings.clear();
        self.balance.reset();
    }

    fn switch_chain(&mut self, chain_id: u64) {
        if let Err(e) = self.connector.switch_chain(chain_id) {
            self.connect_state.set_error(e.to_string());
            return;
        }
        if let Some(connection) = self.connect_state.connection.as_mut() {
            connection.chain_id = chain_id;
        }
    }

    fn render_wallet_section(&mut self, ui: &mut egui::Ui, _ctx: &egui::Context) {
        ui::styled_heading(ui, "Wallet");
        ui.add_space(8.0);

        if let Some(connection) = self.connect_state.connection.clone() {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&connection.label).strong());
                ui.label(format!("on chain {}", connection.chain_id));
            });
            let account = AddressDisplay::from_address(
                connection.account,
                self.config.address_prefix_chars,
                self.config.address_suffix_chars,
            );
            ui::address_display(ui, &account);
            if let Some(balance) = self.balance.last() {
                ui.label(format!(
                    "Balance: {} {}",
                    defi_a11y_core::format_ether(balance),
                    self.config.native_symbol
                ));
            }

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                if ui.button("Simulate deposit").clicked() {
                    let deposit = parse_ether("0.5").unwrap_or(U256::ZERO);
                    let next = self.balance.last().unwrap_or(U256::ZERO) + deposit;
                    if let Err(e) = self.connector.set_balance(next) {
                        self.connect_state.set_error(e.to_string());
                    }
                }
                let target_chain = if connection.chain_id == self.config.chain_id {
                    ALTERNATE_CHAIN_ID
                } else {
                    self.config.chain_id
                };
                if ui
                    .button(format!("Switch to chain {target_chain}"))
                    .clicked()
                {
                    self.switch_chain(target_chain);
                }
                if ui.button("Disconnect").clicked() {
                    self.disconnect();
                }
            });
        } else {
            ui.horizontal(|ui| {
                let busy = self.connect_state.is_busy();
                let response = ui::primary_button(ui, "Connect wallet", !busy);
                let trigger = FocusTarget::page(CONNECT_BUTTON);
                self.dialog.focus_port_mut().register(&response, trigger.clone());
                if response.clicked() {
                    self.dialog.focus_port_mut().mark_active(trigger);
                    self.open_dialog();
                }
                if let Some(option) = &self.connect_state.connecting {
                    ui.spinner();
                    ui.label(format!("Connecting to {}…", option.label));
                }
            });
        }

        if let Some(error) = &self.connect_state.last_error {
            ui::error_message(ui, error);
        } else if let Some(info) = &self.connect_state.last_info {
            ui::success_message(ui, info);
        }
    }

    fn render_address_section(&mut self, ui: &mut egui::Ui) {
        ui::section_header(ui, "Address inspector");
        ui.horizontal(|ui| {
            ui.label("Address:");
            ui.add(
                egui::TextEdit::singleline(&mut self.address_state.input)
                    .hint_text("0x…")
                    .desired_width(380.0)
                    .font(egui::TextStyle::Monospace),
            );
        });

        let input = self.address_state.input.trim();
        if input.is_empty() {
            return;
        }
        match AddressDisplay::parse(
            input,
            self.config.address_prefix_chars,
            self.config.address_suffix_chars,
        ) {
            Ok(display) => {
                ui::address_display(ui, &display);
                ui.label(egui::RichText::new(&display.aria_label).weak().small());
            }
            Err(e) => ui::error_message(ui, &e.to_string()),
        }
    }

    fn render_transaction_section(&mut self, ui: &mut egui::Ui) {
        ui::section_header(ui, "Transaction review");
        let Some(connection) = self.connect_state.connection.clone() else {
            ui.label(egui::RichText::new("Connect a wallet to review a transaction.").weak());
            return;
        };

        egui::Grid::new("tx_form")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                ui.label("To:");
                ui.text_edit_singleline(&mut self.tx_form.to);
                ui.end_row();
                ui.label(format!("Amount ({}):", self.config.native_symbol));
                ui.text_edit_singleline(&mut self.tx_form.amount_eth);
                ui.end_row();
                ui.label("Data:");
                ui.text_edit_singleline(&mut self.tx_form.data);
                ui.end_row();
                ui.label("Gas limit:");
                ui.text_edit_singleline(&mut self.tx_form.gas_limit);
                ui.end_row();
                ui.label("Slippage (bps):");
                ui.text_edit_singleline(&mut self.tx_form.slippage_bps);
                ui.end_row();
            });
        ui.add_space(8.0);

        let summary = match self.tx_form.summary(connection.account, &self.config) {
            Ok(Some(summary)) => summary,
            Ok(None) => return,
            Err(e) => {
                ui::error_message(ui, &e);
                return;
            }
        };

        let prefix = self.config.address_prefix_chars;
        let suffix = self.config.address_suffix_chars;
        ui::summary_grid(ui, "tx_summary", &summary.rows(prefix, suffix));
        ui.add_space(4.0);
        ui.label(
            egui::RichText::new(summary.spoken_summary(prefix, suffix))
                .weak()
                .small(),
        );
        ui.add_space(8.0);

        let mut risk_ctx = self.config.risk_context(connection.chain_id);
        risk_ctx.slippage_bps = self.tx_form.slippage();
        let warnings = assess(&summary, &risk_ctx);
        if warnings != self.tx_form.announced_warnings {
            if let Some(announcement) = announcement_for(&warnings) {
                self.live_region.announce(announcement);
            }
            self.tx_form.announced_warnings = warnings.clone();
        }
        ui::risk_warnings(ui, &warnings);
    }
}

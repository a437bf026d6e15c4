mod common;

use std::sync::Arc;

use defi_a11y_core::{
    AccessibleModalDialog, CloseReason, ConnectionStatus, DialogConfig, DialogError, DialogFocus,
    DialogOutcome, DialogPhase, FocusTarget, Key, LiveRegion, OptionId, Politeness,
    WalletOption,
};

use common::{
    dialog_with, new_dialog, open_dialog, trigger, wallets, RecordingFocus, RecordingHandler,
    TestDialog,
};

fn close_by(dialog: &mut TestDialog, path: &str) {
    let outcome = match path {
        "escape" => dialog.handle_key(Key::Escape.into()),
        "close-button" => dialog.click_close(),
        "backdrop" => dialog.click_backdrop(),
        "selection" => dialog.click_option(1),
        "caller" => dialog.set_open(false),
        other => panic!("unknown close path {other}"),
    }
    .expect("close");
    assert_ne!(outcome, DialogOutcome::Ignored, "{path} should close");
}

#[test]
fn opening_moves_focus_inside_the_dialog() {
    let mut dialog = new_dialog(wallets());
    assert_eq!(dialog.focus_port().active, Some(trigger()));

    assert_eq!(dialog.open().expect("open"), DialogOutcome::Opened);
    let active = dialog.focus_port().active.clone().expect("focused");
    assert!(active.is_inside_dialog());
    assert_eq!(active, FocusTarget::DialogOption(0));
}

#[test]
fn every_close_path_restores_the_trigger() {
    for path in ["escape", "close-button", "backdrop", "selection", "caller"] {
        let mut dialog = open_dialog(wallets());
        dialog.handle_key(Key::ArrowDown.into()).expect("move");
        close_by(&mut dialog, path);

        assert!(!dialog.is_open(), "{path}");
        assert_eq!(dialog.phase(), DialogPhase::Closed, "{path}");
        assert_eq!(dialog.focus_port().active, Some(trigger()), "{path}");
        assert!(dialog.trigger().is_none(), "{path}");
        assert!(dialog.focused().is_none(), "{path}");
    }
}

#[test]
fn close_callback_fires_once_per_dismissal_only() {
    let cases = [
        ("escape", 1),
        ("close-button", 1),
        ("backdrop", 1),
        ("selection", 0),
        ("caller", 0),
    ];
    for (path, expected) in cases {
        let mut dialog = open_dialog(wallets());
        close_by(&mut dialog, path);
        assert_eq!(dialog.handler().closes, expected, "{path}");
    }
}

#[test]
fn reopening_captures_the_new_trigger() {
    let mut dialog = open_dialog(wallets());
    dialog.handle_key(Key::Escape.into()).expect("close");

    let other = FocusTarget::page("settings-button");
    dialog.focus_port_mut().active = Some(other.clone());
    dialog.open().expect("reopen");
    assert_eq!(dialog.trigger(), Some(&other));
    dialog.click_close().expect("close");
    assert_eq!(dialog.focus_port().active, Some(other));
}

#[test]
fn backdrop_can_be_disabled() {
    let config = DialogConfig {
        close_on_backdrop: false,
        ..DialogConfig::default()
    };
    let mut dialog = dialog_with(config, wallets());
    dialog.open().expect("open");
    assert_eq!(
        dialog.click_backdrop().expect("backdrop"),
        DialogOutcome::Ignored
    );
    assert!(dialog.is_open());
    assert_eq!(dialog.handler().closes, 0);
}

#[test]
fn focus_escaping_the_dialog_is_pulled_back() {
    let mut dialog = open_dialog(wallets());
    dialog.handle_key(Key::ArrowDown.into()).expect("down");

    let outcome = dialog.focus_entered(&FocusTarget::page("page-footer-link"));
    assert_eq!(outcome, DialogOutcome::FocusMoved(DialogFocus::Option(1)));
    assert_eq!(
        dialog.focus_port().active,
        Some(FocusTarget::DialogOption(1))
    );
}

#[test]
fn pointer_focus_inside_the_dialog_is_tracked() {
    let mut dialog = open_dialog(wallets());
    let outcome = dialog.focus_entered(&FocusTarget::CloseButton);
    assert_eq!(outcome, DialogOutcome::FocusMoved(DialogFocus::CloseButton));
    assert_eq!(dialog.state().focused_index, None);

    let outcome = dialog.focus_entered(&FocusTarget::CloseButton);
    assert_eq!(outcome, DialogOutcome::Ignored);
}

#[test]
fn failing_select_callback_propagates_and_keeps_dialog_open() {
    let mut dialog = open_dialog(wallets());
    dialog.handler_mut().fail_select = true;

    let err = dialog.handle_key(Key::Enter.into()).expect_err("callback error");
    assert!(matches!(err, DialogError::Callback { hook: "select", .. }));
    assert!(err.to_string().contains("connector exploded"));
    assert_eq!(dialog.phase(), DialogPhase::Open);
    assert!(dialog.state().pending_selection.is_none());
    assert_eq!(dialog.focused(), Some(DialogFocus::Option(0)));

    dialog.handler_mut().fail_select = false;
    let outcome = dialog.handle_key(Key::Enter.into()).expect("retry");
    assert_eq!(outcome, DialogOutcome::Selected(OptionId::from("mm")));
}

#[test]
fn failing_close_callback_propagates() {
    let mut dialog = open_dialog(wallets());
    dialog.handler_mut().fail_close = true;

    let err = dialog.handle_key(Key::Escape.into()).expect_err("callback error");
    assert!(matches!(err, DialogError::Callback { hook: "close", .. }));
    assert!(dialog.is_open());
    assert_ne!(dialog.focus_port().active, Some(trigger()));
}

#[test]
fn click_out_of_range_is_an_error() {
    let mut dialog = open_dialog(wallets());
    let err = dialog.click_option(7).expect_err("out of range");
    assert!(matches!(
        err,
        DialogError::OptionOutOfRange { index: 7, len: 2 }
    ));
}

#[test]
fn shrinking_options_keeps_focus_valid() {
    let mut dialog = open_dialog(common::numbered_wallets(4));
    dialog.handle_key(Key::End.into()).expect("end");
    dialog.set_options(common::numbered_wallets(2));
    assert_eq!(dialog.focused(), Some(DialogFocus::Option(1)));

    dialog.set_options(Vec::new());
    assert_eq!(dialog.focused(), Some(DialogFocus::CloseButton));
}

#[test]
fn semantics_describe_the_dialog() {
    let mut dialog = open_dialog(vec![
        WalletOption::new("mm", "MetaMask", true),
        WalletOption::new("cb", "Coinbase Wallet", false),
    ]);
    dialog.handle_key(Key::ArrowDown.into()).expect("down");

    let tree = dialog.semantics();
    assert_eq!(tree.role, "dialog");
    assert!(tree.aria_modal);
    assert!(!tree.hidden);
    assert_eq!(tree.labelled_by, "wallet-dialog-title");
    assert_eq!(
        tree.active_descendant.as_deref(),
        Some("wallet-dialog-title-option-cb")
    );
    assert!(!tree.items[0].selected);
    assert!(tree.items[1].selected);
    assert!(tree.items[1].disabled);
    assert_eq!(tree.items[1].description.as_deref(), Some("Not installed"));
    assert_eq!(tree.close_button_label.as_deref(), Some("Close connect a wallet"));

    dialog.handle_key(Key::Escape.into()).expect("close");
    let tree = dialog.semantics();
    assert!(tree.hidden);
    assert!(tree.active_descendant.is_none());
}

#[test]
fn connection_progress_is_narrated() {
    let dialog = open_dialog(wallets());
    dialog.live_region().take();

    dialog.report_connection(&ConnectionStatus::Connecting {
        wallet: "MetaMask".to_owned(),
    });
    let said = dialog.live_region().take().expect("connecting");
    assert_eq!(said.politeness, Politeness::Polite);

    dialog.report_connection(&ConnectionStatus::Failed {
        wallet: "MetaMask".to_owned(),
        reason: "user rejected the request".to_owned(),
    });
    let said = dialog.live_region().take().expect("failure");
    assert_eq!(said.politeness, Politeness::Assertive);
    assert_eq!(
        said.text,
        "Could not connect to MetaMask: user rejected the request"
    );
}

#[test]
fn escape_close_is_announced() {
    let mut dialog = open_dialog(wallets());
    dialog.handle_key(Key::Escape.into()).expect("close");
    let said = dialog.live_region().take().expect("closed");
    assert_eq!(said.text, "Connect a wallet closed.");
    assert_eq!(
        dialog.last_transition().map(|t| t.from),
        Some(DialogPhase::Closing(CloseReason::Escape))
    );
}

#[test]
fn closing_without_a_trigger_leaves_nothing_focused() {
    let mut dialog = AccessibleModalDialog::new(
        DialogConfig::default(),
        wallets(),
        RecordingFocus::default(),
        RecordingHandler::default(),
        Arc::new(LiveRegion::new()),
    );
    dialog.open().expect("open");
    assert_eq!(dialog.trigger(), None);
    assert_eq!(dialog.focus_port().active, Some(FocusTarget::DialogOption(0)));

    dialog.handle_key(Key::Escape.into()).expect("escape");
    assert!(!dialog.is_open());
    assert_eq!(dialog.focus_port().active, None);
}

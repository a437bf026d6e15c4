mod common;

use defi_a11y_adapters::{connection_status, SimulatedConnector, TracingAnnouncer};
use defi_a11y_core::{ConnectionStatus, DialogError, DialogOutcome, Key, OptionId, Politeness};

use common::{shell_dialog, trigger};

#[test]
fn choose_installed_wallet_after_rejection() {
    let connector = SimulatedConnector::new(1, Default::default());
    let mut dialog = shell_dialog(&["mm"], connector.clone());
    dialog.open().expect("open");

    dialog.handle_key(Key::ArrowDown.into()).expect("to wc");
    dialog.handle_key(Key::ArrowDown.into()).expect("to cb");
    let outcome = dialog.handle_key(Key::Enter.into()).expect("enter on cb");
    assert_eq!(outcome, DialogOutcome::Rejected(OptionId::from("cb")));
    assert!(connector.connection().expect("state").is_none());

    dialog.handle_key(Key::ArrowUp.into()).expect("back to wc");
    let outcome = dialog.handle_key(Key::Enter.into()).expect("enter on wc");
    assert_eq!(outcome, DialogOutcome::Selected(OptionId::from("wc")));

    let connection = connector
        .connection()
        .expect("state")
        .expect("connected");
    assert_eq!(connection.wallet, OptionId::from("wc"));
    assert_eq!(
        *dialog.handler().log.lock().expect("log"),
        vec!["connected wc".to_owned()]
    );
    let history = dialog.focus_port().history();
    assert_eq!(history.last(), Some(&trigger()));
    assert!(history[..history.len() - 1]
        .iter()
        .all(|t| t.is_inside_dialog()));
}

#[test]
fn connector_rejection_surfaces_as_callback_error() {
    let connector = SimulatedConnector::new(1, Default::default());
    connector
        .fail_with(&OptionId::from("mm"), "user rejected the request")
        .expect("script failure");
    let mut dialog = shell_dialog(&["mm"], connector.clone());
    dialog.open().expect("open");

    let err = dialog.handle_key(Key::Enter.into()).expect_err("rejected");
    assert!(matches!(err, DialogError::Callback { hook: "select", .. }));
    assert!(dialog.is_open());

    let mm = dialog.options()[0].clone();
    let status = connection_status(&mm, &connector.connect(&mm));
    assert_eq!(
        status,
        ConnectionStatus::Failed {
            wallet: "MetaMask".to_owned(),
            reason: "user rejected the request".to_owned(),
        }
    );
    dialog.report_connection(&status);
    let said = dialog.live_region().take().expect("announced");
    assert_eq!(said.politeness, Politeness::Assertive);
}

#[test]
fn escape_logs_a_single_close() {
    let mut dialog = shell_dialog(&[], SimulatedConnector::default());
    dialog.live_region().add_sink(Box::new(TracingAnnouncer));
    dialog.open().expect("open");
    dialog.handle_key(Key::Escape.into()).expect("escape");
    dialog.handle_key(Key::Escape.into()).expect("ignored");

    assert_eq!(
        *dialog.handler().log.lock().expect("log"),
        vec!["closed".to_owned()]
    );
    assert_eq!(dialog.focus_port().history().last(), Some(&trigger()));
}

#[test]
fn switching_chain_updates_connection() {
    let connector = SimulatedConnector::new(1, Default::default());
    let mut dialog = shell_dialog(&["mm"], connector.clone());
    dialog.open().expect("open");
    dialog.handle_key(Key::Enter.into()).expect("select mm");

    connector.switch_chain(10).expect("switch");
    let connection = connector.connection().expect("state").expect("connected");
    assert_eq!(connection.chain_id, 10);
}

pub mod address;
pub mod balance;
pub mod dialog;
pub mod domain;
pub mod live_region;
pub mod ports;
pub mod risk;
pub mod state_machine;
pub mod tx_summary;

pub use address::{AddressDisplay, AddressError, AddressValidation};
pub use balance::BalanceAnnouncer;
pub use dialog::{
    AccessibleModalDialog, DialogConfig, DialogError, DialogOutcome, DialogSemantics,
    ItemSemantics, Key, KeyInput,
};
pub use domain::{
    Announcement, CloseReason, ConnectionStatus, DialogFocus, DialogState, ElementId,
    FocusTarget, OptionId, Politeness, WalletOption,
};
pub use live_region::LiveRegion;
pub use ports::{AnnouncementSink, CallbackError, DialogHandler, FocusPort};
pub use risk::{assess, RiskContext, RiskWarning, Severity};
pub use state_machine::{
    dialog_transition, DialogAction, DialogPhase, StateTransition, TransitionError,
};
pub use tx_summary::{format_ether, SummaryRow, TransactionSummary};

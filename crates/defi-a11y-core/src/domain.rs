use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a selectable wallet option (e.g. `"mm"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionId(pub String);

impl OptionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OptionId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// A wallet the user can pick in the connection dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletOption {
    pub id: OptionId,
    pub label: String,
    #[serde(default)]
    pub installed: bool,
}

impl WalletOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>, installed: bool) -> Self {
        Self {
            id: OptionId::new(id),
            label: label.into(),
            installed,
        }
    }
}

/// Identifier of an element outside any dialog (trigger buttons, page inputs).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Anything that can hold keyboard focus.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FocusTarget {
    Page(ElementId),
    DialogOption(usize),
    CloseButton,
    DialogContainer,
}

impl FocusTarget {
    pub fn page(id: impl Into<String>) -> Self {
        Self::Page(ElementId::new(id))
    }

    pub fn is_inside_dialog(&self) -> bool {
        !matches!(self, FocusTarget::Page(_))
    }
}

/// Element inside the open dialog that currently owns focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogFocus {
    Option(usize),
    CloseButton,
    Container,
}

impl DialogFocus {
    pub fn option_index(self) -> Option<usize> {
        match self {
            DialogFocus::Option(index) => Some(index),
            _ => None,
        }
    }
}

impl From<DialogFocus> for FocusTarget {
    fn from(value: DialogFocus) -> Self {
        match value {
            DialogFocus::Option(index) => FocusTarget::DialogOption(index),
            DialogFocus::CloseButton => FocusTarget::CloseButton,
            DialogFocus::Container => FocusTarget::DialogContainer,
        }
    }
}

/// How a dialog was (or is being) dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CloseReason {
    Escape,
    Explicit,
    Backdrop,
    Selection,
    Programmatic,
}

/// Delivery mode of a live-region update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Politeness {
    Polite,
    Assertive,
}

impl Politeness {
    /// Value for the `aria-live` attribute.
    pub fn aria_live(self) -> &'static str {
        match self {
            Politeness::Polite => "polite",
            Politeness::Assertive => "assertive",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    pub text: String,
    pub politeness: Politeness,
    /// Assigned by the live region; zero until published.
    #[serde(default)]
    pub seq: u64,
}

impl Announcement {
    pub fn polite(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            politeness: Politeness::Polite,
            seq: 0,
        }
    }

    pub fn assertive(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            politeness: Politeness::Assertive,
            seq: 0,
        }
    }
}

/// Snapshot of the dialog state exposed to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogState {
    pub is_open: bool,
    /// `None` when focus sits on the close button or the container.
    pub focused_index: Option<usize>,
    pub pending_selection: Option<WalletOption>,
}

/// Outcome of an externally owned connection attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connecting { wallet: String },
    Connected { wallet: String },
    Failed { wallet: String, reason: String },
    Cancelled { wallet: String },
}

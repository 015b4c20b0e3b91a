use crate::poller::{DashboardView, ViewMode};
use crate::recipients::normalize_sui_address;
use crate::utils::config::FEED_LIMIT;
use crate::utils::error::{InputError, WalletError};
use crate::wallet::{CommandWallet, ReadOnlyWallet, Wallet};
use std::path::PathBuf;

/// Which window to fetch and for whom
///
/// **Public** - shared by `stats` and `watch`
#[derive(Debug, Clone)]
pub struct ViewArgs {
    pub mode: ViewMode,

    /// Connected account; required for "mine"
    pub viewer: Option<String>,
}

impl ViewArgs {
    /// Build the dashboard view; a given viewer must be a valid address
    pub fn view(&self) -> Result<DashboardView, InputError> {
        let viewer = self
            .viewer
            .as_deref()
            .map(normalize_sui_address)
            .transpose()?;
        Ok(DashboardView::new(self.mode, viewer))
    }
}

impl Default for ViewArgs {
    fn default() -> Self {
        Self {
            mode: ViewMode::All,
            viewer: None,
        }
    }
}

/// Arguments for the stats command
#[derive(Debug, Clone, Default)]
pub struct StatsArgs {
    pub view: ViewArgs,

    /// Output path for a JSON snapshot (optional)
    pub output: Option<PathBuf>,

    /// Print the snapshot as JSON instead of a table
    pub json: bool,
}

/// Arguments for the watch command
#[derive(Debug, Clone, Default)]
pub struct WatchArgs {
    pub view: ViewArgs,

    /// Poll interval override in seconds
    pub interval_secs: Option<u64>,
}

/// Arguments for the feed command
#[derive(Debug, Clone)]
pub struct FeedArgs {
    pub limit: usize,
}

impl Default for FeedArgs {
    fn default() -> Self {
        Self { limit: FEED_LIMIT }
    }
}

/// Where a built intent goes
///
/// With a signer command the intent is executed; with `out` it is written
/// for later signing; with neither it is printed.
#[derive(Debug, Clone, Default)]
pub struct SignerArgs {
    /// Sending account
    pub sender: Option<String>,

    /// External signer command line
    pub signer_cmd: Option<String>,

    /// Output path for the unsigned intent
    pub out: Option<PathBuf>,
}

impl SignerArgs {
    pub fn wallet(&self) -> Result<Box<dyn Wallet>, WalletError> {
        match (&self.sender, &self.signer_cmd) {
            (Some(sender), Some(cmd)) => Ok(Box::new(CommandWallet::new(sender.clone(), cmd)?)),
            (None, Some(_)) => Err(WalletError::NotConnected),
            (sender, None) => Ok(Box::new(ReadOnlyWallet::new(sender.clone()))),
        }
    }
}

/// Recipients given inline or as a file
#[derive(Debug, Clone, Default)]
pub struct RecipientSource {
    /// Comma or newline separated addresses
    pub inline: Option<String>,

    /// CSV file: address, optional amount
    pub csv: Option<PathBuf>,
}

/// Arguments for the split command
#[derive(Debug, Clone, Default)]
pub struct SplitArgs {
    pub recipients: RecipientSource,

    /// Total SUI; required for an equal split, optional for an airdrop
    pub amount: Option<String>,

    pub signer: SignerArgs,
}

/// Staged distribution event lifecycle
#[derive(Debug, Clone)]
pub enum EventAction {
    Create {
        name: String,
    },
    Fund {
        event_id: String,
        amount: String,
    },
    AddRecipients {
        event_id: String,
        recipients: RecipientSource,
    },
    Distribute {
        event_id: String,
    },
    Withdraw {
        event_id: String,
    },
    CreateAndDistribute {
        name: String,
        recipients: RecipientSource,
        amount: String,
    },
    /// Create, fund, and add recipients in one transaction
    Launch {
        name: String,
        recipients: RecipientSource,
        amount: String,
    },
    Show {
        event_id: String,
    },
    List {
        owner: String,
    },
}

/// Arguments for the event command
#[derive(Debug, Clone)]
pub struct EventArgs {
    pub action: EventAction,
    pub signer: SignerArgs,
}

//! Wallet seam: who is connected and who signs.
//!
//! Keys never live in this crate. A `Wallet` either knows only the
//! viewer's address (read-only) or forwards intents to an external
//! signer process.

pub mod command;

pub use command::CommandWallet;

use crate::transaction::{ExecutionReceipt, TransactionIntent};
use crate::utils::error::WalletError;
use log::info;

pub trait Wallet {
    /// Connected account address, if any
    fn current_account(&self) -> Option<&str>;

    /// Sign and execute an intent, returning the transaction digest
    fn sign_and_execute(&self, intent: &TransactionIntent)
        -> Result<ExecutionReceipt, WalletError>;
}

/// Knows the viewer's address but cannot sign
#[derive(Debug, Clone, Default)]
pub struct ReadOnlyWallet {
    account: Option<String>,
}

impl ReadOnlyWallet {
    pub fn new(account: Option<String>) -> Self {
        Self { account }
    }
}

impl Wallet for ReadOnlyWallet {
    fn current_account(&self) -> Option<&str> {
        self.account.as_deref()
    }

    fn sign_and_execute(
        &self,
        _intent: &TransactionIntent,
    ) -> Result<ExecutionReceipt, WalletError> {
        Err(WalletError::NoSigner)
    }
}

/// Connected account or `WalletError::NotConnected`
pub fn require_account(wallet: &dyn Wallet) -> Result<String, WalletError> {
    wallet
        .current_account()
        .map(str::to_string)
        .ok_or(WalletError::NotConnected)
}

/// Submit an intent through the wallet
///
/// The intent sender must be the connected account.
pub fn submit_intent(
    wallet: &dyn Wallet,
    intent: &TransactionIntent,
) -> Result<ExecutionReceipt, WalletError> {
    let account = require_account(wallet)?;
    if account != intent.sender {
        return Err(WalletError::Rejected(format!(
            "intent sender {} is not the connected account {}",
            intent.sender, account
        )));
    }

    let receipt = wallet.sign_and_execute(intent)?;
    info!("Transaction executed: {}", receipt.digest);
    Ok(receipt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct MockWallet {
        account: Option<String>,
        submitted: RefCell<Vec<TransactionIntent>>,
    }

    impl Wallet for MockWallet {
        fn current_account(&self) -> Option<&str> {
            self.account.as_deref()
        }

        fn sign_and_execute(
            &self,
            intent: &TransactionIntent,
        ) -> Result<ExecutionReceipt, WalletError> {
            self.submitted.borrow_mut().push(intent.clone());
            Ok(ExecutionReceipt {
                digest: "Dg1".to_string(),
            })
        }
    }

    #[test]
    fn test_submit_requires_connection() {
        let wallet = MockWallet {
            account: None,
            submitted: RefCell::new(Vec::new()),
        };
        let result = submit_intent(&wallet, &TransactionIntent::new("0xa"));
        assert!(matches!(result, Err(WalletError::NotConnected)));
        assert!(wallet.submitted.borrow().is_empty());
    }

    #[test]
    fn test_submit_checks_sender() {
        let wallet = MockWallet {
            account: Some("0xa".to_string()),
            submitted: RefCell::new(Vec::new()),
        };

        assert!(matches!(
            submit_intent(&wallet, &TransactionIntent::new("0xb")),
            Err(WalletError::Rejected(_))
        ));

        let receipt = submit_intent(&wallet, &TransactionIntent::new("0xa")).unwrap();
        assert_eq!(receipt.digest, "Dg1");
        assert_eq!(wallet.submitted.borrow().len(), 1);
    }

    #[test]
    fn test_read_only_wallet_cannot_sign() {
        let wallet = ReadOnlyWallet::new(Some("0xa".to_string()));
        assert_eq!(require_account(&wallet).unwrap(), "0xa");
        assert!(matches!(
            submit_intent(&wallet, &TransactionIntent::new("0xa")),
            Err(WalletError::NoSigner)
        ));
    }
}

//! Builders for every contract entry point.
//!
//! Inputs are validated here, before anything reaches the signer. All
//! amounts are MIST.

use super::intent::{CallArg, IntentCommand, TransactionIntent};
use crate::recipients::require_sui_address;
use crate::utils::config::{Settings, SPLITTER_MODULE_NAME, SUI_COIN_TYPE};
use crate::utils::error::InputError;
use log::debug;

/// Names of the fund distributor entry points
pub mod functions {
    pub const CREATE_DISTRIBUTION_EVENT: &str = "create_distribution_event";
    pub const ADD_FUNDS: &str = "add_funds";
    pub const ADD_RECIPIENTS: &str = "add_recipients";
    pub const DISTRIBUTE_FUNDS: &str = "distribute_funds";
    pub const EMERGENCY_WITHDRAW: &str = "emergency_withdraw";
    pub const CREATE_AND_DISTRIBUTE: &str = "create_and_distribute";
    pub const SPLIT_FUNDS_EQUAL: &str = "split_funds_equal";
    pub const AIRDROP_FUNDS: &str = "airdrop_funds";
}

/// Builds intents against one deployment
pub struct IntentBuilder<'a> {
    settings: &'a Settings,
    sender: String,
}

impl<'a> IntentBuilder<'a> {
    pub fn new(settings: &'a Settings, sender: impl Into<String>) -> Self {
        Self {
            settings,
            sender: sender.into(),
        }
    }

    fn distributor_call(&self, function: &str, arguments: Vec<CallArg>) -> IntentCommand {
        IntentCommand::MoveCall {
            package: self.settings.package_id.clone(),
            module: self.settings.module_name.clone(),
            function: function.to_string(),
            type_arguments: Vec::new(),
            arguments,
        }
    }

    fn splitter_call(&self, function: &str, arguments: Vec<CallArg>) -> IntentCommand {
        IntentCommand::MoveCall {
            package: self.settings.splitter_package_id.clone(),
            module: SPLITTER_MODULE_NAME.to_string(),
            function: function.to_string(),
            type_arguments: vec![SUI_COIN_TYPE.to_string()],
            arguments,
        }
    }

    /// Create a staged distribution event and keep it
    pub fn create_distribution_event(&self, name: &str) -> Result<TransactionIntent, InputError> {
        let name = name_bytes(name)?;

        let mut intent = TransactionIntent::new(&self.sender);
        let event = intent.push(self.distributor_call(
            functions::CREATE_DISTRIBUTION_EVENT,
            vec![name],
        ));
        intent.push(IntentCommand::TransferToSender {
            objects: vec![event],
        });

        Ok(intent)
    }

    /// Deposit `amount` into a staged event
    pub fn add_funds(&self, event_id: &str, amount: u64) -> Result<TransactionIntent, InputError> {
        let event = object_arg(event_id)?;
        positive(amount)?;

        let mut intent = TransactionIntent::new(&self.sender);
        let coin = intent.push(IntentCommand::SplitGasCoin { amount });
        intent.push(self.distributor_call(functions::ADD_FUNDS, vec![event, coin]));

        Ok(intent)
    }

    /// Register recipients on a staged event
    pub fn add_recipients(
        &self,
        event_id: &str,
        recipients: &[String],
    ) -> Result<TransactionIntent, InputError> {
        let event = object_arg(event_id)?;
        let recipients = address_list(recipients)?;

        let mut intent = TransactionIntent::new(&self.sender);
        intent.push(self.distributor_call(functions::ADD_RECIPIENTS, vec![event, recipients]));

        Ok(intent)
    }

    /// Pay out a staged event to all of its recipients
    pub fn distribute_funds(&self, event_id: &str) -> Result<TransactionIntent, InputError> {
        self.single_event_call(functions::DISTRIBUTE_FUNDS, event_id)
    }

    /// Return a staged event's deposit to its creator
    pub fn emergency_withdraw(&self, event_id: &str) -> Result<TransactionIntent, InputError> {
        self.single_event_call(functions::EMERGENCY_WITHDRAW, event_id)
    }

    fn single_event_call(
        &self,
        function: &str,
        event_id: &str,
    ) -> Result<TransactionIntent, InputError> {
        let event = object_arg(event_id)?;

        let mut intent = TransactionIntent::new(&self.sender);
        intent.push(self.distributor_call(function, vec![event]));

        Ok(intent)
    }

    /// Split `amount` equally and pay everyone in one call
    ///
    /// Emits the `InstantDistribution` event the dashboard reads.
    pub fn create_and_distribute(
        &self,
        name: &str,
        recipients: &[String],
        amount: u64,
    ) -> Result<TransactionIntent, InputError> {
        let name = name_bytes(name)?;
        let recipients = address_list(recipients)?;
        positive(amount)?;

        let mut intent = TransactionIntent::new(&self.sender);
        let coin = intent.push(IntentCommand::SplitGasCoin { amount });
        intent.push(self.distributor_call(
            functions::CREATE_AND_DISTRIBUTE,
            vec![name, recipients, coin],
        ));

        Ok(intent)
    }

    /// Create, fund, and populate a staged event in one transaction
    pub fn create_event_with_funds_and_recipients(
        &self,
        name: &str,
        recipients: &[String],
        amount: u64,
    ) -> Result<TransactionIntent, InputError> {
        let name = name_bytes(name)?;
        let recipients = address_list(recipients)?;
        positive(amount)?;

        let mut intent = TransactionIntent::new(&self.sender);
        let event = intent.push(self.distributor_call(
            functions::CREATE_DISTRIBUTION_EVENT,
            vec![name],
        ));
        let coin = intent.push(IntentCommand::SplitGasCoin { amount });
        intent.push(self.distributor_call(functions::ADD_FUNDS, vec![event.clone(), coin]));
        intent.push(self.distributor_call(
            functions::ADD_RECIPIENTS,
            vec![event.clone(), recipients],
        ));
        intent.push(IntentCommand::TransferToSender {
            objects: vec![event],
        });

        Ok(intent)
    }

    /// Equal split through the splitter object
    pub fn split_funds_equal(
        &self,
        recipients: &[String],
        amount: u64,
    ) -> Result<TransactionIntent, InputError> {
        let count = recipients.len() as u64;
        let recipients = address_list(recipients)?;
        positive(amount)?;
        // Every recipient must get at least one MIST
        if amount < count {
            return Err(InputError::InvalidAmount(amount.to_string()));
        }

        let mut intent = TransactionIntent::new(&self.sender);
        let coin = intent.push(IntentCommand::SplitGasCoin { amount });
        intent.push(self.splitter_call(
            functions::SPLIT_FUNDS_EQUAL,
            vec![self.splitter_object(), coin, recipients],
        ));

        Ok(intent)
    }

    /// Custom amounts per recipient through the splitter object
    ///
    /// `total` defaults to the sum of `amounts`; an explicit total must
    /// cover it.
    pub fn airdrop_funds(
        &self,
        recipients: &[String],
        amounts: &[u64],
        total: Option<u64>,
    ) -> Result<TransactionIntent, InputError> {
        let addresses = address_list(recipients)?;

        if amounts.len() != recipients.len() {
            return Err(InputError::AmountCountMismatch {
                recipients: recipients.len(),
                amounts: amounts.len(),
            });
        }
        if let Some(zero) = amounts.iter().find(|a| **a == 0) {
            return Err(InputError::InvalidAmount(zero.to_string()));
        }

        let required = amounts.iter().fold(0u64, |sum, a| sum.saturating_add(*a));
        let amount = total.unwrap_or(required);
        if amount < required {
            return Err(InputError::InsufficientFunds {
                required,
                available: amount,
            });
        }

        debug!(
            "Airdrop of {} MIST to {} recipients",
            required,
            recipients.len()
        );

        let mut intent = TransactionIntent::new(&self.sender);
        let coin = intent.push(IntentCommand::SplitGasCoin { amount });
        intent.push(self.splitter_call(
            functions::AIRDROP_FUNDS,
            vec![
                self.splitter_object(),
                coin,
                addresses,
                CallArg::U64s {
                    value: amounts.to_vec(),
                },
            ],
        ));

        Ok(intent)
    }

    fn splitter_object(&self) -> CallArg {
        CallArg::Object {
            id: self.settings.splitter_object_id.clone(),
        }
    }
}

fn name_bytes(name: &str) -> Result<CallArg, InputError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(InputError::EmptyName);
    }
    Ok(CallArg::Bytes {
        value: name.as_bytes().to_vec(),
    })
}

fn object_arg(id: &str) -> Result<CallArg, InputError> {
    Ok(CallArg::Object {
        id: require_sui_address(id)?,
    })
}

fn address_list(recipients: &[String]) -> Result<CallArg, InputError> {
    if recipients.is_empty() {
        return Err(InputError::EmptyRecipients);
    }
    let value = recipients
        .iter()
        .map(|r| require_sui_address(r))
        .collect::<Result<Vec<String>, InputError>>()?;
    Ok(CallArg::Addresses { value })
}

fn positive(amount: u64) -> Result<(), InputError> {
    if amount == 0 {
        return Err(InputError::InvalidAmount("0".to_string()));
    }
    Ok(())
}

//! Transaction intents handed to the signing provider.
//!
//! An intent mirrors a Sui programmable transaction block: an ordered
//! list of commands where later commands may consume earlier results by
//! index. Intents are plain data; signing and execution happen in the
//! wallet.

use serde::{Deserialize, Serialize};

/// Argument of a Move call or transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CallArg {
    /// Existing on-chain object by ID
    Object { id: String },
    /// Output of an earlier command in the same intent
    Result { index: usize },
    /// `vector<u8>`
    Bytes { value: Vec<u8> },
    /// `vector<address>`
    Addresses { value: Vec<String> },
    /// `vector<u64>`
    U64s { value: Vec<u64> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum IntentCommand {
    /// Split a coin of `amount` MIST off the gas coin
    #[serde(rename_all = "camelCase")]
    SplitGasCoin { amount: u64 },

    #[serde(rename_all = "camelCase")]
    MoveCall {
        package: String,
        module: String,
        function: String,
        type_arguments: Vec<String>,
        arguments: Vec<CallArg>,
    },

    /// Transfer objects to the sender
    TransferToSender { objects: Vec<CallArg> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionIntent {
    pub sender: String,
    pub commands: Vec<IntentCommand>,
}

impl TransactionIntent {
    pub fn new(sender: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            commands: Vec::new(),
        }
    }

    /// Append a command and return a reference to its result
    pub fn push(&mut self, command: IntentCommand) -> CallArg {
        self.commands.push(command);
        CallArg::Result {
            index: self.commands.len() - 1,
        }
    }

    /// MIST split off the gas coin across all commands
    pub fn total_split(&self) -> u64 {
        self.commands
            .iter()
            .map(|c| match c {
                IntentCommand::SplitGasCoin { amount } => *amount,
                _ => 0,
            })
            .fold(0u64, u64::saturating_add)
    }

    /// Move call targets, e.g. `0x..::fund_distributor::add_funds`
    pub fn call_targets(&self) -> Vec<String> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                IntentCommand::MoveCall {
                    package,
                    module,
                    function,
                    ..
                } => Some(format!("{}::{}::{}", package, module, function)),
                _ => None,
            })
            .collect()
    }
}

/// Result returned by the signer after execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionReceipt {
    pub digest: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_returns_result_index() {
        let mut intent = TransactionIntent::new("0xa");
        let first = intent.push(IntentCommand::SplitGasCoin { amount: 5 });
        let second = intent.push(IntentCommand::SplitGasCoin { amount: 7 });

        assert_eq!(first, CallArg::Result { index: 0 });
        assert_eq!(second, CallArg::Result { index: 1 });
        assert_eq!(intent.total_split(), 12);
    }

    #[test]
    fn test_intent_json_shape() {
        let mut intent = TransactionIntent::new("0xa");
        intent.push(IntentCommand::MoveCall {
            package: "0x1".to_string(),
            module: "m".to_string(),
            function: "f".to_string(),
            type_arguments: vec![],
            arguments: vec![CallArg::Object { id: "0x2".to_string() }],
        });

        let json = serde_json::to_value(&intent).unwrap();
        assert_eq!(json["commands"][0]["command"], "moveCall");
        assert_eq!(json["commands"][0]["typeArguments"], serde_json::json!([]));
        assert_eq!(json["commands"][0]["arguments"][0]["kind"], "object");
        assert_eq!(intent.call_targets(), vec!["0x1::m::f"]);
    }
}

//! Contract call surface: typed transaction intents.

pub mod builder;
pub mod intent;

pub use builder::{functions, IntentBuilder};
pub use intent::{CallArg, ExecutionReceipt, IntentCommand, TransactionIntent};

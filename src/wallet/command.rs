//! External signer process.
//!
//! The intent is written as JSON to the command's stdin. On success the
//! command prints `{"digest": "..."}` on stdout; a non-zero exit status
//! means the user rejected or the signer failed.

use super::Wallet;
use crate::transaction::{ExecutionReceipt, TransactionIntent};
use crate::utils::error::WalletError;
use log::{debug, warn};
use std::io::Write;
use std::process::{Child, Command, Stdio};

#[derive(Debug, Clone)]
pub struct CommandWallet {
    account: String,
    program: String,
    args: Vec<String>,
}

impl CommandWallet {
    /// Build from a shell-style command line, split on whitespace
    pub fn new(account: impl Into<String>, command_line: &str) -> Result<Self, WalletError> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or(WalletError::NoSigner)?;

        Ok(Self {
            account: account.into(),
            program,
            args: parts.collect(),
        })
    }
}

impl Wallet for CommandWallet {
    fn current_account(&self) -> Option<&str> {
        Some(&self.account)
    }

    fn sign_and_execute(
        &self,
        intent: &TransactionIntent,
    ) -> Result<ExecutionReceipt, WalletError> {
        let payload = serde_json::to_vec(intent)?;
        debug!(
            "Handing {} command(s) to signer {}",
            intent.commands.len(),
            self.program
        );

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            // A signer that exits early closes the pipe; its status decides
            if let Err(e) = stdin.write_all(&payload) {
                if e.kind() != std::io::ErrorKind::BrokenPipe {
                    return Err(abort(&mut child, e));
                }
                debug!("Signer closed stdin early");
            }
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!("Signer exited with {}", output.status);
            return Err(WalletError::Rejected(if stderr.is_empty() {
                output.status.to_string()
            } else {
                stderr
            }));
        }

        parse_receipt(&output.stdout)
    }
}

/// Kill and reap a signer we gave up on
fn abort(child: &mut Child, error: std::io::Error) -> WalletError {
    warn!("Aborting signer: {}", error);
    let _ = child.kill();
    let _ = child.wait();
    error.into()
}

fn parse_receipt(stdout: &[u8]) -> Result<ExecutionReceipt, WalletError> {
    let receipt: ExecutionReceipt = serde_json::from_slice(stdout)
        .map_err(|e| WalletError::InvalidOutput(e.to_string()))?;

    if receipt.digest.trim().is_empty() {
        return Err(WalletError::InvalidOutput("empty digest".to_string()));
    }

    Ok(receipt)
}

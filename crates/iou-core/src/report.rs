//! JSON-in / report-out entry point shared by the CLI and bindings

use serde::{Deserialize, Serialize};

use crate::contract::{Contract, IouContract};
use crate::transaction::{LedgerTransaction, Transition};
use crate::Result;

/// Outcome of verifying one proposal document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReport {
    /// Hex SHA-256 of the proposal
    pub transaction_id: String,
    /// Declared command, when exactly one was declared
    pub command: Option<String>,
    pub transition: Option<Transition>,
    pub accepted: bool,
    /// First failing rule, when rejected
    pub reason: Option<String>,
}

impl VerificationReport {
    pub fn for_transaction(tx: &LedgerTransaction) -> Result<Self> {
        let transaction_id = tx.id()?.to_string();
        let command = match tx.commands.as_slice() {
            [single] => Some(single.command.name().to_string()),
            _ => None,
        };
        let (accepted, reason) = match IouContract.verify(tx) {
            Ok(()) => (true, None),
            Err(rejection) => (false, Some(rejection.reason)),
        };
        Ok(Self {
            transaction_id,
            command,
            transition: tx.transition(),
            accepted,
            reason,
        })
    }
}

/// Decode a JSON proposal and verify it.
///
/// A rejected proposal is still `Ok`: rejection is a verdict, not a failure.
/// `Err` means the document could not be decoded.
pub fn verify_proposal_json(json: &str) -> Result<VerificationReport> {
    let tx = LedgerTransaction::from_json(json)?;
    VerificationReport::for_transaction(&tx)
}

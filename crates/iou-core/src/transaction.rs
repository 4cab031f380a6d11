//! Read-only transaction view handed to the contract
//!
//! The ledger framework assembles a proposal, checks its signatures and state
//! formats, and exposes it through [`TransactionView`]. [`LedgerTransaction`]
//! is the concrete, serde-backed view used by the CLI and language bindings.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::command::{Command, CommandWithSigners};
use crate::hash::SecureHash;
use crate::identity::PublicKey;
use crate::state::{IouState, StateAndRef};
use crate::{Error, Result};

/// What the verifier may see of a transaction
pub trait TransactionView {
    /// States consumed, in order
    fn inputs(&self) -> &[StateAndRef<IouState>];

    /// States produced, in order
    fn outputs(&self) -> &[IouState];

    /// IOU commands declared, each with its signers
    fn commands(&self) -> &[CommandWithSigners];

    /// Union of every command's signers
    fn signers(&self) -> BTreeSet<PublicKey> {
        self.commands()
            .iter()
            .flat_map(|cmd| cmd.signers.iter().copied())
            .collect()
    }
}

/// A fully assembled transaction proposal
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LedgerTransaction {
    #[serde(default)]
    pub inputs: Vec<StateAndRef<IouState>>,
    #[serde(default)]
    pub outputs: Vec<IouState>,
    pub commands: Vec<CommandWithSigners>,
}

impl LedgerTransaction {
    pub fn new(
        inputs: Vec<StateAndRef<IouState>>,
        outputs: Vec<IouState>,
        commands: Vec<CommandWithSigners>,
    ) -> Self {
        Self {
            inputs,
            outputs,
            commands,
        }
    }

    /// Decode a proposal from its JSON wire form
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::ParseError(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// SHA-256 of the compact JSON form.
    ///
    /// Field order is fixed by the struct definitions, so equal proposals
    /// always hash equal regardless of how their source documents were laid out.
    pub fn id(&self) -> Result<SecureHash> {
        let canonical = self.to_json()?;
        Ok(SecureHash::sha256(canonical.as_bytes()))
    }

    /// Lifecycle step this proposal claims to be, if it declares a single command
    pub fn transition(&self) -> Option<Transition> {
        match self.commands.as_slice() {
            [single] => Some(Transition::classify(&single.command, self.outputs.len())),
            _ => None,
        }
    }
}

impl TransactionView for LedgerTransaction {
    fn inputs(&self) -> &[StateAndRef<IouState>] {
        &self.inputs
    }

    fn outputs(&self) -> &[IouState] {
        &self.outputs
    }

    fn commands(&self) -> &[CommandWithSigners] {
        &self.commands
    }
}

/// Step in an obligation's lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    /// Nonexistent -> Outstanding
    Issue,
    /// Outstanding -> Outstanding, new lender
    Transfer,
    /// Outstanding -> Outstanding, more paid
    PartialSettle,
    /// Outstanding -> Settled
    FinalSettle,
}

impl Transition {
    pub fn classify(command: &Command, output_count: usize) -> Self {
        match command {
            Command::Issue => Transition::Issue,
            Command::Transfer { .. } => Transition::Transfer,
            Command::Settle { .. } if output_count == 0 => Transition::FinalSettle,
            Command::Settle { .. } => Transition::PartialSettle,
        }
    }
}

impl std::fmt::Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Transition::Issue => "issue (nonexistent -> outstanding)",
            Transition::Transfer => "transfer (outstanding -> outstanding)",
            Transition::PartialSettle => "partial settle (outstanding -> outstanding)",
            Transition::FinalSettle => "final settle (outstanding -> settled)",
        };
        f.write_str(s)
    }
}

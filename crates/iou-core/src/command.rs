//! The intents an IOU transaction may declare
//!
//! Commands carry no behavior. They select which rule set the contract runs
//! and, through their signer lists, say who authorized the transaction.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::identity::{Party, PublicKey};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Create a new obligation
    Issue,
    /// Move the obligation to another lender
    Transfer {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        new_lender: Option<Party>,
    },
    /// Pay `amount` against the obligation
    Settle { amount: Amount },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Issue => "issue",
            Command::Transfer { .. } => "transfer",
            Command::Settle { .. } => "settle",
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Issue => write!(f, "Issue"),
            Command::Transfer {
                new_lender: Some(party),
            } => write!(f, "Transfer to {}", party),
            Command::Transfer { new_lender: None } => write!(f, "Transfer"),
            Command::Settle { amount } => write!(f, "Settle {}", amount),
        }
    }
}

/// A declared command and the keys that signed it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommandWithSigners {
    pub command: Command,
    pub signers: Vec<PublicKey>,
}

impl CommandWithSigners {
    pub fn new(command: Command, signers: impl IntoIterator<Item = PublicKey>) -> Self {
        Self {
            command,
            signers: signers.into_iter().collect(),
        }
    }

    /// Signers as a set; repeated keys count once
    pub fn signer_set(&self) -> BTreeSet<PublicKey> {
        self.signers.iter().copied().collect()
    }
}

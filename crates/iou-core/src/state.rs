//! The IOU state and the references that thread it through the ledger
//!
//! An [`IouState`] is immutable. Every lifecycle step consumes one state and
//! produces its replacement; the helpers here build replacements, they never
//! mutate in place.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::amount::Amount;
use crate::hash::SecureHash;
use crate::identity::{Party, PublicKey};
use crate::Result;

/// Ledger-unique id carried by every state of one logical obligation
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UniqueIdentifier {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    pub id: Uuid,
}

impl UniqueIdentifier {
    /// Fresh random id. Used by whoever proposes an issuance, never by the verifier.
    pub fn new(external_id: Option<String>) -> Self {
        Self {
            external_id,
            id: Uuid::new_v4(),
        }
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self {
            external_id: None,
            id,
        }
    }
}

impl std::fmt::Display for UniqueIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.external_id {
            Some(external) => write!(f, "{}_{}", external, self.id),
            None => write!(f, "{}", self.id),
        }
    }
}

/// One outstanding (or partially settled) obligation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IouState {
    pub amount: Amount,
    pub lender: Party,
    pub borrower: Party,
    pub paid: Amount,
    pub linear_id: UniqueIdentifier,
}

impl IouState {
    /// A new obligation with nothing paid yet
    pub fn new(amount: Amount, lender: Party, borrower: Party, linear_id: UniqueIdentifier) -> Self {
        let paid = Amount::zero(amount.currency.clone());
        Self {
            amount,
            lender,
            borrower,
            paid,
            linear_id,
        }
    }

    pub fn participants(&self) -> [&Party; 2] {
        [&self.lender, &self.borrower]
    }

    /// Keys of both participants, deduplicated
    pub fn participant_keys(&self) -> BTreeSet<PublicKey> {
        self.participants()
            .iter()
            .map(|party| party.owning_key)
            .collect()
    }

    /// The same obligation now owed to `lender`
    pub fn with_new_lender(&self, lender: Party) -> Self {
        Self {
            lender,
            ..self.clone()
        }
    }

    /// The same obligation with `amount` more paid against it
    pub fn pay(&self, amount: &Amount) -> Result<Self> {
        Ok(Self {
            paid: self.paid.checked_add(amount)?,
            ..self.clone()
        })
    }

    pub fn outstanding(&self) -> Result<Amount> {
        self.amount.checked_sub(&self.paid)
    }

    pub fn is_fully_paid(&self) -> bool {
        self.paid.same_currency(&self.amount) && self.paid.quantity >= self.amount.quantity
    }
}

/// Points at output `index` of the transaction with id `txhash`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StateRef {
    pub txhash: SecureHash,
    pub index: u32,
}

impl std::fmt::Display for StateRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.txhash, self.index)
    }
}

/// A consumed state together with the reference it was consumed by
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateAndRef<T> {
    pub state: T,
    #[serde(rename = "ref")]
    pub reference: StateRef,
}

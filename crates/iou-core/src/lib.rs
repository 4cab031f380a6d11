//! IOU Core - validation core of the bilateral IOU contract
//!
//! Decides whether a proposed ledger transaction legally issues, transfers,
//! or settles an obligation between a lender and a borrower.
//!
//! # Architecture
//!
//! ```text
//! Ledger framework → TransactionView → IouContract::verify
//!                                          ↓
//!                              single command → rule set (Issue | Transfer | Settle)
//!                                          ↓
//!                              Requirements (ordered, short-circuit)
//!                                          ↓
//!                              Ok(()) | Rejection { reason }
//! ```
//!
//! # Guarantees
//!
//! - **Deterministic**: same proposal always produces the same verdict
//! - **Pure**: no I/O, no clock, no randomness, no shared state
//! - **First failure**: a rejection names exactly one rule, the first broken one
//!
//! Signature checking, notarisation, and double-spend prevention belong to
//! the surrounding ledger framework.

pub mod amount;
pub mod command;
pub mod contract;
pub mod error;
pub mod hash;
pub mod identity;
pub mod report;
pub mod requirements;
pub mod state;
pub mod transaction;

pub use amount::{Amount, Currency};
pub use command::{Command, CommandWithSigners};
pub use contract::{verify, Contract, IouContract};
pub use error::{Error, Rejection, Result};
pub use hash::SecureHash;
pub use identity::{Party, PublicKey};
pub use report::{verify_proposal_json, VerificationReport};
pub use state::{IouState, StateAndRef, StateRef, UniqueIdentifier};
pub use transaction::{LedgerTransaction, TransactionView, Transition};

#[cfg(test)]
mod tests {
    use super::*;

    fn test_transaction() -> LedgerTransaction {
        let alice = Party::from_name("Alice");
        let bob = Party::from_name("Bob");
        let amount = Amount::from_major(1, Currency::new("GBP").unwrap()).unwrap();
        let state = IouState::new(
            amount,
            alice.clone(),
            bob.clone(),
            UniqueIdentifier::from_uuid(uuid::Uuid::nil()),
        );
        LedgerTransaction::new(
            vec![],
            vec![state],
            vec![CommandWithSigners::new(
                Command::Issue,
                [alice.owning_key, bob.owning_key],
            )],
        )
    }

    #[test]
    fn test_transaction_serialization() {
        let tx = test_transaction();
        let json = serde_json::to_string(&tx).unwrap();
        let deserialized: LedgerTransaction = serde_json::from_str(&json).unwrap();
        assert_eq!(tx, deserialized);
    }

    #[test]
    fn test_determinism_100_iterations() {
        let tx = test_transaction();
        let first = verify(&tx);
        assert!(first.is_ok());
        for i in 0..100 {
            let result = verify(&tx);
            assert_eq!(first, result, "Non-determinism at iteration {}", i);
        }
    }
}

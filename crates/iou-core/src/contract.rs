//! IOU contract verifier: decides whether a proposal may take effect
//!
//! The verifier is a pure function of the [`TransactionView`] it is handed:
//! no I/O, no clock, no randomness, no shared state. It resolves the single
//! declared command, runs that command's ordered rule set through
//! [`Requirements`], and returns either `Ok(())` or the first failing rule.
//!
//! # Rule sets
//!
//! - **Issue**: no inputs, one output, positive amount, distinct parties,
//!   signed by exactly lender and borrower, nothing paid yet.
//! - **Transfer**: one in, one out, only the lender changes, signed by the
//!   borrower and both the old and the new lender.
//! - **Settle**: one in, at most one out, a positive payment in the IOU's
//!   currency that does not overpay; no output exactly when fully paid;
//!   signed by lender and borrower.
//!
//! Signer sets are compared as sets: repeated keys collapse, extra keys and
//! missing keys both reject.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::amount::Amount;
use crate::command::{Command, CommandWithSigners};
use crate::error::Rejection;
use crate::identity::{Party, PublicKey};
use crate::requirements::Requirements;
use crate::state::{IouState, StateAndRef};
use crate::transaction::TransactionView;

/// Rejection reasons, verbatim
pub mod messages {
    pub const SINGLE_COMMAND: &str = "An IOU transaction must declare exactly one IOU command.";
    pub const DISTINCT_PARTIES: &str = "The lender and borrower cannot have the same identity.";

    pub const ISSUE_NO_INPUTS: &str = "No inputs should be consumed when issuing an IOU.";
    pub const ISSUE_ONE_OUTPUT: &str =
        "Only one output state should be created when issuing an IOU.";
    pub const ISSUE_POSITIVE_AMOUNT: &str = "A newly issued IOU must have a positive amount.";
    pub const ISSUE_SIGNERS: &str =
        "Both lender and borrower together only may sign IOU issue transaction.";
    pub const ISSUE_NOTHING_PAID: &str = "A newly issued IOU must have nothing paid against it.";

    pub const TRANSFER_ONE_INPUT: &str =
        "An IOU transfer transaction should only consume one input state.";
    pub const TRANSFER_ONE_OUTPUT: &str =
        "An IOU transfer transaction should only create one output state.";
    pub const TRANSFER_AMOUNT_UNCHANGED: &str = "The amount may not change when transferring an IOU.";
    pub const TRANSFER_BORROWER_UNCHANGED: &str =
        "The borrower may not change when transferring an IOU.";
    pub const TRANSFER_PAID_UNCHANGED: &str =
        "The paid amount may not change when transferring an IOU.";
    pub const TRANSFER_LINEAR_ID_UNCHANGED: &str =
        "The linear ID may not change when transferring an IOU.";
    pub const TRANSFER_LENDER_CHANGES: &str = "The lender property must change in a transfer.";
    pub const TRANSFER_NAMED_LENDER: &str =
        "The output lender must be the new lender named by the transfer command.";
    pub const TRANSFER_SIGNERS: &str =
        "The borrower, old lender and new lender only must sign an IOU transfer transaction.";

    pub const SETTLE_ONE_INPUT: &str =
        "An IOU settle transaction should only consume one input state.";
    pub const SETTLE_AT_MOST_ONE_OUTPUT: &str =
        "An IOU settle transaction should create at most one output state.";
    pub const SETTLE_POSITIVE_AMOUNT: &str = "The settled amount must be positive.";
    pub const SETTLE_SAME_CURRENCY: &str = "The settled amount must be in the IOU's currency.";
    pub const SETTLE_NO_OVERPAYMENT: &str =
        "The settled amount cannot exceed the amount outstanding.";
    pub const SETTLE_FULL_WITHOUT_OUTPUT: &str =
        "The IOU must be fully settled when no output state is created.";
    pub const SETTLE_SETTLED_NOT_CARRIED: &str =
        "A fully settled IOU must not be carried forward as an output state.";
    pub const SETTLE_PAID_INCREASES_EXACTLY: &str =
        "The paid amount must increase by exactly the settled amount.";
    pub const SETTLE_ONLY_PAID_CHANGES: &str =
        "Only the paid property may change when settling an IOU.";
    pub const SETTLE_SIGNERS: &str =
        "Both lender and borrower together only must sign an IOU settle transaction.";
}

/// A ledger contract: accepts or rejects a transaction touching its states
pub trait Contract {
    fn verify(&self, tx: &dyn TransactionView) -> Result<(), Rejection>;
}

/// The bilateral IOU contract
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IouContract;

impl IouContract {
    pub const ID: &'static str = "iou.contract.IouContract";
}

impl Contract for IouContract {
    fn verify(&self, tx: &dyn TransactionView) -> Result<(), Rejection> {
        let command = single_command(tx)?;

        debug!(
            command = command.command.name(),
            inputs = tx.inputs().len(),
            outputs = tx.outputs().len(),
            signers = command.signers.len(),
            "verifying IOU transaction"
        );

        let outcome = match &command.command {
            Command::Issue => verify_issue(tx.inputs(), tx.outputs(), command),
            Command::Transfer { new_lender } => {
                verify_transfer(tx.inputs(), tx.outputs(), command, new_lender.as_ref())
            }
            Command::Settle { amount } => verify_settle(tx.inputs(), tx.outputs(), command, amount),
        };

        match &outcome {
            Ok(()) => debug!(command = command.command.name(), "IOU transaction accepted"),
            Err(rejection) => warn!(
                command = command.command.name(),
                reason = %rejection,
                "IOU transaction rejected"
            ),
        }
        outcome
    }
}

/// Convenience wrapper around [`IouContract::verify`]
pub fn verify(tx: &dyn TransactionView) -> Result<(), Rejection> {
    IouContract.verify(tx)
}

fn single_command(tx: &dyn TransactionView) -> Result<&CommandWithSigners, Rejection> {
    match tx.commands() {
        [single] => Ok(single),
        other => {
            warn!(declared = other.len(), "IOU transaction rejected");
            Err(Rejection::new(messages::SINGLE_COMMAND))
        }
    }
}

fn keys<'p>(parties: impl IntoIterator<Item = &'p Party>) -> BTreeSet<PublicKey> {
    parties.into_iter().map(|party| party.owning_key).collect()
}

fn verify_issue(
    inputs: &[StateAndRef<IouState>],
    outputs: &[IouState],
    command: &CommandWithSigners,
) -> Result<(), Rejection> {
    let signers = command.signer_set();

    Requirements::new()
        .require(messages::ISSUE_NO_INPUTS, || inputs.is_empty())
        .require(messages::ISSUE_ONE_OUTPUT, || outputs.len() == 1)
        .require(messages::ISSUE_POSITIVE_AMOUNT, || {
            outputs[0].amount.is_positive()
        })
        .require(messages::DISTINCT_PARTIES, || {
            !outputs[0].lender.same_identity(&outputs[0].borrower)
        })
        .require(messages::ISSUE_SIGNERS, || {
            signers == outputs[0].participant_keys()
        })
        .require(messages::ISSUE_NOTHING_PAID, || {
            outputs[0].paid.is_zero() && outputs[0].paid.same_currency(&outputs[0].amount)
        })
        .evaluate()
}

fn verify_transfer(
    inputs: &[StateAndRef<IouState>],
    outputs: &[IouState],
    command: &CommandWithSigners,
    new_lender: Option<&Party>,
) -> Result<(), Rejection> {
    let signers = command.signer_set();
    let input = move || &inputs[0].state;
    let output = move || &outputs[0];

    Requirements::new()
        .require(messages::TRANSFER_ONE_INPUT, || inputs.len() == 1)
        .require(messages::TRANSFER_ONE_OUTPUT, || outputs.len() == 1)
        .require(messages::TRANSFER_AMOUNT_UNCHANGED, || {
            input().amount == output().amount
        })
        .require(messages::TRANSFER_BORROWER_UNCHANGED, || {
            input().borrower == output().borrower
        })
        .require(messages::TRANSFER_PAID_UNCHANGED, || {
            input().paid == output().paid
        })
        .require(messages::TRANSFER_LINEAR_ID_UNCHANGED, || {
            input().linear_id == output().linear_id
        })
        .require(messages::TRANSFER_LENDER_CHANGES, || {
            !input().lender.same_identity(&output().lender)
        })
        .require(messages::DISTINCT_PARTIES, || {
            !output().lender.same_identity(&output().borrower)
        })
        .require_if(new_lender.is_some(), messages::TRANSFER_NAMED_LENDER, || {
            new_lender == Some(&output().lender)
        })
        .require(messages::TRANSFER_SIGNERS, || {
            signers == keys([&input().lender, &output().lender, &input().borrower])
        })
        .evaluate()
}

fn verify_settle(
    inputs: &[StateAndRef<IouState>],
    outputs: &[IouState],
    command: &CommandWithSigners,
    settled: &Amount,
) -> Result<(), Rejection> {
    let signers = command.signer_set();
    let input = move || &inputs[0].state;
    // Input with this payment applied; None on currency mismatch or overflow
    let after_payment = || input().pay(settled).ok();
    let carried_forward = !outputs.is_empty();

    Requirements::new()
        .require(messages::SETTLE_ONE_INPUT, || inputs.len() == 1)
        .require(messages::SETTLE_AT_MOST_ONE_OUTPUT, || outputs.len() <= 1)
        .require(messages::SETTLE_POSITIVE_AMOUNT, || settled.is_positive())
        .require(messages::SETTLE_SAME_CURRENCY, || {
            settled.same_currency(&input().amount)
        })
        .require(messages::SETTLE_NO_OVERPAYMENT, || {
            after_payment().is_some_and(|paid| paid.paid.quantity <= paid.amount.quantity)
        })
        .require_if(!carried_forward, messages::SETTLE_FULL_WITHOUT_OUTPUT, || {
            after_payment().is_some_and(|paid| paid.is_fully_paid())
        })
        .require_if(carried_forward, messages::SETTLE_SETTLED_NOT_CARRIED, || {
            after_payment().is_some_and(|paid| !paid.is_fully_paid())
        })
        .require_if(carried_forward, messages::SETTLE_PAID_INCREASES_EXACTLY, || {
            after_payment().is_some_and(|paid| paid.paid == outputs[0].paid)
        })
        .require_if(carried_forward, messages::SETTLE_ONLY_PAID_CHANGES, || {
            after_payment().is_some_and(|paid| paid == outputs[0])
        })
        .require(messages::SETTLE_SIGNERS, || {
            signers == input().participant_keys()
        })
        .evaluate()
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::amount::Currency;
    use crate::state::UniqueIdentifier;
    use crate::transaction::LedgerTransaction;
    use proptest::prelude::*;

    fn party_pool() -> Vec<Party> {
        ["Alice", "Bob", "Charlie", "MiniCorp", "MegaCorp"]
            .into_iter()
            .map(Party::from_name)
            .collect()
    }

    fn currency() -> impl Strategy<Value = Currency> {
        prop::sample::select(vec!["GBP", "USD", "EUR", "CHF", "JPY"])
            .prop_map(|code| Currency::new(code).unwrap())
    }

    fn issue_tx(quantity: i64, currency: Currency, signer_idx: Vec<usize>) -> LedgerTransaction {
        let pool = party_pool();
        let state = IouState::new(
            Amount::new(quantity, currency),
            pool[0].clone(),
            pool[1].clone(),
            UniqueIdentifier::from_uuid(uuid::Uuid::nil()),
        );
        let signers = signer_idx.into_iter().map(|i| pool[i].owning_key);
        LedgerTransaction::new(
            vec![],
            vec![state],
            vec![CommandWithSigners::new(Command::Issue, signers)],
        )
    }

    proptest! {
        #[test]
        fn positive_amounts_accepted(quantity in 1..=i64::MAX, currency in currency()) {
            let tx = issue_tx(quantity, currency, vec![0, 1]);
            prop_assert_eq!(verify(&tx), Ok(()));
        }

        #[test]
        fn non_positive_amounts_rejected(quantity in i64::MIN..=0, currency in currency()) {
            let tx = issue_tx(quantity, currency, vec![0, 1]);
            prop_assert_eq!(
                verify(&tx).unwrap_err().reason,
                messages::ISSUE_POSITIVE_AMOUNT
            );
        }

        #[test]
        fn signer_set_equality(signer_idx in prop::collection::vec(0usize..5, 0..8)) {
            let distinct: BTreeSet<usize> = signer_idx.iter().copied().collect();
            let exact = distinct == BTreeSet::from([0, 1]);
            let tx = issue_tx(100, Currency::new("GBP").unwrap(), signer_idx);
            let result = verify(&tx);
            if exact {
                prop_assert_eq!(result, Ok(()));
            } else {
                prop_assert_eq!(result.unwrap_err().reason, messages::ISSUE_SIGNERS);
            }
        }

        #[test]
        fn evaluation_is_idempotent(
            quantity in -5i64..5,
            signer_idx in prop::collection::vec(0usize..5, 0..4),
        ) {
            let tx = issue_tx(quantity, Currency::new("GBP").unwrap(), signer_idx);
            let first = verify(&tx);
            for _ in 0..5 {
                prop_assert_eq!(verify(&tx), first.clone());
            }
        }
    }
}

//! Python bindings for the IOU contract verifier
//!
//! Thin wrapper around `iou-core`. ZERO logic here.
//! All behavior comes from the canonical Rust implementation.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

/// Verify a JSON transaction proposal against the IOU contract.
///
/// A proposal that breaks a contract rule is not an exception: it is
/// reported with `"accepted": false` and the first broken rule as `reason`.
///
/// Args:
///     proposal: JSON text of the proposed ledger transaction
///
/// Returns:
///     JSON string with the verification report:
///     {
///         "transaction_id": "...",
///         "command": "issue" | "transfer" | "settle" | null,
///         "transition": "issue" | "transfer" | "partial_settle" | "final_settle" | null,
///         "accepted": bool,
///         "reason": "..." | null
///     }
///
/// Raises:
///     ValueError: If the proposal cannot be decoded
#[pyfunction]
fn verify_transaction(proposal: &str) -> PyResult<String> {
    let report =
        iou_core::verify_proposal_json(proposal).map_err(|e| PyValueError::new_err(e.to_string()))?;

    serde_json::to_string_pretty(&report)
        .map_err(|e| PyValueError::new_err(format!("Serialization error: {}", e)))
}

/// Compute the SHA-256 transaction id of a proposal.
///
/// The id is taken over the decoded transaction, so whitespace and key
/// layout of the input text do not change it.
///
/// Args:
///     proposal: JSON text of the proposed ledger transaction
///
/// Returns:
///     Hex-encoded SHA-256 hash string
///
/// Raises:
///     ValueError: If the proposal cannot be decoded
#[pyfunction]
fn transaction_id(proposal: &str) -> PyResult<String> {
    let tx = iou_core::LedgerTransaction::from_json(proposal)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    tx.id()
        .map(|id| id.to_string())
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

/// IOU Python module: deterministic obligation contract verifier
#[pymodule]
fn iou(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(verify_transaction, m)?)?;
    m.add_function(wrap_pyfunction!(transaction_id, m)?)?;
    m.add("CONTRACT_ID", iou_core::IouContract::ID)?;
    Ok(())
}

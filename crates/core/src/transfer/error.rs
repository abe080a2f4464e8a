//! Transfer workflow error types.

use thiserror::Error;

/// Errors that can occur during transfer submission.
///
/// Guard failures (incomplete draft, insufficient balance, external mode)
/// surface as disabled actions before `submit` is ever reachable; these
/// variants cover callers bypassing the guards and the remote boundary.
#[derive(Debug, Error)]
pub enum TransferError {
    /// The draft does not satisfy the submission guard.
    #[error("Transfer draft is not submittable")]
    NotSubmittable,

    /// A submission is already in flight; the backend has no idempotency
    /// key, so a retry could double-transfer funds.
    #[error("A transfer submission is already in flight")]
    AlreadySubmitting,

    /// The remote service rejected or failed the transfer.
    #[error("Transfer failed: {0}")]
    Remote(String),
}

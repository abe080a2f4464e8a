//! Money transfer workflow.
//!
//! A guarded 3-step state machine (select source, select destination,
//! review and submit) producing a transfer request for the remote banking
//! service. Guards are pure functions over the draft, so they are testable
//! without rendering anything.

pub mod error;
pub mod types;
pub mod workflow;

pub use error::TransferError;
pub use types::{ExternalDetails, TransferDraft, TransferMode, TransferRequest, TransferStep};
pub use workflow::{TransferGateway, TransferWorkflow};

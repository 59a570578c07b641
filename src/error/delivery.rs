//! # Delivery Errors
//! Two kinds live here. [`DeliveryError`] is returned synchronously from
//! [`Scheduler::request_delivery`] and always means misconfiguration.
//! [`TransferError`] is the transient outcome of a single `send` invocation,
//! it is consumed by the retry loop and only ever reaches the host through
//! the terminal-failure event stream.
//!
//! [`Scheduler::request_delivery`]: crate::delivery::Scheduler::request_delivery
use crate::util::PackId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    /// The resolver produced a pack identifier that is not in the catalog.
    /// Surfaced immediately, never retried.
    UnknownPack(PackId),
}

impl std::fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryError::UnknownPack(id) => {
                write!(f, "Resolved pack '{}' is not registered", id)
            }
        }
    }
}

impl std::error::Error for DeliveryError {}

/// A single failed transfer. These are transient by definition: the
/// scheduler re-arms the attempt until the retry cap is hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TransferError {
    /// The client refused the transfer.
    Rejected,
    /// The client is not in a state where it can accept a pack yet.
    ClientNotReady,
    /// The transfer did not complete within the configured load timeout.
    TimedOut,
}

impl std::fmt::Display for TransferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TransferError::Rejected => "Transfer rejected",
                TransferError::ClientNotReady => "Client not ready",
                TransferError::TimedOut => "Transfer timed out",
            }
        )
    }
}

impl std::error::Error for TransferError {}

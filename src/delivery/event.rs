use crate::error::delivery::TransferError;
use crate::util::{PackId, PlayerId};

/// A terminal delivery failure, surfaced on the scheduler's event stream so
/// the host can log it or notify the player. Successes are not events, they
/// land in the player tracker instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryFailure {
    pub player: PlayerId,
    pub pack: PackId,
    /// Failed sends consumed by the attempt before it was abandoned.
    pub attempts: u32,
    pub reason: FailureReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// Every retry failed. Carries the last transfer error observed.
    RetriesExhausted(TransferError),
    /// The player's session ended while the attempt was still live. Does not
    /// consume a retry and never poisons a later request.
    SessionEnded,
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureReason::RetriesExhausted(e) => write!(f, "Retries exhausted: {}", e),
            FailureReason::SessionEnded => write!(f, "Session ended"),
        }
    }
}

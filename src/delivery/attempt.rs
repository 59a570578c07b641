use super::state::AttemptStatus;
use crate::util::{PackId, PlayerId};

/// One unit of delivery work: a single pack headed for a single player,
/// together with its retry bookkeeping.
///
/// Owned exclusively by the scheduler while live. Hosts only ever see
/// cloned snapshots via [`Scheduler::attempt_snapshot`].
///
/// [`Scheduler::attempt_snapshot`]: crate::delivery::Scheduler::attempt_snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryAttempt {
    pub player: PlayerId,
    pub pack: PackId,
    /// Failed sends so far. A success never increments this, so an attempt
    /// that fails twice and then lands reports 2.
    pub attempts: u32,
    /// Epoch milliseconds when the next fire is due.
    pub scheduled_at: u64,
    pub status: AttemptStatus,
}

impl DeliveryAttempt {
    pub(crate) fn new(player: PlayerId, pack: PackId, scheduled_at: u64) -> Self {
        Self {
            player,
            pack,
            attempts: 0,
            scheduled_at,
            status: AttemptStatus::Pending,
        }
    }

    /// Puts a failed attempt back on the clock without touching its count.
    pub(crate) fn rearm(&mut self, scheduled_at: u64) {
        self.status = AttemptStatus::Pending;
        self.scheduled_at = scheduled_at;
    }
}

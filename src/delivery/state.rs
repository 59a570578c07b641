/// Attempt States
/// These are all possible states of a delivery attempt. The scheduler is the
/// only writer; everyone else observes them through snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttemptStatus {
    /// The attempt is armed and waiting for its delay to elapse. Attempts
    /// start here, and return here after a failure that still has retries
    /// left.
    Pending,

    /// The transfer has been dispatched to the host's `send` capability and
    /// its outcome has not arrived yet.
    InFlight,

    /// The transfer completed and the player's state has been updated.
    /// Terminal.
    Succeeded,

    /// The last send failed. This state is transient: the scheduler either
    /// re-arms the attempt (back to [`Pending`]) or gives up
    /// ([`Abandoned`]) in the same step.
    ///
    /// [`Pending`]: AttemptStatus::Pending
    /// [`Abandoned`]: AttemptStatus::Abandoned
    Failed,

    /// The attempt is over without a delivery, either because the retry cap
    /// was hit or because the player's session ended. Terminal.
    Abandoned,
}

impl AttemptStatus {
    /// Returns whether the attempt can still make progress. Live attempts
    /// block duplicate requests for the same player and pack.
    pub fn is_live(&self) -> bool {
        match self {
            Self::Pending | Self::InFlight | Self::Failed => true,
            _ => false,
        }
    }

    /// Returns whether the attempt has reached a final state. Terminal
    /// attempts never transition again.
    pub fn is_terminal(&self) -> bool {
        match self {
            Self::Succeeded | Self::Abandoned => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for AttemptStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::InFlight => write!(f, "InFlight"),
            Self::Succeeded => write!(f, "Succeeded"),
            Self::Failed => write!(f, "Failed"),
            Self::Abandoned => write!(f, "Abandoned"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn liveness_and_terminality_are_disjoint() {
        let all = [
            AttemptStatus::Pending,
            AttemptStatus::InFlight,
            AttemptStatus::Succeeded,
            AttemptStatus::Failed,
            AttemptStatus::Abandoned,
        ];
        for status in all {
            assert_ne!(status.is_live(), status.is_terminal());
        }
    }
}

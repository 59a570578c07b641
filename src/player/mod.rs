//! Per-player pack bookkeeping.
//!
//! The tracker records what each player has actually received. It is pure
//! in-memory state with no failure modes: asking about a player the tracker
//! has never seen is an empty read, not an error.

use std::collections::{HashMap, VecDeque};

use crate::formpack_debug;
use crate::util::{PackId, PlayerId};

/// What the engine knows about one player's packs.
#[derive(Debug, Clone)]
pub struct PlayerPackState {
    /// Delivered pack ids, oldest first, bounded by the per-player limit.
    history: VecDeque<PackId>,
    /// The pack the player's client is currently using.
    active: Option<PackId>,
}

impl PlayerPackState {
    fn new() -> Self {
        Self {
            history: VecDeque::new(),
            active: None,
        }
    }

    fn push(&mut self, pack: PackId, bound: usize) {
        self.history.push_back(pack.clone());
        while self.history.len() > bound {
            self.history.pop_front();
        }
        self.active = Some(pack);
    }

    pub fn history(&self) -> impl Iterator<Item = &PackId> {
        self.history.iter()
    }

    pub fn active(&self) -> Option<&PackId> {
        self.active.as_ref()
    }

    pub fn holds(&self, pack: &PackId) -> bool {
        self.history.contains(pack)
    }
}

/// Tracks [`PlayerPackState`] for every player with at least one delivery.
///
/// Owned exclusively by the scheduler at runtime; exposed as its own type so
/// hosts embedding only part of the engine can drive it directly.
#[derive(Debug, Clone)]
pub struct PlayerTracker {
    max_packs_per_player: usize,
    players: HashMap<PlayerId, PlayerPackState>,
}

impl PlayerTracker {
    pub fn new(max_packs_per_player: usize) -> Self {
        Self {
            max_packs_per_player,
            players: HashMap::new(),
        }
    }

    /// Appends a successful delivery to the player's history, evicting the
    /// oldest entry when the bound is exceeded, and marks the pack active.
    pub fn record_delivery(&mut self, player: &PlayerId, pack: PackId) {
        formpack_debug!("tracker: [{}] delivered '{}'", player, pack);
        self.players
            .entry(player.clone())
            .or_insert_with(PlayerPackState::new)
            .push(pack, self.max_packs_per_player);
    }

    /// The player's active pack, if any delivery has succeeded.
    pub fn current_pack(&self, player: &PlayerId) -> Option<&PackId> {
        self.players.get(player).and_then(|s| s.active())
    }

    /// Whether the pack is still in the player's (bounded) history.
    pub fn has_pack(&self, player: &PlayerId, pack: &PackId) -> bool {
        self.players
            .get(player)
            .map(|s| s.holds(pack))
            .unwrap_or(false)
    }

    /// Delivered pack ids for the player, oldest first. Empty for players
    /// the tracker has never seen.
    pub fn history(&self, player: &PlayerId) -> Vec<PackId> {
        self.players
            .get(player)
            .map(|s| s.history().cloned().collect())
            .unwrap_or_default()
    }

    /// Drops all state for a player. Called when their session ends.
    pub fn clear_player(&mut self, player: &PlayerId) {
        if self.players.remove(player).is_some() {
            formpack_debug!("tracker: [{}] state cleared", player);
        }
    }

    pub fn tracked_players(&self) -> usize {
        self.players.len()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn history_is_bounded_fifo() {
        let player = PlayerId::from("p1");
        let mut tracker = PlayerTracker::new(3);

        for id in ["a", "b", "c", "d", "e"] {
            tracker.record_delivery(&player, PackId::from(id));
        }

        assert_eq!(
            tracker.history(&player),
            vec![PackId::from("c"), PackId::from("d"), PackId::from("e")]
        );
        assert_eq!(tracker.current_pack(&player), Some(&PackId::from("e")));
        // evicted entries are forgotten entirely
        assert!(!tracker.has_pack(&player, &PackId::from("a")));
        assert!(tracker.has_pack(&player, &PackId::from("c")));
    }

    #[test]
    fn unknown_player_reads_are_empty() {
        let tracker = PlayerTracker::new(10);
        let ghost = PlayerId::from("ghost");

        assert_eq!(tracker.current_pack(&ghost), None);
        assert!(tracker.history(&ghost).is_empty());
        assert!(!tracker.has_pack(&ghost, &PackId::from("a")));
    }

    #[test]
    fn clear_player_drops_state() {
        let player = PlayerId::from("p1");
        let mut tracker = PlayerTracker::new(10);
        tracker.record_delivery(&player, PackId::from("a"));
        assert_eq!(tracker.tracked_players(), 1);

        tracker.clear_player(&player);
        assert_eq!(tracker.tracked_players(), 0);
        assert_eq!(tracker.current_pack(&player), None);
    }
}

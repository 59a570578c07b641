//! This module contains the logic to deliver a resource pack to a player.
//! This is the heart of the engine: everything else (catalog, resolver,
//! tracker) exists so the [`Scheduler`] can decide what to push and when.
//!
//! This module contains the following:
//! - [`Scheduler`]: The scheduler struct, which owns the attempt state machines.
//! - [`PackSender`]: The capability the host provides to actually move bytes.
//! - [`DeliveryOutcome`]: What a delivery request resolved to, synchronously.
//!
//! This module also contains the following submodules:
//! - [`attempt`]: The attempt submodule, the unit of delivery work.
//! - [`event`]: The event submodule, the terminal-failure stream payloads.
//! - [`state`]: The state submodule, the attempt state machine states.
//!
//! # Example
//! ```ignore
//! use formpack::delivery::Scheduler;
//!
//! async fn on_menu_open(scheduler: &Scheduler) {
//!     let player = "8f14e45f".into();
//!     match scheduler.request_delivery(&player, "shop").await {
//!         Ok(outcome) => println!("Delivery resolved to {:?}", outcome),
//!         Err(e) => println!("Misconfigured pack: {}", e),
//!     }
//! }
//! ```
//!
//! [`Scheduler`]: crate::delivery::Scheduler
//! [`PackSender`]: crate::delivery::PackSender
//! [`DeliveryOutcome`]: crate::delivery::DeliveryOutcome
//! [`attempt`]: crate::delivery::attempt
//! [`event`]: crate::delivery::event
//! [`state`]: crate::delivery::state
pub mod attempt;
pub mod event;
pub mod state;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;

#[cfg(feature = "async_std")]
use async_std::{
    channel::{bounded, Receiver, Sender},
    sync::{Mutex, RwLock},
    task::{self, sleep, JoinHandle},
};
#[cfg(feature = "async_std")]
use futures::{select, FutureExt};

#[cfg(feature = "async_tokio")]
use tokio::{
    select,
    sync::mpsc::channel as bounded,
    sync::mpsc::{Receiver, Sender},
    sync::{Mutex, RwLock},
    task::{self, JoinHandle},
    time::sleep,
};

use crate::catalog::{Pack, PackCatalog};
use crate::config::DeliveryConfig;
use crate::error::delivery::{DeliveryError, TransferError};
use crate::formpack_debug;
use crate::player::PlayerTracker;
use crate::resolver::{Assignment, Resolver};
use crate::util::{current_epoch_ms, PackId, PlayerId};

use self::attempt::DeliveryAttempt;
use self::event::{DeliveryFailure, FailureReason};
use self::state::AttemptStatus;

pub(crate) type AttemptKey = (PlayerId, PackId);
pub(crate) type AttemptRef = Arc<Mutex<DeliveryAttempt>>;

/// The transfer capability the host platform provides. This is the only
/// operation the engine assumes may be slow or asynchronous, and the only
/// place pack bytes ever move.
///
/// Implementations receive the pack metadata (including its
/// [`PackSource`](crate::catalog::PackSource)) and are responsible for the
/// actual transport. The returned future resolves to the transfer outcome;
/// the scheduler tolerates completions arriving in any order.
pub trait PackSender: Send + Sync {
    fn send(&self, player: &PlayerId, pack: &Pack) -> BoxFuture<'static, Result<(), TransferError>>;
}

/// What a delivery request resolved to, reported synchronously to the
/// caller. Only `Scheduled` creates new work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The resolver produced the no-pack sentinel. Nothing was scheduled,
    /// and this is not an error.
    NoPack,
    /// A new attempt was created and will fire after the join delay.
    Scheduled(PackId),
    /// A live attempt for this player and pack already exists, no second
    /// transfer will be started.
    InProgress(PackId),
    /// The player already holds this pack.
    AlreadyDelivered(PackId),
}

/// The delivery scheduler. Owns every [`DeliveryAttempt`] for its lifetime,
/// drives the `Pending -> InFlight -> {Succeeded | Failed}` state machine
/// with the configured delays, and reports abandoned attempts on a bounded
/// event stream.
///
/// The catalog is shared (the host keeps writing to it on config reloads),
/// the tracker and attempt table are owned here. Every mutation of a given
/// attempt happens under its own lock, so completions arriving out of
/// request order are safe.
pub struct Scheduler {
    /// Instance id, useful when several engines log side by side.
    pub id: u64,
    config: DeliveryConfig,
    resolver: Resolver,
    catalog: Arc<RwLock<PackCatalog>>,
    tracker: Arc<Mutex<PlayerTracker>>,
    /// Live attempts keyed by player and pack. Terminal attempts are removed
    /// as part of their final transition.
    attempts: Arc<Mutex<HashMap<AttemptKey, AttemptRef>>>,
    sender: Arc<dyn PackSender>,
    fail_send: Sender<DeliveryFailure>,
    fail_recv: Arc<Mutex<Receiver<DeliveryFailure>>>,
}

impl Scheduler {
    pub fn new(
        config: DeliveryConfig,
        catalog: Arc<RwLock<PackCatalog>>,
        sender: Arc<dyn PackSender>,
    ) -> Self {
        let (fail_send, fail_recv) = bounded::<DeliveryFailure>(32);
        let resolver = Resolver::new(&config);
        let tracker = PlayerTracker::new(config.max_packs_per_player);
        let id: u64 = rand::random();

        formpack_debug!("scheduler: instance {} created", id);

        Self {
            id,
            config,
            resolver,
            catalog,
            tracker: Arc::new(Mutex::new(tracker)),
            attempts: Arc::new(Mutex::new(HashMap::new())),
            sender,
            fail_send,
            fail_recv: Arc::new(Mutex::new(fail_recv)),
        }
    }

    /// Requests delivery of whatever pack the given menu resolves to.
    ///
    /// Resolution happens now; the transfer fires after the configured join
    /// delay. Re-requesting while an attempt for the same player and pack is
    /// live (or after it already succeeded) is a no-op that reports the
    /// existing state, so concurrent requests produce exactly one transfer.
    ///
    /// The only error here is a configuration problem: the resolver named a
    /// pack the catalog does not hold. Transient transfer failures never
    /// surface here, they travel through the retry loop and, if the attempt
    /// is abandoned, through [`Scheduler::next_failure`].
    pub async fn request_delivery(
        &self,
        player: &PlayerId,
        menu: &str,
    ) -> Result<DeliveryOutcome, DeliveryError> {
        let pack = {
            let catalog = self.catalog.read().await;
            match self.resolver.resolve(&catalog, menu) {
                Assignment::NoPack => {
                    formpack_debug!("scheduler: [{}] menu '{}' resolves to no pack", player, menu);
                    return Ok(DeliveryOutcome::NoPack);
                }
                Assignment::Pack(id) => catalog
                    .lookup(&id)
                    .map_err(|_| DeliveryError::UnknownPack(id.clone()))?
                    .clone(),
            }
        };

        let pack_id = pack.id.clone();
        let key: AttemptKey = (player.clone(), pack_id.clone());

        // the tracker is consulted under the attempt table lock so a
        // completion settling right now cannot slip between the two checks
        let mut attempts = self.attempts.lock().await;

        if self.tracker.lock().await.has_pack(player, &pack_id) {
            return Ok(DeliveryOutcome::AlreadyDelivered(pack_id));
        }

        if let Some(existing) = attempts.get(&key) {
            if existing.lock().await.status.is_live() {
                formpack_debug!(
                    "scheduler: [{}] '{}' already has a live attempt",
                    player,
                    pack_id
                );
                return Ok(DeliveryOutcome::InProgress(pack_id));
            }
        }

        let fire_at = current_epoch_ms() + self.config.join_delay.as_millis() as u64;
        let attempt = Arc::new(Mutex::new(DeliveryAttempt::new(
            player.clone(),
            pack_id.clone(),
            fire_at,
        )));
        attempts.insert(key.clone(), attempt.clone());
        drop(attempts);

        // the task detaches; it removes its own map entry on its terminal
        // transition, so nothing needs to hold the handle
        let _ = self.init_attempt(key, pack, attempt);

        Ok(DeliveryOutcome::Scheduled(pack_id))
    }

    /// Drives one attempt to a terminal state. This is the attempt's only
    /// writer after creation, except for cancellation flipping the status
    /// to `Abandoned` under the same lock.
    pub(crate) fn init_attempt(
        &self,
        key: AttemptKey,
        pack: Pack,
        attempt: AttemptRef,
    ) -> JoinHandle<()> {
        let attempts = self.attempts.clone();
        let tracker = self.tracker.clone();
        let sender = self.sender.clone();
        let failures = self.fail_send.clone();
        let join_delay = self.config.join_delay;
        let retry_delay = self.config.retry_delay;
        let load_timeout = self.config.load_timeout;
        let max_retry_attempts = self.config.max_retry_attempts;

        task::spawn(async move {
            let player = key.0.clone();
            let pack_id = key.1.clone();

            sleep(join_delay).await;

            loop {
                {
                    let mut a = attempt.lock().await;
                    if !a.status.is_live() {
                        // cancelled while armed
                        formpack_debug!(
                            true,
                            "scheduler: [{}] [task: attempt] '{}' cancelled before firing",
                            player,
                            pack_id
                        );
                        break;
                    }
                    a.status = AttemptStatus::InFlight;
                }

                formpack_debug!(
                    "scheduler: [{}] dispatching '{}' to the transfer capability",
                    player,
                    pack_id
                );

                let outcome =
                    Self::send_with_timeout(sender.as_ref(), &player, &pack, load_timeout).await;

                match outcome {
                    Ok(()) => {
                        // terminal transitions take the table lock first, so
                        // they cannot interleave with end_session or a
                        // re-request for the same key
                        let mut table = attempts.lock().await;
                        let mut a = attempt.lock().await;
                        if a.status != AttemptStatus::InFlight {
                            // the session ended while the transfer was in
                            // flight, the late completion is dropped
                            break;
                        }
                        a.status = AttemptStatus::Succeeded;
                        drop(a);

                        Self::remove_if_same(&mut table, &key, &attempt);
                        tracker.lock().await.record_delivery(&player, pack_id.clone());
                        drop(table);

                        formpack_debug!("scheduler: [{}] '{}' delivered", player, pack_id);
                        break;
                    }
                    Err(e) => {
                        let mut table = attempts.lock().await;
                        let mut a = attempt.lock().await;
                        if a.status != AttemptStatus::InFlight {
                            break;
                        }
                        a.attempts += 1;
                        a.status = AttemptStatus::Failed;

                        if a.attempts >= max_retry_attempts {
                            a.status = AttemptStatus::Abandoned;
                            let failure = DeliveryFailure {
                                player: player.clone(),
                                pack: pack_id.clone(),
                                attempts: a.attempts,
                                reason: FailureReason::RetriesExhausted(e),
                            };
                            drop(a);

                            Self::remove_if_same(&mut table, &key, &attempt);
                            drop(table);

                            formpack_debug!(
                                "scheduler: [{}] '{}' abandoned after {} attempts",
                                player,
                                pack_id,
                                failure.attempts
                            );
                            Self::report_failure(&failures, failure);
                            break;
                        }

                        a.rearm(current_epoch_ms() + retry_delay.as_millis() as u64);
                        drop(a);
                        drop(table);

                        formpack_debug!(
                            "scheduler: [{}] '{}' failed ({}), re-armed",
                            player,
                            pack_id,
                            e
                        );
                        sleep(retry_delay).await;
                    }
                }
            }
        })
    }

    /// Runs one `send` against the load timeout. A transfer that outlives
    /// the timeout counts as a transient failure; the dispatched future is
    /// simply dropped, never interrupted mid-poll.
    async fn send_with_timeout(
        sender: &dyn PackSender,
        player: &PlayerId,
        pack: &Pack,
        timeout: Duration,
    ) -> Result<(), TransferError> {
        #[cfg(feature = "async_std")]
        return select! {
            res = sender.send(player, pack).fuse() => res,
            _ = sleep(timeout).fuse() => Err(TransferError::TimedOut),
        };

        #[cfg(feature = "async_tokio")]
        return select! {
            res = sender.send(player, pack) => res,
            _ = sleep(timeout) => Err(TransferError::TimedOut),
        };
    }

    /// Removes the table entry for `key` only if it still points at this
    /// attempt. A fresh attempt inserted under the same key after this one
    /// turned terminal must not be evicted by the old task.
    fn remove_if_same(
        table: &mut HashMap<AttemptKey, AttemptRef>,
        key: &AttemptKey,
        attempt: &AttemptRef,
    ) {
        if let Some(current) = table.get(key) {
            if Arc::ptr_eq(current, attempt) {
                table.remove(key);
            }
        }
    }

    /// Pushes a failure onto the bounded stream without blocking. When the
    /// buffer is full (nobody is draining [`Scheduler::next_failure`]) the
    /// event is dropped and logged.
    fn report_failure(failures: &Sender<DeliveryFailure>, failure: DeliveryFailure) {
        let player = failure.player.clone();
        if failures.try_send(failure).is_err() {
            formpack_debug!(
                true,
                "scheduler: [{}] failure stream is full! Dropping event.",
                player
            );
        }
    }

    /// Cancels everything the player still has pending and drops their
    /// tracked state. Cancellation is cooperative: an already dispatched
    /// `send` is not interrupted, its completion is discarded instead.
    /// Cancelled attempts do not consume a retry, and a later request for
    /// the same player starts fresh at count 0.
    pub async fn end_session(&self, player: &PlayerId) {
        let mut attempts = self.attempts.lock().await;
        let keys: Vec<AttemptKey> = attempts
            .keys()
            .filter(|(p, _)| p == player)
            .cloned()
            .collect();

        for key in keys {
            if let Some(attempt) = attempts.remove(&key) {
                let mut a = attempt.lock().await;
                if a.status.is_terminal() {
                    continue;
                }
                a.status = AttemptStatus::Abandoned;
                let failure = DeliveryFailure {
                    player: key.0.clone(),
                    pack: key.1.clone(),
                    attempts: a.attempts,
                    reason: FailureReason::SessionEnded,
                };
                drop(a);

                formpack_debug!(
                    "scheduler: [{}] '{}' cancelled by session end",
                    failure.player,
                    failure.pack
                );
                Self::report_failure(&self.fail_send, failure);
            }
        }

        // cleared while the table lock is held, so a success settling
        // concurrently either lands before this wipe or observes the
        // abandonment and records nothing
        self.tracker.lock().await.clear_player(player);
    }

    /// The next abandoned attempt, or `None` once the stream is closed.
    /// Intended for the host's logging/notification loop.
    pub async fn next_failure(&self) -> Option<DeliveryFailure> {
        #[cfg(feature = "async_std")]
        return match self.fail_recv.lock().await.recv().await {
            Ok(failure) => Some(failure),
            Err(_) => None,
        };

        #[cfg(feature = "async_tokio")]
        return self.fail_recv.lock().await.recv().await;
    }

    /// The pack the player's client is currently using, if any.
    pub async fn current_pack(&self, player: &PlayerId) -> Option<PackId> {
        self.tracker.lock().await.current_pack(player).cloned()
    }

    /// Whether the player still holds this pack in their bounded history.
    pub async fn has_pack(&self, player: &PlayerId, pack: &PackId) -> bool {
        self.tracker.lock().await.has_pack(player, pack)
    }

    /// A snapshot of the live attempt for this player and pack, if one
    /// exists. Terminal attempts are gone by the time they are terminal.
    pub async fn attempt_snapshot(
        &self,
        player: &PlayerId,
        pack: &PackId,
    ) -> Option<DeliveryAttempt> {
        let attempts = self.attempts.lock().await;
        match attempts.get(&(player.clone(), pack.clone())) {
            Some(attempt) => Some(attempt.lock().await.clone()),
            None => None,
        }
    }

    /// The shared catalog handle, for hosts that want to reload bindings.
    pub fn catalog(&self) -> &Arc<RwLock<PackCatalog>> {
        &self.catalog
    }
}

//! # formpack
//! A resource pack assignment and delivery engine for form based game menus,
//! asynchronously driven.
//!
//! The engine decides *which* pack a player/menu combination should receive
//! and *when* to push it, with bounded retries, join/retry delays and
//! size/quantity limits. It never renders menus, never parses configuration
//! files and never moves pack bytes itself; those belong to the host, which
//! provides them as capabilities ([`PackSender`], [`InfoSource`]).
//!
//! By default `formpack` uses `async-std` to drive its attempt tasks,
//! however you can enable the `async_tokio` feature (and disable default
//! features) to use tokio instead.
//!
//! ## A generic example
//! ```ignore
//! use std::sync::Arc;
//!
//! use formpack::catalog::{Pack, PackCatalog, PackSource};
//! use formpack::delivery::Scheduler;
//! use formpack::DeliveryConfig;
//!
//! #[async_std::main]
//! async fn main() {
//!     let config = DeliveryConfig::default();
//!
//!     let mut catalog = PackCatalog::new(config.max_pack_size);
//!     catalog
//!         .register(Pack::new(
//!             "winter",
//!             "winter.mcpack",
//!             52_428_800,
//!             PackSource::Url("https://cdn.example/winter.mcpack".into()),
//!         ))
//!         .unwrap();
//!     catalog.bind_menu("shop", &"winter".into()).unwrap();
//!
//!     let scheduler = Scheduler::new(
//!         config,
//!         Arc::new(async_std::sync::RwLock::new(catalog)),
//!         Arc::new(MyPlatformSender::new()),
//!     );
//!
//!     // on a menu-open event
//!     scheduler.request_delivery(&"player-uuid".into(), "shop").await.unwrap();
//!
//!     // host-side logging loop
//!     while let Some(failure) = scheduler.next_failure().await {
//!         println!("pack delivery gave up: {}", failure.reason);
//!     }
//! }
//! ```
//!
//! [`PackSender`]: crate::delivery::PackSender
//! [`InfoSource`]: crate::data::InfoSource

/// The pack registry and per-menu bindings.
/// Writes happen at configuration load, reads happen everywhere else.
pub mod catalog;
/// The immutable configuration struct and its defaults.
pub mod config;
/// Read-only data queries feeding list-backed menus.
pub mod data;
/// The delivery scheduler and its attempt state machines.
pub mod delivery;
pub mod error;
/// Per-player bookkeeping of delivered packs.
pub mod player;
/// Menu-to-pack resolution.
pub mod resolver;
pub mod util;

pub use catalog::{Pack, PackCatalog, PackSource};
pub use config::DeliveryConfig;
pub use data::{DataAggregator, DataRow, InfoSource};
pub use delivery::{DeliveryOutcome, PackSender, Scheduler};
pub use player::PlayerTracker;
pub use resolver::{Assignment, Resolver};
pub use util::{PackId, PlayerId};

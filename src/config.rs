//! Engine configuration.
//!
//! The engine never reads configuration files itself, parsing happens on the
//! host side. A [`DeliveryConfig`] is handed to the engine at construction
//! and is immutable from then on. The defaults here mirror the limits most
//! pack-serving platforms ship with.

use std::path::PathBuf;
use std::time::Duration;

use crate::util::PackId;

/// How long to wait after a join/menu-open event before the first
/// delivery attempt fires. Clients are usually not ready to accept a
/// transfer the instant they appear.
pub const DEFAULT_JOIN_DELAY: Duration = Duration::from_millis(2000);

/// Delay between a failed attempt and its re-arm.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(1000);

/// How long a single transfer may stay in flight before it counts as a
/// transient failure.
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Failed sends allowed before an attempt is abandoned.
pub const DEFAULT_MAX_RETRY_ATTEMPTS: u32 = 3;

/// Bound on the per-player delivery history (oldest evicted first).
pub const DEFAULT_MAX_PACKS_PER_PLAYER: usize = 10;

/// Registration size cap, in bytes.
pub const DEFAULT_MAX_PACK_SIZE: u64 = 100 * 1024 * 1024;

/// Pack identifier used when a menu has no binding of its own.
pub const DEFAULT_PACK_ID: &str = "ui_enhanced";

/// Directory packs are served from, relative to the plugin data folder.
pub const RESOURCE_PACK_FOLDER: &str = "resource_packs";

/// Immutable configuration for the delivery engine.
///
/// Every component receives this (or the slice of it that it needs) at
/// construction. There is no ambient global state, which makes it cheap to
/// run several engines with different limits side by side.
#[derive(Debug, Clone)]
pub struct DeliveryConfig {
    /// Master switch for default-pack delivery. Per-menu bindings still
    /// resolve when this is off.
    pub enabled: bool,
    /// The pack to serve when a menu has no binding, if any.
    pub default_pack: Option<PackId>,
    /// Where local pack files live. Only carried along for the host's
    /// `send` implementation, the engine never touches the disk.
    pub pack_directory: PathBuf,
    /// Failed sends allowed before an attempt is abandoned.
    pub max_retry_attempts: u32,
    /// Delay between a failure and the re-armed attempt firing.
    pub retry_delay: Duration,
    /// Delay between the delivery request and the first attempt firing.
    pub join_delay: Duration,
    /// A send still pending after this long counts as a failure.
    pub load_timeout: Duration,
    /// Bound on the per-player delivery history.
    pub max_packs_per_player: usize,
    /// Largest pack the catalog will accept, in bytes.
    pub max_pack_size: u64,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            default_pack: Some(PackId::from(DEFAULT_PACK_ID)),
            pack_directory: PathBuf::from(RESOURCE_PACK_FOLDER),
            max_retry_attempts: DEFAULT_MAX_RETRY_ATTEMPTS,
            retry_delay: DEFAULT_RETRY_DELAY,
            join_delay: DEFAULT_JOIN_DELAY,
            load_timeout: DEFAULT_LOAD_TIMEOUT,
            max_packs_per_player: DEFAULT_MAX_PACKS_PER_PLAYER,
            max_pack_size: DEFAULT_MAX_PACK_SIZE,
        }
    }
}

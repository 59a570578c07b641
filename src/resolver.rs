//! Pack assignment.
//!
//! The resolver answers one question: which pack, if any, should this menu
//! get? It is a pure read over the catalog bindings and the configured
//! default, with no retries and no I/O. "No pack" is a perfectly valid
//! answer, not an error, so it is modelled as a variant rather than a
//! `Result`.

use crate::catalog::PackCatalog;
use crate::config::DeliveryConfig;
use crate::util::PackId;

/// The outcome of resolving a menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignment {
    /// Deliver this pack.
    Pack(PackId),
    /// Nothing to deliver. The sentinel, not a failure.
    NoPack,
}

impl Assignment {
    /// The assigned pack id, if there is one.
    pub fn pack(&self) -> Option<&PackId> {
        match self {
            Assignment::Pack(id) => Some(id),
            Assignment::NoPack => None,
        }
    }

    pub fn is_no_pack(&self) -> bool {
        matches!(self, Assignment::NoPack)
    }
}

/// Deterministic menu-to-pack resolution.
///
/// Per-menu bindings always win, even when the engine is disabled; the
/// `enabled` flag only gates the default pack fallback.
#[derive(Debug, Clone)]
pub struct Resolver {
    enabled: bool,
    default_pack: Option<PackId>,
}

impl Resolver {
    pub fn new(config: &DeliveryConfig) -> Self {
        Self {
            enabled: config.enabled,
            default_pack: config.default_pack.clone(),
        }
    }

    /// Resolves the pack for a menu: the menu's binding if it has one, else
    /// the configured default when the feature is enabled and the default is
    /// actually registered, else [`Assignment::NoPack`].
    pub fn resolve(&self, catalog: &PackCatalog, menu: &str) -> Assignment {
        if let Some(id) = catalog.binding(menu) {
            return Assignment::Pack(id.clone());
        }

        if self.enabled {
            if let Some(id) = &self.default_pack {
                if catalog.contains(id) {
                    return Assignment::Pack(id.clone());
                }
            }
        }

        Assignment::NoPack
    }
}

//! The in-memory pack registry.
//!
//! The catalog is the single source of truth for which packs exist and which
//! menu wants which pack. It is deliberately thread-unsafe: writes happen at
//! configuration load, reads happen from the resolver and scheduler, and the
//! owner is expected to serialize access (the [`Scheduler`] wraps it in an
//! `RwLock` for exactly that reason).
//!
//! Packs are immutable once registered. The only way to change one is
//! [`PackCatalog::replace`], which is how a configuration reload re-registers
//! everything.
//!
//! [`Scheduler`]: crate::delivery::Scheduler

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::catalog::CatalogError;
use crate::formpack_debug;
use crate::util::PackId;

/// File extensions the catalog accepts for locally served packs.
pub const PACK_EXTENSIONS: [&str; 2] = ["mcpack", "zip"];

/// Longest hash the client protocol will carry (hex sha1).
const MAX_HASH_LEN: usize = 40;

/// Where the bytes of a pack come from. The engine never dereferences this,
/// it is handed as-is to the host's `send` capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackSource {
    /// A file below the configured pack directory.
    Local(PathBuf),
    /// An http(s) url the client downloads from directly.
    Url(String),
    /// A pack already shipped with the platform, referenced by name.
    Embedded(String),
}

/// A registered resource pack. Immutable once it enters the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pack {
    pub id: PackId,
    /// The file name presented to the client.
    pub file_name: String,
    /// Size of the pack in bytes.
    pub size: u64,
    pub source: PackSource,
    /// Optional hex sha1 of the pack contents, forwarded to the client so it
    /// can skip a re-download.
    pub sha1: Option<String>,
    /// Whether the client must accept the pack to keep the session.
    pub force: bool,
}

impl Pack {
    pub fn new<I: Into<PackId>, S: Into<String>>(
        id: I,
        file_name: S,
        size: u64,
        source: PackSource,
    ) -> Self {
        Self {
            id: id.into(),
            file_name: file_name.into(),
            size,
            source,
            sha1: None,
            force: false,
        }
    }

    pub fn with_sha1<S: Into<String>>(mut self, sha1: S) -> Self {
        self.sha1 = Some(sha1.into());
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

/// The registry of available packs plus the per-menu bindings.
#[derive(Debug, Clone)]
pub struct PackCatalog {
    /// Size cap applied at registration.
    max_pack_size: u64,
    packs: HashMap<PackId, Pack>,
    /// menu identifier -> pack identifier
    bindings: HashMap<String, PackId>,
}

impl PackCatalog {
    pub fn new(max_pack_size: u64) -> Self {
        Self {
            max_pack_size,
            packs: HashMap::new(),
            bindings: HashMap::new(),
        }
    }

    /// Registers a new pack. Fails if the identifier is taken, the pack is
    /// oversized, or the definition is malformed. On failure the catalog is
    /// left exactly as it was.
    pub fn register(&mut self, pack: Pack) -> Result<(), CatalogError> {
        self.validate(&pack)?;
        if self.packs.contains_key(&pack.id) {
            return Err(CatalogError::DuplicateIdentifier(pack.id));
        }
        formpack_debug!("catalog: registered pack '{}' ({} bytes)", pack.id, pack.size);
        self.packs.insert(pack.id.clone(), pack);
        Ok(())
    }

    /// Re-registers a pack, replacing any previous entry with the same
    /// identifier. Same validation as [`PackCatalog::register`].
    pub fn replace(&mut self, pack: Pack) -> Result<(), CatalogError> {
        self.validate(&pack)?;
        formpack_debug!("catalog: replaced pack '{}'", pack.id);
        self.packs.insert(pack.id.clone(), pack);
        Ok(())
    }

    pub fn lookup(&self, id: &PackId) -> Result<&Pack, CatalogError> {
        self.packs
            .get(id)
            .ok_or_else(|| CatalogError::NotFound(id.clone()))
    }

    /// Binds a menu to a pack. The pack must already be registered.
    pub fn bind_menu<S: Into<String>>(&mut self, menu: S, pack: &PackId) -> Result<(), CatalogError> {
        if !self.packs.contains_key(pack) {
            return Err(CatalogError::UnknownPack(pack.clone()));
        }
        self.bindings.insert(menu.into(), pack.clone());
        Ok(())
    }

    /// The pack bound to this menu, if any. Absence means "use the default".
    pub fn binding(&self, menu: &str) -> Option<&PackId> {
        self.bindings.get(menu)
    }

    pub fn contains(&self, id: &PackId) -> bool {
        self.packs.contains_key(id)
    }

    /// Drops every pack while keeping menu bindings. This is the first half
    /// of a configuration reload; a binding left dangling resolves to an
    /// `UnknownPack` delivery error until its pack is re-registered.
    pub fn clear(&mut self) {
        formpack_debug!("catalog: cleared {} packs", self.packs.len());
        self.packs.clear();
    }

    /// Identifiers of every registered pack.
    pub fn loaded_packs(&self) -> Vec<PackId> {
        self.packs.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.packs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }

    fn validate(&self, pack: &Pack) -> Result<(), CatalogError> {
        if pack.id.is_empty() {
            return Err(CatalogError::InvalidFormat(
                pack.id.clone(),
                "empty identifier",
            ));
        }
        if let Some(sha1) = &pack.sha1 {
            if sha1.len() > MAX_HASH_LEN {
                return Err(CatalogError::InvalidFormat(
                    pack.id.clone(),
                    "sha1 hash is too long",
                ));
            }
        }
        if let PackSource::Local(path) = &pack.source {
            let ok = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| PACK_EXTENSIONS.contains(&e))
                .unwrap_or(false);
            if !ok {
                return Err(CatalogError::InvalidFormat(
                    pack.id.clone(),
                    "unrecognised pack file extension",
                ));
            }
        }
        if pack.size > self.max_pack_size {
            return Err(CatalogError::PackTooLarge(pack.id.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn winter(size: u64) -> Pack {
        Pack::new(
            "winter",
            "winter.mcpack",
            size,
            PackSource::Local(PathBuf::from("packs/winter.mcpack")),
        )
    }

    #[test]
    fn register_twice_fails_and_keeps_one_entry() {
        let mut catalog = PackCatalog::new(100 * 1024 * 1024);
        catalog.register(winter(50)).unwrap();

        let err = catalog.register(winter(70)).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateIdentifier(PackId::from("winter")));
        assert_eq!(catalog.len(), 1);
        // the original registration survives
        assert_eq!(catalog.lookup(&PackId::from("winter")).unwrap().size, 50);
    }

    #[test]
    fn oversized_pack_is_refused() {
        let mut catalog = PackCatalog::new(1024);
        let err = catalog.register(winter(2048)).unwrap_err();
        assert_eq!(err, CatalogError::PackTooLarge(PackId::from("winter")));
        assert!(catalog.is_empty());
    }

    #[test]
    fn replace_overwrites() {
        let mut catalog = PackCatalog::new(1024);
        catalog.register(winter(10)).unwrap();
        catalog.replace(winter(20)).unwrap();
        assert_eq!(catalog.lookup(&PackId::from("winter")).unwrap().size, 20);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn bind_requires_registered_pack() {
        let mut catalog = PackCatalog::new(1024);
        let missing = PackId::from("ghost");
        assert_eq!(
            catalog.bind_menu("shop", &missing).unwrap_err(),
            CatalogError::UnknownPack(missing)
        );

        catalog.register(winter(10)).unwrap();
        catalog.bind_menu("shop", &PackId::from("winter")).unwrap();
        assert_eq!(catalog.binding("shop"), Some(&PackId::from("winter")));
        assert_eq!(catalog.binding("settings"), None);
    }

    #[test]
    fn malformed_packs_are_refused() {
        let mut catalog = PackCatalog::new(1024);

        let empty = Pack::new("", "x.mcpack", 1, PackSource::Url("https://x/x.mcpack".into()));
        assert!(matches!(
            catalog.register(empty),
            Err(CatalogError::InvalidFormat(_, "empty identifier"))
        ));

        let bad_ext = Pack::new(
            "tex",
            "tex.rar",
            1,
            PackSource::Local(PathBuf::from("packs/tex.rar")),
        );
        assert!(matches!(
            catalog.register(bad_ext),
            Err(CatalogError::InvalidFormat(_, "unrecognised pack file extension"))
        ));

        let long_hash = winter(1).with_sha1("a".repeat(41));
        assert!(matches!(
            catalog.register(long_hash),
            Err(CatalogError::InvalidFormat(_, "sha1 hash is too long"))
        ));
    }
}

//! Catalog errors
//! These occur at registration or bind time and are never retried, they
//! always mean the configuration handed to the engine is wrong.
use crate::util::PackId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A pack with this identifier is already registered. The catalog keeps
    /// the entry it already had.
    DuplicateIdentifier(PackId),
    /// The pack is larger than the configured maximum size.
    PackTooLarge(PackId),
    /// No pack with this identifier is registered.
    NotFound(PackId),
    /// A menu binding referenced an identifier the catalog does not know.
    UnknownPack(PackId),
    /// The pack definition itself is malformed (empty identifier, bad file
    /// extension, oversized hash).
    InvalidFormat(PackId, &'static str),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::DuplicateIdentifier(id) => {
                write!(f, "Pack '{}' is already registered", id)
            }
            CatalogError::PackTooLarge(id) => {
                write!(f, "Pack '{}' exceeds the maximum pack size", id)
            }
            CatalogError::NotFound(id) => write!(f, "Pack '{}' was not found", id),
            CatalogError::UnknownPack(id) => {
                write!(f, "Pack '{}' is not registered and can not be bound", id)
            }
            CatalogError::InvalidFormat(id, reason) => {
                write!(f, "Pack '{}' has an invalid format: {}", id, reason)
            }
        }
    }
}

impl std::error::Error for CatalogError {}

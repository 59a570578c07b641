pub(crate) mod debug;

use std::fmt;

/// Identifies a single player session on the host platform.
///
/// The engine never inspects the contents of this id, it only uses it as a
/// key. Hosts will usually pass a stringified UUID here, but any stable
/// token works:
/// ```rust
/// use formpack::util::PlayerId;
///
/// let player = PlayerId::from("8f14e45f-ceea-4a7a-9d3d-1f1c0a8e2b11");
/// assert_eq!(player.as_str(), "8f14e45f-ceea-4a7a-9d3d-1f1c0a8e2b11");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies a registered resource pack within the catalog.
///
/// Unique per catalog, assigned by whoever registers the pack.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackId(String);

impl PackId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for PackId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PackId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for PackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Milliseconds since the unix epoch. Used to stamp attempt scheduling.
pub(crate) fn current_epoch_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_millis() as u64
}

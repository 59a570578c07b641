//! Read-only data queries for list-backed menus.
//!
//! List menus render rows of named string fields (player lists, server
//! stats, and so on). The [`DataAggregator`] produces those rows by asking an
//! external [`InfoSource`] for typed snapshots and flattening them. Rows are
//! built fresh on every call and never cached, so a menu re-render always
//! observes current state.
//!
//! The aggregator shares the player-identity model with the delivery side
//! but is otherwise independent of it: it never retries (the caller owns
//! retry policy for data reads) and its only failure is
//! [`SourceUnavailable`].
//!
//! [`SourceUnavailable`]: crate::error::data::DataError::SourceUnavailable

use std::collections::hash_map;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::data::DataError;
use crate::util::PlayerId;

/// One row of a list query: a flat set of named string fields.
/// Field order is irrelevant, rows have no identity beyond their contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataRow {
    fields: HashMap<String, String>,
}

impl DataRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(|v| v.as_str())
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, String> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Snapshot of one online player.
#[derive(Debug, Clone)]
pub struct PlayerInfo {
    pub id: PlayerId,
    pub name: String,
    pub world: String,
    pub game_mode: String,
    pub ping_ms: u32,
}

/// One named statistic about the server (version, uptime, player count...).
#[derive(Debug, Clone)]
pub struct ServerInfoEntry {
    pub name: String,
    pub value: String,
    pub description: String,
}

/// One effective permission node for a player.
#[derive(Debug, Clone)]
pub struct PermissionInfo {
    pub node: String,
    pub granted: bool,
}

/// Snapshot of one loaded world.
#[derive(Debug, Clone)]
pub struct WorldInfo {
    pub name: String,
    pub environment: String,
    pub player_count: u32,
}

/// Snapshot of one installed plugin.
#[derive(Debug, Clone)]
pub struct PluginInfo {
    pub name: String,
    pub version: String,
    pub authors: Vec<String>,
    pub enabled: bool,
}

/// The external information source the host provides. Each call reads live
/// platform state; a failed read is [`DataError::SourceUnavailable`].
pub trait InfoSource: Send + Sync {
    fn online_players(&self) -> Result<Vec<PlayerInfo>, DataError>;
    fn server_info(&self) -> Result<Vec<ServerInfoEntry>, DataError>;
    fn permissions(&self, player: &PlayerId) -> Result<Vec<PermissionInfo>, DataError>;
    fn worlds(&self) -> Result<Vec<WorldInfo>, DataError>;
    fn plugins(&self) -> Result<Vec<PluginInfo>, DataError>;
}

/// Flattens [`InfoSource`] snapshots into the rows list menus consume.
pub struct DataAggregator {
    source: Arc<dyn InfoSource>,
}

impl DataAggregator {
    pub fn new(source: Arc<dyn InfoSource>) -> Self {
        Self { source }
    }

    pub fn online_players(&self) -> Result<Vec<DataRow>, DataError> {
        let players = self.source.online_players()?;
        Ok(players
            .into_iter()
            .map(|p| {
                DataRow::new()
                    .with("name", p.name)
                    .with("uuid", p.id.to_string())
                    .with("world", p.world)
                    .with("gamemode", p.game_mode)
                    .with("ping", p.ping_ms.to_string())
            })
            .collect())
    }

    pub fn server_info(&self) -> Result<Vec<DataRow>, DataError> {
        let entries = self.source.server_info()?;
        Ok(entries
            .into_iter()
            .map(|e| {
                DataRow::new()
                    .with("name", e.name)
                    .with("value", e.value)
                    .with("description", e.description)
            })
            .collect())
    }

    /// Effective permissions for one player, sorted by node name.
    pub fn player_permissions(&self, player: &PlayerId) -> Result<Vec<DataRow>, DataError> {
        let mut perms = self.source.permissions(player)?;
        perms.sort_by(|a, b| a.node.to_lowercase().cmp(&b.node.to_lowercase()));
        Ok(perms
            .into_iter()
            .map(|p| {
                DataRow::new()
                    .with("name", p.node)
                    .with("value", p.granted.to_string())
                    .with(
                        "description",
                        if p.granted {
                            "Permission: Granted"
                        } else {
                            "Permission: Denied"
                        },
                    )
            })
            .collect())
    }

    pub fn worlds(&self) -> Result<Vec<DataRow>, DataError> {
        let worlds = self.source.worlds()?;
        Ok(worlds
            .into_iter()
            .map(|w| {
                DataRow::new()
                    .with("name", w.name)
                    .with("environment", w.environment)
                    .with("players", w.player_count.to_string())
            })
            .collect())
    }

    /// Installed plugins, sorted by name.
    pub fn plugins(&self) -> Result<Vec<DataRow>, DataError> {
        let mut plugins = self.source.plugins()?;
        plugins.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(plugins
            .into_iter()
            .map(|p| {
                DataRow::new()
                    .with("name", p.name)
                    .with("version", p.version)
                    .with("author", p.authors.join(", "))
                    .with("enabled", p.enabled.to_string())
            })
            .collect())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    struct FakeSource {
        reachable: bool,
    }

    impl InfoSource for FakeSource {
        fn online_players(&self) -> Result<Vec<PlayerInfo>, DataError> {
            self.check()?;
            Ok(vec![PlayerInfo {
                id: PlayerId::from("u-1"),
                name: "Steve".into(),
                world: "overworld".into(),
                game_mode: "SURVIVAL".into(),
                ping_ms: 42,
            }])
        }

        fn server_info(&self) -> Result<Vec<ServerInfoEntry>, DataError> {
            self.check()?;
            Ok(vec![ServerInfoEntry {
                name: "Players Online".into(),
                value: "1/20".into(),
                description: "Current/Maximum Players".into(),
            }])
        }

        fn permissions(&self, _player: &PlayerId) -> Result<Vec<PermissionInfo>, DataError> {
            self.check()?;
            Ok(vec![
                PermissionInfo {
                    node: "menu.open".into(),
                    granted: true,
                },
                PermissionInfo {
                    node: "Admin.reload".into(),
                    granted: false,
                },
            ])
        }

        fn worlds(&self) -> Result<Vec<WorldInfo>, DataError> {
            self.check()?;
            Ok(vec![WorldInfo {
                name: "overworld".into(),
                environment: "NORMAL".into(),
                player_count: 1,
            }])
        }

        fn plugins(&self) -> Result<Vec<PluginInfo>, DataError> {
            self.check()?;
            Ok(vec![
                PluginInfo {
                    name: "zeta".into(),
                    version: "1.0".into(),
                    authors: vec!["a".into(), "b".into()],
                    enabled: true,
                },
                PluginInfo {
                    name: "Alpha".into(),
                    version: "2.0".into(),
                    authors: vec![],
                    enabled: false,
                },
            ])
        }
    }

    impl FakeSource {
        fn check(&self) -> Result<(), DataError> {
            if self.reachable {
                Ok(())
            } else {
                Err(DataError::SourceUnavailable("api gone".into()))
            }
        }
    }

    #[test]
    fn player_rows_carry_the_expected_fields() {
        let agg = DataAggregator::new(Arc::new(FakeSource { reachable: true }));
        let rows = agg.online_players().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("name"), Some("Steve"));
        assert_eq!(rows[0].get("uuid"), Some("u-1"));
        assert_eq!(rows[0].get("ping"), Some("42"));
    }

    #[test]
    fn permissions_are_sorted_case_insensitively() {
        let agg = DataAggregator::new(Arc::new(FakeSource { reachable: true }));
        let player = PlayerId::from("u-1");
        let rows = agg.player_permissions(&player).unwrap();
        assert_eq!(rows[0].get("name"), Some("Admin.reload"));
        assert_eq!(rows[0].get("description"), Some("Permission: Denied"));
        assert_eq!(rows[1].get("name"), Some("menu.open"));
    }

    #[test]
    fn plugins_are_sorted_and_authors_joined() {
        let agg = DataAggregator::new(Arc::new(FakeSource { reachable: true }));
        let rows = agg.plugins().unwrap();
        assert_eq!(rows[0].get("name"), Some("Alpha"));
        assert_eq!(rows[1].get("author"), Some("a, b"));
    }

    #[test]
    fn unreachable_source_surfaces_per_query() {
        let agg = DataAggregator::new(Arc::new(FakeSource { reachable: false }));
        assert!(matches!(
            agg.worlds(),
            Err(DataError::SourceUnavailable(_))
        ));
        assert!(matches!(
            agg.server_info(),
            Err(DataError::SourceUnavailable(_))
        ));
    }
}

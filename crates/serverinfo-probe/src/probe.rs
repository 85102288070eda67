//! Probe catalog definitions.

use crate::config::RunConfig;
use crate::url::{build_url, query_fragments};
use serde::{Deserialize, Serialize};

/// Where a probe path is anchored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    /// Service root, e.g. `http://host:port`.
    Root,

    /// API base, e.g. `http://host:port/api/v1`.
    Api,
}

/// Builtin serverinfo-rest probes, in execution order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinProbe {
    /// GET /
    RootOverview,

    /// GET {prefix}/health
    Health,

    /// GET {prefix}/status
    ServerStatus,

    /// GET {prefix}/server
    ServerInfo,

    /// GET {prefix}/players
    PlayerList,

    /// GET {prefix}/players/count
    PlayerCount,

    /// GET {prefix}/players/names
    PlayerNames,
}

impl BuiltinProbe {
    /// All builtin probes in catalog order.
    pub const ALL: [BuiltinProbe; 7] = [
        BuiltinProbe::RootOverview,
        BuiltinProbe::Health,
        BuiltinProbe::ServerStatus,
        BuiltinProbe::ServerInfo,
        BuiltinProbe::PlayerList,
        BuiltinProbe::PlayerCount,
        BuiltinProbe::PlayerNames,
    ];

    /// Human-readable probe name.
    pub fn name(&self) -> &'static str {
        match self {
            BuiltinProbe::RootOverview => "Root overview",
            BuiltinProbe::Health => "Health check",
            BuiltinProbe::ServerStatus => "Server status",
            BuiltinProbe::ServerInfo => "Server info",
            BuiltinProbe::PlayerList => "Player list",
            BuiltinProbe::PlayerCount => "Player count",
            BuiltinProbe::PlayerNames => "Player names",
        }
    }

    /// Path relative to the probe's anchor.
    pub fn path(&self) -> &'static str {
        match self {
            BuiltinProbe::RootOverview => "/",
            BuiltinProbe::Health => "/health",
            BuiltinProbe::ServerStatus => "/status",
            BuiltinProbe::ServerInfo => "/server",
            BuiltinProbe::PlayerList => "/players",
            BuiltinProbe::PlayerCount => "/players/count",
            BuiltinProbe::PlayerNames => "/players/names",
        }
    }

    pub fn anchor(&self) -> Anchor {
        match self {
            BuiltinProbe::RootOverview => Anchor::Root,
            _ => Anchor::Api,
        }
    }

    /// Whether the probe carries the access token.
    ///
    /// The overview and health endpoints must answer unauthenticated.
    pub fn authenticated(&self) -> bool {
        !matches!(self, BuiltinProbe::RootOverview | BuiltinProbe::Health)
    }
}

/// Declarative description of one probe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProbeSpec {
    /// Name used in the report.
    pub name: String,

    /// Path relative to `anchor`.
    pub path: String,

    pub anchor: Anchor,

    /// Extra query parameters, emitted in order before the token.
    pub params: Vec<(String, String)>,

    /// Whether the run's token is attached.
    pub authenticated: bool,

    /// Whether this probe was appended outside the fixed catalog.
    pub extra: bool,
}

impl ProbeSpec {
    /// Create a probe from a builtin catalog entry.
    pub fn from_builtin(probe: BuiltinProbe) -> Self {
        Self {
            name: probe.name().to_string(),
            path: probe.path().to_string(),
            anchor: probe.anchor(),
            params: Vec::new(),
            authenticated: probe.authenticated(),
            extra: false,
        }
    }

    /// Create a custom authenticated probe under the API prefix.
    pub fn custom(name: String, path: String) -> Self {
        Self {
            name,
            path,
            anchor: Anchor::Api,
            params: Vec::new(),
            authenticated: true,
            extra: true,
        }
    }

    /// Probe for a single named player: `{prefix}/player?name=<player>`.
    pub fn player(player: &str) -> Self {
        Self::custom(format!("Player {}", player), "/player".to_string())
            .with_param("name", player)
    }

    /// Append an extra query parameter.
    pub fn with_param(mut self, key: &str, value: &str) -> Self {
        self.params.push((key.to_string(), value.to_string()));
        self
    }

    /// Absolute path for this probe under `config`, without query string.
    pub fn resolve_path(&self, config: &RunConfig) -> String {
        let base = match self.anchor {
            Anchor::Root => config.base_url(),
            Anchor::Api => config.api_base(),
        };
        format!("{}{}", base, self.path)
    }

    /// Full request URL for this probe under `config`.
    pub fn request_url(&self, config: &RunConfig) -> String {
        let token = if self.authenticated {
            config.token()
        } else {
            None
        };
        build_url(
            &self.resolve_path(config),
            token,
            &query_fragments(&self.params),
        )
    }
}

/// The fixed seven-probe catalog.
pub fn standard_catalog() -> Vec<ProbeSpec> {
    BuiltinProbe::ALL
        .iter()
        .copied()
        .map(ProbeSpec::from_builtin)
        .collect()
}

/// Probes for a run: the standard catalog, plus the player lookup last
/// when the config names a player.
pub fn catalog_for(config: &RunConfig) -> Vec<ProbeSpec> {
    let mut probes = standard_catalog();
    if let Some(player) = config.player() {
        probes.push(ProbeSpec::player(player));
    }
    probes
}

use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct PlanConnection {
    pub geolocation: String
}

#[derive(Deserialize, Debug, Clone)]
pub struct PlanKillData {
    #[serde(default)]
    pub player_kills_total: u64,
    #[serde(default)]
    pub mob_kills_total: u64,
    #[serde(default)]
    pub deaths_total: u64
}

/// Analytics payload for one player. Only a slice of the upstream document
/// is modeled; the rest is ignored on decode.
#[derive(Deserialize, Debug, Clone)]
pub struct PlanPlayer {
    pub player_name: Option<String>,
    pub player_uuid: Option<String>,
    #[serde(default)]
    pub connections: Vec<PlanConnection>,
    pub kill_data: Option<PlanKillData>
}

impl PlanPlayer {
    /// Country of the most recent connection, when the upstream reports one.
    pub fn geolocation(&self) -> Option<&str> {
        self.connections.first().map(|c| c.geolocation.as_str())
    }
}

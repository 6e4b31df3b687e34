use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct ConnectedPlayer {
    pub name_clean: String,
    pub uuid: String
}

#[derive(Deserialize, Debug, Clone)]
pub struct StatusPlayers {
    pub online: u32,
    pub max: u32,
    #[serde(default)]
    pub list: Vec<ConnectedPlayer>
}

/// Live population snapshot from the status aggregation service. Replaced
/// wholesale on each poll; never diffed against the previous one.
#[derive(Deserialize, Debug, Clone)]
pub struct ServerStatus {
    pub online: bool,
    pub players: StatusPlayers
}

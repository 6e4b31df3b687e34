use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct Player {
    pub uuid: String,
    pub username: String,
    pub nickname: Option<String>,
    #[serde(rename = "playtimeMs")]
    pub playtime_ms: u64,
    #[serde(rename = "playtimeHours")]
    pub playtime_hours: f64,
    #[serde(rename = "playtimeFormatted")]
    pub playtime_formatted: String,
    pub balance: f64,
    #[serde(rename = "lastLogin")]
    pub last_login: String,
    #[serde(rename = "lastLogout")]
    pub last_logout: String,
    pub skin: Option<String>,
    pub votifier: Option<u64>
}

#[derive(Deserialize, Debug, Clone)]
pub struct PlayersResponse {
    pub count: u64,
    pub timezone: String,
    pub players: Vec<Player>
}

use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct WidgetMember {
    pub id: String,
    pub username: String,
    pub avatar: Option<String>,
    pub status: String
}

/// Chat-widget payload. Only `presence_count` is consumed by views; the
/// member list rides along for completeness.
#[derive(Deserialize, Debug, Clone)]
pub struct WidgetData {
    pub id: String,
    pub name: String,
    pub instant_invite: Option<String>,
    pub presence_count: u32,
    #[serde(default)]
    pub members: Vec<WidgetMember>
}

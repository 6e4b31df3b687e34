use crate::api::players::PlayersResponse;
use crate::api::status::ServerStatus;
use crate::api::widget::WidgetData;

/// Home-page widget figures, joined from whichever snapshots have loaded.
/// Missing sources read as offline/zero until their first poll lands.
#[derive(Debug, Clone, Default)]
pub struct HomeSummary {
    pub online: bool,
    pub players_online: u32,
    pub players_max: u32,
    pub chat_presence: u32,
    pub roster_count: u64
}

pub fn summarize(
    status: Option<&ServerStatus>,
    widget: Option<&WidgetData>,
    roster: Option<&PlayersResponse>
) -> HomeSummary {
    HomeSummary {
        online: status.map(|s| s.online).unwrap_or(false),
        players_online: status.map(|s| s.players.online).unwrap_or(0),
        players_max: status.map(|s| s.players.max).unwrap_or(0),
        chat_presence: widget.map(|w| w.presence_count).unwrap_or(0),
        roster_count: roster.map(|r| r.count).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::status::StatusPlayers;

    #[test]
    fn missing_snapshots_read_as_offline() {
        let summary = summarize(None, None, None);
        assert!(!summary.online);
        assert_eq!(summary.players_online, 0);
        assert_eq!(summary.chat_presence, 0);
    }

    #[test]
    fn loaded_snapshots_fill_the_summary() {
        let status = ServerStatus {
            online: true,
            players: StatusPlayers { online: 17, max: 100, list: Vec::new() }
        };
        let widget = WidgetData {
            id: "1".to_string(),
            name: "Hub".to_string(),
            instant_invite: None,
            presence_count: 42,
            members: Vec::new()
        };

        let summary = summarize(Some(&status), Some(&widget), None);
        assert!(summary.online);
        assert_eq!(summary.players_online, 17);
        assert_eq!(summary.players_max, 100);
        assert_eq!(summary.chat_presence, 42);
    }
}
